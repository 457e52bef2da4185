use common::listing::DEFAULT_PAGE_SIZE;
use common::model::export::ExportFormat;
use common::reports::ReportRow;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::table::{pager, search_box, stat_cards};

use super::messages::Msg;
use super::state::ReportScreen;

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn view<R: ReportRow>(component: &ReportScreen<R>, ctx: &Context<ReportScreen<R>>) -> Html {
    let link = ctx.link();
    html! {
        <section class="screen">
            <h2>{ R::TITLE }</h2>
            { build_filters(component, link) }
            if component.searched {
                { stat_cards(&R::stats(&component.rows)) }
                { build_results(component, link) }
            }
        </section>
    }
}

fn build_filters<R: ReportRow>(component: &ReportScreen<R>, link: &Scope<ReportScreen<R>>) -> Html {
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <form class="card" {onsubmit}>
            <div class="form-grid">
                <label class="field">
                    <span class="field-label">{"From"}</span>
                    <input type="date" value={component.from.clone()} oninput={link.callback(|e| Msg::SetFrom(input_value(e)))} />
                </label>
                <label class="field">
                    <span class="field-label">{"To"}</span>
                    <input type="date" value={component.to.clone()} oninput={link.callback(|e| Msg::SetTo(input_value(e)))} />
                </label>
                { for R::filters().iter().map(|filter| {
                    let key = filter.key;
                    let value = component.filters.get(key).cloned().unwrap_or_default();
                    html! {
                        <label class="field">
                            <span class="field-label">{ filter.label }</span>
                            <input type="text" {value} oninput={link.callback(move |e| Msg::SetFilter(key, input_value(e)))} />
                        </label>
                    }
                }) }
            </div>
            <div class="form-actions">
                <button class="btn primary" type="submit" disabled={component.loading}>
                    { if component.loading { "Searching..." } else { "Search" } }
                </button>
            </div>
        </form>
    }
}

fn build_results<R: ReportRow>(component: &ReportScreen<R>, link: &Scope<ReportScreen<R>>) -> Html {
    let page = component.visible_page();
    let columns = R::columns();

    html! {
        <div class="card">
            <div class="table-toolbar">
                { search_box(&component.search, link.callback(Msg::Search)) }
                <div class="export-actions">
                    <button class="btn" disabled={component.exporting} onclick={link.callback(|_| Msg::Export(ExportFormat::Xlsx))}>
                        <span class="material-symbols-outlined">{"table_view"}</span>{"Excel"}
                    </button>
                    <button class="btn" disabled={component.exporting} onclick={link.callback(|_| Msg::Export(ExportFormat::Pdf))}>
                        <span class="material-symbols-outlined">{"picture_as_pdf"}</span>{"PDF"}
                    </button>
                </div>
            </div>
            <div class="table-wrap">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"#"}</th>
                            { for columns.iter().map(|c| html! { <th>{ c.header }</th> }) }
                        </tr>
                    </thead>
                    <tbody>
                        if page.items.is_empty() {
                            <tr><td class="empty" colspan={(columns.len() + 1).to_string()}>{"No records found"}</td></tr>
                        }
                        { for page.items.iter().enumerate().map(|(index, row)| html! {
                            <tr>
                                <td>{ (page.page - 1) * DEFAULT_PAGE_SIZE + index + 1 }</td>
                                { for columns.iter().map(|c| html! { <td>{ row.cell(c.key) }</td> }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
            { pager(&page, DEFAULT_PAGE_SIZE, link.callback(Msg::Page)) }
        </div>
    }
}
