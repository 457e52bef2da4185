use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::components::top_sheet::TopSheet;

use super::messages::Msg;
use super::state::LabelScreen;

fn selected(e: Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

fn typed(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn view(component: &LabelScreen, ctx: &Context<LabelScreen>) -> Html {
    let link = ctx.link();
    html! {
        <section class="screen">
            <h2>{ ctx.props().source.title() }</h2>
            { build_selection(component, link) }
            { build_batch(component, link) }
            if let Some(progress) = &component.progress {
                <div class={classes!("card", "print-summary", (!progress.is_complete()).then_some("failed"))}>
                    { progress.summary() }
                </div>
            }
            <TopSheet title="Print labels?" node_ref={component.confirm_ref.clone()}>
                <p>{ format!(
                    "{} label(s), {} in total, will be printed for {} / {}.",
                    component.batch.rows.len(),
                    component.batch.total_qty(),
                    component.item_code,
                    component.lot_no
                ) }</p>
                <p class="hint">{"Each label is recorded as it prints. If one fails, the ones before it stay printed."}</p>
                <div class="form-actions">
                    <button class="btn primary" onclick={link.callback(|_| Msg::Print)}>{"Print"}</button>
                    <button class="btn" onclick={link.callback(|_| Msg::CancelPrint)}>{"Cancel"}</button>
                </div>
            </TopSheet>
        </section>
    }
}

fn build_selection(component: &LabelScreen, link: &Scope<LabelScreen>) -> Html {
    html! {
        <div class="card">
            <div class="form-grid">
                <label class="field">
                    <span class="field-label">{"Item Code"}</span>
                    <select onchange={link.callback(|e| Msg::SelectItem(selected(e)))}>
                        <option value="" selected={component.item_code.is_empty()}>{"Select item"}</option>
                        { for component.items.iter().map(|item| html! {
                            <option value={item.item_code.clone()} selected={item.item_code == component.item_code}>
                                { format!("{} - {}", item.item_code, item.item_description) }
                            </option>
                        }) }
                    </select>
                </label>
                <label class="field">
                    <span class="field-label">{"Lot No"}</span>
                    <select disabled={component.item_code.is_empty()} onchange={link.callback(|e| Msg::SelectLot(selected(e)))}>
                        <option value="" selected={component.lot_no.is_empty()}>{"Select lot"}</option>
                        { for component.lots.iter().map(|lot| html! {
                            <option value={lot.lot_no.clone()} selected={lot.lot_no == component.lot_no}>{ lot.lot_no.clone() }</option>
                        }) }
                    </select>
                </label>
                <label class="field">
                    <span class="field-label">{"Qty per label"}</span>
                    <input type="number" min="1" step="1" value={component.qty_per_label.clone()}
                        oninput={link.callback(|e| Msg::SetPerLabel(typed(e)))} />
                </label>
                <label class="field">
                    <span class="field-label">{"Total qty"}</span>
                    <input type="number" min="1" step="1" value={component.total_qty.clone()}
                        oninput={link.callback(|e| Msg::SetTotal(typed(e)))} />
                </label>
            </div>
            if let Some(detail) = &component.detail {
                <div class="detail-strip">
                    <span>{ detail.item_description.clone() }</span>
                    <span>{ format!("UOM: {}", detail.uom) }</span>
                    <span>{ format!("Remaining: {}", detail.remaining_qty) }</span>
                    <span>{ format!("Last serial: {}", component.last_serial.unwrap_or_default()) }</span>
                </div>
            }
            <div class="form-actions">
                <button class="btn primary" disabled={component.detail.is_none()} onclick={link.callback(|_| Msg::Generate)}>
                    {"Generate"}
                </button>
            </div>
        </div>
    }
}

fn build_batch(component: &LabelScreen, link: &Scope<LabelScreen>) -> Html {
    if component.batch.rows.is_empty() {
        return html! {};
    }
    html! {
        <div class="card">
            <table class="data-table">
                <thead>
                    <tr><th>{"#"}</th><th>{"Serial No"}</th><th>{"Qty"}</th></tr>
                </thead>
                <tbody>
                    { for component.batch.rows.iter().enumerate().map(|(index, row)| html! {
                        <tr>
                            <td>{ index + 1 }</td>
                            <td>{ row.serial }</td>
                            <td>
                                <input type="number" min="1" step="1" value={row.qty.to_string()}
                                    onchange={link.callback(move |e: Event| {
                                        Msg::SetRowQty(index, e.target_unchecked_into::<HtmlInputElement>().value())
                                    })} />
                            </td>
                        </tr>
                    }) }
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="2">{"Total"}</td>
                        <td>{ component.batch.total_qty() }</td>
                    </tr>
                </tfoot>
            </table>
            <div class="form-actions">
                <button class="btn primary" disabled={component.printing} onclick={link.callback(|_| Msg::ConfirmPrint)}>
                    { if component.printing { "Printing..." } else { "Print labels" } }
                </button>
            </div>
        </div>
    }
}
