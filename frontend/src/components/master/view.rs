//! Form and table rendering for [`MasterScreen`].
//!
//! Inputs are generated from the record's `FieldSpec` table, so adding a
//! field to a record type is enough to show it here.

use common::auth::parse_menu_access;
use common::forms::{FieldKind, FieldSpec, MasterRecord};
use common::listing::DEFAULT_PAGE_SIZE;
use common::menu::leaves;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::components::table::{pager, search_box};

use super::messages::Msg;
use super::state::MasterScreen;

pub fn view<M: MasterRecord>(component: &MasterScreen<M>, ctx: &Context<MasterScreen<M>>) -> Html {
    let link = ctx.link();
    html! {
        <section class="screen">
            <h2>{ M::TITLE }</h2>
            { build_form(component, link) }
            { build_table(component, link) }
        </section>
    }
}

fn build_form<M: MasterRecord>(component: &MasterScreen<M>, link: &Scope<MasterScreen<M>>) -> Html {
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    let editing = component.form.is_editing();

    html! {
        <form class="card" {onsubmit}>
            <div class="form-grid">
                { for M::fields().iter().map(|spec| build_field(component, link, spec)) }
            </div>
            <div class="form-actions">
                <button class="btn primary" type="submit" disabled={component.saving}>
                    { if editing { "Update" } else { "Save" } }
                </button>
                <button class="btn" type="button" onclick={link.callback(|_| Msg::Cancel)}>
                    { if editing { "Cancel" } else { "Clear" } }
                </button>
            </div>
        </form>
    }
}

fn build_field<M: MasterRecord>(
    component: &MasterScreen<M>,
    link: &Scope<MasterScreen<M>>,
    spec: &FieldSpec,
) -> Html {
    let key = spec.key;
    let value = component.form.value(key).to_string();
    let error = component.form.error_for(key).map(|e| e.message.clone());
    let text_input = link.callback(move |e: InputEvent| {
        Msg::SetField(key, e.target_unchecked_into::<HtmlInputElement>().value())
    });

    let input = match spec.kind {
        FieldKind::Text => html! {
            <input type="text" value={value} oninput={text_input} />
        },
        FieldKind::Number { min, max, integer } => html! {
            <input
                type="number"
                value={value}
                min={min.map(|m| m.to_string())}
                max={max.map(|m| m.to_string())}
                step={if integer { "1" } else { "any" }}
                oninput={text_input}
            />
        },
        FieldKind::Select(options) => html! {
            <select onchange={link.callback(move |e: Event| {
                Msg::SetField(key, e.target_unchecked_into::<HtmlSelectElement>().value())
            })}>
                if !spec.required {
                    <option value="" selected={value.is_empty()}>{"Select"}</option>
                }
                { for options.iter().map(|(option, label)| html! {
                    <option value={*option} selected={value == *option}>{ *label }</option>
                }) }
            </select>
        },
        FieldKind::Toggle => html! {
            <input
                type="checkbox"
                checked={value == "true"}
                onchange={link.callback(move |e: Event| {
                    let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
                    Msg::SetField(key, checked.to_string())
                })}
            />
        },
        FieldKind::AccessList(scope) => {
            let selected = parse_menu_access(&value);
            html! {
                <div class="access-list">
                    { for leaves(scope).into_iter().map(|node| {
                        let code = node.code;
                        html! {
                            <label class="access-item">
                                <input
                                    type="checkbox"
                                    checked={selected.contains(&code)}
                                    onchange={link.callback(move |_| Msg::ToggleAccess(key, code))}
                                />
                                { node.label }
                            </label>
                        }
                    }) }
                </div>
            }
        }
    };

    html! {
        <label class={classes!("field", matches!(spec.kind, FieldKind::AccessList(_)).then_some("wide"))}>
            <span class="field-label">
                { spec.label }
                if spec.required { <span class="required">{"*"}</span> }
            </span>
            { input }
            if let Some(error) = error {
                <span class="field-error">{ error }</span>
            }
        </label>
    }
}

fn build_table<M: MasterRecord>(component: &MasterScreen<M>, link: &Scope<MasterScreen<M>>) -> Html {
    let page = component.visible_page();
    let columns: Vec<&FieldSpec> = M::fields().iter().collect();

    html! {
        <div class="card">
            <div class="table-toolbar">
                { search_box(&component.search, link.callback(Msg::Search)) }
                if component.loading {
                    <span class="loading">{"Loading..."}</span>
                }
            </div>
            <div class="table-wrap">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"#"}</th>
                            { for columns.iter().map(|spec| html! { <th>{ spec.label }</th> }) }
                            <th>{"Updated By"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        if page.items.is_empty() {
                            <tr><td class="empty" colspan={(columns.len() + 3).to_string()}>{"No records found"}</td></tr>
                        }
                        { for page.items.iter().enumerate().map(|(index, row)| {
                            let number = (page.page - 1) * DEFAULT_PAGE_SIZE + index + 1;
                            let edit_row = (*row).clone();
                            html! {
                                <tr>
                                    <td>{ number }</td>
                                    { for columns.iter().map(|spec| html! { <td>{ row.cell(spec.key) }</td> }) }
                                    <td>{ row.cell("updated_by") }</td>
                                    <td>
                                        <button class="icon-btn" title="Edit" onclick={link.callback(move |_| Msg::Edit(edit_row.clone()))}>
                                            <span class="material-symbols-outlined">{"edit"}</span>
                                        </button>
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </div>
            { pager(&page, DEFAULT_PAGE_SIZE, link.callback(Msg::Page)) }
        </div>
    }
}
