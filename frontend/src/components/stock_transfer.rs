use common::model::transactions::{
    StockTransferLine, StockTransferRequest, Warehouse, STOCK_TRANSFER_URL, WAREHOUSES_URL,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::{show_error, show_toast};
use crate::session::{self, SessionContext};
use crate::web::http::{self, ApiError, Method};

#[derive(Clone, Copy)]
pub enum LineField {
    ItemCode,
    LotNo,
    Qty,
}

#[derive(Clone, Default, PartialEq)]
struct LineInput {
    item_code: String,
    lot_no: String,
    qty: String,
}

impl LineInput {
    /// Unparseable quantities become NaN so the request builder rejects them.
    fn to_line(&self) -> StockTransferLine {
        StockTransferLine {
            item_code: self.item_code.clone(),
            lot_no: self.lot_no.clone(),
            qty: self.qty.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

pub enum Msg {
    WarehousesLoaded(Result<Vec<Warehouse>, ApiError>),
    SetFrom(String),
    SetTo(String),
    AddLine,
    RemoveLine(usize),
    SetLine(usize, LineField, String),
    Submit,
    Submitted(Result<String, ApiError>),
}

pub struct StockTransfer {
    warehouses: Vec<Warehouse>,
    from: String,
    to: String,
    lines: Vec<LineInput>,
    saving: bool,
    session: Option<SessionContext>,
}

impl Component for StockTransfer {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            warehouses: Vec::new(),
            from: String::new(),
            to: String::new(),
            lines: vec![LineInput::default()],
            saving: false,
            session: session::from_context(ctx),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = http::get_json(WAREHOUSES_URL, &[]).await;
                link.send_message(Msg::WarehousesLoaded(result));
            });
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::WarehousesLoaded(result) => {
                match result {
                    Ok(warehouses) => self.warehouses = warehouses,
                    Err(e) => session::report(self.session.as_ref(), &e),
                }
                true
            }
            Msg::SetFrom(value) => {
                self.from = value;
                true
            }
            Msg::SetTo(value) => {
                self.to = value;
                true
            }
            Msg::AddLine => {
                self.lines.push(LineInput::default());
                true
            }
            Msg::RemoveLine(index) => {
                if index < self.lines.len() {
                    self.lines.remove(index);
                }
                true
            }
            Msg::SetLine(index, field, value) => {
                if let Some(line) = self.lines.get_mut(index) {
                    match field {
                        LineField::ItemCode => line.item_code = value,
                        LineField::LotNo => line.lot_no = value,
                        LineField::Qty => line.qty = value,
                    }
                }
                true
            }
            Msg::Submit => {
                let lines: Vec<StockTransferLine> = self.lines.iter().map(LineInput::to_line).collect();
                let transferred_by = self
                    .session
                    .as_ref()
                    .map(SessionContext::user_id)
                    .unwrap_or_default();
                match StockTransferRequest::build(&self.from, &self.to, &lines, &transferred_by) {
                    Ok(request) => {
                        self.saving = true;
                        let link = ctx.link().clone();
                        spawn_local(async move {
                            let result = http::mutate(Method::Post, STOCK_TRANSFER_URL, &request).await;
                            link.send_message(Msg::Submitted(result));
                        });
                        true
                    }
                    Err(e) => {
                        show_error(&e.to_string());
                        false
                    }
                }
            }
            Msg::Submitted(result) => {
                self.saving = false;
                match result {
                    Ok(message) => {
                        show_toast(&message);
                        self.lines = vec![LineInput::default()];
                    }
                    Err(e) => session::report(self.session.as_ref(), &e),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let warehouse_select = |value: &str, on_change: Callback<Event>| {
            html! {
                <select onchange={on_change}>
                    <option value="" selected={value.is_empty()}>{"Select warehouse"}</option>
                    { for self.warehouses.iter().map(|w| html! {
                        <option value={w.warehouse_code.clone()} selected={w.warehouse_code == value}>
                            { format!("{} - {}", w.warehouse_code, w.warehouse_name) }
                        </option>
                    }) }
                </select>
            }
        };
        let selected = |e: Event| e.target_unchecked_into::<HtmlSelectElement>().value();

        html! {
            <section class="screen">
                <h2>{"Stock Transfer"}</h2>
                <div class="card">
                    <div class="form-grid">
                        <label class="field">
                            <span class="field-label">{"From warehouse"}</span>
                            { warehouse_select(&self.from, link.callback(move |e| Msg::SetFrom(selected(e)))) }
                        </label>
                        <label class="field">
                            <span class="field-label">{"To warehouse"}</span>
                            { warehouse_select(&self.to, link.callback(move |e| Msg::SetTo(selected(e)))) }
                        </label>
                    </div>
                </div>
                <div class="card">
                    <table class="data-table">
                        <thead>
                            <tr><th>{"#"}</th><th>{"Item Code"}</th><th>{"Lot No"}</th><th>{"Qty"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            { for self.lines.iter().enumerate().map(|(index, line)| {
                                let input = |field: LineField, value: &str, kind: &'static str| html! {
                                    <input type={kind} value={value.to_string()}
                                        oninput={link.callback(move |e: InputEvent| {
                                            Msg::SetLine(index, field, e.target_unchecked_into::<HtmlInputElement>().value())
                                        })} />
                                };
                                html! {
                                    <tr>
                                        <td>{ index + 1 }</td>
                                        <td>{ input(LineField::ItemCode, &line.item_code, "text") }</td>
                                        <td>{ input(LineField::LotNo, &line.lot_no, "text") }</td>
                                        <td>{ input(LineField::Qty, &line.qty, "number") }</td>
                                        <td>
                                            <button class="icon-btn" title="Remove line" onclick={link.callback(move |_| Msg::RemoveLine(index))}>
                                                <span class="material-symbols-outlined">{"delete"}</span>
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                    <div class="form-actions">
                        <button class="btn" onclick={link.callback(|_| Msg::AddLine)}>{"Add line"}</button>
                        <button class="btn primary" disabled={self.saving} onclick={link.callback(|_| Msg::Submit)}>
                            { if self.saving { "Saving..." } else { "Transfer" } }
                        </button>
                    </div>
                </div>
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_quantity_is_rejected_by_the_builder() {
        let line = LineInput {
            item_code: "A".into(),
            lot_no: "L1".into(),
            qty: "x".into(),
        }
        .to_line();
        assert!(line.qty.is_nan());
        assert!(StockTransferRequest::build("W1", "W2", &[line], "u").is_err());
    }
}
