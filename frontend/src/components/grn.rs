use common::model::transactions::{
    GrnHeader, GrnReceiptRequest, GRN_DETAILS_URL, GRN_RECEIVE_URL,
};
use common::reports::format_qty;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::{show_error, show_toast};
use crate::session::{self, SessionContext};
use crate::web::http::{self, ApiError, Method};

pub enum Msg {
    SetGrnNo(String),
    Fetch,
    Fetched(Result<GrnHeader, ApiError>),
    SetReceived(usize, String),
    Submit,
    Submitted(Result<String, ApiError>),
}

/// GRN receipt: look up a goods receipt note, enter received quantities, post them.
pub struct GrnReceipt {
    grn_no: String,
    header: Option<GrnHeader>,
    /// Raw received-qty inputs, one per header line.
    received: Vec<String>,
    loading: bool,
    saving: bool,
    session: Option<SessionContext>,
}

/// Copies typed quantities onto the header lines; blanks count as zero.
fn apply_received(header: &GrnHeader, received: &[String]) -> Result<GrnHeader, String> {
    let mut header = header.clone();
    for (line, raw) in header.lines.iter_mut().zip(received) {
        let raw = raw.trim();
        line.received_qty = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("Line {}: enter a number", line.item_code))?
        };
    }
    Ok(header)
}

impl Component for GrnReceipt {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            grn_no: String::new(),
            header: None,
            received: Vec::new(),
            loading: false,
            saving: false,
            session: session::from_context(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetGrnNo(value) => {
                self.grn_no = value;
                true
            }
            Msg::Fetch => {
                let grn_no = self.grn_no.trim().to_string();
                if grn_no.is_empty() {
                    show_error("GRN number is required");
                    return false;
                }
                self.loading = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = http::get_json(GRN_DETAILS_URL, &[("grn_no", grn_no.as_str())]).await;
                    link.send_message(Msg::Fetched(result));
                });
                true
            }
            Msg::Fetched(result) => {
                self.loading = false;
                match result {
                    Ok(header) => {
                        self.received = vec![String::new(); header.lines.len()];
                        self.header = Some(header);
                    }
                    Err(e) => session::report(self.session.as_ref(), &e),
                }
                true
            }
            Msg::SetReceived(index, value) => {
                if let Some(slot) = self.received.get_mut(index) {
                    *slot = value;
                }
                true
            }
            Msg::Submit => {
                let Some(header) = &self.header else {
                    return false;
                };
                let received_by = self
                    .session
                    .as_ref()
                    .map(SessionContext::user_id)
                    .unwrap_or_default();
                let request = apply_received(header, &self.received).and_then(|h| {
                    GrnReceiptRequest::build(&h, &received_by).map_err(|e| e.to_string())
                });
                match request {
                    Ok(request) => {
                        self.saving = true;
                        let link = ctx.link().clone();
                        spawn_local(async move {
                            let result = http::mutate(Method::Post, GRN_RECEIVE_URL, &request).await;
                            link.send_message(Msg::Submitted(result));
                        });
                        true
                    }
                    Err(message) => {
                        show_error(&message);
                        false
                    }
                }
            }
            Msg::Submitted(result) => {
                self.saving = false;
                match result {
                    Ok(message) => {
                        show_toast(&message);
                        self.header = None;
                        self.received.clear();
                        self.grn_no.clear();
                    }
                    Err(e) => session::report(self.session.as_ref(), &e),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Fetch
        });

        html! {
            <section class="screen">
                <h2>{"GRN Receipt"}</h2>
                <form class="card inline-form" {onsubmit}>
                    <label class="field">
                        <span class="field-label">{"GRN No"}</span>
                        <input type="text" value={self.grn_no.clone()}
                            oninput={link.callback(|e: InputEvent| Msg::SetGrnNo(e.target_unchecked_into::<HtmlInputElement>().value()))} />
                    </label>
                    <button class="btn primary" type="submit" disabled={self.loading}>{"Fetch"}</button>
                </form>
                if let Some(header) = &self.header {
                    <div class="card">
                        <div class="detail-strip">
                            <span>{ format!("GRN: {}", header.grn_no) }</span>
                            <span>{ format!("Date: {}", header.grn_date) }</span>
                            <span>{ format!("Vendor: {} - {}", header.vendor_code, header.vendor_name) }</span>
                        </div>
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Line"}</th><th>{"Item Code"}</th><th>{"Description"}</th><th>{"UOM"}</th>
                                    <th>{"Ordered"}</th><th>{"Pending"}</th><th>{"Received"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for header.lines.iter().enumerate().map(|(index, line)| html! {
                                    <tr>
                                        <td>{ line.line_no.clone() }</td>
                                        <td>{ line.item_code.clone() }</td>
                                        <td>{ line.item_description.clone() }</td>
                                        <td>{ line.uom.clone() }</td>
                                        <td>{ format_qty(line.ordered_qty) }</td>
                                        <td>{ format_qty(line.pending_qty) }</td>
                                        <td>
                                            <input type="number" min="0" step="any"
                                                value={self.received.get(index).cloned().unwrap_or_default()}
                                                oninput={link.callback(move |e: InputEvent| {
                                                    Msg::SetReceived(index, e.target_unchecked_into::<HtmlInputElement>().value())
                                                })} />
                                        </td>
                                    </tr>
                                }) }
                            </tbody>
                        </table>
                        <div class="form-actions">
                            <button class="btn primary" disabled={self.saving} onclick={link.callback(|_| Msg::Submit)}>
                                { if self.saving { "Saving..." } else { "Receive" } }
                            </button>
                        </div>
                    </div>
                }
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::transactions::GrnLine;

    fn header() -> GrnHeader {
        GrnHeader {
            grn_no: "GRN-1".into(),
            lines: vec![
                GrnLine {
                    item_code: "A".into(),
                    pending_qty: 10.0,
                    ..Default::default()
                },
                GrnLine {
                    item_code: "B".into(),
                    pending_qty: 5.0,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn blank_inputs_count_as_zero() {
        let applied = apply_received(&header(), &["4".into(), " ".into()]).unwrap();
        assert_eq!(applied.lines[0].received_qty, 4.0);
        assert_eq!(applied.lines[1].received_qty, 0.0);
    }

    #[test]
    fn non_numeric_input_names_the_line() {
        assert_eq!(
            apply_received(&header(), &["".into(), "abc".into()]),
            Err("Line B: enter a number".to_string())
        );
    }
}
