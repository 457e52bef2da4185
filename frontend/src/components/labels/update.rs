use common::labels::{LabelBatch, LabelRow, PrintProgress};
use common::model::transactions::{ItemDetail, LabelSource, LastSerial, PrintInsertRequest};
use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::{show_error, show_toast};
use crate::components::top_sheet::{close_top_sheet, open_top_sheet};
use crate::session;
use crate::web::http::{self, ApiError, Method};

use super::messages::Msg;
use super::state::{parse_qty, LabelScreen};

pub fn update(component: &mut LabelScreen, ctx: &Context<LabelScreen>, msg: Msg) -> bool {
    let source = ctx.props().source;
    match msg {
        Msg::LoadItems => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = http::get_json(&source.item_codes_url(), &[]).await;
                link.send_message(Msg::ItemsLoaded(result));
            });
            false
        }
        Msg::ItemsLoaded(result) => {
            match result {
                Ok(items) => component.items = items,
                Err(e) => session::report(component.session.as_ref(), &e),
            }
            true
        }
        Msg::SelectItem(item_code) => {
            component.item_code = item_code.clone();
            component.lots.clear();
            component.clear_lot();
            if item_code.is_empty() {
                return true;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = http::get_json(
                    &source.lot_numbers_url(),
                    &[("item_code", item_code.as_str())],
                )
                .await;
                link.send_message(Msg::LotsLoaded(item_code, result));
            });
            true
        }
        Msg::LotsLoaded(item_code, result) => {
            if item_code != component.item_code {
                return false;
            }
            match result {
                Ok(lots) => component.lots = lots,
                Err(e) => session::report(component.session.as_ref(), &e),
            }
            true
        }
        Msg::SelectLot(lot_no) => {
            component.clear_lot();
            component.lot_no = lot_no.clone();
            if lot_no.is_empty() {
                return true;
            }
            let item_code = component.item_code.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = load_detail(source, &item_code, &lot_no).await;
                link.send_message(Msg::DetailLoaded(item_code, lot_no, result));
            });
            true
        }
        Msg::DetailLoaded(item_code, lot_no, result) => {
            if !component.is_current_lot(&item_code, &lot_no) {
                return false;
            }
            match result {
                Ok((detail, last)) => {
                    component.detail = Some(detail);
                    component.last_serial = Some(last.last_serial);
                }
                Err(e) => session::report(component.session.as_ref(), &e),
            }
            true
        }
        Msg::SetPerLabel(value) => {
            component.qty_per_label = value;
            true
        }
        Msg::SetTotal(value) => {
            component.total_qty = value;
            true
        }
        Msg::Generate => {
            let (Some(detail), Some(last_serial)) = (&component.detail, component.last_serial) else {
                show_error("Select an item and lot first");
                return false;
            };
            let planned = parse_qty(&component.qty_per_label, "Qty per label")
                .and_then(|per| Ok((per, parse_qty(&component.total_qty, "Total qty")?)))
                .and_then(|(per, total)| {
                    LabelBatch::plan(total, per, last_serial, Some(detail.remaining_qty))
                        .map_err(|e| e.to_string())
                });
            match planned {
                Ok(batch) => {
                    component.batch = batch;
                    component.progress = None;
                }
                Err(message) => show_error(&message),
            }
            true
        }
        Msg::SetRowQty(index, raw) => {
            let result = parse_qty(&raw, "Label qty")
                .and_then(|qty| component.batch.set_qty(index, qty).map_err(|e| e.to_string()));
            if let Err(message) = result {
                show_error(&message);
            }
            true
        }
        Msg::ConfirmPrint => {
            if component.batch.rows.is_empty() {
                show_error("Generate labels before printing");
                return false;
            }
            open_top_sheet(&component.confirm_ref);
            false
        }
        Msg::CancelPrint => {
            close_top_sheet(&component.confirm_ref);
            false
        }
        Msg::Print => {
            close_top_sheet(&component.confirm_ref);
            let Some(detail) = component.detail.clone() else {
                return false;
            };
            if component.printing {
                return false;
            }
            component.printing = true;
            let rows = component.batch.rows.clone();
            let (user_id, plant_code) = component
                .session
                .as_ref()
                .map(|s| (s.user_id(), s.plant_code()))
                .unwrap_or_default();
            let link = ctx.link().clone();
            spawn_local(async move {
                let (progress, error) = print_batch(source, &detail, &rows, &user_id, &plant_code).await;
                link.send_message(Msg::Printed(progress, error));
            });
            true
        }
        Msg::Printed(progress, error) => {
            component.printing = false;
            log!(progress.summary());
            if progress.is_complete() {
                show_toast(&progress.summary());
            } else {
                show_error(&progress.summary());
            }
            if let Some(error) = error.filter(ApiError::invalidates_session) {
                session::report(component.session.as_ref(), &error);
            }
            // Serials were consumed either way; reload stock and last serial.
            if progress.committed > 0 {
                component.batch = LabelBatch::default();
                let lot_no = component.lot_no.clone();
                ctx.link().send_message(Msg::SelectLot(lot_no));
            }
            component.progress = Some(progress);
            true
        }
    }
}

async fn load_detail(
    source: LabelSource,
    item_code: &str,
    lot_no: &str,
) -> Result<(ItemDetail, LastSerial), ApiError> {
    let query = [("item_code", item_code), ("lot_no", lot_no)];
    let detail: ItemDetail = http::get_json(&source.item_detail_url(), &query).await?;
    let last: LastSerial = http::get_json(&source.last_serial_url(), &query).await?;
    Ok((detail, last))
}

/// One insert per serial, in order, stopping at the first failure.
async fn print_batch(
    source: LabelSource,
    detail: &ItemDetail,
    rows: &[LabelRow],
    user_id: &str,
    plant_code: &str,
) -> (PrintProgress, Option<ApiError>) {
    let mut progress = PrintProgress::new(rows.len());
    let url = source.print_insert_url();
    for row in rows {
        let request = PrintInsertRequest::for_row(detail, row, user_id, plant_code);
        match http::mutate(Method::Post, &url, &request).await {
            Ok(_) => progress.committed += 1,
            Err(e) => {
                progress.failure = Some((row.serial, e.to_string()));
                return (progress, Some(e));
            }
        }
    }
    (progress, None)
}
