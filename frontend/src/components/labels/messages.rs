use common::labels::PrintProgress;
use common::model::transactions::{ItemCode, ItemDetail, LastSerial, LotNumber};

use crate::web::http::ApiError;

pub enum Msg {
    LoadItems,
    ItemsLoaded(Result<Vec<ItemCode>, ApiError>),
    SelectItem(String),
    /// Answers carry the selection they were asked for, so stale ones are dropped.
    LotsLoaded(String, Result<Vec<LotNumber>, ApiError>),
    SelectLot(String),
    /// Item code, lot number, then the answer.
    DetailLoaded(String, String, Result<(ItemDetail, LastSerial), ApiError>),
    SetPerLabel(String),
    SetTotal(String),
    Generate,
    SetRowQty(usize, String),
    ConfirmPrint,
    CancelPrint,
    Print,
    /// Progress plus the error that stopped the run, if any.
    Printed(PrintProgress, Option<ApiError>),
}
