use common::model::export::ExportFormat;

use crate::web::http::ApiError;

pub enum Msg<R> {
    SetFrom(String),
    SetTo(String),
    SetFilter(&'static str, String),
    Submit,
    Loaded(Result<Vec<R>, ApiError>),
    Search(String),
    Page(usize),
    Export(ExportFormat),
    Exported(Result<(), ApiError>),
}
