use common::model::export::{export_file_name, ExportFormat, ExportRequest};
use common::reports::{export_request, ReportQuery, ReportRow};
use gloo_console::log;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::{show_error, show_toast};
use crate::session;
use crate::web::clock::timestamp;
use crate::web::download::{filename_from_disposition, save_bytes};
use crate::web::http::{self, ApiError};

use super::messages::Msg;
use super::state::ReportScreen;

pub fn update<R: ReportRow>(
    component: &mut ReportScreen<R>,
    ctx: &Context<ReportScreen<R>>,
    msg: Msg<R>,
) -> bool {
    match msg {
        Msg::SetFrom(value) => {
            component.from = value;
            true
        }
        Msg::SetTo(value) => {
            component.to = value;
            true
        }
        Msg::SetFilter(key, value) => {
            component.filters.insert(key.to_string(), value);
            true
        }
        Msg::Submit => {
            if component.loading {
                return false;
            }
            // Range errors stop here; nothing is sent.
            let query = match ReportQuery::build(&component.from, &component.to, &component.filters) {
                Ok(query) => query,
                Err(e) => {
                    show_error(&e.to_string());
                    return false;
                }
            };
            component.loading = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = http::post_json::<_, Vec<R>>(R::ENDPOINT, &query).await;
                link.send_message(Msg::Loaded(result));
            });
            true
        }
        Msg::Loaded(result) => {
            component.loading = false;
            component.searched = true;
            match result {
                Ok(rows) => {
                    log!(format!("{}: {} row(s)", R::TITLE, rows.len()));
                    component.rows = rows;
                    component.search.clear();
                    component.page = 1;
                }
                Err(e) => session::report(component.session.as_ref(), &e),
            }
            true
        }
        Msg::Search(text) => {
            component.search = text;
            component.page = 1;
            true
        }
        Msg::Page(page) => {
            component.page = page;
            true
        }
        Msg::Export(format) => {
            if component.exporting {
                return false;
            }
            let filtered = component.filtered();
            if filtered.is_empty() {
                show_toast("Nothing to export");
                return false;
            }
            let request = export_request::<R>(&filtered);
            component.exporting = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = download(format, request).await;
                link.send_message(Msg::Exported(result));
            });
            true
        }
        Msg::Exported(result) => {
            component.exporting = false;
            if let Err(e) = result {
                session::report(component.session.as_ref(), &e);
            }
            true
        }
    }
}

async fn download(format: ExportFormat, request: ExportRequest) -> Result<(), ApiError> {
    let (bytes, disposition) = http::post_for_file(format.endpoint(), &request).await?;
    let file_name = disposition
        .as_deref()
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| export_file_name(&request.title, &timestamp(), format));
    save_bytes(&bytes, format.content_type(), &file_name).map_err(ApiError::Decode)
}
