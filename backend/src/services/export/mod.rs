//! # Export Service Module
//!
//! Renders the rows a report screen currently shows into a downloadable file.
//! The front end posts an [`ExportRequest`] (headers plus formatted cells) and
//! receives the file as an attachment named `<Title>_<YYYYMMDD_HHMMSS>.<ext>`.
//!
//! ## Registered routes (under `/api/export`)
//! - `POST /xlsx`: one worksheet, bold header row, rows mirrored 1:1.
//! - `POST /pdf`: A4 landscape table with the title and a page number on every page.
//!
//! Both routes need a bearer token like every other `/api` route.

mod pdf;
mod xlsx;

use actix_web::http::header::{CacheControl, CacheDirective, ContentDisposition};
use actix_web::http::StatusCode;
use actix_web::web::{self, post, scope};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Scope};
use common::model::envelope::ErrorBody;
use common::model::export::{export_file_name, ExportFormat, ExportRequest};
use log::{error, info};

use crate::config::ServerConfig;
use crate::proxy;

const API_PATH: &str = "/api/export";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{0}")]
    Invalid(String),

    #[error("Export failed: {0}")]
    Render(String),
}

impl ResponseError for ExportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExportError::Invalid(_) => StatusCode::BAD_REQUEST,
            ExportError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(CacheControl(vec![CacheDirective::NoStore]))
            .json(ErrorBody {
                error: self.to_string(),
            })
    }
}

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/xlsx", post().to(process_xlsx))
        .route("/pdf", post().to(process_pdf))
        .default_service(web::to(proxy::not_found))
}

async fn process_xlsx(
    req: HttpRequest,
    payload: web::Json<ExportRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    proxy::token::require_token(&req)?;
    let request = payload.into_inner();
    request.validate().map_err(ExportError::Invalid)?;

    let bytes = xlsx::render(&request).map_err(|e| {
        error!("Excel export of '{}' failed: {}", request.title, e);
        ExportError::Render(e.to_string())
    })?;
    Ok(attachment(&request, ExportFormat::Xlsx, bytes))
}

async fn process_pdf(
    req: HttpRequest,
    payload: web::Json<ExportRequest>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, actix_web::Error> {
    proxy::token::require_token(&req)?;
    let request = payload.into_inner();
    request.validate().map_err(ExportError::Invalid)?;

    let font_dir = config.font_dir.clone();
    let title = request.title.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        pdf::render(&request, &font_dir)
            .map(|bytes| (request, bytes))
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| ExportError::Render(e.to_string()))?;

    let (request, bytes) = rendered.map_err(|e| {
        error!("PDF export of '{}' failed: {}", title, e);
        ExportError::Render(e.to_string())
    })?;
    Ok(attachment(&request, ExportFormat::Pdf, bytes))
}

fn attachment(request: &ExportRequest, format: ExportFormat, bytes: Vec<u8>) -> HttpResponse {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let file_name = export_file_name(&request.title, &timestamp, format);
    info!(
        "Exported {} rows of '{}' as {}",
        request.rows.len(),
        request.title,
        file_name
    );
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(ContentDisposition::attachment(file_name))
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .body(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn app_config() -> web::Data<ServerConfig> {
        web::Data::new(ServerConfig {
            font_dir: "./no-such-fonts".into(),
            ..ServerConfig::default()
        })
    }

    fn sample() -> Value {
        json!({
            "title": "Material Receipt Report",
            "columns": ["GRN No", "Received Qty"],
            "rows": [["GRN-1", "40"], ["GRN-2", "10.5"]]
        })
    }

    #[actix_web::test]
    async fn xlsx_is_returned_as_attachment() {
        let app = test::init_service(
            App::new().app_data(app_config()).service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/export/xlsx")
            .insert_header(("Authorization", "Bearer t"))
            .set_json(sample())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get("content-disposition")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("Material_Receipt_Report_"));
        assert!(disposition.contains(".xlsx"));
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"PK"));
    }

    #[actix_web::test]
    async fn export_requires_token_and_rectangular_rows() {
        let app = test::init_service(
            App::new().app_data(app_config()).service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/export/xlsx")
            .set_json(sample())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/export/xlsx")
            .insert_header(("Authorization", "Bearer t"))
            .set_json(json!({"title": "t", "columns": ["a", "b"], "rows": [["1"]]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Row 1 has 1 cells, expected 2");
    }

    #[actix_web::test]
    async fn pdf_without_fonts_is_a_render_error() {
        let app = test::init_service(
            App::new().app_data(app_config()).service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/export/pdf")
            .insert_header(("Authorization", "Bearer t"))
            .set_json(sample())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap_or("").starts_with("Export failed"));
    }
}
