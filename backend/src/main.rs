mod config;
mod proxy;
mod services;

use crate::config::{ServerConfig, JSON_LIMIT};
use crate::proxy::Backend;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded front end; unknown paths get `index.html` so client routes work on reload.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();
    let url = config.url();

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    match &config.api_url {
        Some(api) => info!("Forwarding /api calls to {}", api),
        None => info!(
            "Forwarding /api calls to the request host on port {}",
            config.api_port
        ),
    }
    info!("Server running at {}", url);

    let backend = web::Data::new(Backend::new(config.clone()));
    let settings = web::Data::new(config.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT))
            .app_data(web::PayloadConfig::default().limit(JSON_LIMIT))
            .app_data(backend.clone())
            .app_data(settings.clone())
            .service(services::admin::configure_routes())
            .service(services::master::configure_routes())
            .service(services::transactions::configure_routes())
            .service(services::reports::configure_routes())
            .service(services::existing_data::configure_routes())
            .service(services::hht::configure_routes())
            .service(services::export::configure_routes())
            .service(services::api_fallback())
            .default_service(web::route().to(serve_embedded))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
