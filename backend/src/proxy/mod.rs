//! # Backend Proxy
//!
//! Every `/api/...` route of the console is a thin pass-through to the WMS
//! backend: the caller's bearer token is attached, the body or query string is
//! forwarded unchanged to the same path on the backend, and the JSON answer is
//! relayed back with caching disabled.
//!
//! Route groups declare their endpoints as static [`Endpoint`] tables and
//! turn them into an actix `Scope` with [`scope_for`].

pub mod error;
pub mod token;

use std::time::Instant;

use actix_web::http::header::{CacheControl, CacheDirective, ContentType};
use actix_web::http::StatusCode;
use actix_web::web::{self, scope, Bytes};
use actix_web::{HttpRequest, HttpResponse, Route, Scope};
use log::{error, info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;

pub use error::ProxyError;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Shared outbound client plus the settings needed to locate the backend.
pub struct Backend {
    http: reqwest::Client,
    config: ServerConfig,
}

/// Raw answer of the backend.
#[derive(Debug)]
pub struct Upstream {
    pub status: u16,
    pub body: Bytes,
}

impl Upstream {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl Backend {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url_for(&self, req: &HttpRequest) -> String {
        let base = self.config.backend_base(req.connection_info().host());
        match req.query_string() {
            "" => format!("{}{}", base, req.path()),
            query => format!("{}{}?{}", base, req.path(), query),
        }
    }

    /// Forwards `req` to the same path on the backend. No retry.
    pub async fn send(
        &self,
        req: &HttpRequest,
        body: Bytes,
        token: Option<&str>,
    ) -> Result<Upstream, ProxyError> {
        let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
            .map_err(|e| ProxyError::Transport(e.to_string()))?;
        let url = self.url_for(req);
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let mut outbound = self
            .http
            .request(method.clone(), &url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = token {
            outbound = outbound.bearer_auth(token);
        }
        if !body.is_empty() {
            outbound = outbound
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        let response = match outbound.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("[{}] {} {} failed: {}", request_id, method, req.path(), e);
                return Err(e.into());
            }
        };
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let elapsed = started.elapsed().as_millis();
        if (200..300).contains(&status) {
            info!("[{}] {} {} -> {} ({} ms)", request_id, method, req.path(), status, elapsed);
        } else {
            warn!("[{}] {} {} -> {} ({} ms)", request_id, method, req.path(), status, elapsed);
        }
        Ok(Upstream {
            status,
            body: Bytes::from(body.to_vec()),
        })
    }
}

/// Turns a backend answer into the local response; non-2xx becomes `{error}`.
pub fn relay(upstream: Upstream) -> Result<HttpResponse, ProxyError> {
    if !upstream.is_success() {
        return Err(ProxyError::Backend {
            status: upstream.status,
            message: error::backend_message(upstream.status, &upstream.body),
        });
    }
    serde_json::from_slice::<serde_json::Value>(&upstream.body)
        .map_err(|e| ProxyError::Parse(e.to_string()))?;
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::OK);
    Ok(json_response(status).body(upstream.body))
}

pub fn json_response(status: StatusCode) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .insert_header(ContentType::json());
    builder
}

/// Generic handler behind every table-declared endpoint.
pub async fn process(
    req: HttpRequest,
    body: Bytes,
    backend: web::Data<Backend>,
) -> Result<HttpResponse, ProxyError> {
    let token = token::require_token(&req)?;
    let upstream = backend.send(&req, body, Some(&token)).await?;
    relay(upstream)
}

pub async fn not_found() -> Result<HttpResponse, ProxyError> {
    Err(ProxyError::NotFound)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
}

impl Verb {
    fn route(self) -> Route {
        match self {
            Verb::Get => web::get(),
            Verb::Post => web::post(),
            Verb::Put => web::put(),
        }
    }
}

/// One pass-through route, relative to its group's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub verb: Verb,
    pub path: &'static str,
}

pub const fn get(path: &'static str) -> Endpoint {
    Endpoint { verb: Verb::Get, path }
}

pub const fn post(path: &'static str) -> Endpoint {
    Endpoint { verb: Verb::Post, path }
}

pub const fn put(path: &'static str) -> Endpoint {
    Endpoint { verb: Verb::Put, path }
}

/// Registers every endpoint on `prefix`; anything else under it is a JSON 404.
pub fn scope_for(prefix: &str, endpoints: &[Endpoint]) -> Scope {
    endpoints
        .iter()
        .fold(scope(prefix), |scope, endpoint| {
            scope.route(endpoint.path, endpoint.verb.route().to(process))
        })
        .default_service(web::to(not_found))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use actix_web::dev::ServerHandle;
    use actix_web::{test, App, HttpServer};
    use serde_json::{json, Value};

    /// Stand-in for the WMS backend, echoing what it received.
    async fn fake_backend(req: HttpRequest, body: Bytes) -> HttpResponse {
        let auth = req
            .headers()
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("")
            .to_string();
        let has_request_id = req.headers().contains_key(REQUEST_ID_HEADER);
        let parsed: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

        match req.path() {
            "/api/admin/check-credentials" => {
                if parsed["User_ID"] == "admin" && parsed["User_Password"] == "secret" {
                    HttpResponse::Ok().json(json!({
                        "Status": "T",
                        "Message": "Login successful",
                        "token": "h.eyJ1c2VyIjp7fX0.s",
                        "is_change_password": false
                    }))
                } else {
                    HttpResponse::Ok().json(json!({"Status": "F", "Message": "Invalid credentials"}))
                }
            }
            "/api/master/company/insert" if parsed["company_code"] == "DUP" => {
                HttpResponse::BadRequest().json(json!({"Message": "Company code already exists"}))
            }
            "/api/reports/fg-movement" => HttpResponse::build(StatusCode::from_u16(440).unwrap())
                .json(json!({"message": "Session timed out"})),
            "/api/hht/broken" => HttpResponse::Ok().body("<html>oops</html>"),
            _ => HttpResponse::Ok().json(json!({
                "method": req.method().as_str(),
                "path": req.path(),
                "query": req.query_string(),
                "auth": auth,
                "request_id": has_request_id,
                "body": parsed,
            })),
        }
    }

    /// Starts the fake backend on an ephemeral port.
    pub(crate) fn spawn_fake_backend() -> (String, ServerHandle) {
        let server = HttpServer::new(|| App::new().default_service(web::to(fake_backend)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}", addr), handle)
    }

    pub(crate) fn backend_at(base: &str) -> web::Data<Backend> {
        web::Data::new(Backend::new(ServerConfig {
            api_url: Some(base.to_string()),
            ..ServerConfig::default()
        }))
    }

    const ROUTES: &[Endpoint] = &[
        get("/master/company/get-all"),
        post("/master/company/insert"),
        post("/reports/fg-movement"),
        get("/hht/broken"),
    ];

    #[actix_web::test]
    async fn forwards_token_query_and_body() {
        let (base, handle) = spawn_fake_backend();
        let app = test::init_service(
            App::new()
                .app_data(backend_at(&base))
                .service(scope_for("/api", ROUTES)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/master/company/get-all?active=1")
            .insert_header(("Authorization", "Bearer tok-1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-store");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["auth"], "Bearer tok-1");
        assert_eq!(body["query"], "active=1");
        assert_eq!(body["path"], "/api/master/company/get-all");
        assert_eq!(body["request_id"], true);

        let req = test::TestRequest::post()
            .uri("/api/master/company/insert")
            .cookie(actix_web::cookie::Cookie::new("token", "tok-2"))
            .set_json(json!({"company_code": "C1"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["auth"], "Bearer tok-2");
        assert_eq!(body["body"]["company_code"], "C1");

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn missing_token_is_rejected_before_forwarding() {
        let app = test::init_service(
            App::new()
                .app_data(backend_at("http://127.0.0.1:1"))
                .service(scope_for("/api", ROUTES)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/master/company/get-all")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Authorization token is required"}));
    }

    #[actix_web::test]
    async fn backend_errors_keep_status_and_message() {
        let (base, handle) = spawn_fake_backend();
        let app = test::init_service(
            App::new()
                .app_data(backend_at(&base))
                .service(scope_for("/api", ROUTES)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/master/company/insert")
            .insert_header(("Authorization", "Bearer t"))
            .set_json(json!({"company_code": "DUP"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Company code already exists");

        let req = test::TestRequest::post()
            .uri("/api/reports/fg-movement")
            .insert_header(("Authorization", "Bearer t"))
            .set_json(json!({"from_date": "2024-01-01", "to_date": "2024-01-02"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 440);

        let req = test::TestRequest::get()
            .uri("/api/hht/broken")
            .insert_header(("Authorization", "Bearer t"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn unreachable_backend_is_a_500() {
        let app = test::init_service(
            App::new()
                .app_data(backend_at("http://127.0.0.1:1"))
                .service(scope_for("/api", ROUTES)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/master/company/get-all")
            .insert_header(("Authorization", "Bearer t"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[actix_web::test]
    async fn unknown_paths_are_json_404() {
        let app = test::init_service(
            App::new()
                .app_data(backend_at("http://127.0.0.1:1"))
                .service(scope_for("/api", ROUTES)),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Not found"}));
    }
}
