use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes};
use actix_web::{HttpRequest, HttpResponse};
use common::auth::TOKEN_COOKIE;
use common::model::envelope::ApiEnvelope;
use log::warn;

use crate::proxy::{self, token, Backend};

/// `POST /api/admin/logout`: best-effort backend call, then always clear the cookie.
pub async fn process(req: HttpRequest, body: Bytes, backend: web::Data<Backend>) -> HttpResponse {
    if let Some(token) = token::bearer_token(&req) {
        match backend.send(&req, body, Some(&token)).await {
            Ok(upstream) if !upstream.is_success() => {
                warn!("Backend logout answered {}", upstream.status)
            }
            Ok(_) => {}
            Err(e) => warn!("Backend logout failed: {}", e),
        }
    }

    proxy::json_response(StatusCode::OK)
        .cookie(expired_cookie())
        .json(ApiEnvelope::success("Logged out"))
}

fn expired_cookie() -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .max_age(Duration::ZERO)
        .same_site(SameSite::Lax)
        .finish()
}

#[cfg(test)]
mod tests {
    use crate::proxy::tests::backend_at;
    use crate::services::admin::configure_routes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::Value;

    #[actix_web::test]
    async fn cookie_is_cleared_even_when_backend_is_down() {
        let app = test::init_service(
            App::new()
                .app_data(backend_at("http://127.0.0.1:1"))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/admin/logout")
            .cookie(Cookie::new("token", "abc"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "token")
            .expect("removal cookie");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(0));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["Status"], "T");
    }

    #[actix_web::test]
    async fn bearer_header_alone_reaches_the_backend() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        let server = HttpServer::new(move || {
            let seen = seen.clone();
            App::new().default_service(web::to(move |req: HttpRequest| {
                let seen = seen.clone();
                async move {
                    let authorized = req
                        .headers()
                        .get("authorization")
                        .and_then(|h| h.to_str().ok())
                        == Some("Bearer abc");
                    if req.path() == "/api/admin/logout" && authorized {
                        seen.fetch_add(1, Ordering::SeqCst);
                    }
                    HttpResponse::Ok().json(serde_json::json!({"Status": "T"}))
                }
            }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let base = format!("http://{}", server.addrs()[0]);
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let app = test::init_service(
            App::new()
                .app_data(backend_at(&base))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/admin/logout")
            .insert_header(("Authorization", "Bearer abc"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        handle.stop(false).await;
    }
}
