use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::web::{self, Bytes};
use actix_web::{HttpRequest, HttpResponse};
use common::auth::{TOKEN_COOKIE, TOKEN_MAX_AGE_SECS};
use common::model::envelope::{LoginRequest, LoginResponse};
use log::info;

use crate::proxy::{self, Backend, ProxyError};

/// `POST /api/admin/check-credentials`: relays the backend verdict and
/// stores an accepted token in the `token` cookie.
pub async fn process(
    req: HttpRequest,
    body: Bytes,
    backend: web::Data<Backend>,
) -> Result<HttpResponse, ProxyError> {
    if let Ok(login) = serde_json::from_slice::<LoginRequest>(&body) {
        info!("Login attempt for user {}", login.user_id);
    }

    let upstream = backend.send(&req, body, None).await?;
    let login: Option<LoginResponse> = if upstream.is_success() {
        serde_json::from_slice(&upstream.body).ok()
    } else {
        None
    };
    let mut response = proxy::relay(upstream)?;

    if let Some(token) = login.as_ref().and_then(|l| l.accepted_token()) {
        let cookie = token_cookie(token);
        response
            .add_cookie(&cookie)
            .map_err(|e| ProxyError::Transport(e.to_string()))?;
    }
    Ok(response)
}

pub fn token_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .max_age(Duration::seconds(TOKEN_MAX_AGE_SECS))
        .same_site(SameSite::Lax)
        .finish()
}
