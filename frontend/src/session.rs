//! Session state shared with every screen through a Yew context.
//!
//! The user is decoded from the `token` cookie on mount and again only when a
//! screen calls `refresh_session` (after login). There is no background
//! refresh; the idle watcher and 401/440 answers end the session instead.

use std::rc::Rc;

use common::auth::{decode_token, SessionUser};
use common::model::envelope::ApiEnvelope;
use common::route::AppRoute;
use gloo_console::{error, log};
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::show_error;
use crate::web::cookie;
use crate::web::http::ApiError;

pub const LOGOUT_ENDPOINT: &str = "/api/admin/logout";

const SESSION_ENDED: &str = "Your session has ended. Please sign in again.";

#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub user: Option<Rc<SessionUser>>,
    pub loading: bool,
    pub refresh_session: Callback<()>,
    /// Ends the session; the optional text is shown on the login screen.
    pub logout: Callback<Option<String>>,
    pub navigate: Callback<AppRoute>,
}

impl SessionContext {
    /// Id stamped into audit columns and print records.
    pub fn user_id(&self) -> String {
        self.user.as_ref().map(|u| u.id.clone()).unwrap_or_default()
    }

    pub fn plant_code(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.plant_code.clone())
            .unwrap_or_default()
    }

    /// Toasts `error`, or logs the user out when the server rejected the session.
    pub fn report(&self, error: &ApiError) {
        if error.invalidates_session() {
            self.logout.emit(Some(SESSION_ENDED.to_string()));
        } else {
            show_error(&error.to_string());
        }
    }
}

/// Reports through the session when there is one, else just toasts.
pub fn report(session: Option<&SessionContext>, error: &ApiError) {
    match session {
        Some(session) => session.report(error),
        None => show_error(&error.to_string()),
    }
}

/// Snapshot of the session for struct components.
pub fn from_context<C: Component>(ctx: &Context<C>) -> Option<SessionContext> {
    ctx.link()
        .context::<SessionContext>(Callback::noop())
        .map(|(session, _)| session)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Restored {
    User(SessionUser),
    Anonymous,
    /// A cookie was present but unusable; the session must be torn down.
    Invalid(String),
}

/// Decodes the cookie as of `now_secs`.
pub fn restore(token: Option<&str>, now_secs: i64) -> Restored {
    let Some(token) = token else {
        return Restored::Anonymous;
    };
    match decode_token(token) {
        Ok(user) if user.is_expired(now_secs) => {
            Restored::Invalid("Your session has expired. Please sign in again.".to_string())
        }
        Ok(user) => Restored::User(user),
        Err(e) => {
            error!(format!("Discarding unreadable session token: {}", e));
            Restored::Invalid(SESSION_ENDED.to_string())
        }
    }
}

/// `Authorization` value for the logout call; the cookie is gone by the time it is sent.
pub fn logout_authorization(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {}", t))
}

/// Best-effort server logout, then the local cookie is dropped regardless.
pub fn end_session() {
    let authorization = logout_authorization(cookie::token().as_deref());
    cookie::clear_token();
    spawn_local(async move {
        let mut request = Request::post(LOGOUT_ENDPOINT);
        if let Some(value) = authorization.as_deref() {
            request = request.header("Authorization", value);
        }
        match request.send().await {
            Ok(response) => match response.json::<ApiEnvelope>().await {
                Ok(envelope) if envelope.is_success() => log!("Signed out"),
                _ => log!(format!("Logout answered {}", response.status())),
            },
            Err(e) => error!(format!("Logout request failed: {}", e)),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"user":{"user_id":"u1","web_menu_access":"1"},"exp":100}
    const TOKEN: &str = "h.eyJ1c2VyIjp7InVzZXJfaWQiOiJ1MSIsIndlYl9tZW51X2FjY2VzcyI6IjEifSwiZXhwIjoxMDB9.s";

    #[test]
    fn missing_cookie_is_anonymous() {
        assert_eq!(restore(None, 0), Restored::Anonymous);
    }

    #[test]
    fn live_token_restores_the_user() {
        match restore(Some(TOKEN), 99) {
            Restored::User(user) => {
                assert_eq!(user.id, "u1");
                assert_eq!(user.web_menu_access, vec![1]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn logout_carries_the_token_as_bearer() {
        assert_eq!(logout_authorization(Some(TOKEN)), Some(format!("Bearer {}", TOKEN)));
        assert_eq!(logout_authorization(Some("  ")), None);
        assert_eq!(logout_authorization(None), None);
    }

    #[test]
    fn expired_token_is_invalid() {
        assert!(matches!(restore(Some(TOKEN), 100), Restored::Invalid(_)));
    }
}
