//! History API plumbing for [`AppRoute`].
//!
//! Every navigation goes through [`guard`] first, so a signed-out user can
//! never land on a protected screen and a signed-in user never sees the
//! login page.

use common::route::AppRoute;
use wasm_bindgen::prelude::*;
use yew::Callback;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn current_route() -> AppRoute {
    AppRoute::from_path(&current_path())
}

pub fn push(route: AppRoute) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(route.to_path()));
    }
}

pub fn replace(route: AppRoute) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(route.to_path()));
    }
}

/// Where the user must go instead of `target`, if anywhere.
pub fn guard(target: AppRoute, authenticated: bool) -> Option<AppRoute> {
    if target.requires_auth() && !authenticated {
        Some(AppRoute::auth_failure_redirect())
    } else if target.should_redirect_when_authenticated() && authenticated {
        Some(AppRoute::auth_success_redirect())
    } else {
        None
    }
}

/// Back/forward listener; removed from `window` when dropped.
pub struct PopStateListener {
    closure: Closure<dyn Fn()>,
}

impl PopStateListener {
    pub fn register(on_change: Callback<AppRoute>) -> Option<Self> {
        let closure = Closure::<dyn Fn()>::new(move || on_change.emit(current_route()));
        web_sys::window()?
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { closure })
    }
}

impl Drop for PopStateListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback("popstate", self.closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_users_are_sent_to_login() {
        assert_eq!(guard(AppRoute::GrnReceipt, false), Some(AppRoute::Login));
        assert_eq!(guard(AppRoute::Login, false), None);
        assert_eq!(guard(AppRoute::NotFound, false), None);
    }

    #[test]
    fn signed_in_users_skip_login() {
        assert_eq!(guard(AppRoute::Login, true), Some(AppRoute::Dashboard));
        assert_eq!(guard(AppRoute::UomMaster, true), None);
    }
}
