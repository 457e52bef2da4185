use common::auth::{read_cookie, TOKEN_COOKIE};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

/// The `token` cookie, when present and non-empty.
pub fn token() -> Option<String> {
    let cookies = html_document()?.cookie().ok()?;
    read_cookie(&cookies, TOKEN_COOKIE)
}

/// Expires the cookie locally. The logout route clears it server side as well.
pub fn clear_token() {
    if let Some(document) = html_document() {
        let _ = document.set_cookie(&format!(
            "{}=; path=/; max-age=0; SameSite=Lax",
            TOKEN_COOKIE
        ));
    }
}
