use common::theme::{css_variables, restore, Mode, ThemeId, MODE_STORAGE_KEY, THEME_STORAGE_KEY};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::storage::LocalStorage;

/// Saved selection, or the defaults when nothing usable is stored.
pub fn load() -> (ThemeId, Mode) {
    restore(
        LocalStorage::get(THEME_STORAGE_KEY).as_deref(),
        LocalStorage::get(MODE_STORAGE_KEY).as_deref(),
    )
}

pub fn save(theme: ThemeId, mode: Mode) {
    LocalStorage::set(THEME_STORAGE_KEY, theme.as_str());
    LocalStorage::set(MODE_STORAGE_KEY, &mode.to_string());
}

/// Writes the palette as custom properties on `:root`.
pub fn apply(theme: ThemeId, mode: Mode) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let style = root.style();
    for (name, value) in css_variables(theme, mode) {
        let _ = style.set_property(name, value);
    }
    let _ = root.set_attribute("data-mode", &mode.to_string());
}
