use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// `attachment; filename="Report_20240101_120000.xlsx"` -> `Report_20240101_120000.xlsx`.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Hands `bytes` to the browser as a download through a temporary object URL.
pub fn save_bytes(bytes: &[u8], content_type: &str, file_name: &str) -> Result<(), String> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document is not available".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "could not create a download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quoted_and_bare_names() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="FG_Movement_Report_20240131_154500.pdf""#)
                .as_deref(),
            Some("FG_Movement_Report_20240131_154500.pdf")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=a.xlsx").as_deref(),
            Some("a.xlsx")
        );
        assert_eq!(filename_from_disposition("attachment"), None);
    }
}
