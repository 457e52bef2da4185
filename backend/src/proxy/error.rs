use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::envelope::ErrorBody;

pub const MISSING_TOKEN: &str = "Authorization token is required";

/// Failures of a proxied call, rendered as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{}", MISSING_TOKEN)]
    MissingToken,

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid response from backend: {0}")]
    Parse(String),

    #[error("Not found")]
    NotFound,
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        ProxyError::Transport(e.to_string())
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingToken => StatusCode::UNAUTHORIZED,
            ProxyError::Backend { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Transport(_) | ProxyError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::NotFound => StatusCode::NOT_FOUND,
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

/// Picks the message a failed backend call should surface: `message`,
/// `Message` or `error` from a JSON body, else the raw text, else the reason phrase.
pub fn backend_message(status: u16, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "Message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let raw = String::from_utf8_lossy(body);
    if !raw.trim().is_empty() {
        return raw.trim().to_string();
    }
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_lookup_order() {
        assert_eq!(backend_message(400, br#"{"Message":"Duplicate code"}"#), "Duplicate code");
        assert_eq!(
            backend_message(400, br#"{"message":"lower","Message":"upper"}"#),
            "lower"
        );
        assert_eq!(backend_message(403, br#"{"error":"forbidden"}"#), "forbidden");
        assert_eq!(backend_message(502, b"upstream down"), "upstream down");
        assert_eq!(backend_message(404, b""), "Not Found");
        assert_eq!(backend_message(422, br#"{"detail":1}"#), r#"{"detail":1}"#);
    }

    #[test]
    fn statuses_map_through() {
        assert_eq!(ProxyError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ProxyError::Backend { status: 440, message: "x".into() }.status_code().as_u16(),
            440
        );
        assert_eq!(
            ProxyError::Transport("refused".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ProxyError::MissingToken.to_string(), MISSING_TOKEN);
    }
}
