//! JSON calls to the local `/api` routes.
//!
//! The server answers failures with `{"error": ...}` and mutations with the
//! `{Status, Message}` envelope. Both are folded into [`ApiError`] here, so a
//! screen only has to decide between toasting and ending the session.

use common::model::envelope::{ApiEnvelope, ErrorBody};
use common::session::is_session_invalidating;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx answer from the local server.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx envelope with `Status: 'F'`.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// 401 and 440 end the local session.
    pub fn invalidates_session(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if is_session_invalidating(*status))
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
}

impl Method {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
        }
    }
}

/// Message for a failed response: the server's `error` field, else a generic line.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(status, &body),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ApiError> {
    let response = Request::get(url)
        .query(query.iter().copied())
        .send()
        .await?;
    decode(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = Request::post(url).json(body)?.send().await?;
    decode(response).await
}

/// Sends a mutation and unwraps the envelope; `Status: 'F'` becomes [`ApiError::Rejected`].
pub async fn mutate<B: Serialize>(method: Method, url: &str, body: &B) -> Result<String, ApiError> {
    let response = method.builder(url).json(body)?.send().await?;
    let envelope: ApiEnvelope = decode(response).await?;
    if envelope.is_success() {
        Ok(envelope.display_message("Saved successfully"))
    } else {
        Err(ApiError::Rejected(envelope.display_message("Request was rejected")))
    }
}

/// Posts `body` and returns the raw bytes plus the `Content-Disposition` header.
pub async fn post_for_file<B: Serialize>(
    url: &str,
    body: &B,
) -> Result<(Vec<u8>, Option<String>), ApiError> {
    let response = check(Request::post(url).json(body)?.send().await?).await?;
    let disposition = response.headers().get("content-disposition");
    let bytes = response
        .binary()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok((bytes, disposition))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_field_is_preferred() {
        assert_eq!(
            error_message(400, r#"{"error":"Company code already exists"}"#),
            "Company code already exists"
        );
    }

    #[test]
    fn unreadable_bodies_fall_back_to_status() {
        assert_eq!(error_message(502, "<html>"), "Request failed with status 502");
        assert_eq!(error_message(500, r#"{"error":"  "}"#), "Request failed with status 500");
    }

    #[test]
    fn only_auth_statuses_end_the_session() {
        let status = |status| ApiError::Status {
            status,
            message: String::new(),
        };
        assert!(status(401).invalidates_session());
        assert!(status(440).invalidates_session());
        assert!(!status(403).invalidates_session());
        assert!(!ApiError::Rejected("no".into()).invalidates_session());
    }
}
