use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use common::auth::TOKEN_COOKIE;

use super::error::ProxyError;

/// Bearer token of the caller; the `token` cookie wins over the header.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.trim().strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn require_token(req: &HttpRequest) -> Result<String, ProxyError> {
    bearer_token(req).ok_or(ProxyError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn cookie_wins_over_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, "from-cookie"))
            .insert_header((AUTHORIZATION, "Bearer from-header"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn header_is_used_without_cookie() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_or_malformed_token() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(require_token(&req), Err(ProxyError::MissingToken)));

        let basic = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_http_request();
        assert_eq!(bearer_token(&basic), None);

        let empty_cookie = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, ""))
            .to_http_request();
        assert_eq!(bearer_token(&empty_cookie), None);
    }
}
