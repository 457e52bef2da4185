//! Client-side view of the session token.
//!
//! The backend issues a JWT whose payload carries a `user` object. The
//! console never verifies the signature (it holds no key); it only reads the
//! claims to decide what to show. The backend re-checks the token on every
//! proxied call.

mod cookie;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::model::serde_helper::string_lenient;

pub use cookie::{TOKEN_COOKIE, TOKEN_MAX_AGE_SECS, read_cookie};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token must have three dot-separated segments")]
    Malformed,

    #[error("token payload is not valid base64url: {0}")]
    Encoding(String),

    #[error("token payload is not valid JSON: {0}")]
    Payload(String),
}

/// User identity as materialized from the token on each page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: String,
    pub plant_code: String,
    pub company_code: String,
    pub web_menu_access: Vec<u32>,
    pub hht_menu_access: Vec<u32>,
    /// Expiry in seconds since the Unix epoch, when the token carries one.
    pub expires_at: Option<i64>,
}

impl SessionUser {
    /// A token without `exp` never expires on the client; the backend decides.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        matches!(self.expires_at, Some(exp) if exp <= now_secs)
    }
}

#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    user: RawUser,
    #[serde(default)]
    exp: Option<i64>,
}

#[derive(Deserialize, Default)]
struct RawUser {
    #[serde(default, deserialize_with = "string_lenient")]
    user_id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    user_name: String,
    #[serde(default, deserialize_with = "string_lenient")]
    user_role: String,
    #[serde(default, deserialize_with = "string_lenient")]
    web_menu_access: String,
    #[serde(default, deserialize_with = "string_lenient")]
    hht_menu_access: String,
    #[serde(default, deserialize_with = "string_lenient")]
    plant_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    company_code: String,
}

/// Decodes the payload segment of a JWT into a [`SessionUser`].
pub fn decode_token(token: &str) -> Result<SessionUser, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 || segments[1].is_empty() {
        return Err(TokenError::Malformed);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    let claims: RawClaims =
        serde_json::from_slice(&payload).map_err(|e| TokenError::Payload(e.to_string()))?;

    let user = claims.user;
    Ok(SessionUser {
        id: user.user_id,
        name: user.user_name,
        role: user.user_role,
        plant_code: user.plant_code,
        company_code: user.company_code,
        web_menu_access: parse_menu_access(&user.web_menu_access),
        hht_menu_access: parse_menu_access(&user.hht_menu_access),
        expires_at: claims.exp,
    })
}

/// Parses a comma-joined access string such as `"1,2, 5"` into codes.
///
/// Blank and non-numeric entries are skipped; duplicates keep their first position.
pub fn parse_menu_access(raw: &str) -> Vec<u32> {
    let mut codes = Vec::new();
    for part in raw.split(',') {
        if let Ok(code) = part.trim().parse::<u32>() {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
    }
    codes
}

/// Joins access codes back into the backend's comma-separated form.
pub fn join_menu_access(codes: &[u32]) -> String {
    codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn decodes_user_claims() {
        let token = make_token(&serde_json::json!({
            "user": {
                "user_id": 42,
                "user_name": "store.keeper",
                "user_role": "Supervisor",
                "web_menu_access": "1,2,3,10",
                "hht_menu_access": "5",
                "plant_code": "P100",
                "company_code": "C01"
            },
            "iat": 1700000000,
            "exp": 1700086400
        }));

        let user = decode_token(&token).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.name, "store.keeper");
        assert_eq!(user.role, "Supervisor");
        assert_eq!(user.plant_code, "P100");
        assert_eq!(user.company_code, "C01");
        assert_eq!(user.web_menu_access, vec![1, 2, 3, 10]);
        assert_eq!(user.hht_menu_access, vec![5]);
        assert_eq!(user.expires_at, Some(1700086400));
    }

    #[test]
    fn expiry_is_inclusive() {
        let user = SessionUser {
            expires_at: Some(100),
            ..Default::default()
        };
        assert!(!user.is_expired(99));
        assert!(user.is_expired(100));
        assert!(!SessionUser::default().is_expired(i64::MAX));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(decode_token("abc"), Err(TokenError::Malformed));
        assert_eq!(decode_token("a..c"), Err(TokenError::Malformed));
        assert!(matches!(decode_token("a.!!!.c"), Err(TokenError::Encoding(_))));

        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json"));
        assert!(matches!(decode_token(&not_json), Err(TokenError::Payload(_))));
    }

    #[test]
    fn missing_access_lists_decode_as_empty() {
        let token = make_token(&serde_json::json!({ "user": { "user_id": "u1" } }));
        let user = decode_token(&token).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.web_menu_access.is_empty());
        assert_eq!(user.expires_at, None);
    }

    #[test]
    fn access_parsing_skips_noise() {
        assert_eq!(parse_menu_access(" 3, 1,,x,3 ,7"), vec![3, 1, 7]);
        assert!(parse_menu_access("").is_empty());
        assert_eq!(join_menu_access(&[3, 1, 7]), "3,1,7");
    }
}
