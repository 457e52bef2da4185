/// Name of the cookie holding the session JWT.
pub const TOKEN_COOKIE: &str = "token";

/// The token cookie lives for one day.
pub const TOKEN_MAX_AGE_SECS: i64 = 24 * 60 * 60;

/// Reads a cookie value out of a `Cookie:` header or `document.cookie` string.
pub fn read_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie() {
        let header = "theme=dark; token=abc.def.ghi; other=1";
        assert_eq!(read_cookie(header, TOKEN_COOKIE).as_deref(), Some("abc.def.ghi"));
        assert_eq!(read_cookie(header, "theme").as_deref(), Some("dark"));
        assert_eq!(read_cookie(header, "missing"), None);
    }

    #[test]
    fn empty_value_counts_as_absent() {
        assert_eq!(read_cookie("token=; a=b", TOKEN_COOKIE), None);
        assert_eq!(read_cookie("", TOKEN_COOKIE), None);
    }
}
