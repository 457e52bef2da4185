//! Server settings read from the environment at startup.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_PORT: u16 = 4000;
pub const JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Fixed backend base URL; when unset the request host is used with `api_port`.
    pub api_url: Option<String>,
    pub api_port: u16,
    pub open_browser: bool,
    pub font_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_url: None,
            api_port: DEFAULT_API_PORT,
            open_browser: false,
            font_dir: PathBuf::from("./fonts"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            host: read("WMS_HOST").unwrap_or(defaults.host),
            port: read("WMS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            api_url: read("WMS_API_URL").map(|v| v.trim_end_matches('/').to_string()),
            api_port: read("WMS_API_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.api_port),
            open_browser: read("WMS_OPEN_BROWSER")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.open_browser),
            font_dir: read("WMS_FONT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_dir),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Backend base for a request that arrived with `Host: request_host`.
    pub fn backend_base(&self, request_host: &str) -> String {
        if let Some(url) = &self.api_url {
            return url.clone();
        }
        format!("http://{}:{}", host_name(request_host), self.api_port)
    }
}

/// Strips the port from a `Host` header value, keeping bracketed IPv6 literals intact.
fn host_name(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn overrides_and_bad_values() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("WMS_PORT", "9090"),
            ("WMS_API_PORT", "not-a-port"),
            ("WMS_API_URL", "http://wms-api:5000/"),
            ("WMS_OPEN_BROWSER", "TRUE"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.api_port, DEFAULT_API_PORT);
        assert_eq!(config.api_url.as_deref(), Some("http://wms-api:5000"));
        assert!(config.open_browser);
    }

    #[test]
    fn backend_base_follows_request_host() {
        let config = ServerConfig::default();
        assert_eq!(config.backend_base("192.168.1.20:8080"), "http://192.168.1.20:4000");
        assert_eq!(config.backend_base("wms.local"), "http://wms.local:4000");
        assert_eq!(config.backend_base("[::1]:8080"), "http://[::1]:4000");

        let fixed = ServerConfig {
            api_url: Some("https://api.example.com".into()),
            ..ServerConfig::default()
        };
        assert_eq!(fixed.backend_base("anything:1"), "https://api.example.com");
    }
}
