//! Server settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default frontend origin (Vite dev server)
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Default Composio API base URL
pub const DEFAULT_COMPOSIO_BASE_URL: &str = "https://backend.composio.dev";

/// Default per-request timeout for platform calls
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Route the platform redirects browsers to after OAuth
pub const CALLBACK_PATH: &str = "/api/composio/callback";

/// Effective server settings
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Composio API key; `None` when not configured
    #[serde(skip_serializing)]
    pub composio_api_key: Option<String>,

    /// Composio API base URL
    pub composio_base_url: String,

    /// Per-request timeout for platform calls, in seconds
    pub upstream_timeout_secs: u64,

    /// Listen address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Public URL of this server; derived from the port when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,

    /// Browser origins allowed by CORS; the first one receives OAuth redirects
    pub frontend_urls: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            composio_api_key: None,
            composio_base_url: DEFAULT_COMPOSIO_BASE_URL.to_string(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backend_url: None,
            frontend_urls: vec![DEFAULT_FRONTEND_URL.to_string()],
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field(
                "composio_api_key",
                &self.composio_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("composio_base_url", &self.composio_base_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("backend_url", &self.backend_url)
            .field("frontend_urls", &self.frontend_urls)
            .finish()
    }
}

impl Settings {
    /// Whether a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.composio_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Public URL of this server, without a trailing slash
    pub fn backend_url(&self) -> String {
        match &self.backend_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }

    /// Default OAuth callback URL handed to the platform
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.backend_url(), CALLBACK_PATH)
    }

    /// Frontend URL that receives post-OAuth redirects
    pub fn frontend_url(&self) -> &str {
        self.frontend_urls
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_FRONTEND_URL)
    }

    /// Per-request timeout for platform calls
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply a port override (CLI `--port`)
    pub fn with_port_override(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.frontend_url(), "http://localhost:5173");
        assert_eq!(settings.backend_url(), "http://localhost:3000");
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_callback_url_trims_trailing_slash() {
        let settings = Settings {
            backend_url: Some("https://api.example.com/".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            settings.callback_url(),
            "https://api.example.com/api/composio/callback"
        );
    }

    #[test]
    fn test_port_override_follows_derived_backend_url() {
        let settings = Settings::default().with_port_override(Some(4000));
        assert_eq!(settings.port, 4000);
        assert_eq!(settings.backend_url(), "http://localhost:4000");

        let unchanged = Settings::default().with_port_override(None);
        assert_eq!(unchanged.port, 3000);
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let settings = Settings {
            composio_api_key: Some("  ".to_string()),
            ..Settings::default()
        };
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = Settings {
            composio_api_key: Some("sk-secret".to_string()),
            ..Settings::default()
        };
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
