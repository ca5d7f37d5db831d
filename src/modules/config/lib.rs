//! Configuration loading for Calconnect
//!
//! This crate reads the server settings from the process environment
//! (optionally seeded from a dotenv file) and validates them.

pub mod env;
pub mod validator;

pub use env::EnvLoader;
pub use validator::SettingsValidator;

use calconnect_core::{CalconnectError, Settings};

/// Environment variable names
pub mod vars {
    pub const COMPOSIO_API_KEY: &str = "COMPOSIO_API_KEY";
    pub const COMPOSIO_BASE_URL: &str = "COMPOSIO_BASE_URL";
    pub const COMPOSIO_TIMEOUT_SECS: &str = "COMPOSIO_TIMEOUT_SECS";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const BACKEND_URL: &str = "BACKEND_URL";
    pub const FRONTEND_URL: &str = "FRONTEND_URL";
}

/// Load settings from the environment, reading `env_file` (or `.env`) first
pub fn load_settings(env_file: Option<&str>) -> Result<Settings, CalconnectError> {
    let loader = match env_file {
        Some(path) => EnvLoader::with_file(path),
        None => EnvLoader::new(),
    };
    loader.load()?;

    parse_settings(EnvLoader::var)
}

/// Build and validate settings from a variable lookup function
pub fn parse_settings<F>(lookup: F) -> Result<Settings, CalconnectError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Settings::default();

    let port = match lookup(vars::PORT) {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|e| CalconnectError::Config(format!("Invalid PORT '{}': {}", raw, e)))?,
        None => defaults.port,
    };

    let upstream_timeout_secs = match lookup(vars::COMPOSIO_TIMEOUT_SECS) {
        Some(raw) => raw.parse::<u64>().map_err(|e| {
            CalconnectError::Config(format!("Invalid COMPOSIO_TIMEOUT_SECS '{}': {}", raw, e))
        })?,
        None => defaults.upstream_timeout_secs,
    };

    let frontend_urls = match lookup(vars::FRONTEND_URL) {
        Some(raw) => split_url_list(&raw),
        None => defaults.frontend_urls,
    };

    let settings = Settings {
        composio_api_key: lookup(vars::COMPOSIO_API_KEY),
        composio_base_url: lookup(vars::COMPOSIO_BASE_URL)
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.composio_base_url),
        upstream_timeout_secs,
        host: lookup(vars::HOST).unwrap_or(defaults.host),
        port,
        backend_url: lookup(vars::BACKEND_URL),
        frontend_urls,
    };

    SettingsValidator::new().validate(&settings)?;

    Ok(settings)
}

/// Split a comma-separated URL list, dropping blanks and trailing slashes
fn split_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|u| u.trim().trim_end_matches('/'))
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_defaults() {
        let settings = parse_settings(lookup_from(&[])).unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.frontend_url(), "http://localhost:5173");
        assert_eq!(settings.composio_base_url, "https://backend.composio.dev");
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_parse_full_environment() {
        let settings = parse_settings(lookup_from(&[
            ("COMPOSIO_API_KEY", "ck_test"),
            ("PORT", "8081"),
            ("BACKEND_URL", "https://api.example.com"),
            ("FRONTEND_URL", "https://app.example.com/, http://localhost:5173"),
            ("COMPOSIO_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();

        assert!(settings.has_api_key());
        assert_eq!(settings.port, 8081);
        assert_eq!(
            settings.callback_url(),
            "https://api.example.com/api/composio/callback"
        );
        assert_eq!(
            settings.frontend_urls,
            vec!["https://app.example.com", "http://localhost:5173"]
        );
        assert_eq!(settings.upstream_timeout_secs, 10);
    }

    #[test]
    fn test_invalid_port() {
        let err = parse_settings(lookup_from(&[("PORT", "abc")])).unwrap_err();
        assert!(err.to_string().contains("Invalid PORT"));
    }

    #[test]
    fn test_invalid_frontend_url() {
        let result = parse_settings(lookup_from(&[("FRONTEND_URL", "not a url")]));
        assert!(matches!(result, Err(CalconnectError::Config(_))));
    }

    #[test]
    fn test_split_url_list() {
        assert_eq!(
            split_url_list("http://a.test/, ,http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }
}
