//! Settings validation

use calconnect_core::{CalconnectError, Settings};
use url::Url;

/// Settings validator
pub struct SettingsValidator;

impl SettingsValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate the complete settings
    pub fn validate(&self, settings: &Settings) -> Result<(), CalconnectError> {
        if settings.port == 0 {
            return Err(CalconnectError::Config("PORT must be greater than 0".to_string()));
        }

        if settings.host.trim().is_empty() {
            return Err(CalconnectError::Config("HOST cannot be empty".to_string()));
        }

        if settings.upstream_timeout_secs == 0 {
            return Err(CalconnectError::Config(
                "COMPOSIO_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        Self::validate_url("COMPOSIO_BASE_URL", &settings.composio_base_url)?;

        if let Some(backend_url) = &settings.backend_url {
            Self::validate_url("BACKEND_URL", backend_url)?;
        }

        if settings.frontend_urls.is_empty() {
            return Err(CalconnectError::Config(
                "FRONTEND_URL must list at least one URL".to_string(),
            ));
        }
        for url in &settings.frontend_urls {
            Self::validate_url("FRONTEND_URL", url)?;
        }

        Ok(())
    }

    /// Require an absolute http(s) URL
    fn validate_url(name: &str, value: &str) -> Result<(), CalconnectError> {
        let url = Url::parse(value).map_err(|e| {
            CalconnectError::Config(format!("Invalid {} '{}': {}", name, value, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CalconnectError::Config(format!(
                "Invalid {} '{}': unsupported scheme '{}'",
                name, value, scheme
            ))),
        }
    }
}

impl Default for SettingsValidator {
    fn default() -> Self {
        Self::new()
    }
}
