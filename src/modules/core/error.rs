//! Error types for Calconnect

use calconnect_types::api::ErrorResponse;
use thiserror::Error;

/// Shown to users when no auth config exists for the requested app
pub const AUTH_CONFIG_MISSING_MESSAGE: &str =
    "No auth config found for this app. Please create one in the Composio dashboard.";

/// Main error type for Calconnect operations
#[derive(Error, Debug)]
pub enum CalconnectError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more required request fields were absent or empty
    #[error("{}", missing_message(.0))]
    MissingInput(Vec<String>),

    /// Malformed request
    #[error("Validation error: {0}")]
    Validation(String),

    /// No auth config is registered for the app
    #[error("No auth config found for app '{0}'")]
    AuthConfigMissing(String),

    /// No matching connected account
    #[error("{0}")]
    NotFound(String),

    /// A platform call failed
    #[error("Failed to {operation}: {message}")]
    Upstream { operation: String, message: String },

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn missing_message(fields: &[String]) -> String {
    match fields {
        [field] => format!("{} is required", field),
        _ => format!("{} are required", fields.join(" and ")),
    }
}

impl CalconnectError {
    /// A single required field is missing
    pub fn missing(field: impl Into<String>) -> Self {
        CalconnectError::MissingInput(vec![field.into()])
    }

    /// Wrap a platform failure with the operation that was attempted
    pub fn upstream(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        CalconnectError::Upstream {
            operation: operation.into(),
            message: cause.to_string(),
        }
    }

    /// Returns true if this error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CalconnectError::MissingInput(_)
                | CalconnectError::Validation(_)
                | CalconnectError::AuthConfigMissing(_)
                | CalconnectError::NotFound(_)
        )
    }

    /// Returns the appropriate HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CalconnectError::NotFound(_) => 404,
            CalconnectError::MissingInput(_)
            | CalconnectError::Validation(_)
            | CalconnectError::AuthConfigMissing(_) => 400,
            _ => 500,
        }
    }

    /// Build the JSON body returned to API clients
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            CalconnectError::MissingInput(_) | CalconnectError::NotFound(_) => {
                ErrorResponse::new(self.to_string())
            }
            CalconnectError::Validation(msg) => {
                ErrorResponse::new("Invalid request").with_message(msg.clone())
            }
            CalconnectError::AuthConfigMissing(app) => {
                ErrorResponse::new(AUTH_CONFIG_MISSING_MESSAGE).with_app_name(app.clone())
            }
            CalconnectError::Upstream { operation, message } => {
                ErrorResponse::new(format!("Failed to {}", operation)).with_message(message.clone())
            }
            // Don't expose internal details
            CalconnectError::Internal(_) => ErrorResponse::new("Internal server error"),
            _ => ErrorResponse::new("Internal server error").with_message(self.to_string()),
        }
    }
}
