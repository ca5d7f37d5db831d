//! Error responses for the JSON endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calconnect_core::CalconnectError;
use tracing::{error, warn};

/// Handler error tagged with the component that raised it
#[derive(Debug)]
pub struct ApiError {
    component: &'static str,
    error: CalconnectError,
}

impl ApiError {
    pub fn new(component: &'static str, error: CalconnectError) -> Self {
        Self { component, error }
    }

    /// A required field is missing
    pub fn missing(component: &'static str, field: &str) -> Self {
        Self::new(component, CalconnectError::missing(field))
    }

    /// The request could not be decoded
    pub fn invalid(component: &'static str, message: impl Into<String>) -> Self {
        Self::new(component, CalconnectError::Validation(message.into()))
    }

    /// A platform call failed while performing `operation`
    pub fn upstream(
        component: &'static str,
        operation: &str,
        cause: impl std::fmt::Display,
    ) -> Self {
        Self::new(component, CalconnectError::upstream(operation, cause))
    }

    pub fn error(&self) -> &CalconnectError {
        &self.error
    }
}

impl From<CalconnectError> for ApiError {
    fn from(error: CalconnectError) -> Self {
        Self::new("server", error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.error.is_client_error() {
            warn!(component = self.component, status = status.as_u16(), "{}", self.error);
        } else {
            error!(component = self.component, status = status.as_u16(), "{}", self.error);
        }

        (status, Json(self.error.to_response())).into_response()
    }
}
