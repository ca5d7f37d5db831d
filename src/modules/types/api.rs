//! HTTP API request/response bodies

use serde::{Deserialize, Serialize};

use crate::platform::{CalendarEvent, ConnectedAccount};

/// Returns the value only if it is present and non-empty.
///
/// Browsers send `?entityId=` for blank form fields, which counts as missing.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Query for `GET /api/composio/connectedAccounts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedAccountsQuery {
    #[serde(default)]
    pub entity_id: Option<String>,
}

/// Response for `GET /api/composio/connectedAccounts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<ConnectedAccount>,
}

/// Body for `POST /api/composio/initiate`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateRequest {
    /// App (toolkit) to connect, e.g. `googlecalendar`
    #[serde(default)]
    pub app_name: Option<String>,
    /// End-user identifier
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Overrides the default OAuth callback URL
    #[serde(default)]
    pub redirect_url: Option<String>,
    /// Skips the auth config lookup
    #[serde(default)]
    pub auth_config_id: Option<String>,
}

/// Response for `POST /api/composio/initiate`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateResponse {
    pub redirect_url: Option<String>,
    pub connection_id: String,
}

/// Query for `GET /api/calendar/events`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub connected_account_id: Option<String>,
}

/// Response for `GET /api/calendar/events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<CalendarEvent>,
}

/// Query for `DELETE /api/composio/disconnect`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectQuery {
    #[serde(default)]
    pub connection_id: Option<String>,
}

/// Response for `DELETE /api/composio/disconnect`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisconnectResponse {
    pub success: bool,
}

/// Whether the platform API key is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Configured,
    Missing,
}

/// Response for `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
    pub composio_api_key: KeyStatus,
}

/// JSON error body shared by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Short, user-facing description
    pub error: String,
    /// Underlying cause, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// App the request was about (auth config lookups only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl ErrorResponse {
    /// Create an error body without details
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            app_name: None,
        }
    }

    /// Attach the underlying message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the app name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("u1".to_string())), Some("u1"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }

    #[test]
    fn test_initiate_request_camel_case() {
        let req: InitiateRequest = serde_json::from_value(json!({
            "appName": "gmail",
            "entityId": "u1",
            "authConfigId": "ac_1"
        }))
        .unwrap();
        assert_eq!(req.app_name.as_deref(), Some("gmail"));
        assert_eq!(req.entity_id.as_deref(), Some("u1"));
        assert_eq!(req.auth_config_id.as_deref(), Some("ac_1"));
        assert!(req.redirect_url.is_none());
    }

    #[test]
    fn test_health_response_shape() {
        let health = HealthResponse {
            status: "ok".to_string(),
            timestamp: "2025-01-01T00:00:00.000Z".to_string(),
            composio_api_key: KeyStatus::Missing,
        };
        assert_eq!(
            serde_json::to_value(&health).unwrap(),
            json!({
                "status": "ok",
                "timestamp": "2025-01-01T00:00:00.000Z",
                "composioApiKey": "missing"
            })
        );
    }

    #[test]
    fn test_error_response_skips_empty_fields() {
        let body = ErrorResponse::new("entityId is required");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "entityId is required"})
        );

        let body = ErrorResponse::new("No auth config").with_app_name("gmail");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "No auth config", "appName": "gmail"})
        );
    }
}
