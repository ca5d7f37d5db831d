//! Health check handler

use axum::{extract::State, Json};
use calconnect_types::api::{HealthResponse, KeyStatus};
use chrono::{SecondsFormat, Utc};

use crate::state::AppState;

/// Handler for health checks
pub struct HealthHandler;

impl HealthHandler {
    /// Handle GET /health
    pub async fn handle(State(state): State<AppState>) -> Json<HealthResponse> {
        let composio_api_key = if state.settings.has_api_key() {
            KeyStatus::Configured
        } else {
            KeyStatus::Missing
        };

        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            composio_api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::MemoryPlatform;
    use calconnect_core::Settings;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_reports_key_status() {
        let settings = Settings {
            composio_api_key: Some("ck_test".to_string()),
            ..Settings::default()
        };
        let state = AppState::new(Arc::new(MemoryPlatform::new()), Arc::new(settings));

        let Json(health) = HealthHandler::handle(State(state)).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.composio_api_key, KeyStatus::Configured);
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_health_reports_missing_key() {
        let state = AppState::new(Arc::new(MemoryPlatform::new()), Arc::new(Settings::default()));

        let Json(health) = HealthHandler::handle(State(state)).await;
        assert_eq!(health.composio_api_key, KeyStatus::Missing);
    }
}
