//! Calendar events handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use calconnect_core::CalconnectError;
use calconnect_types::api::{non_empty, EventsQuery, EventsResponse};
use calconnect_types::{CalendarEvent, ConnectedAccount, Toolkit, ToolExecutionRequest};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::info;

use super::error::ApiError;
use crate::state::AppState;

const COMPONENT: &str = "calendar";

/// Platform action that lists Google Calendar events
pub const LIST_EVENTS_TOOL: &str = "GOOGLECALENDAR_LIST_EVENTS";

/// Upper bound on events returned per request
pub const MAX_EVENTS: u32 = 50;

/// Handler for calendar requests
pub struct CalendarHandler;

impl CalendarHandler {
    /// Handle GET /api/calendar/events
    pub async fn list_events(
        State(state): State<AppState>,
        query: Result<Query<EventsQuery>, QueryRejection>,
    ) -> Result<Json<EventsResponse>, ApiError> {
        let Query(query) = query.map_err(|r| ApiError::invalid(COMPONENT, r.body_text()))?;
        let entity_id = non_empty(&query.entity_id)
            .ok_or_else(|| ApiError::missing(COMPONENT, "entityId"))?;
        let requested_account = non_empty(&query.connected_account_id);

        info!(component = COMPONENT, "Fetching calendar events for entity: {}", entity_id);

        let accounts = state
            .platform
            .list_connected_accounts(entity_id)
            .await
            .map_err(|e| ApiError::upstream(COMPONENT, "fetch calendar events", e))?;

        let account = select_account(&accounts, requested_account).ok_or_else(|| {
            ApiError::new(
                COMPONENT,
                CalconnectError::NotFound(format!(
                    "No Google Calendar connection found for entity '{}'",
                    entity_id
                )),
            )
        })?;

        let request = ToolExecutionRequest {
            user_id: entity_id.to_string(),
            connected_account_id: Some(account.id.clone()),
            arguments: list_events_arguments(Utc::now()),
        };

        let execution = state
            .platform
            .execute_tool(LIST_EVENTS_TOOL, &request)
            .await
            .map_err(|e| ApiError::upstream(COMPONENT, "fetch calendar events", e))?;

        let events = CalendarEvent::from_items(execution.items())
            .map_err(|e| ApiError::upstream(COMPONENT, "fetch calendar events", e))?;

        info!(component = COMPONENT, "Retrieved {} calendar events", events.len());

        Ok(Json(EventsResponse { events }))
    }
}

/// Pick the account to read events from.
///
/// An explicit id must belong to the entity; otherwise the first Google
/// Calendar account wins.
pub fn select_account<'a>(
    accounts: &'a [ConnectedAccount],
    requested: Option<&str>,
) -> Option<&'a ConnectedAccount> {
    match requested {
        Some(id) => accounts.iter().find(|a| a.id == id),
        None => accounts.iter().find(|a| {
            a.toolkit_slug()
                .is_some_and(|slug| Toolkit::GoogleCalendar.matches_slug(slug))
        }),
    }
}

/// Arguments for the list-events action: upcoming single instances from the
/// primary calendar, ordered by start time
pub fn list_events_arguments(now: DateTime<Utc>) -> Value {
    json!({
        "calendarId": "primary",
        "maxResults": MAX_EVENTS,
        "timeMin": now.to_rfc3339_opts(SecondsFormat::Millis, true),
        "singleEvents": true,
        "orderBy": "startTime",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::MemoryPlatform;
    use calconnect_core::Settings;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn events_query(
        entity_id: &str,
        account: Option<&str>,
    ) -> Result<Query<EventsQuery>, QueryRejection> {
        Ok(Query(EventsQuery {
            entity_id: Some(entity_id.to_string()),
            connected_account_id: account.map(str::to_string),
        }))
    }

    #[test]
    fn test_list_events_arguments() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let args = list_events_arguments(now);
        assert_eq!(args["maxResults"], 50);
        assert_eq!(args["timeMin"], "2025-03-01T12:00:00.000Z");
        assert_eq!(args["singleEvents"], true);
        assert_eq!(args["orderBy"], "startTime");
        assert_eq!(args["calendarId"], "primary");
    }

    #[test]
    fn test_select_account() {
        let accounts = vec![
            ConnectedAccount::new("ca_gmail", "gmail"),
            ConnectedAccount::new("ca_cal", "GoogleCalendar"),
            ConnectedAccount::new("ca_cal2", "googlecalendar"),
        ];

        assert_eq!(select_account(&accounts, None).unwrap().id, "ca_cal");
        assert_eq!(select_account(&accounts, Some("ca_cal2")).unwrap().id, "ca_cal2");
        assert!(select_account(&accounts, Some("ca_other")).is_none());
        assert!(select_account(&accounts[..1], None).is_none());
    }

    #[tokio::test]
    async fn test_list_events() {
        let platform = Arc::new(
            MemoryPlatform::new()
                .with_account("u1", "ca_cal", "googlecalendar")
                .with_events(vec![json!({"id": "evt1", "summary": "Standup"})]),
        );
        let state = AppState::new(platform.clone(), Arc::new(Settings::default()));

        let Json(response) = CalendarHandler::list_events(State(state), events_query("u1", None))
            .await
            .unwrap();

        assert_eq!(response.events.len(), 1);
        assert_eq!(response.events[0].summary.as_deref(), Some("Standup"));

        let executed = platform.executed.lock().unwrap();
        assert_eq!(executed[0].0, LIST_EVENTS_TOOL);
        assert_eq!(executed[0].1.user_id, "u1");
        assert_eq!(executed[0].1.connected_account_id.as_deref(), Some("ca_cal"));
    }

    #[tokio::test]
    async fn test_list_events_without_connection() {
        let platform = Arc::new(MemoryPlatform::new().with_account("u1", "ca_gmail", "gmail"));
        let state = AppState::new(platform, Arc::new(Settings::default()));

        let err = CalendarHandler::list_events(State(state), events_query("u1", None))
            .await
            .unwrap_err();

        assert_eq!(err.error().status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_events_upstream_failure() {
        let platform = Arc::new(MemoryPlatform::failing("timeout"));
        let state = AppState::new(platform, Arc::new(Settings::default()));

        let err = CalendarHandler::list_events(State(state), events_query("u1", Some("ca_1")))
            .await
            .unwrap_err();

        assert_eq!(err.error().status_code(), 500);
        assert_eq!(
            err.error().to_response().error,
            "Failed to fetch calendar events"
        );
    }
}
