//! Records exchanged with the integration platform

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Toolkit reference embedded in platform records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolkitRef {
    /// Toolkit slug (e.g. `googlecalendar`)
    pub slug: String,
    /// Remaining toolkit attributes, passed through as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stored OAuth grant linking an entity to a third-party app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedAccount {
    /// Connected account id
    pub id: String,

    /// Connection status as reported by the platform (e.g. `ACTIVE`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Toolkit this account belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit: Option<ToolkitRef>,

    /// Everything else the platform returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectedAccount {
    /// Create an account record with just an id and toolkit slug
    pub fn new(id: impl Into<String>, toolkit_slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: None,
            toolkit: Some(ToolkitRef {
                slug: toolkit_slug.into(),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// Toolkit slug of this account.
    ///
    /// Older payloads carry the slug as a flat `appName`/`toolkit_slug` field
    /// instead of a nested toolkit object.
    pub fn toolkit_slug(&self) -> Option<&str> {
        if let Some(toolkit) = &self.toolkit {
            return Some(toolkit.slug.as_str());
        }
        ["toolkit_slug", "appName", "app_name"]
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(Value::as_str))
    }
}

/// Platform-side OAuth registration for a toolkit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Auth config id
    pub id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Toolkit the config is registered for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit: Option<ToolkitRef>,
}

/// Result of initiating a new connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Id of the pending connected account
    pub id: String,

    /// Where the browser must go to complete OAuth
    #[serde(default, alias = "redirectUrl", alias = "redirect_uri")]
    pub redirect_url: Option<String>,

    /// Initial status (usually `INITIATED`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Tool execution request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecutionRequest {
    /// Entity the tool runs on behalf of
    pub user_id: String,

    /// Specific connected account to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_account_id: Option<String>,

    /// Tool arguments
    pub arguments: Value,
}

/// Tool execution result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecution {
    /// Tool output payload
    #[serde(default)]
    pub data: Value,

    /// Error reported by the tool, if any
    #[serde(default)]
    pub error: Option<String>,

    /// Whether the platform considers the execution successful
    #[serde(default = "default_successful")]
    pub successful: bool,

    /// Remaining top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_successful() -> bool {
    true
}

impl ToolExecution {
    /// Extract the `items` list from the execution payload.
    ///
    /// Looks in `data.items`, then `data.response_data.items`, then a
    /// top-level `items`; yields an empty list when none is present.
    pub fn items(&self) -> Vec<Value> {
        let candidates = [
            self.data.get("items"),
            self.data.get("response_data").and_then(|d| d.get("items")),
            self.extra.get("items"),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|v| v.as_array().cloned())
            .unwrap_or_default()
    }
}

/// Start or end of a calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// Timed events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// All-day events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Read-only projection of a Google Calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,

    /// Remaining event attributes, passed through as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEvent {
    /// Decode a list of raw event items
    pub fn from_items(items: Vec<Value>) -> Result<Vec<CalendarEvent>, serde_json::Error> {
        items.into_iter().map(serde_json::from_value).collect()
    }
}
