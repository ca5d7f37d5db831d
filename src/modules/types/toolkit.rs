//! Toolkit identifiers used by the integration platform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Toolkits this service knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolkit {
    /// Google Calendar
    #[serde(rename = "googlecalendar")]
    GoogleCalendar,
    /// Gmail
    Gmail,
}

impl fmt::Display for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Toolkit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "googlecalendar" | "google_calendar" | "google-calendar" | "gcal" => {
                Ok(Toolkit::GoogleCalendar)
            }
            "gmail" => Ok(Toolkit::Gmail),
            _ => Err(format!("Unknown toolkit: {}", s)),
        }
    }
}

impl Toolkit {
    /// Platform slug for this toolkit
    pub fn slug(&self) -> &'static str {
        match self {
            Toolkit::GoogleCalendar => "googlecalendar",
            Toolkit::Gmail => "gmail",
        }
    }

    /// Case-insensitive comparison against a slug reported by the platform
    pub fn matches_slug(&self, slug: &str) -> bool {
        slug.eq_ignore_ascii_case(self.slug())
    }
}

/// Normalize a user-supplied app name into a platform toolkit slug.
///
/// Known aliases map to their canonical slug; anything else is lowercased.
pub fn normalize_slug(app_name: &str) -> String {
    match Toolkit::from_str(app_name) {
        Ok(toolkit) => toolkit.slug().to_string(),
        Err(_) => app_name.trim().to_lowercase(),
    }
}
