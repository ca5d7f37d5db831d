//! OAuth callback handler
//!
//! The platform sends the browser here after the OAuth dance. This endpoint
//! is consumed by a browser navigation, so it always answers with a redirect
//! to the frontend and never with JSON.

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info};
use url::Url;

use crate::state::AppState;

const COMPONENT: &str = "composio";

/// Handler for the OAuth callback redirect
pub struct CallbackHandler;

impl CallbackHandler {
    /// Handle GET /api/composio/callback
    pub async fn handle(
        State(state): State<AppState>,
        RawQuery(query): RawQuery,
        uri: Uri,
    ) -> Response {
        info!(component = COMPONENT, "Handling OAuth callback");
        debug!(
            component = COMPONENT,
            "Query params: {}",
            query.as_deref().unwrap_or("")
        );
        debug!(component = COMPONENT, "Full URL: {}", uri);

        let frontend_url = state.settings.frontend_url();
        let location = match connected_redirect(frontend_url) {
            Ok(location) => location,
            Err(e) => {
                error!(component = COMPONENT, "Error handling callback: {}", e);
                error_redirect(frontend_url, &e.to_string())
            }
        };

        info!(component = COMPONENT, "Redirecting to: {}", location);

        found(location)
    }
}

/// `{frontend}/?connected=true`
pub fn connected_redirect(frontend_url: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(&format!("{}/", frontend_url.trim_end_matches('/')))?;
    url.query_pairs_mut().append_pair("connected", "true");
    Ok(url.to_string())
}

/// `{frontend}/?error=<message>`
pub fn error_redirect(frontend_url: &str, message: &str) -> String {
    format!(
        "{}/?error={}",
        frontend_url.trim_end_matches('/'),
        urlencoding::encode(message)
    )
}

/// 302 Found, as browsers expect from an OAuth return leg
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_redirect() {
        assert_eq!(
            connected_redirect("http://localhost:5173").unwrap(),
            "http://localhost:5173/?connected=true"
        );
        assert_eq!(
            connected_redirect("https://app.example.com/calendar/").unwrap(),
            "https://app.example.com/calendar/?connected=true"
        );
    }

    #[test]
    fn test_connected_redirect_invalid_frontend() {
        assert!(connected_redirect("not a url").is_err());
    }

    #[test]
    fn test_error_redirect_encodes_message() {
        assert_eq!(
            error_redirect("http://localhost:5173/", "bad thing & more"),
            "http://localhost:5173/?error=bad%20thing%20%26%20more"
        );
    }

    #[test]
    fn test_found_sets_location() {
        let response = found("http://localhost:5173/?connected=true".to_string());
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "http://localhost:5173/?connected=true"
        );
    }
}
