//! HTTP server for Calconnect

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use calconnect_core::{CalconnectError, Settings};
use calconnect_types::api::ErrorResponse;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, error, info, Level};
use url::Url;

use crate::handlers::{CalendarHandler, CallbackHandler, ConnectionsHandler, HealthHandler};
use crate::platform::{ComposioClient, Platform};
use crate::state::AppState;

/// Extra time the HTTP layer allows on top of the upstream timeout
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Runtime server for Calconnect
pub struct Runtime {
    settings: Arc<Settings>,
    platform: Arc<dyn Platform>,
    cors_origins: Vec<HeaderValue>,
}

impl Runtime {
    /// Create a runtime backed by the Composio client
    pub fn new(settings: Settings) -> Result<Self, CalconnectError> {
        let client = ComposioClient::from_settings(&settings)
            .map_err(|e| CalconnectError::Config(e.to_string()))?;
        Self::with_platform(settings, Arc::new(client))
    }

    /// Create a runtime with an explicit platform implementation
    pub fn with_platform(
        settings: Settings,
        platform: Arc<dyn Platform>,
    ) -> Result<Self, CalconnectError> {
        let cors_origins = cors_origins(&settings.frontend_urls)?;

        Ok(Self {
            settings: Arc::new(settings),
            platform,
            cors_origins,
        })
    }

    /// Build the Axum router
    pub fn build_router(&self) -> Router {
        let state = AppState::new(self.platform.clone(), self.settings.clone());

        // Browser origins are restricted; requests without Origin pass untouched
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.cors_origins.clone()))
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true);

        let timeout = TimeoutLayer::new(self.settings.upstream_timeout() + REQUEST_TIMEOUT_SLACK);

        // One INFO line per request and response
        let trace = TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO));

        Router::new()
            // Connected accounts
            .route(
                "/api/composio/connectedAccounts",
                get(ConnectionsHandler::list),
            )
            .route("/api/composio/initiate", post(ConnectionsHandler::initiate))
            .route("/api/composio/callback", get(CallbackHandler::handle))
            .route(
                "/api/composio/disconnect",
                delete(ConnectionsHandler::disconnect),
            )
            // Calendar
            .route("/api/calendar/events", get(CalendarHandler::list_events))
            // Health check
            .route("/health", get(HealthHandler::handle))
            .fallback(Self::not_found)
            // State
            .with_state(state)
            // Middleware
            .layer(CatchPanicLayer::custom(Self::handle_panic))
            .layer(cors)
            .layer(timeout)
            .layer(trace)
    }

    /// Fallback for unknown routes
    async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Not found").with_message(uri.path().to_string())),
        )
    }

    /// Last-resort handler for panics inside request handlers
    fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
        let message = if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic".to_string()
        };

        error!(component = "server", "[Server Error] {}", message);

        let body = CalconnectError::Server(message).to_response();
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }

    /// Start the server
    pub async fn run(&self) -> Result<(), CalconnectError> {
        let addr: SocketAddr = self
            .settings
            .bind_address()
            .parse()
            .map_err(|e| CalconnectError::Server(format!("Invalid address: {}", e)))?;

        let app = self.build_router();

        info!("Backend server running on http://{}", addr);
        info!("Backend URL: {}", self.settings.backend_url());
        info!("CORS enabled for: {}", self.settings.frontend_urls.join(", "));
        info!("OAuth callback: {}", self.settings.callback_url());
        info!("Platform: {}", self.platform.platform_name());
        info!(
            "Composio API key: {}",
            if self.settings.has_api_key() {
                "configured"
            } else {
                "missing"
            }
        );

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| CalconnectError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .map_err(|e| CalconnectError::Server(format!("Server error: {}", e)))?;

        info!("Server stopped");

        Ok(())
    }

    /// Wait for shutdown signal
    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!("Failed to install SIGTERM signal handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                debug!("Received CTRL+C, shutting down...");
            }
            _ = terminate => {
                debug!("Received SIGTERM, shutting down...");
            }
        }
    }
}

/// Convert frontend URLs into CORS origin header values (`scheme://host[:port]`)
fn cors_origins(frontend_urls: &[String]) -> Result<Vec<HeaderValue>, CalconnectError> {
    frontend_urls
        .iter()
        .map(|raw| {
            let url = Url::parse(raw).map_err(|e| {
                CalconnectError::Config(format!("Invalid frontend URL '{}': {}", raw, e))
            })?;
            HeaderValue::from_str(&url.origin().ascii_serialization()).map_err(|e| {
                CalconnectError::Config(format!("Invalid frontend URL '{}': {}", raw, e))
            })
        })
        .collect()
}
