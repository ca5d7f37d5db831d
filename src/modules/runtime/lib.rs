//! Runtime server for Calconnect
//!
//! This crate provides the HTTP server, the Composio platform client, and the
//! request handlers that proxy connected-account and calendar calls.

pub mod handlers;
pub mod platform;
pub mod server;
pub mod state;

pub use handlers::{ApiError, CalendarHandler, CallbackHandler, ConnectionsHandler, HealthHandler};
pub use platform::{ComposioClient, Platform, PlatformError};
pub use server::Runtime;
pub use state::AppState;
