//! HTTP request handlers for the Calconnect server
//!
//! This module contains handlers for the connected-account endpoints, the
//! OAuth callback redirect, calendar events, and health checks.

mod calendar;
mod callback;
mod connections;
mod error;
mod health;

pub use calendar::CalendarHandler;
pub use callback::CallbackHandler;
pub use connections::ConnectionsHandler;
pub use error::ApiError;
pub use health::HealthHandler;
