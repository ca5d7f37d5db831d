//! Type definitions for Calconnect
//!
//! This crate contains shared type definitions used across the Calconnect codebase,
//! including the HTTP API bodies, the records exchanged with the integration
//! platform, and the toolkit identifiers.

pub mod api;
pub mod platform;
pub mod toolkit;

pub use platform::{
    AuthConfig, CalendarEvent, ConnectedAccount, ConnectionRequest, EventTime, ToolExecution,
    ToolExecutionRequest, ToolkitRef,
};
pub use toolkit::Toolkit;
