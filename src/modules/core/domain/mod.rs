//! Domain models for Calconnect configuration

mod settings;

pub use settings::{
    Settings, CALLBACK_PATH, DEFAULT_COMPOSIO_BASE_URL, DEFAULT_FRONTEND_URL, DEFAULT_HOST,
    DEFAULT_PORT, DEFAULT_UPSTREAM_TIMEOUT_SECS,
};
