//! Shared runtime application state (HTTP handlers)

use calconnect_core::Settings;
use std::sync::Arc;

use crate::platform::Platform;

/// Application state shared across handlers.
///
/// Built once by the runtime at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<dyn Platform>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(platform: Arc<dyn Platform>, settings: Arc<Settings>) -> Self {
        Self { platform, settings }
    }
}
