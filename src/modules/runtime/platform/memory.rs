//! In-memory platform used by the handler tests

use std::sync::Mutex;

use async_trait::async_trait;
use calconnect_types::{
    AuthConfig, ConnectedAccount, ConnectionRequest, ToolExecution, ToolExecutionRequest,
};
use serde_json::{json, Map, Value};

use super::error::PlatformError;
use super::traits::Platform;

/// Recorded calls and canned responses
#[derive(Default)]
pub struct MemoryPlatform {
    /// `(entity_id, account)` pairs
    pub accounts: Vec<(String, ConnectedAccount)>,
    pub auth_configs: Vec<AuthConfig>,
    /// Raw event items returned by tool execution
    pub events: Vec<Value>,
    /// When set, every call fails with this message
    pub failure: Option<String>,
    pub initiated: Mutex<Vec<(String, String, String)>>,
    pub executed: Mutex<Vec<(String, ToolExecutionRequest)>>,
    pub deleted: Mutex<Vec<String>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_account(mut self, entity_id: &str, id: &str, toolkit: &str) -> Self {
        self.accounts
            .push((entity_id.to_string(), ConnectedAccount::new(id, toolkit)));
        self
    }

    pub fn with_auth_config(mut self, id: &str) -> Self {
        self.auth_configs.push(AuthConfig {
            id: id.to_string(),
            name: None,
            toolkit: None,
        });
        self
    }

    pub fn with_events(mut self, events: Vec<Value>) -> Self {
        self.events = events;
        self
    }

    fn check(&self) -> Result<(), PlatformError> {
        match &self.failure {
            Some(message) => Err(PlatformError::Api {
                status: 502,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Platform for MemoryPlatform {
    async fn list_connected_accounts(
        &self,
        entity_id: &str,
    ) -> Result<Vec<ConnectedAccount>, PlatformError> {
        self.check()?;
        Ok(self
            .accounts
            .iter()
            .filter(|(entity, _)| entity == entity_id)
            .map(|(_, account)| account.clone())
            .collect())
    }

    async fn list_auth_configs(&self, _toolkit_slug: &str) -> Result<Vec<AuthConfig>, PlatformError> {
        self.check()?;
        Ok(self.auth_configs.clone())
    }

    async fn initiate_connection(
        &self,
        entity_id: &str,
        auth_config_id: &str,
        callback_url: &str,
    ) -> Result<ConnectionRequest, PlatformError> {
        self.check()?;
        self.initiated.lock().unwrap().push((
            entity_id.to_string(),
            auth_config_id.to_string(),
            callback_url.to_string(),
        ));
        Ok(ConnectionRequest {
            id: "ca_new".to_string(),
            redirect_url: Some("https://oauth.example.com/authorize".to_string()),
            status: Some("INITIATED".to_string()),
        })
    }

    async fn execute_tool(
        &self,
        tool_slug: &str,
        request: &ToolExecutionRequest,
    ) -> Result<ToolExecution, PlatformError> {
        self.check()?;
        self.executed
            .lock()
            .unwrap()
            .push((tool_slug.to_string(), request.clone()));
        Ok(ToolExecution {
            data: json!({ "items": self.events }),
            error: None,
            successful: true,
            extra: Map::new(),
        })
    }

    async fn delete_connected_account(
        &self,
        connected_account_id: &str,
    ) -> Result<(), PlatformError> {
        self.check()?;
        self.deleted
            .lock()
            .unwrap()
            .push(connected_account_id.to_string());
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "memory"
    }
}
