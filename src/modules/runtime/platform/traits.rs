//! Platform trait definition

use async_trait::async_trait;
use calconnect_types::{
    AuthConfig, ConnectedAccount, ConnectionRequest, ToolExecution, ToolExecutionRequest,
};

use super::error::PlatformError;

/// Trait for integration platform clients
///
/// One implementation is constructed at startup and shared by every request
/// handler, so implementations must be cheap to call concurrently.
#[async_trait]
pub trait Platform: Send + Sync {
    /// List the accounts connected by an entity
    async fn list_connected_accounts(
        &self,
        entity_id: &str,
    ) -> Result<Vec<ConnectedAccount>, PlatformError>;

    /// List auth configs registered for a toolkit slug
    async fn list_auth_configs(&self, toolkit_slug: &str) -> Result<Vec<AuthConfig>, PlatformError>;

    /// Start a new OAuth connection for an entity.
    ///
    /// A new connected account is always created, even if the entity already
    /// has one for the same auth config.
    async fn initiate_connection(
        &self,
        entity_id: &str,
        auth_config_id: &str,
        callback_url: &str,
    ) -> Result<ConnectionRequest, PlatformError>;

    /// Execute a tool action on behalf of an entity
    async fn execute_tool(
        &self,
        tool_slug: &str,
        request: &ToolExecutionRequest,
    ) -> Result<ToolExecution, PlatformError>;

    /// Delete a connected account
    async fn delete_connected_account(&self, connected_account_id: &str)
        -> Result<(), PlatformError>;

    /// Get the platform name
    fn platform_name(&self) -> &'static str;
}
