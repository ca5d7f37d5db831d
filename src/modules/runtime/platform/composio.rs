//! Composio REST client
//!
//! Talks to the Composio v3 API over `reqwest`, authenticating with the
//! `x-api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use calconnect_core::Settings;
use calconnect_types::{
    AuthConfig, ConnectedAccount, ConnectionRequest, ToolExecution, ToolExecutionRequest,
};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::error::PlatformError;
use super::traits::Platform;

const CONNECTED_ACCOUNTS_PATH: &str = "/api/v3/connected_accounts";
const AUTH_CONFIGS_PATH: &str = "/api/v3/auth_configs";
const TOOLS_EXECUTE_PATH: &str = "/api/v3/tools/execute";

/// Paginated list envelope
#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Client for the Composio platform
pub struct ComposioClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ComposioClient {
    /// Create a client for the given API key and base URL.
    ///
    /// Without an API key requests are still sent; the platform rejects them
    /// and the rejection is surfaced to the caller.
    pub fn new(
        api_key: Option<&str>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key).map_err(|_| PlatformError::Config {
                reason: "COMPOSIO_API_KEY contains characters not allowed in a header".to_string(),
            })?;
            headers.insert("x-api-key", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| PlatformError::Config {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Create a client from server settings
    pub fn from_settings(settings: &Settings) -> Result<Self, PlatformError> {
        Self::new(
            settings.composio_api_key.as_deref(),
            settings.composio_base_url.clone(),
            settings.upstream_timeout(),
        )
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, mapping timeouts and non-2xx statuses to errors
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, PlatformError> {
        debug!("Composio request: {}", path);

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlatformError::Timeout {
                        path: path.to_string(),
                    }
                } else {
                    PlatformError::from(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "request failed".to_string());

        Err(PlatformError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Send a request and decode the JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, PlatformError> {
        let response = self.send(request, path).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlatformError::Decode {
            reason: format!("{}: {}", path, e),
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Composio reports errors as `{"error": {"message": ..}}`, `{"error": ".."}`
/// or `{"message": ".."}` depending on the endpoint.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .or_else(|| value.get("error").and_then(Value::as_str))
        .or_else(|| value.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

#[async_trait]
impl Platform for ComposioClient {
    async fn list_connected_accounts(
        &self,
        entity_id: &str,
    ) -> Result<Vec<ConnectedAccount>, PlatformError> {
        let request = self
            .client
            .get(self.url(CONNECTED_ACCOUNTS_PATH))
            .query(&[("user_ids", entity_id)]);

        let list: ListResponse<ConnectedAccount> =
            self.send_json(request, CONNECTED_ACCOUNTS_PATH).await?;
        Ok(list.items)
    }

    async fn list_auth_configs(&self, toolkit_slug: &str) -> Result<Vec<AuthConfig>, PlatformError> {
        let request = self
            .client
            .get(self.url(AUTH_CONFIGS_PATH))
            .query(&[("toolkit_slug", toolkit_slug)]);

        let list: ListResponse<AuthConfig> = self.send_json(request, AUTH_CONFIGS_PATH).await?;
        Ok(list.items)
    }

    async fn initiate_connection(
        &self,
        entity_id: &str,
        auth_config_id: &str,
        callback_url: &str,
    ) -> Result<ConnectionRequest, PlatformError> {
        let body = json!({
            "auth_config": { "id": auth_config_id },
            "connection": {
                "user_id": entity_id,
                "callback_url": callback_url,
            },
        });

        let request = self
            .client
            .post(self.url(CONNECTED_ACCOUNTS_PATH))
            .json(&body);

        self.send_json(request, CONNECTED_ACCOUNTS_PATH).await
    }

    async fn execute_tool(
        &self,
        tool_slug: &str,
        request: &ToolExecutionRequest,
    ) -> Result<ToolExecution, PlatformError> {
        let path = format!("{}/{}", TOOLS_EXECUTE_PATH, urlencoding::encode(tool_slug));
        let http_request = self.client.post(self.url(&path)).json(request);

        let execution: ToolExecution = self.send_json(http_request, &path).await?;
        if !execution.successful {
            return Err(PlatformError::ToolFailed {
                message: execution
                    .error
                    .unwrap_or_else(|| format!("{} reported failure", tool_slug)),
            });
        }

        Ok(execution)
    }

    async fn delete_connected_account(
        &self,
        connected_account_id: &str,
    ) -> Result<(), PlatformError> {
        let path = format!(
            "{}/{}",
            CONNECTED_ACCOUNTS_PATH,
            urlencoding::encode(connected_account_id)
        );
        let request = self.client.delete(self.url(&path));

        self.send(request, &path).await?;
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "composio"
    }
}
