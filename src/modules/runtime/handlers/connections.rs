//! Connected account handlers

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, Query, Request, State,
    },
    http::header,
    Form, Json,
};
use calconnect_core::CalconnectError;
use calconnect_types::api::{
    non_empty, ConnectedAccountsQuery, ConnectionsResponse, DisconnectQuery, DisconnectResponse,
    InitiateRequest, InitiateResponse,
};
use calconnect_types::toolkit::normalize_slug;
use tracing::{error, info};

use super::error::ApiError;
use crate::state::AppState;

const COMPONENT: &str = "composio";

/// Initiate body, accepted as JSON or as an urlencoded form.
///
/// A body without a recognised content type decodes as `{}`.
#[derive(Debug)]
pub struct InitiatePayload(pub InitiateRequest);

#[async_trait]
impl<S> FromRequest<S> for InitiatePayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| {
                ct.to_ascii_lowercase()
                    .starts_with("application/x-www-form-urlencoded")
            });

        if is_form {
            let Form(request) = Form::<InitiateRequest>::from_request(req, state)
                .await
                .map_err(|r| ApiError::invalid(COMPONENT, r.body_text()))?;
            return Ok(Self(request));
        }

        match Json::<InitiateRequest>::from_request(req, state).await {
            Ok(Json(request)) => Ok(Self(request)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Ok(Self(InitiateRequest::default()))
            }
            Err(rejection) => Err(ApiError::invalid(COMPONENT, rejection.body_text())),
        }
    }
}

/// Handler for connected account requests
pub struct ConnectionsHandler;

impl ConnectionsHandler {
    /// Handle GET /api/composio/connectedAccounts
    pub async fn list(
        State(state): State<AppState>,
        query: Result<Query<ConnectedAccountsQuery>, QueryRejection>,
    ) -> Result<Json<ConnectionsResponse>, ApiError> {
        let Query(query) = query.map_err(|r| ApiError::invalid(COMPONENT, r.body_text()))?;
        let entity_id = non_empty(&query.entity_id)
            .ok_or_else(|| ApiError::missing(COMPONENT, "entityId"))?;

        info!(component = COMPONENT, "Fetching connected accounts for entity: {}", entity_id);

        let connections = state
            .platform
            .list_connected_accounts(entity_id)
            .await
            .map_err(|e| ApiError::upstream(COMPONENT, "fetch connected accounts", e))?;

        info!(component = COMPONENT, "Found {} connections", connections.len());

        Ok(Json(ConnectionsResponse { connections }))
    }

    /// Handle POST /api/composio/initiate
    pub async fn initiate(
        State(state): State<AppState>,
        InitiatePayload(request): InitiatePayload,
    ) -> Result<Json<InitiateResponse>, ApiError> {
        let (app_name, entity_id) =
            match (non_empty(&request.app_name), non_empty(&request.entity_id)) {
                (Some(app_name), Some(entity_id)) => (app_name, entity_id),
                _ => {
                    return Err(ApiError::new(
                        COMPONENT,
                        CalconnectError::MissingInput(vec![
                            "appName".to_string(),
                            "entityId".to_string(),
                        ]),
                    ))
                }
            };

        info!(
            component = COMPONENT,
            "Initiating connection for app: {}, entity: {}", app_name, entity_id
        );

        let callback_url = non_empty(&request.redirect_url)
            .map(str::to_string)
            .unwrap_or_else(|| state.settings.callback_url());

        let auth_config_id = match non_empty(&request.auth_config_id) {
            Some(id) => Some(id.to_string()),
            None => Self::find_auth_config(&state, app_name).await,
        };

        let auth_config_id = auth_config_id.ok_or_else(|| {
            ApiError::new(COMPONENT, CalconnectError::AuthConfigMissing(app_name.to_string()))
        })?;

        let connection = state
            .platform
            .initiate_connection(entity_id, &auth_config_id, &callback_url)
            .await
            .map_err(|e| ApiError::upstream(COMPONENT, "initiate connection", e))?;

        info!(component = COMPONENT, "Connection initiated successfully");
        info!(
            component = COMPONENT,
            "Redirect URL: {}",
            connection.redirect_url.as_deref().unwrap_or("<none>")
        );

        Ok(Json(InitiateResponse {
            redirect_url: connection.redirect_url,
            connection_id: connection.id,
        }))
    }

    /// Look up the first auth config registered for the app.
    ///
    /// Lookup failures are logged and reported as "none found".
    async fn find_auth_config(state: &AppState, app_name: &str) -> Option<String> {
        let slug = normalize_slug(app_name);

        match state.platform.list_auth_configs(&slug).await {
            Ok(configs) => {
                let id = configs.into_iter().next().map(|c| c.id);
                if let Some(id) = &id {
                    info!(component = COMPONENT, "Using auth config ID: {}", id);
                }
                id
            }
            Err(e) => {
                error!(component = COMPONENT, "Error getting auth configs: {}", e);
                None
            }
        }
    }

    /// Handle DELETE /api/composio/disconnect
    pub async fn disconnect(
        State(state): State<AppState>,
        query: Result<Query<DisconnectQuery>, QueryRejection>,
    ) -> Result<Json<DisconnectResponse>, ApiError> {
        let Query(query) = query.map_err(|r| ApiError::invalid(COMPONENT, r.body_text()))?;
        let connection_id = non_empty(&query.connection_id)
            .ok_or_else(|| ApiError::missing(COMPONENT, "connectionId"))?;

        info!(component = COMPONENT, "Disconnecting connection: {}", connection_id);

        state
            .platform
            .delete_connected_account(connection_id)
            .await
            .map_err(|e| ApiError::upstream(COMPONENT, "disconnect account", e))?;

        info!(component = COMPONENT, "Connection disconnected successfully");

        Ok(Json(DisconnectResponse { success: true }))
    }
}
