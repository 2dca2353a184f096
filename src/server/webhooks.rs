use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireApiKey;
use crate::server::AppState;
use crate::server::dto::PolkaWebhookRequest;
use crate::server::response::ApiError;

const UPGRADE_EVENT: &str = "user.upgraded";

pub async fn polka_webhook(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Json(req): Json<PolkaWebhookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.event != UPGRADE_EVENT {
        tracing::debug!("Ignoring webhook event {}", req.event);
        return Ok(StatusCode::NO_CONTENT);
    }

    let Some(user_id) = req.data.user_id else {
        tracing::warn!("Upgrade event without a user_id");
        return Ok(StatusCode::NO_CONTENT);
    };

    state.users.upgrade(user_id)?;

    Ok(StatusCode::NO_CONTENT)
}
