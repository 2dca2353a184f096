use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::{BearerToken, RequireRefresh, TokenKind};
use crate::server::AppState;
use crate::server::dto::{AccessTokenResponse, CredentialsRequest, LoginResponse};
use crate::server::response::ApiError;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.authenticate(&req.email, &req.password)?;
    let session = state.tokens.issue_session(user.id)?;

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        is_chirpy_red: user.is_premium,
        token: session.access,
        refresh_token: session.refresh,
    }))
}

pub async fn refresh(
    auth: RequireRefresh,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state
        .tokens
        .issue(auth.user_id, TokenKind::Access, TokenKind::Access.ttl())?;

    Ok(Json(AccessTokenResponse { token }))
}

pub async fn revoke(
    BearerToken(raw_token): BearerToken,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let parsed = state.tokens.parse(&raw_token)?;
    match parsed.kind {
        TokenKind::Refresh => {}
        TokenKind::Access => return Err(ApiError::unauthorized("Refresh token required")),
    }

    state.users.revoke_token(&raw_token)?;

    Ok(StatusCode::NO_CONTENT)
}
