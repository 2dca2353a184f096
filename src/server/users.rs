use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::auth::RequireAccess;
use crate::server::AppState;
use crate::server::dto::{CredentialsRequest, UserResponse};
use crate::server::response::ApiError;
use crate::server::validation::{validate_email, validate_password};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let user = state.users.register(&req.email, &req.password)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn update_user(
    auth: RequireAccess,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let user = state
        .users
        .update(auth.user_id, &req.email, &req.password)?;

    Ok(Json(UserResponse::from(user)))
}
