use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::{RequireAccess, RequireToken, authorize_content_mutation};
use crate::error::Error;
use crate::server::AppState;
use crate::server::dto::{CreateChirpRequest, ListChirpsParams};
use crate::server::response::ApiError;
use crate::server::validation::validate_chirp_body;
use crate::types::SortOrder;

pub async fn list_chirps(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListChirpsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let order = SortOrder::from_query(params.sort.as_deref());

    let chirps = match params.author_id.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let author_id: u64 = raw
                .parse()
                .map_err(|_| ApiError::bad_request(format!("Invalid author_id: {raw}")))?;
            state.chirps.list_by_author(author_id, order)?
        }
        None => state.chirps.list(order)?,
    };

    Ok(Json(chirps))
}

pub async fn create_chirp(
    auth: RequireAccess,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateChirpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let body = validate_chirp_body(&req.body)?;
    let chirp = state.chirps.create(&body, auth.user_id)?;

    Ok((StatusCode::CREATED, Json(chirp)))
}

pub async fn get_chirp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let chirp = state.chirps.get(id).map_err(|e| match e {
        Error::NotFound => ApiError::not_found(format!("Chirp {id} was not found")),
        other => ApiError::from(other),
    })?;

    Ok(Json(chirp))
}

pub async fn delete_chirp(
    RequireToken(token): RequireToken,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let chirp = state.chirps.get(id)?;
    authorize_content_mutation(&token, &chirp)?;

    state.chirps.delete(id)?;

    Ok(StatusCode::NO_CONTENT)
}
