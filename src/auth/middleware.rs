use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{
        HeaderValue, StatusCode,
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        request::Parts,
    },
    response::{IntoResponse, Response},
};
use serde_json::json;
use subtle::ConstantTimeEq;

use super::helpers::{HeaderError, extract_api_key, extract_bearer_token};
use super::policy::{authorize_access, authorize_refresh};
use super::token::ParsedToken;
use crate::error::Error;
use crate::server::AppState;

/// The raw bearer token, unparsed.
pub struct BearerToken(pub String);

/// Extractor for any validly signed, unexpired token. The caller checks its kind.
pub struct RequireToken(pub ParsedToken);

/// Extractor that requires a valid access token.
pub struct RequireAccess {
    pub user_id: u64,
}

/// Extractor that requires an unrevoked refresh token.
pub struct RequireRefresh {
    pub user_id: u64,
    pub raw_token: String,
}

/// Extractor that requires the upgrade webhook's shared key.
pub struct RequireApiKey;

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
    InvalidApiKey,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingAuth => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidScheme => (StatusCode::UNAUTHORIZED, "Invalid authorization scheme"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid API key"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer realm=\"chirpy\""),
            );
        }

        response
    }
}

impl From<HeaderError> for AuthError {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::Missing => AuthError::MissingAuth,
            HeaderError::InvalidScheme => AuthError::InvalidScheme,
        }
    }
}

fn auth_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(extract_bearer_token(auth_header(parts))?))
    }
}

impl FromRequestParts<Arc<AppState>> for RequireToken {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw_token = extract_bearer_token(auth_header(parts))?;
        let parsed = state
            .tokens
            .parse(&raw_token)
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(RequireToken(parsed))
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAccess {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw_token = extract_bearer_token(auth_header(parts))?;
        let user_id =
            authorize_access(&state.tokens, &raw_token).map_err(|_| AuthError::InvalidToken)?;
        Ok(RequireAccess { user_id })
    }
}

impl FromRequestParts<Arc<AppState>> for RequireRefresh {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw_token = extract_bearer_token(auth_header(parts))?;
        let user_id = authorize_refresh(&state.tokens, state.users.as_ref(), &raw_token)
            .map_err(|e| match e {
                Error::Unauthorized => AuthError::InvalidToken,
                other => {
                    tracing::error!("Failed to check refresh token: {other}");
                    AuthError::InternalError
                }
            })?;
        Ok(RequireRefresh { user_id, raw_token })
    }
}

impl FromRequestParts<Arc<AppState>> for RequireApiKey {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let presented = extract_api_key(auth_header(parts))?;
        match state.polka_key.as_deref() {
            Some(expected) if api_key_matches(expected, &presented) => Ok(RequireApiKey),
            _ => Err(AuthError::InvalidApiKey),
        }
    }
}

/// Compares the shared key without short-circuiting on the first differing byte.
fn api_key_matches(expected: &str, presented: &str) -> bool {
    expected.as_bytes().ct_eq(presented.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_matches() {
        assert!(api_key_matches("f271c81f", "f271c81f"));
        assert!(!api_key_matches("f271c81f", "f271c81e"));
        assert!(!api_key_matches("f271c81f", "f271c81"));
        assert!(!api_key_matches("f271c81f", ""));
    }
}
