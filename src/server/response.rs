use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::Error;

/// API error that converts to a proper HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound => ApiError::not_found("Not found"),
            Error::DuplicateEmail => ApiError::conflict("Email already registered"),
            Error::InvalidCredentials => ApiError::unauthorized("Incorrect email or password"),
            Error::InvalidToken | Error::Unauthorized => ApiError::unauthorized("Invalid token"),
            Error::Forbidden => ApiError::forbidden("Forbidden"),
            other => {
                tracing::error!("Request failed: {other}");
                ApiError::internal("Something went wrong")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        assert_eq!(ApiError::from(Error::NotFound).status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(Error::DuplicateEmail).status, StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(Error::InvalidCredentials).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::from(Error::Forbidden).status, StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(Error::Io(std::io::Error::other("disk gone"))).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::from(Error::Io(std::io::Error::other("/secret/path")));
        assert!(!err.message.contains("/secret/path"));
    }
}
