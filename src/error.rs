use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed store document: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("not found")]
    NotFound,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("forbidden")]
    Forbidden,

    #[error("unauthorized")]
    Unauthorized,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token lifetime out of range")]
    InvalidTtl,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for failures of the backing documents rather than expected outcomes.
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Corrupt(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
