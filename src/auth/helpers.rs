const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

#[derive(Debug, PartialEq, Eq)]
pub enum HeaderError {
    Missing,
    InvalidScheme,
}

/// Extracts the token from a `Bearer` Authorization header.
pub fn extract_bearer_token(auth_header: Option<&str>) -> Result<String, HeaderError> {
    extract_with_prefix(auth_header, BEARER_PREFIX)
}

/// Extracts the key from an `ApiKey` Authorization header.
pub fn extract_api_key(auth_header: Option<&str>) -> Result<String, HeaderError> {
    extract_with_prefix(auth_header, API_KEY_PREFIX)
}

fn extract_with_prefix(auth_header: Option<&str>, prefix: &str) -> Result<String, HeaderError> {
    let header = auth_header.ok_or(HeaderError::Missing)?;
    let value = header
        .strip_prefix(prefix)
        .ok_or(HeaderError::InvalidScheme)?
        .trim();
    if value.is_empty() {
        return Err(HeaderError::Missing);
    }
    Ok(value.to_string())
}
