use crate::server::response::ApiError;

pub const MAX_CHIRP_LEN: usize = 140;

const CENSORED: &str = "****";
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Checks the length of a chirp and returns its censored body.
pub fn validate_chirp_body(body: &str) -> Result<String, ApiError> {
    if body.chars().count() > MAX_CHIRP_LEN {
        return Err(ApiError::bad_request("Chirp is too long"));
    }
    Ok(censor(body))
}

/// Replaces profane words, whatever their case, and collapses whitespace.
#[must_use]
pub fn censor(body: &str) -> String {
    body.split_whitespace()
        .map(|word| {
            if PROFANE_WORDS
                .iter()
                .any(|bad| word.eq_ignore_ascii_case(bad))
            {
                CENSORED
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::bad_request("Password cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_censor() {
        assert_eq!(
            censor("This is a kerfuffle opinion I need to share with the world"),
            "This is a **** opinion I need to share with the world"
        );
        assert_eq!(censor("Sharbert and FORNAX"), "**** and ****");
        // punctuation keeps the word intact
        assert_eq!(censor("what a kerfuffle!"), "what a kerfuffle!");
    }

    #[test]
    fn test_censor_collapses_whitespace() {
        assert_eq!(censor("  hello   world "), "hello world");
    }

    #[test]
    fn test_chirp_length_limit() {
        let at_limit = "a".repeat(MAX_CHIRP_LEN);
        assert!(validate_chirp_body(&at_limit).is_ok());

        let too_long = "a".repeat(MAX_CHIRP_LEN + 1);
        let err = validate_chirp_body(&too_long).unwrap_err();
        assert_eq!(err.message, "Chirp is too long");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
    }
}
