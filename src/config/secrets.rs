use crate::error::{Error, Result};

pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const POLKA_KEY_VAR: &str = "POLKA_APIKEY";

/// Process-wide secrets, read once at startup.
#[derive(Clone)]
pub struct Secrets {
    pub jwt_secret: String,
    /// Shared key for the upgrade webhook. Without it every webhook call is refused.
    pub polka_key: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("jwt_secret", &"<redacted>")
            .field("polka_key", &self.polka_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Secrets {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {e}");
            }
        }

        Self::from_values(
            std::env::var(JWT_SECRET_VAR).ok(),
            std::env::var(POLKA_KEY_VAR).ok(),
        )
    }

    pub fn from_values(jwt_secret: Option<String>, polka_key: Option<String>) -> Result<Self> {
        let jwt_secret = jwt_secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{JWT_SECRET_VAR} must be set")))?;
        let polka_key = polka_key.filter(|s| !s.trim().is_empty());

        Ok(Self {
            jwt_secret,
            polka_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_required() {
        assert!(matches!(
            Secrets::from_values(None, None),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Secrets::from_values(Some("  ".to_string()), None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_blank_polka_key_disables_webhook() {
        let secrets = Secrets::from_values(Some("s3cret".to_string()), Some(String::new())).unwrap();
        assert_eq!(secrets.jwt_secret, "s3cret");
        assert!(secrets.polka_key.is_none());
    }

    #[test]
    fn test_debug_redacts() {
        let secrets =
            Secrets::from_values(Some("s3cret".to_string()), Some("key".to_string())).unwrap();
        let printed = format!("{secrets:?}");
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("key\""));
    }
}
