use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const ACCESS_ISSUER: &str = "chirpy-access";
pub const REFRESH_ISSUER: &str = "chirpy-refresh";

const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;
const REFRESH_TOKEN_TTL_SECS: i64 = 60 * 24 * 60 * 60;

/// Token class, carried in the `iss` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    #[must_use]
    pub fn issuer(self) -> &'static str {
        match self {
            TokenKind::Access => ACCESS_ISSUER,
            TokenKind::Refresh => REFRESH_ISSUER,
        }
    }

    #[must_use]
    pub fn from_issuer(issuer: &str) -> Option<Self> {
        match issuer {
            ACCESS_ISSUER => Some(TokenKind::Access),
            REFRESH_ISSUER => Some(TokenKind::Refresh),
            _ => None,
        }
    }

    /// Standard lifetime: one hour for access, sixty days for refresh.
    #[must_use]
    pub fn ttl(self) -> Duration {
        match self {
            TokenKind::Access => Duration::seconds(ACCESS_TOKEN_TTL_SECS),
            TokenKind::Refresh => Duration::seconds(REFRESH_TOKEN_TTL_SECS),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// A token that passed signature and expiry checks. Callers still decide
/// whether its kind fits the purpose at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedToken {
    pub subject: u64,
    pub kind: TokenKind,
}

#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access: String,
    pub refresh: String,
}

/// Issues and parses HS256-signed session tokens. Holds nothing but the key.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, subject: u64, kind: TokenKind, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or(Error::InvalidTtl)?;
        let claims = Claims {
            sub: subject.to_string(),
            iss: kind.issuer().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Issues an access/refresh pair with the standard lifetimes.
    pub fn issue_session(&self, subject: u64) -> Result<SessionTokens> {
        Ok(SessionTokens {
            access: self.issue(subject, TokenKind::Access, TokenKind::Access.ttl())?,
            refresh: self.issue(subject, TokenKind::Refresh, TokenKind::Refresh.ttl())?,
        })
    }

    /// Verifies signature and expiry. Every failure, whatever the cause, is
    /// reported as [`Error::InvalidToken`].
    pub fn parse(&self, token: &str) -> Result<ParsedToken> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {e}");
            Error::InvalidToken
        })?;
        let claims = data.claims;

        // A token is dead at its expiry second, not one second after.
        if claims.exp <= Utc::now().timestamp() {
            return Err(Error::InvalidToken);
        }

        let kind = TokenKind::from_issuer(&claims.iss).ok_or(Error::InvalidToken)?;
        let subject = claims.sub.parse().map_err(|_| Error::InvalidToken)?;

        Ok(ParsedToken { subject, kind })
    }
}
