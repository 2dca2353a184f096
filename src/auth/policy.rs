use tracing::debug;

use super::token::{ParsedToken, TokenKind, TokenService};
use crate::error::{Error, Result};
use crate::store::UserStore;
use crate::types::Chirp;

/// Allows a content mutation only for an access token whose subject wrote
/// the chirp. Wrong class and wrong owner both surface as `Forbidden`.
pub fn authorize_content_mutation(token: &ParsedToken, chirp: &Chirp) -> Result<()> {
    match token.kind {
        TokenKind::Access => {}
        TokenKind::Refresh => {
            debug!(
                "Refresh token for user {} presented for chirp {}",
                token.subject, chirp.id
            );
            return Err(Error::Forbidden);
        }
    }

    if token.subject != chirp.author_id {
        debug!(
            "User {} is not the author of chirp {} (author {})",
            token.subject, chirp.id, chirp.author_id
        );
        return Err(Error::Forbidden);
    }

    Ok(())
}

/// Resolves the subject of a valid access token.
pub fn authorize_access(tokens: &TokenService, raw_token: &str) -> Result<u64> {
    let parsed = tokens.parse(raw_token).map_err(|_| Error::Unauthorized)?;
    match parsed.kind {
        TokenKind::Access => Ok(parsed.subject),
        TokenKind::Refresh => {
            debug!("Refresh token used where an access token is required");
            Err(Error::Unauthorized)
        }
    }
}

/// Resolves the subject of an unrevoked refresh token.
///
/// Store failures while checking revocation propagate unchanged.
pub fn authorize_refresh(
    tokens: &TokenService,
    users: &dyn UserStore,
    raw_token: &str,
) -> Result<u64> {
    let parsed = tokens.parse(raw_token).map_err(|_| Error::Unauthorized)?;
    match parsed.kind {
        TokenKind::Refresh => {}
        TokenKind::Access => {
            debug!("Access token presented for refresh");
            return Err(Error::Unauthorized);
        }
    }

    if users.is_revoked(raw_token)? {
        debug!("Revoked refresh token presented by user {}", parsed.subject);
        return Err(Error::Unauthorized);
    }

    Ok(parsed.subject)
}
