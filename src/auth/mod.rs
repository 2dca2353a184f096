mod helpers;
mod middleware;
mod password;
mod policy;
mod token;

pub use middleware::{
    AuthError, BearerToken, RequireAccess, RequireApiKey, RequireRefresh,
    RequireToken,
};
pub use password::PasswordHasher;
pub use policy::{authorize_access, authorize_content_mutation, authorize_refresh};
pub use token::{
    ACCESS_ISSUER, ParsedToken, REFRESH_ISSUER, SessionTokens, TokenKind, TokenService,
};
