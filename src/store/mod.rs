mod content;
mod identity;
mod record;

pub use content::FileChirpStore;
pub use identity::FileUserStore;
pub use record::{Document, RecordStore};

use crate::error::Result;
use crate::types::{Chirp, SortOrder, User};

/// Users, the email index and revoked refresh tokens.
pub trait UserStore: Send + Sync {
    /// Fails with `DuplicateEmail` if the email is already registered.
    fn register(&self, email: &str, password: &str) -> Result<User>;

    /// Replaces email and password for an existing user.
    fn update(&self, id: u64, email: &str, password: &str) -> Result<User>;

    /// Fails with `InvalidCredentials` for unknown emails and wrong passwords alike.
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;

    /// Marks a user premium. Unknown ids are a successful no-op.
    fn upgrade(&self, id: u64) -> Result<()>;

    fn get_user(&self, id: u64) -> Result<User>;
    fn list_users(&self) -> Result<Vec<User>>;

    // Revocation
    fn revoke_token(&self, token: &str) -> Result<()>;
    fn is_revoked(&self, token: &str) -> Result<bool>;
}

/// Chirps keyed by id. Ownership checks happen before these calls.
pub trait ChirpStore: Send + Sync {
    fn create(&self, body: &str, author_id: u64) -> Result<Chirp>;
    fn get(&self, id: u64) -> Result<Chirp>;
    fn list(&self, order: SortOrder) -> Result<Vec<Chirp>>;
    fn list_by_author(&self, author_id: u64, order: SortOrder) -> Result<Vec<Chirp>>;
    fn delete(&self, id: u64) -> Result<()>;
}
