use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::UserStore;
use super::record::{RecordStore, next_id};
use crate::auth::PasswordHasher;
use crate::error::{Error, Result};
use crate::types::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserRecord {
    id: u64,
    email: String,
    password_hash: String,
    #[serde(default)]
    is_premium: bool,
}

impl UserRecord {
    fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            is_premium: self.is_premium,
        }
    }
}

/// On-disk identity document. `email_index` holds exactly one entry per
/// current user email.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    users: BTreeMap<u64, UserRecord>,
    email_index: BTreeMap<String, u64>,
    revoked_tokens: BTreeMap<String, DateTime<Utc>>,
}

pub struct FileUserStore {
    records: RecordStore<UserDocument>,
    hasher: PasswordHasher,
}

impl FileUserStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            records: RecordStore::open(path)?,
            hasher: PasswordHasher::new(),
        })
    }
}

impl UserStore for FileUserStore {
    fn register(&self, email: &str, password: &str) -> Result<User> {
        let mut doc = self.records.load()?;

        if doc.email_index.contains_key(email) {
            return Err(Error::DuplicateEmail);
        }

        let record = UserRecord {
            id: next_id(doc.users.len()),
            email: email.to_string(),
            password_hash: self.hasher.hash(password)?,
            is_premium: false,
        };

        doc.email_index.insert(record.email.clone(), record.id);
        doc.users.insert(record.id, record.clone());
        self.records.write(&doc)?;

        info!("Registered user {}", record.id);
        Ok(record.to_user())
    }

    fn update(&self, id: u64, email: &str, password: &str) -> Result<User> {
        let mut doc = self.records.load()?;

        let old_email = doc.users.get(&id).ok_or(Error::NotFound)?.email.clone();
        if doc.email_index.get(email).is_some_and(|&owner| owner != id) {
            return Err(Error::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(password)?;

        doc.email_index.remove(&old_email);
        doc.email_index.insert(email.to_string(), id);

        let record = doc.users.get_mut(&id).ok_or(Error::NotFound)?;
        record.email = email.to_string();
        record.password_hash = password_hash;
        let user = record.to_user();

        self.records.write(&doc)?;
        Ok(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let doc = self.records.load()?;

        let Some(record) = doc
            .email_index
            .get(email)
            .and_then(|id| doc.users.get(id))
        else {
            self.hasher.verify_decoy(password);
            return Err(Error::InvalidCredentials);
        };

        match self.hasher.verify(password, &record.password_hash) {
            Ok(true) => Ok(record.to_user()),
            Ok(false) => Err(Error::InvalidCredentials),
            Err(e) => {
                warn!("Stored hash for user {} is unusable: {e}", record.id);
                Err(Error::InvalidCredentials)
            }
        }
    }

    fn upgrade(&self, id: u64) -> Result<()> {
        let mut doc = self.records.load()?;

        let Some(record) = doc.users.get_mut(&id) else {
            warn!("Upgrade requested for unknown user {id}, ignoring");
            return Ok(());
        };
        record.is_premium = true;

        self.records.write(&doc)?;
        info!("Upgraded user {id} to premium");
        Ok(())
    }

    fn get_user(&self, id: u64) -> Result<User> {
        let doc = self.records.load()?;
        doc.users
            .get(&id)
            .map(UserRecord::to_user)
            .ok_or(Error::NotFound)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let doc = self.records.load()?;
        Ok(doc.users.values().map(UserRecord::to_user).collect())
    }

    fn revoke_token(&self, token: &str) -> Result<()> {
        let mut doc = self.records.load()?;

        if doc.revoked_tokens.contains_key(token) {
            return Ok(());
        }
        doc.revoked_tokens.insert(token.to_string(), Utc::now());

        self.records.write(&doc)?;
        info!("Revoked refresh token");
        Ok(())
    }

    fn is_revoked(&self, token: &str) -> Result<bool> {
        let doc = self.records.load()?;
        Ok(doc.revoked_tokens.contains_key(token))
    }
}
