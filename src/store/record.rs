use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// A whole-file JSON document. `Default` must produce the empty, well-formed
/// document written by [`RecordStore::ensure`].
pub trait Document: Default + Serialize + DeserializeOwned {}

impl<T: Default + Serialize + DeserializeOwned> Document for T {}

/// Load-mutate-write persistence for one JSON document on disk.
///
/// The lock is held only for the duration of a single `load` or `write`.
/// Callers that load, mutate and write back are not atomic as a whole: two
/// concurrent mutators can both load the same snapshot and the second write
/// wins, discarding the first mutation.
pub struct RecordStore<D> {
    path: PathBuf,
    lock: RwLock<()>,
    _doc: PhantomData<fn() -> D>,
}

impl<D: Document> RecordStore<D> {
    /// Opens the store, creating an empty document if the file is absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            lock: RwLock::new(()),
            _doc: PhantomData,
        };
        store.ensure()?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty document if none exists. Never touches an existing
    /// file, well-formed or not.
    pub fn ensure(&self) -> Result<()> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Creating empty store document at {}", self.path.display());
                self.write(&D::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn load(&self) -> Result<D> {
        let _guard = self.read_lock();
        let data = fs::read(&self.path).inspect_err(|e| {
            tracing::error!("Failed to read {}: {e}", self.path.display());
        })?;
        let doc = serde_json::from_slice(&data).inspect_err(|e| {
            tracing::error!("Malformed document {}: {e}", self.path.display());
        })?;
        Ok(doc)
    }

    /// Replaces the document. The bytes go to a sibling temp file that is
    /// synced and renamed over the document, so a failed write leaves the
    /// previous document intact.
    pub fn write(&self, doc: &D) -> Result<()> {
        let bytes = serde_json::to_vec(doc)?;
        let staging = self.staging_path();

        let _guard = self.write_lock();
        replace_with(&staging, &self.path, &bytes).inspect_err(|e| {
            tracing::error!("Failed to write {}: {e}", self.path.display());
            if staging.is_file() {
                let _ = fs::remove_file(&staging);
            }
        })?;
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".next");
        self.path.with_file_name(name)
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Next sequential id for a collection currently holding `len` records.
///
/// Ids are not reserved: after a deletion the count shrinks and the returned
/// id can collide with a surviving record.
#[must_use]
pub(crate) fn next_id(len: usize) -> u64 {
    len as u64 + 1
}

fn replace_with(staging: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    // A leftover from an interrupted write would keep its old permissions.
    match fs::remove_file(staging) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    {
        let mut file = create_restricted(staging)?;
        file.write_all(bytes)?;
        file.sync_data()?;
    }
    fs::rename(staging, path)
}

#[cfg(unix)]
fn create_restricted(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_restricted(path: &Path) -> std::io::Result<fs::File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
