use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ChirpStore;
use super::record::{RecordStore, next_id};
use crate::error::{Error, Result};
use crate::types::{Chirp, SortOrder};

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ChirpDocument {
    chirps: BTreeMap<u64, Chirp>,
}

pub struct FileChirpStore {
    records: RecordStore<ChirpDocument>,
}

impl FileChirpStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            records: RecordStore::open(path)?,
        })
    }
}

impl ChirpStore for FileChirpStore {
    fn create(&self, body: &str, author_id: u64) -> Result<Chirp> {
        let mut doc = self.records.load()?;

        let chirp = Chirp {
            id: next_id(doc.chirps.len()),
            body: body.to_string(),
            author_id,
        };
        doc.chirps.insert(chirp.id, chirp.clone());

        self.records.write(&doc)?;
        Ok(chirp)
    }

    fn get(&self, id: u64) -> Result<Chirp> {
        let doc = self.records.load()?;
        doc.chirps.get(&id).cloned().ok_or(Error::NotFound)
    }

    fn list(&self, order: SortOrder) -> Result<Vec<Chirp>> {
        let doc = self.records.load()?;
        let mut chirps: Vec<Chirp> = doc.chirps.into_values().collect();
        order.sort(&mut chirps);
        Ok(chirps)
    }

    fn list_by_author(&self, author_id: u64, order: SortOrder) -> Result<Vec<Chirp>> {
        let doc = self.records.load()?;
        let mut chirps: Vec<Chirp> = doc
            .chirps
            .into_values()
            .filter(|c| c.author_id == author_id)
            .collect();
        order.sort(&mut chirps);
        Ok(chirps)
    }

    fn delete(&self, id: u64) -> Result<()> {
        let mut doc = self.records.load()?;

        if doc.chirps.remove(&id).is_none() {
            return Err(Error::NotFound);
        }

        self.records.write(&doc)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn open_store(dir: &TempDir) -> FileChirpStore {
        FileChirpStore::open(dir.path().join("chirps.json")).unwrap()
    }

    fn ids(chirps: &[Chirp]) -> Vec<u64> {
        chirps.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_create_and_get() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let first = store.create("This is a test!", 1).unwrap();
        let second = store.create("This is a second test!", 2).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(2).unwrap(), second);
        assert!(matches!(store.get(3), Err(Error::NotFound)));
    }

    #[test]
    fn test_body_stored_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let chirp = store.create("  spaced   out  ", 1).unwrap();
        assert_eq!(store.get(chirp.id).unwrap().body, "  spaced   out  ");
    }

    #[test]
    fn test_list_orders() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        for author in 1..=5 {
            store.create("hello", author).unwrap();
        }

        let asc = store.list(SortOrder::Asc).unwrap();
        let mut desc = store.list(SortOrder::Desc).unwrap();
        assert_eq!(ids(&asc), vec![1, 2, 3, 4, 5]);

        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_list_by_author() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.create("one", 1).unwrap();
        store.create("two", 2).unwrap();
        store.create("three", 1).unwrap();

        assert_eq!(ids(&store.list_by_author(1, SortOrder::Asc).unwrap()), vec![1, 3]);
        assert_eq!(ids(&store.list_by_author(1, SortOrder::Desc).unwrap()), vec![3, 1]);
        assert!(store.list_by_author(9, SortOrder::Asc).unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.create("one", 1).unwrap();

        store.delete(1).unwrap();
        assert!(matches!(store.get(1), Err(Error::NotFound)));
        assert!(matches!(store.delete(1), Err(Error::NotFound)));
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.create("one", 1).unwrap();

        let listed = store.list(SortOrder::Asc).unwrap();
        store.create("two", 1).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_create_after_delete_reuses_count_based_id() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.create("one", 1).unwrap();
        store.create("two", 1).unwrap();
        store.create("three", 1).unwrap();

        store.delete(1).unwrap();
        let next = store.create("four", 2).unwrap();

        // two records remain, so the new chirp takes id 3 and replaces "three"
        assert_eq!(next.id, 3);
        assert_eq!(store.get(3).unwrap().body, "four");
        assert_eq!(ids(&store.list(SortOrder::Asc).unwrap()), vec![2, 3]);
    }
}
