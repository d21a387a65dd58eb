//! Claim storage
//!
//! The [`ClaimStore`] trait is the contract the rest of the crate relies on.
//! Two implementations are provided: an in-memory store and a store backed
//! by a single JSON file. Both perform the uniqueness check and the insert
//! under one lock, so concurrent claims for the same name or by the same
//! owner cannot both succeed. The file store's lock is an OS file lock and
//! holds across processes.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::types::{normalize_name, ClaimError, ClaimRecord, NewClaim};

/// Persistence contract for claims
pub trait ClaimStore: Send + Sync {
    /// Look up the claim for a name; the name is normalized first
    fn find(&self, name: &str) -> Result<Option<ClaimRecord>, ClaimError>;

    /// All claims, newest first
    fn list(&self) -> Result<Vec<ClaimRecord>, ClaimError>;

    /// Atomically insert a claim unless its name or owner is taken
    fn insert_claim(&self, claim: NewClaim) -> Result<ClaimRecord, ClaimError>;

    fn exists(&self, name: &str) -> Result<bool, ClaimError> {
        Ok(self.find(name)?.is_some())
    }

    fn claims_by_owner(&self, owner_id: &str) -> Result<Vec<ClaimRecord>, ClaimError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.owner.id == owner_id)
            .collect())
    }

    fn owner_has_claim(&self, owner_id: &str) -> Result<bool, ClaimError> {
        Ok(!self.claims_by_owner(owner_id)?.is_empty())
    }
}

/// The full set of claims, shared by both store implementations
#[derive(Debug, Default, Serialize, Deserialize)]
struct ClaimSet {
    next_id: u64,
    claims: Vec<ClaimRecord>,
}

impl ClaimSet {
    fn find(&self, name: &str) -> Option<&ClaimRecord> {
        self.claims.iter().find(|c| c.name == name)
    }

    fn newest_first(&self) -> Vec<ClaimRecord> {
        self.claims.iter().rev().cloned().collect()
    }

    fn insert(&mut self, claim: NewClaim) -> Result<ClaimRecord, ClaimError> {
        if let Some(existing) = self.find(&claim.name) {
            return Err(ClaimError::AlreadyClaimed {
                name: existing.name.clone(),
                claimed_by: existing.owner.username.clone(),
            });
        }
        if let Some(owned) = self.claims.iter().find(|c| c.owner.id == claim.owner.id) {
            return Err(ClaimError::OwnerAlreadyClaimed {
                owner: claim.owner.username.clone(),
                name: owned.name.clone(),
            });
        }

        self.next_id += 1;
        let record = claim.into_record(self.next_id);
        self.claims.push(record.clone());
        Ok(record)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ClaimError> {
    mutex
        .lock()
        .map_err(|_| ClaimError::Unavailable("claim store lock poisoned".to_string()))
}

/// Claims held in process memory
#[derive(Debug, Default)]
pub struct MemoryClaimStore {
    inner: Mutex<ClaimSet>,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClaimStore for MemoryClaimStore {
    fn find(&self, name: &str) -> Result<Option<ClaimRecord>, ClaimError> {
        let key = normalize_name(name)?;
        Ok(lock(&self.inner)?.find(&key).cloned())
    }

    fn list(&self) -> Result<Vec<ClaimRecord>, ClaimError> {
        Ok(lock(&self.inner)?.newest_first())
    }

    fn insert_claim(&self, claim: NewClaim) -> Result<ClaimRecord, ClaimError> {
        let record = lock(&self.inner)?.insert(claim)?;
        debug!(name = %record.name, id = record.id, "claim stored in memory");
        Ok(record)
    }
}

/// Claims persisted in one JSON file
///
/// Every operation takes an exclusive advisory lock on a sibling `.lock`
/// file and reloads the data file, so store values in other threads or
/// other processes that open the same path see each other's claims and
/// never both win the same name. Writes go to a fresh temporary file in the
/// same directory that is then renamed over the existing one.
#[derive(Debug)]
pub struct JsonFileClaimStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileClaimStore {
    /// Open a store at `path`; the file is created on the first claim
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");
        Self {
            path,
            lock_path: PathBuf::from(lock_path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until this process holds the store lock
    ///
    /// The lock is released when the returned file is dropped.
    fn acquire_lock(&self) -> Result<File, ClaimError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn load(&self) -> Result<ClaimSet, ClaimError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(ClaimSet::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "claim file missing, starting empty");
                Ok(ClaimSet::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, set: &ClaimSet) -> Result<(), ClaimError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, set)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ClaimStore for JsonFileClaimStore {
    fn find(&self, name: &str) -> Result<Option<ClaimRecord>, ClaimError> {
        let key = normalize_name(name)?;
        let _held = self.acquire_lock()?;
        Ok(self.load()?.find(&key).cloned())
    }

    fn list(&self) -> Result<Vec<ClaimRecord>, ClaimError> {
        let _held = self.acquire_lock()?;
        Ok(self.load()?.newest_first())
    }

    fn insert_claim(&self, claim: NewClaim) -> Result<ClaimRecord, ClaimError> {
        let _held = self.acquire_lock()?;
        let mut set = self.load()?;
        let record = set.insert(claim)?;
        self.save(&set)?;
        info!(name = %record.name, path = %self.path.display(), "claim saved");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::types::Identity;
    use crate::style::StrokeStyle;

    fn claim(name: &str, owner_id: &str) -> NewClaim {
        NewClaim::new(
            name,
            "M 73 100 L 343 160",
            StrokeStyle::default(),
            false,
            Identity::new(owner_id, format!("user{owner_id}")),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_find() {
        let store = MemoryClaimStore::new();
        let record = store.insert_claim(claim("ann", "1")).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "ANN");

        assert!(store.exists("Ann").unwrap());
        assert!(!store.exists("bob").unwrap());
        assert_eq!(store.find("a n n").unwrap(), None);
        assert_eq!(store.find("ANN!").unwrap(), None);
        assert_eq!(store.find(" ann ").unwrap(), Some(record));
    }

    #[test]
    fn test_name_conflict() {
        let store = MemoryClaimStore::new();
        store.insert_claim(claim("ann", "1")).unwrap();

        let err = store.insert_claim(claim("ANN", "2")).unwrap_err();
        assert!(matches!(
            err,
            ClaimError::AlreadyClaimed { ref name, ref claimed_by } if name == "ANN" && claimed_by == "user1"
        ));
        // The first claim is untouched
        assert_eq!(store.find("ann").unwrap().unwrap().owner.id, "1");
    }

    #[test]
    fn test_owner_limit() {
        let store = MemoryClaimStore::new();
        store.insert_claim(claim("ann", "1")).unwrap();

        let err = store.insert_claim(claim("bob", "1")).unwrap_err();
        assert!(matches!(
            err,
            ClaimError::OwnerAlreadyClaimed { ref name, .. } if name == "ANN"
        ));
        assert!(store.owner_has_claim("1").unwrap());
        assert!(!store.owner_has_claim("2").unwrap());
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemoryClaimStore::new();
        store.insert_claim(claim("ann", "1")).unwrap();
        store.insert_claim(claim("bob", "2")).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["BOB", "ANN"]);
        assert_eq!(store.claims_by_owner("2").unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_lookup_name() {
        let store = MemoryClaimStore::new();
        assert!(matches!(store.find("  "), Err(ClaimError::InvalidName(_))));
    }

    #[test]
    fn test_concurrent_claims_single_winner() {
        let store = MemoryClaimStore::new();
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let store = &store;
                    s.spawn(move || store.insert_claim(claim("ann", &i.to_string())))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, ClaimError::AlreadyClaimed { .. })));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_json_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");

        let store = JsonFileClaimStore::open(&path);
        assert!(store.list().unwrap().is_empty());
        store.insert_claim(claim("ann", "1")).unwrap();

        let reopened = JsonFileClaimStore::open(&path);
        let record = reopened.find("ann").unwrap().unwrap();
        assert_eq!(record.owner.username, "user1");
        assert!(matches!(
            reopened.insert_claim(claim("ann", "2")),
            Err(ClaimError::AlreadyClaimed { .. })
        ));

        let second = reopened.insert_claim(claim("bob", "2")).unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_json_stores_sharing_a_path_race() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");

        for round in 0..50 {
            let name = format!("name{round}");
            let stores = [JsonFileClaimStore::open(&path), JsonFileClaimStore::open(&path)];
            let barrier = std::sync::Barrier::new(stores.len());

            let wins = std::thread::scope(|s| {
                let handles: Vec<_> = stores
                    .iter()
                    .enumerate()
                    .map(|(i, store)| {
                        let (barrier, name) = (&barrier, &name);
                        let owner = format!("{round}-{i}");
                        s.spawn(move || {
                            barrier.wait();
                            store.insert_claim(claim(name, &owner))
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap())
                    .filter(Result::is_ok)
                    .count()
            });
            assert_eq!(wins, 1, "round {round}");
        }

        let stored = JsonFileClaimStore::open(&path).list().unwrap();
        assert_eq!(stored.len(), 50);
        assert_eq!(stored[0].id, 50);
    }

    #[test]
    fn test_json_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        let store = JsonFileClaimStore::open(&path);
        store.insert_claim(claim("ann", "1")).unwrap();
        store.insert_claim(claim("bob", "2")).unwrap();

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["claims.json", "claims.json.lock"]);
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileClaimStore::open(&path);
        assert!(matches!(store.list(), Err(ClaimError::Json(_))));
    }
}
