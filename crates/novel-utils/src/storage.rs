// File: novel-utils/src/storage.rs
// Purpose: Durable key/value storage, in memory or backed by a JSON file

use crate::error::{Result, UtilError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// A durable string-to-string store
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Reads a stored value
pub fn get_stored<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<String>> {
    store.get_item(key)
}

/// Stores the string form of `value` under `key`
///
/// # Examples
///
/// ```
/// use novel_utils::{get_stored, set_stored, MemoryStore};
///
/// let store = MemoryStore::new();
/// set_stored(&store, "fontSize", 18).unwrap();
/// assert_eq!(get_stored(&store, "fontSize").unwrap().as_deref(), Some("18"));
/// ```
pub fn set_stored<S, V>(store: &S, key: &str, value: V) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    V: Display,
{
    store.set_item(key, &value.to_string())
}

type Entries = BTreeMap<String, String>;

fn read_lock(entries: &RwLock<Entries>) -> Result<RwLockReadGuard<'_, Entries>> {
    entries
        .read()
        .map_err(|_| UtilError::StorageUnavailable("store lock poisoned".to_string()))
}

fn write_lock(entries: &RwLock<Entries>) -> Result<RwLockWriteGuard<'_, Entries>> {
    entries
        .write()
        .map_err(|_| UtilError::StorageUnavailable("store lock poisoned".to_string()))
}

/// In-memory store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(read_lock(&self.entries)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        write_lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        write_lock(&self.entries)?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        write_lock(&self.entries)?.clear();
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: Entries,
}

/// Store backed by a JSON file
///
/// The whole map is kept in memory and rewritten to disk on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed
    ///
    /// A missing file starts an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                Entries::new()
            } else {
                serde_json::from_str::<StoreFile>(&raw)?.entries
            }
        } else {
            Entries::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "opened file store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the map and keeps it only once the
    /// copy is on disk
    ///
    /// `change` returns whether anything changed; unchanged maps are not
    /// written.
    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let mut entries = write_lock(&self.entries)?;
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }

        self.persist(next.clone())?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: Entries) -> Result<()> {
        let file = StoreFile { entries };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to persist store");
            UtilError::Io(e)
        })
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(read_lock(&self.entries)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> Result<()> {
        self.update(|entries| {
            entries.clear();
            true
        })
    }
}
