//! Key-value persistence seam.
//!
//! Every collection the adoption workflows own is stored as one JSON blob under a
//! fixed key. The store only understands whole-blob `get`/`set`/`remove`; typed
//! read-modify-write happens in [`Collection`], which serialises writers to the
//! same key behind a mutex owned by the store. Every collection built over the
//! same store shares that mutex, so two updates in one process cannot drop each
//! other.

pub mod file;
pub mod memory;

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Collection keys used by the adoption workflows.
pub mod keys {
    pub const APPLICATIONS: &str = "adoption_applications";
    pub const NOTES: &str = "application_notes";
    pub const STATUS_HISTORY: &str = "application_status_history";
    pub const PREFERENCES: &str = "user_preferences";
}

/// Whole-blob key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    /// Write locks for this store's keys.
    fn locks(&self) -> &KeyLocks;
}

/// Registry of per-key write locks. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct KeyLocks {
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl KeyLocks {
    /// The lock guarding `key`, created on first use.
    pub fn lock_for(&self, key: &str) -> Result<Arc<Mutex<()>>, StorageError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| StorageError::Unavailable("key lock registry poisoned".to_string()))?;
        Ok(locks.entry(key.to_string()).or_default().clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failure for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("value stored under '{key}' is not valid: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Typed view over a single key. `C` is the whole collection (a `Vec`, a map, ...).
pub struct Collection<S, C> {
    store: Arc<S>,
    key: &'static str,
    _marker: PhantomData<fn() -> C>,
}

impl<S, C> Collection<S, C>
where
    S: KeyValueStore,
    C: Default + Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<S>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the collection; a missing key reads as the empty collection.
    pub fn load(&self) -> Result<C, StorageError> {
        match self.store.get(self.key)? {
            Some(value) => serde_json::from_value(value).map_err(|source| StorageError::Json {
                key: self.key.to_string(),
                source,
            }),
            None => Ok(C::default()),
        }
    }

    /// Atomically load, mutate and store the collection.
    ///
    /// The closure returns `None` to signal that nothing changed, in which case
    /// no write is issued.
    pub fn modify<F, R>(&self, mutate: F) -> Result<Option<R>, StorageError>
    where
        F: FnOnce(&mut C) -> Option<R>,
    {
        let lock = self.store.locks().lock_for(self.key)?;
        let _guard = lock
            .lock()
            .map_err(|_| StorageError::Unavailable(format!("lock for '{}' poisoned", self.key)))?;

        let mut collection = self.load()?;
        let Some(result) = mutate(&mut collection) else {
            return Ok(None);
        };
        self.write(&collection)?;
        Ok(Some(result))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        let lock = self.store.locks().lock_for(self.key)?;
        let _guard = lock
            .lock()
            .map_err(|_| StorageError::Unavailable(format!("lock for '{}' poisoned", self.key)))?;
        self.store.remove(self.key)
    }

    fn write(&self, collection: &C) -> Result<(), StorageError> {
        let value = serde_json::to_value(collection).map_err(|source| StorageError::Json {
            key: self.key.to_string(),
            source,
        })?;
        self.store.set(self.key, value)
    }
}
