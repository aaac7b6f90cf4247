use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use super::{KeyLocks, KeyValueStore, StorageError};

static STAGING_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Directory-backed store writing one pretty-printed `<key>.json` file per key.
///
/// Clones share key locks, so they can be handed to separate services safely.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    locks: KeyLocks,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: KeyLocks::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let content = match fs::read_to_string(self.path_for(key)) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Self::io_error(key, err)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Json {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|err| Self::io_error(key, err))?;

        let content = serde_json::to_string_pretty(&value).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;

        // Write next to the target then rename so readers never see a partial file.
        let target = self.path_for(key);
        let sequence = STAGING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let staging = self
            .root
            .join(format!(".{key}.json.{}.{sequence}.tmp", std::process::id()));
        fs::write(&staging, content).map_err(|err| Self::io_error(key, err))?;
        fs::rename(&staging, &target).map_err(|err| Self::io_error(key, err))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(key, err)),
        }
    }

    fn locks(&self) -> &KeyLocks {
        &self.locks
    }
}
