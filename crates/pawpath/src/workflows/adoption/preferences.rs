use std::collections::BTreeMap;
use std::sync::Arc;

use crate::storage::{keys, Collection, KeyValueStore, StorageError};

use super::domain::PreferenceProfile;

/// Adopter preference profiles keyed by adopter id.
pub struct PreferenceRepository<S> {
    collection: Collection<S, BTreeMap<String, PreferenceProfile>>,
}

impl<S: KeyValueStore> PreferenceRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            collection: Collection::new(store, keys::PREFERENCES),
        }
    }

    /// Stored profile, creating and persisting the default on first use.
    pub fn profile_or_default(&self, adopter_id: &str) -> Result<PreferenceProfile, StorageError> {
        if let Some(profile) = self.collection.load()?.get(adopter_id) {
            return Ok(profile.clone());
        }

        let created = self.collection.modify(|profiles| {
            Some(
                profiles
                    .entry(adopter_id.to_string())
                    .or_default()
                    .clone(),
            )
        })?;
        Ok(created.unwrap_or_default())
    }

    /// Overwrite the adopter's profile wholesale.
    pub fn save(&self, adopter_id: &str, profile: PreferenceProfile) -> Result<(), StorageError> {
        self.collection.modify(|profiles| {
            profiles.insert(adopter_id.to_string(), profile);
            Some(())
        })?;
        Ok(())
    }
}
