use std::sync::Arc;

use crate::storage::{keys, Collection, KeyValueStore, StorageError};

use super::domain::{Application, ApplicationId, ApplicationNote, StatusHistoryEntry};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Applications stored as one list under [`keys::APPLICATIONS`].
pub struct ApplicationRepository<S> {
    collection: Collection<S, Vec<Application>>,
}

impl<S: KeyValueStore> ApplicationRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            collection: Collection::new(store, keys::APPLICATIONS),
        }
    }

    pub fn all(&self) -> Result<Vec<Application>, RepositoryError> {
        Ok(self.collection.load()?)
    }

    pub fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .collection
            .load()?
            .into_iter()
            .find(|application| &application.id == id))
    }

    /// Append a new application built from the next free id.
    pub fn insert<F>(&self, build: F) -> Result<Application, RepositoryError>
    where
        F: FnOnce(ApplicationId) -> Application,
    {
        let inserted = self.collection.modify(|applications| {
            let application = build(ApplicationId::from_sequence(applications.len() + 1));
            if applications
                .iter()
                .any(|existing| existing.id == application.id)
            {
                return Some(Err(RepositoryError::Conflict));
            }
            applications.push(application.clone());
            Some(Ok(application))
        })?;

        match inserted {
            Some(result) => result,
            None => Err(RepositoryError::Conflict),
        }
    }

    /// Read-modify-write a single application under the collection lock.
    ///
    /// Returns `Ok(None)` without writing when the id is unknown. When `mutate`
    /// fails the collection is left untouched and its error is returned.
    pub fn update<F>(&self, id: &ApplicationId, mutate: F) -> Result<Option<Application>, RepositoryError>
    where
        F: FnOnce(&mut Application) -> Result<(), RepositoryError>,
    {
        let mut failure = None;
        let updated = self.collection.modify(|applications| {
            let application = applications
                .iter_mut()
                .find(|application| &application.id == id)?;
            if let Err(err) = mutate(application) {
                failure = Some(err);
                return None;
            }
            Some(application.clone())
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(updated),
        }
    }

    pub fn clear(&self) -> Result<(), RepositoryError> {
        Ok(self.collection.clear()?)
    }
}

/// Global status audit trail, most recent entry first.
pub struct StatusHistoryRepository<S> {
    collection: Collection<S, Vec<StatusHistoryEntry>>,
}

impl<S: KeyValueStore> StatusHistoryRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            collection: Collection::new(store, keys::STATUS_HISTORY),
        }
    }

    pub fn record(&self, entry: StatusHistoryEntry) -> Result<(), RepositoryError> {
        self.collection.modify(move |entries| {
            entries.insert(0, entry);
            Some(())
        })?;
        Ok(())
    }

    pub fn for_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Vec<StatusHistoryEntry>, RepositoryError> {
        Ok(self
            .collection
            .load()?
            .into_iter()
            .filter(|entry| &entry.application_id == id)
            .collect())
    }

    pub fn clear(&self) -> Result<(), RepositoryError> {
        Ok(self.collection.clear()?)
    }
}

/// Append-only note log.
pub struct NoteRepository<S> {
    collection: Collection<S, Vec<ApplicationNote>>,
}

impl<S: KeyValueStore> NoteRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            collection: Collection::new(store, keys::NOTES),
        }
    }

    pub fn append<F>(&self, build: F) -> Result<ApplicationNote, RepositoryError>
    where
        F: FnOnce(String) -> ApplicationNote,
    {
        let note = self.collection.modify(|notes| {
            let note = build(format!("note-{:06}", notes.len() + 1));
            notes.push(note.clone());
            Some(note)
        })?;

        note.ok_or(RepositoryError::Conflict)
    }

    /// Notes for one application, newest first. Notes written in the same
    /// instant keep reverse insertion order.
    pub fn for_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Vec<ApplicationNote>, RepositoryError> {
        let mut notes: Vec<ApplicationNote> = self
            .collection
            .load()?
            .into_iter()
            .rev()
            .filter(|note| &note.application_id == id)
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    pub fn clear(&self) -> Result<(), RepositoryError> {
        Ok(self.collection.clear()?)
    }
}
