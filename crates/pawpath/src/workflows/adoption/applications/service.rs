use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info};

use crate::storage::KeyValueStore;
use crate::workflows::adoption::domain::{Pet, PreferenceProfile};
use crate::workflows::adoption::matching::{self, MatchResult};
use crate::workflows::adoption::preferences::PreferenceRepository;

use super::domain::{
    Application, ApplicationId, ApplicationNote, ApplicationSubmission, ApplicationUpdate,
    StatusHistoryEntry,
};
use super::evaluation::{EvaluationEngine, EvaluationOutcome};
use super::lifecycle::{apply_status_change, StatusChange};
use super::repository::{
    ApplicationRepository, NoteRepository, RepositoryError, StatusHistoryRepository,
};
use super::search::SearchCriteria;
use super::stats::{follow_ups_due, processing_stats, ProcessingStats};

const DEFAULT_MATCH_LIMIT: usize = 10;

/// Facade over matching, verification scoring, and the review lifecycle.
///
/// Every call loads what it needs from the store, computes, and writes back.
/// Storage failures never escape: they are logged and the caller receives an
/// empty value (`None`, an empty list, or a zero score).
pub struct AdoptionApplicationService<S> {
    applications: ApplicationRepository<S>,
    history: StatusHistoryRepository<S>,
    notes: NoteRepository<S>,
    preferences: PreferenceRepository<S>,
    engine: EvaluationEngine,
    match_limit: usize,
    clock: fn() -> DateTime<Utc>,
}

impl<S> AdoptionApplicationService<S>
where
    S: KeyValueStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            applications: ApplicationRepository::new(store.clone()),
            history: StatusHistoryRepository::new(store.clone()),
            notes: NoteRepository::new(store.clone()),
            preferences: PreferenceRepository::new(store),
            engine: EvaluationEngine::new(),
            match_limit: DEFAULT_MATCH_LIMIT,
            clock: Utc::now,
        }
    }

    /// Default number of results returned by match ranking.
    pub fn with_match_limit(mut self, limit: usize) -> Self {
        self.match_limit = limit;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn match_limit(&self) -> usize {
        self.match_limit
    }

    pub fn calculate_pet_match(&self, pet: &Pet, profile: &PreferenceProfile) -> MatchResult {
        matching::calculate_pet_match(pet, profile)
    }

    pub fn top_matches(
        &self,
        pets: &[Pet],
        profile: &PreferenceProfile,
        limit: Option<usize>,
    ) -> Vec<MatchResult> {
        matching::top_matches(pets, profile, limit.unwrap_or(self.match_limit))
    }

    /// Rank pets against the adopter's stored profile.
    pub fn matches_for(
        &self,
        adopter_id: &str,
        pets: &[Pet],
        limit: Option<usize>,
    ) -> Vec<MatchResult> {
        let profile = self.preferences(adopter_id);
        self.top_matches(pets, &profile, limit)
    }

    /// The adopter's profile; defaults are created on first use.
    pub fn preferences(&self, adopter_id: &str) -> PreferenceProfile {
        masked(
            "load preferences",
            self.preferences
                .profile_or_default(adopter_id)
                .map_err(RepositoryError::from),
        )
        .unwrap_or_default()
    }

    pub fn save_preferences(&self, adopter_id: &str, profile: PreferenceProfile) -> bool {
        masked(
            "save preferences",
            self.preferences
                .save(adopter_id, profile)
                .map_err(RepositoryError::from),
        )
        .is_some()
    }

    /// Record a new application in `pending` with a fresh timeline.
    pub fn submit(&self, submission: ApplicationSubmission) -> Option<Application> {
        let now = self.now();
        let stored = masked(
            "submit application",
            self.applications
                .insert(|id| Application::from_submission(id, submission, now)),
        )?;

        info!(
            application_id = %stored.id,
            pet = %stored.pet_name,
            "adoption application submitted"
        );
        Some(stored)
    }

    pub fn applications(&self) -> Vec<Application> {
        masked("list applications", self.applications.all()).unwrap_or_default()
    }

    pub fn application(&self, id: &ApplicationId) -> Option<Application> {
        masked("fetch application", self.applications.fetch(id)).flatten()
    }

    /// Move an application to a new status, stamping the reviewer and recording history.
    ///
    /// The history entry is written before the application, so a failed
    /// history write leaves the stored application unchanged.
    pub fn update_status(&self, id: &ApplicationId, change: StatusChange) -> Option<Application> {
        let now = self.now();
        let mut recorded = None;
        let updated = masked(
            "update application status",
            self.applications.update(id, |application| {
                let entry = apply_status_change(application, change, now);
                self.history.record(entry.clone())?;
                recorded = Some(entry);
                Ok(())
            }),
        )?;

        let (Some(application), Some(entry)) = (updated, recorded) else {
            debug!(application_id = %id, "status change ignored for unknown application");
            return None;
        };

        info!(
            application_id = %id,
            from = entry.previous_status.label(),
            to = entry.new_status.label(),
            actor = %entry.changed_by,
            "application status changed"
        );

        Some(application)
    }

    /// Score the application and persist the total. Unknown ids yield `None`
    /// and write nothing.
    pub fn evaluate(&self, id: &ApplicationId) -> Option<EvaluationOutcome> {
        let application = self.application(id)?;
        let outcome = self.engine.score(&application);
        self.update_application(id, ApplicationUpdate::score(outcome.total_score))?;
        Some(outcome)
    }

    pub fn score_application(&self, id: &ApplicationId) -> u8 {
        self.evaluate(id)
            .map(|outcome| outcome.total_score)
            .unwrap_or(0)
    }

    /// Merge a partial update into the stored record.
    pub fn update_application(
        &self,
        id: &ApplicationId,
        update: ApplicationUpdate,
    ) -> Option<Application> {
        let now = self.now();
        masked(
            "update application",
            self.applications
                .update(id, |application| {
                    update.apply(application, now);
                    Ok(())
                }),
        )
        .flatten()
    }

    pub fn add_note(
        &self,
        id: &ApplicationId,
        author: &str,
        text: &str,
        is_internal: bool,
    ) -> Option<ApplicationNote> {
        let now = self.now();
        masked(
            "add application note",
            self.notes.append(|note_id| ApplicationNote {
                id: note_id,
                application_id: id.clone(),
                author: author.to_string(),
                text: text.to_string(),
                is_internal,
                created_at: now,
            }),
        )
    }

    pub fn notes(&self, id: &ApplicationId) -> Vec<ApplicationNote> {
        masked("list application notes", self.notes.for_application(id)).unwrap_or_default()
    }

    pub fn status_history(&self, id: &ApplicationId) -> Vec<StatusHistoryEntry> {
        masked("list status history", self.history.for_application(id)).unwrap_or_default()
    }

    pub fn processing_stats(&self) -> ProcessingStats {
        processing_stats(&self.applications())
    }

    pub fn applications_requiring_follow_up(&self, today: NaiveDate) -> Vec<Application> {
        follow_ups_due(&self.applications(), today)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Application> {
        criteria.filter(self.applications())
    }

    /// Drop every application, note, and history entry.
    pub fn clear_all(&self) -> bool {
        let cleared = masked("clear applications", self.applications.clear()).is_some()
            & masked("clear notes", self.notes.clear()).is_some()
            & masked("clear status history", self.history.clear()).is_some();
        if cleared {
            info!("all adoption applications cleared");
        }
        cleared
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

fn masked<T>(operation: &'static str, result: Result<T, RepositoryError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(operation, error = %err, "adoption storage call failed");
            None
        }
    }
}
