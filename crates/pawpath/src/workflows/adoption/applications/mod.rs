//! Adoption application intake, verification scoring, review lifecycle, and reporting.

pub mod domain;
pub mod evaluation;
pub mod lifecycle;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationNote, ApplicationPriority, ApplicationStatus,
    ApplicationSubmission, ApplicationUpdate, LifestyleInfo, Milestone, Ownership, PersonalInfo,
    PetExperience, Reference, ResidenceType, StatusHistoryEntry, TimelineStep,
};
pub use evaluation::{EvaluationEngine, EvaluationOutcome, ScoreComponent, VerificationFactor};
pub use lifecycle::StatusChange;
pub use repository::{
    ApplicationRepository, NoteRepository, RepositoryError, StatusHistoryRepository,
};
pub use router::adoption_router;
pub use search::SearchCriteria;
pub use service::AdoptionApplicationService;
pub use stats::{follow_ups_due, processing_stats, ProcessingStats};
