use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::adoption::domain::PetId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub(crate) fn from_sequence(sequence: usize) -> Self {
        Self(format!("app-{sequence:06}"))
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Pending,
            Self::UnderReview,
            Self::Approved,
            Self::Rejected,
            Self::Withdrawn,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    pub const fn is_terminal(self) -> bool {
        match self {
            Self::Approved | Self::Rejected | Self::Withdrawn => true,
            Self::Pending | Self::UnderReview => false,
        }
    }
}

/// Reviewer-facing urgency tag. Has no effect on scoring or transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidenceType {
    House,
    Apartment,
    Condo,
    Townhouse,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    Own,
    #[default]
    Rent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub occupation: String,
    pub residence_type: ResidenceType,
    pub ownership: Ownership,
    pub landlord_approval: bool,
    /// Free-text income bracket, e.g. "$50,000 - $75,000".
    pub annual_income: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PetExperience {
    pub has_owned_pets: bool,
    pub previous_pets: String,
    pub veterinarian: Option<String>,
}

impl PetExperience {
    pub fn has_veterinarian(&self) -> bool {
        self.veterinarian
            .as_deref()
            .map(|vet| !vet.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifestyleInfo {
    pub work_schedule: String,
    pub exercise_commitment: String,
    pub hours_alone_per_day: Option<u8>,
    pub pet_care_budget: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub contacted: bool,
}

/// One of the fixed milestones every application walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Submitted,
    InitialReview,
    ReferenceCheck,
    HomeVisit,
    FinalDecision,
}

impl Milestone {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Submitted,
            Self::InitialReview,
            Self::ReferenceCheck,
            Self::HomeVisit,
            Self::FinalDecision,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Application Submitted",
            Self::InitialReview => "Initial Review",
            Self::ReferenceCheck => "Reference Check",
            Self::HomeVisit => "Home Visit",
            Self::FinalDecision => "Final Decision",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub milestone: Milestone,
    pub title: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TimelineStep {
    fn new(milestone: Milestone) -> Self {
        Self {
            milestone,
            title: milestone.label().to_string(),
            completed: false,
            completed_at: None,
        }
    }
}

/// Timeline for a fresh submission: only the submission milestone is complete.
pub fn initial_timeline(submitted_at: DateTime<Utc>) -> Vec<TimelineStep> {
    Milestone::ordered()
        .into_iter()
        .map(|milestone| {
            let mut step = TimelineStep::new(milestone);
            if milestone == Milestone::Submitted {
                step.completed = true;
                step.completed_at = Some(submitted_at);
            }
            step
        })
        .collect()
}

/// Progress percentage implied by the timeline and current status.
pub fn timeline_progress(timeline: &[TimelineStep], status: ApplicationStatus) -> u8 {
    if status.is_terminal() {
        return 100;
    }
    let completed = timeline.iter().filter(|step| step.completed).count();
    (completed * 20).min(100) as u8
}

/// Adoption request tracked through the review workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub pet_id: PetId,
    pub pet_name: String,
    pub adopter_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(default)]
    pub applicant_phone: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub priority: ApplicationPriority,
    pub application_date: DateTime<Utc>,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub pet_experience: PetExperience,
    #[serde(default)]
    pub lifestyle: LifestyleInfo,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub timeline: Vec<TimelineStep>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub review_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub follow_up_required: bool,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub(crate) fn from_submission(
        id: ApplicationId,
        submission: ApplicationSubmission,
        now: DateTime<Utc>,
    ) -> Self {
        let status = ApplicationStatus::Pending;
        let timeline = initial_timeline(now);
        let progress = timeline_progress(&timeline, status);

        Self {
            id,
            pet_id: submission.pet_id,
            pet_name: submission.pet_name,
            adopter_id: submission.adopter_id,
            applicant_name: submission.applicant_name,
            applicant_email: submission.applicant_email,
            applicant_phone: submission.applicant_phone,
            status,
            priority: submission.priority.unwrap_or_default(),
            application_date: now,
            personal_info: submission.personal_info,
            pet_experience: submission.pet_experience,
            lifestyle: submission.lifestyle,
            references: submission.references,
            score: None,
            timeline,
            progress,
            admin_notes: None,
            reviewed_by: None,
            review_date: None,
            rejection_reason: None,
            follow_up_required: false,
            follow_up_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn complete_milestone(&mut self, milestone: Milestone, at: DateTime<Utc>) {
        if let Some(step) = self
            .timeline
            .iter_mut()
            .find(|step| step.milestone == milestone && !step.completed)
        {
            step.completed = true;
            step.completed_at = Some(at);
        }
    }
}

/// Applicant-facing intake payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub pet_id: PetId,
    pub pet_name: String,
    pub adopter_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(default)]
    pub applicant_phone: String,
    #[serde(default)]
    pub priority: Option<ApplicationPriority>,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub pet_experience: PetExperience,
    #[serde(default)]
    pub lifestyle: LifestyleInfo,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Partial field update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationUpdate {
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub applicant_phone: Option<String>,
    pub priority: Option<ApplicationPriority>,
    pub score: Option<u8>,
    pub admin_notes: Option<String>,
    pub follow_up_required: Option<bool>,
    pub follow_up_date: Option<NaiveDate>,
}

impl ApplicationUpdate {
    pub fn score(score: u8) -> Self {
        Self {
            score: Some(score),
            ..Self::default()
        }
    }

    /// Merge into `application`, refreshing `updated_at`. Scores are clamped to 100.
    pub(crate) fn apply(self, application: &mut Application, now: DateTime<Utc>) {
        if let Some(name) = self.applicant_name {
            application.applicant_name = name;
        }
        if let Some(email) = self.applicant_email {
            application.applicant_email = email;
        }
        if let Some(phone) = self.applicant_phone {
            application.applicant_phone = phone;
        }
        if let Some(priority) = self.priority {
            application.priority = priority;
        }
        if let Some(score) = self.score {
            application.score = Some(score.min(100));
        }
        if let Some(notes) = self.admin_notes {
            application.admin_notes = Some(notes);
        }
        if let Some(required) = self.follow_up_required {
            application.follow_up_required = required;
        }
        if let Some(date) = self.follow_up_date {
            application.follow_up_date = Some(date);
        }
        application.updated_at = now;
    }
}

/// Append-only audit record of one status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub application_id: ApplicationId,
    pub previous_status: ApplicationStatus,
    pub new_status: ApplicationStatus,
    pub changed_by: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// Free-text annotation on an application. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationNote {
    pub id: String,
    pub application_id: ApplicationId,
    pub author: String,
    pub text: String,
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}
