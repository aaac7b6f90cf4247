use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    timeline_progress, Application, ApplicationStatus, Milestone, StatusHistoryEntry,
};

/// Reviewer request to move an application to a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ApplicationStatus,
    pub actor: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Apply a status change in place and return its audit entry.
///
/// Terminal applications may still be moved (reviewers use this to correct
/// mistakes); such moves are logged at `warn`.
pub(crate) fn apply_status_change(
    application: &mut Application,
    change: StatusChange,
    now: DateTime<Utc>,
) -> StatusHistoryEntry {
    let previous_status = application.status;
    if previous_status.is_terminal() {
        warn!(
            application_id = %application.id,
            from = previous_status.label(),
            to = change.status.label(),
            actor = %change.actor,
            "reopening an application that had reached a terminal status"
        );
    }

    application.status = change.status;
    application.reviewed_by = Some(change.actor.clone());
    application.review_date = Some(now);
    application.rejection_reason = match change.status {
        ApplicationStatus::Rejected => change.reason.clone(),
        _ => None,
    };

    for milestone in milestones_reached(change.status) {
        application.complete_milestone(*milestone, now);
    }
    application.progress = timeline_progress(&application.timeline, application.status);
    application.updated_at = now;

    StatusHistoryEntry {
        application_id: application.id.clone(),
        previous_status,
        new_status: change.status,
        changed_by: change.actor,
        reason: change.reason,
        changed_at: now,
    }
}

fn milestones_reached(status: ApplicationStatus) -> &'static [Milestone] {
    const ALL: [Milestone; 5] = Milestone::ordered();
    match status {
        ApplicationStatus::Pending => &[],
        ApplicationStatus::UnderReview => &[Milestone::InitialReview],
        ApplicationStatus::Approved => &ALL,
        ApplicationStatus::Rejected | ApplicationStatus::Withdrawn => &[Milestone::FinalDecision],
    }
}
