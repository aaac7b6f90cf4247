use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationStatus};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Collection-wide review metrics. Always derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub total: usize,
    pub pending: usize,
    pub under_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub withdrawn: usize,
    /// Rounded mean over scored applications; 0 when none are scored.
    pub average_score: u32,
    /// Rounded percentage of all applications that were approved.
    pub approval_rate: u32,
    pub follow_ups_required: usize,
    /// Rounded mean days from submission to the latest review decision.
    pub average_processing_days: i64,
}

impl ProcessingStats {
    pub fn count_for(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Pending => self.pending,
            ApplicationStatus::UnderReview => self.under_review,
            ApplicationStatus::Approved => self.approved,
            ApplicationStatus::Rejected => self.rejected,
            ApplicationStatus::Withdrawn => self.withdrawn,
        }
    }
}

pub fn processing_stats(applications: &[Application]) -> ProcessingStats {
    let mut stats = ProcessingStats {
        total: applications.len(),
        ..ProcessingStats::default()
    };

    let mut score_sum: u64 = 0;
    let mut scored: u64 = 0;
    let mut processing_seconds: i64 = 0;
    let mut processed: i64 = 0;

    for application in applications {
        match application.status {
            ApplicationStatus::Pending => stats.pending += 1,
            ApplicationStatus::UnderReview => stats.under_review += 1,
            ApplicationStatus::Approved => stats.approved += 1,
            ApplicationStatus::Rejected => stats.rejected += 1,
            ApplicationStatus::Withdrawn => stats.withdrawn += 1,
        }

        if let Some(score) = application.score {
            score_sum += u64::from(score);
            scored += 1;
        }

        if application.follow_up_required {
            stats.follow_ups_required += 1;
        }

        if application.status != ApplicationStatus::Pending {
            if let Some(reviewed_at) = application.review_date {
                processing_seconds += (reviewed_at - application.application_date).num_seconds();
                processed += 1;
            }
        }
    }

    if scored > 0 {
        stats.average_score = (score_sum as f64 / scored as f64).round() as u32;
    }
    if stats.total > 0 {
        stats.approval_rate = (stats.approved as f64 * 100.0 / stats.total as f64).round() as u32;
    }
    if processed > 0 {
        let mean_seconds = processing_seconds as f64 / processed as f64;
        stats.average_processing_days = (mean_seconds / SECONDS_PER_DAY).round() as i64;
    }

    stats
}

/// Flagged applications whose follow-up date has arrived.
pub fn follow_ups_due(applications: &[Application], today: NaiveDate) -> Vec<Application> {
    applications
        .iter()
        .filter(|application| {
            application.follow_up_required
                && application
                    .follow_up_date
                    .map(|due| due <= today)
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}
