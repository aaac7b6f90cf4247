use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationPriority, ApplicationStatus};

/// Reviewer search filters. Every populated field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Case-insensitive text matched against applicant name, email, pet name and occupation.
    pub query: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub priority: Option<ApplicationPriority>,
    pub submitted_from: Option<NaiveDate>,
    pub submitted_to: Option<NaiveDate>,
    pub min_score: Option<u8>,
    pub max_score: Option<u8>,
}

impl SearchCriteria {
    pub fn matches(&self, application: &Application) -> bool {
        self.matches_query(application)
            && self
                .status
                .map_or(true, |status| application.status == status)
            && self
                .priority
                .map_or(true, |priority| application.priority == priority)
            && self.matches_dates(application)
            && self.matches_score(application)
    }

    pub fn filter(&self, applications: Vec<Application>) -> Vec<Application> {
        applications
            .into_iter()
            .filter(|application| self.matches(application))
            .collect()
    }

    fn matches_query(&self, application: &Application) -> bool {
        let Some(query) = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
        else {
            return true;
        };

        let needle = query.to_lowercase();
        [
            application.applicant_name.as_str(),
            application.applicant_email.as_str(),
            application.pet_name.as_str(),
            application.personal_info.occupation.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_dates(&self, application: &Application) -> bool {
        let submitted = application.application_date.date_naive();
        self.submitted_from.map_or(true, |from| submitted >= from)
            && self.submitted_to.map_or(true, |to| submitted <= to)
    }

    fn matches_score(&self, application: &Application) -> bool {
        if self.min_score.is_none() && self.max_score.is_none() {
            return true;
        }
        let Some(score) = application.score else {
            return false;
        };
        self.min_score.map_or(true, |min| score >= min)
            && self.max_score.map_or(true, |max| score <= max)
    }
}
