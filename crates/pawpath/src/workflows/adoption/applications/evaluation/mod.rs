mod rules;

use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationId};
use rules::VERIFICATION_RULES;

pub const MAX_VERIFICATION_SCORE: u8 = 100;

/// Stateless evaluator applying the verification point table to an application.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationEngine;

impl EvaluationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, application: &Application) -> EvaluationOutcome {
        let components: Vec<ScoreComponent> = VERIFICATION_RULES
            .iter()
            .filter_map(|rule| rule(application))
            .collect();

        let total: u32 = components
            .iter()
            .map(|component| u32::from(component.score))
            .sum();

        EvaluationOutcome {
            application_id: application.id.clone(),
            total_score: total.min(u32::from(MAX_VERIFICATION_SCORE)) as u8,
            components,
        }
    }
}

/// Areas of the application the verification score draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationFactor {
    PetOwnership,
    Veterinarian,
    HousingStability,
    ResidenceType,
    Income,
    WorkSchedule,
    Exercise,
    References,
    CareBudget,
}

/// Discrete contribution to a verification score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: VerificationFactor,
    pub score: u8,
    pub notes: String,
}

/// Composite score and the breakdown that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub application_id: ApplicationId,
    pub total_score: u8,
    pub components: Vec<ScoreComponent>,
}

impl EvaluationOutcome {
    pub fn points_for(&self, factor: VerificationFactor) -> u8 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.score)
            .sum()
    }
}
