//! Pet-to-adopter compatibility scoring.

pub mod catalog;
mod rules;

use serde::{Deserialize, Serialize};

use super::domain::{Pet, PreferenceProfile};
use rules::{RuleHit, BONUS_REASONS, SCORING_RULES};

pub use catalog::{PetCatalogImportError, PetCatalogImporter};

pub const MAX_MATCH_SCORE: u8 = 100;
pub const MAX_MATCH_REASONS: usize = 4;

/// Compatibility of one pet with one preference profile. Computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub pet: Pet,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Score a pet against a profile. Pure and deterministic.
pub fn calculate_pet_match(pet: &Pet, profile: &PreferenceProfile) -> MatchResult {
    let (total, mut reasons) = SCORING_RULES
        .iter()
        .filter_map(|rule| rule(pet, profile))
        .fold(
            (0u32, Vec::new()),
            |(total, mut reasons), RuleHit { points, reason }| {
                reasons.extend(reason);
                (total + points, reasons)
            },
        );

    reasons.truncate(MAX_MATCH_REASONS);
    for bonus in BONUS_REASONS {
        if reasons.len() >= MAX_MATCH_REASONS {
            break;
        }
        if let Some(reason) = bonus(pet) {
            reasons.push(reason.to_string());
        }
    }

    MatchResult {
        pet: pet.clone(),
        score: total.min(u32::from(MAX_MATCH_SCORE)) as u8,
        reasons,
    }
}

/// Rank pets by descending score; equal scores keep their input order.
pub fn top_matches(pets: &[Pet], profile: &PreferenceProfile, limit: usize) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = pets
        .iter()
        .map(|pet| calculate_pet_match(pet, profile))
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    results
}
