use super::super::domain::{
    EnergyLevel, ExperienceLevel, HousingType, Lifestyle, Pet, PetSize, PreferenceProfile,
};

/// Points (and optionally a reason) awarded by one matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleHit {
    pub points: u32,
    pub reason: Option<String>,
}

impl RuleHit {
    fn new(points: u32, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: Some(reason.into()),
        }
    }

    fn silent(points: u32) -> Self {
        Self {
            points,
            reason: None,
        }
    }
}

pub(crate) type MatchRule = fn(&Pet, &PreferenceProfile) -> Option<RuleHit>;
pub(crate) type BonusReason = fn(&Pet) -> Option<&'static str>;

/// Scoring rules in reason order.
pub(crate) const SCORING_RULES: [MatchRule; 7] = [
    species_rule,
    size_rule,
    age_rule,
    energy_rule,
    housing_rule,
    experience_rule,
    allergy_rule,
];

/// Reason-only extras appended after the scoring reasons while room remains.
pub(crate) const BONUS_REASONS: [BonusReason; 3] = [kids_bonus, pets_bonus, health_bonus];

fn kids_bonus(pet: &Pet) -> Option<&'static str> {
    pet.good_with_kids.then_some("Good with kids")
}

fn pets_bonus(pet: &Pet) -> Option<&'static str> {
    pet.good_with_pets.then_some("Good with other pets")
}

fn health_bonus(pet: &Pet) -> Option<&'static str> {
    (pet.vaccinated && pet.neutered).then_some("Vaccinated and neutered")
}

fn species_rule(pet: &Pet, profile: &PreferenceProfile) -> Option<RuleHit> {
    profile
        .pet_types
        .iter()
        .any(|species| species == &pet.species)
        .then(|| RuleHit::new(25, format!("{} lover", pet.species)))
}

fn size_rule(pet: &Pet, profile: &PreferenceProfile) -> Option<RuleHit> {
    profile
        .preferred_sizes
        .contains(&pet.size)
        .then(|| RuleHit::new(20, format!("Perfect size ({})", pet.size.label())))
}

fn age_rule(pet: &Pet, profile: &PreferenceProfile) -> Option<RuleHit> {
    let age = pet.age_in_years();
    if age > profile.max_age {
        return None;
    }

    let reason = if age <= 2 {
        "Young and energetic"
    } else if age >= 7 {
        "Calm and mature"
    } else {
        "Perfect age"
    };
    Some(RuleHit::new(15, reason))
}

fn energy_rule(pet: &Pet, profile: &PreferenceProfile) -> Option<RuleHit> {
    match (profile.lifestyle, pet.energy_level) {
        (Lifestyle::Active, EnergyLevel::High) => Some(RuleHit::new(15, "High energy match")),
        (Lifestyle::Calm, EnergyLevel::Low) => Some(RuleHit::new(15, "Calm companion")),
        (Lifestyle::Mixed, EnergyLevel::Medium) => Some(RuleHit::new(15, "Balanced energy")),
        (Lifestyle::Mixed, _) => Some(RuleHit::new(10, "Adaptable energy")),
        (Lifestyle::Active, _) | (Lifestyle::Calm, _) => None,
    }
}

fn housing_rule(pet: &Pet, profile: &PreferenceProfile) -> Option<RuleHit> {
    match (profile.housing_type, pet.size) {
        (HousingType::HouseWithYard, PetSize::Large) => {
            Some(RuleHit::new(10, "Space for large pet"))
        }
        (HousingType::Apartment, PetSize::Small) => Some(RuleHit::new(10, "Apartment friendly")),
        (HousingType::HouseNoYard, _) => Some(RuleHit::new(8, "Good fit for your home")),
        (HousingType::HouseWithYard, _) | (HousingType::Apartment, _) => None,
    }
}

fn experience_rule(pet: &Pet, profile: &PreferenceProfile) -> Option<RuleHit> {
    match profile.experience_level {
        ExperienceLevel::Experienced => Some(RuleHit::new(10, "Great for experienced owner")),
        ExperienceLevel::Beginner => contains_ignore_case(&pet.description, "friendly")
            .then(|| RuleHit::new(10, "Beginner friendly")),
        ExperienceLevel::Intermediate => Some(RuleHit::new(8, "Suits your experience")),
    }
}

fn allergy_rule(pet: &Pet, profile: &PreferenceProfile) -> Option<RuleHit> {
    if !profile.has_allergies {
        return Some(RuleHit::silent(3));
    }

    contains_ignore_case(&pet.description, "hypoallergenic")
        .then(|| RuleHit::new(5, "Hypoallergenic"))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
