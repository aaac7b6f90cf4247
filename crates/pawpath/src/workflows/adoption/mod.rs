pub mod applications;
pub mod domain;
pub mod matching;
pub mod preferences;

pub use domain::{
    EnergyLevel, ExperienceLevel, HousingType, Lifestyle, Pet, PetId, PetSize, PreferenceProfile,
};
pub use matching::{calculate_pet_match, top_matches, MatchResult};
pub use preferences::PreferenceRepository;
