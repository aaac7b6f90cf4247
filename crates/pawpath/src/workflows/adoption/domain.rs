use serde::{Deserialize, Serialize};

/// Identifier wrapper for adoptable pets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(pub String);

/// Adoptable pet as listed by a shelter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    /// Free-form species label such as "Dog" or "Cat".
    pub species: String,
    #[serde(default)]
    pub breed: String,
    /// Shelter-entered age text, e.g. "3 years".
    #[serde(default)]
    pub age: String,
    pub size: PetSize,
    pub energy_level: EnergyLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub good_with_kids: bool,
    #[serde(default)]
    pub good_with_pets: bool,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub neutered: bool,
}

impl Pet {
    /// Leading whole number of the age text. Text without leading digits counts
    /// as 0 and a number too large for `u32` saturates.
    pub fn age_in_years(&self) -> u32 {
        let digits: String = self
            .age
            .trim_start()
            .chars()
            .take_while(|ch| ch.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return 0;
        }
        digits.parse().unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetSize {
    Small,
    Medium,
    Large,
}

impl PetSize {
    pub const fn ordered() -> [Self; 3] {
        [Self::Small, Self::Medium, Self::Large]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    Active,
    Calm,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    HouseWithYard,
    HouseNoYard,
    Apartment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Experienced,
}

/// Matching criteria an adopter saved for themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub pet_types: Vec<String>,
    pub preferred_sizes: Vec<PetSize>,
    pub max_age: u32,
    pub lifestyle: Lifestyle,
    pub housing_type: HousingType,
    pub experience_level: ExperienceLevel,
    pub has_allergies: bool,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            pet_types: vec!["Dog".to_string(), "Cat".to_string()],
            preferred_sizes: PetSize::ordered().to_vec(),
            max_age: 15,
            lifestyle: Lifestyle::Mixed,
            housing_type: HousingType::Apartment,
            experience_level: ExperienceLevel::Beginner,
            has_allergies: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet_aged(age: &str) -> Pet {
        Pet {
            id: PetId("pet-1".to_string()),
            name: "Juniper".to_string(),
            species: "Dog".to_string(),
            breed: String::new(),
            age: age.to_string(),
            size: PetSize::Medium,
            energy_level: EnergyLevel::Medium,
            description: String::new(),
            good_with_kids: false,
            good_with_pets: false,
            vaccinated: false,
            neutered: false,
        }
    }

    #[test]
    fn age_reads_leading_integer() {
        assert_eq!(pet_aged("3 years").age_in_years(), 3);
        assert_eq!(pet_aged("  12yrs").age_in_years(), 12);
        assert_eq!(pet_aged("0.5 years").age_in_years(), 0);
    }

    #[test]
    fn unparseable_age_counts_as_zero() {
        assert_eq!(pet_aged("unknown").age_in_years(), 0);
        assert_eq!(pet_aged("").age_in_years(), 0);
    }

    #[test]
    fn oversized_age_saturates() {
        assert_eq!(pet_aged("99999999999999999999").age_in_years(), u32::MAX);
        assert_eq!(pet_aged("4294967295 years").age_in_years(), u32::MAX);
    }

    #[test]
    fn categorical_labels_parse_case_insensitively() {
        assert_eq!(PetSize::parse(" large "), Some(PetSize::Large));
        assert_eq!(EnergyLevel::parse("HIGH"), Some(EnergyLevel::High));
        assert_eq!(PetSize::parse("giant"), None);
    }
}
