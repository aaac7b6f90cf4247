use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::super::domain::{EnergyLevel, Pet, PetId, PetSize};

#[derive(Debug)]
pub enum PetCatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for PetCatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PetCatalogImportError::Io(err) => write!(f, "failed to read pet catalog: {}", err),
            PetCatalogImportError::Csv(err) => write!(f, "invalid pet catalog CSV data: {}", err),
            PetCatalogImportError::InvalidField { row, field, value } => write!(
                f,
                "pet catalog row {} has an unrecognised {} '{}'",
                row, field, value
            ),
        }
    }
}

impl std::error::Error for PetCatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PetCatalogImportError::Io(err) => Some(err),
            PetCatalogImportError::Csv(err) => Some(err),
            PetCatalogImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for PetCatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PetCatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads shelter pet listings exported as CSV.
pub struct PetCatalogImporter;

impl PetCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Pet>, PetCatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Pet>, PetCatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut pets = Vec::new();

        for (index, record) in csv_reader.deserialize::<PetRow>().enumerate() {
            let row = record?;
            // header is line 1
            pets.push(row.into_pet(index + 2)?);
        }

        Ok(pets)
    }
}

#[derive(Debug, Deserialize)]
struct PetRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Species")]
    species: String,
    #[serde(rename = "Breed", default)]
    breed: String,
    #[serde(rename = "Age", default)]
    age: String,
    #[serde(rename = "Size")]
    size: String,
    #[serde(rename = "Energy Level")]
    energy_level: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Good With Kids", default, deserialize_with = "flag")]
    good_with_kids: bool,
    #[serde(rename = "Good With Pets", default, deserialize_with = "flag")]
    good_with_pets: bool,
    #[serde(rename = "Vaccinated", default, deserialize_with = "flag")]
    vaccinated: bool,
    #[serde(rename = "Neutered", default, deserialize_with = "flag")]
    neutered: bool,
}

impl PetRow {
    fn into_pet(self, row: usize) -> Result<Pet, PetCatalogImportError> {
        let size = PetSize::parse(&self.size).ok_or(PetCatalogImportError::InvalidField {
            row,
            field: "size",
            value: self.size.clone(),
        })?;
        let energy_level =
            EnergyLevel::parse(&self.energy_level).ok_or(PetCatalogImportError::InvalidField {
                row,
                field: "energy level",
                value: self.energy_level.clone(),
            })?;

        Ok(Pet {
            id: PetId(self.id),
            name: self.name,
            species: self.species,
            breed: self.breed,
            age: self.age,
            size,
            energy_level,
            description: self.description,
            good_with_kids: self.good_with_kids,
            good_with_pets: self.good_with_pets,
            vaccinated: self.vaccinated,
            neutered: self.neutered,
        })
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        raw.as_deref().map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1")
    ))
}
