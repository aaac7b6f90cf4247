use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::storage::{keys, KeyLocks, KeyValueStore, MemoryStore, StorageError};
use crate::workflows::adoption::applications::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationSubmission, LifestyleInfo,
    Ownership, PersonalInfo, PetExperience, Reference, ResidenceType,
};
use crate::workflows::adoption::applications::{adoption_router, AdoptionApplicationService};
use crate::workflows::adoption::domain::{
    EnergyLevel, ExperienceLevel, HousingType, Lifestyle, Pet, PetId, PetSize, PreferenceProfile,
};

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn reference(name: &str) -> Reference {
    Reference {
        name: name.to_string(),
        relationship: "Neighbor".to_string(),
        phone: "555-0100".to_string(),
        contacted: false,
    }
}

/// Homeowner with pet history, remote work, and references; scores past the cap.
pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        pet_id: PetId("pet-rex".to_string()),
        pet_name: "Rex".to_string(),
        adopter_id: "adopter-1".to_string(),
        applicant_name: "Dana Whitfield".to_string(),
        applicant_email: "dana@example.com".to_string(),
        applicant_phone: "555-0199".to_string(),
        priority: None,
        personal_info: PersonalInfo {
            occupation: "Veterinary Technician".to_string(),
            residence_type: ResidenceType::House,
            ownership: Ownership::Own,
            landlord_approval: false,
            annual_income: "$75,000+".to_string(),
        },
        pet_experience: PetExperience {
            has_owned_pets: true,
            previous_pets: "Two retrievers".to_string(),
            veterinarian: Some("Riverside Animal Clinic".to_string()),
        },
        lifestyle: LifestyleInfo {
            work_schedule: "Remote".to_string(),
            exercise_commitment: "Daily walks".to_string(),
            hours_alone_per_day: Some(2),
            pet_care_budget: "$200-$300 per month".to_string(),
        },
        references: vec![reference("Sam"), reference("Priya")],
    }
}

/// Renting applicant with landlord approval and modest answers.
pub(super) fn renter_submission() -> ApplicationSubmission {
    ApplicationSubmission {
        pet_id: PetId("pet-miso".to_string()),
        pet_name: "Miso".to_string(),
        adopter_id: "adopter-2".to_string(),
        applicant_name: "Lee Okafor".to_string(),
        applicant_email: "lee.okafor@example.org".to_string(),
        applicant_phone: String::new(),
        priority: None,
        personal_info: PersonalInfo {
            occupation: "Graphic Designer".to_string(),
            residence_type: ResidenceType::Apartment,
            ownership: Ownership::Rent,
            landlord_approval: true,
            annual_income: "$50,000 - $60,000".to_string(),
        },
        pet_experience: PetExperience::default(),
        lifestyle: LifestyleInfo {
            work_schedule: "Office, 9-5".to_string(),
            exercise_commitment: "Weekends".to_string(),
            hours_alone_per_day: Some(8),
            pet_care_budget: "$100 per month".to_string(),
        },
        references: Vec::new(),
    }
}

/// Stored application with explicit workflow fields, for stats and search scenarios.
pub(super) fn application(
    sequence: usize,
    status: ApplicationStatus,
    applied: DateTime<Utc>,
    reviewed: Option<DateTime<Utc>>,
    score: Option<u8>,
) -> Application {
    let mut application =
        Application::from_submission(ApplicationId::from_sequence(sequence), submission(), applied);
    application.status = status;
    application.review_date = reviewed;
    application.reviewed_by = reviewed.map(|_| "Morgan".to_string());
    application.score = score;
    application
}

pub(super) fn days_after(start: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    start + Duration::days(days)
}

pub(super) fn build_service() -> (AdoptionApplicationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = AdoptionApplicationService::new(store.clone()).with_clock(fixed_now);
    (service, store)
}

pub(super) fn application_router_with_service(
    service: AdoptionApplicationService<MemoryStore>,
) -> axum::Router {
    adoption_router(Arc::new(service))
}

pub(super) fn active_dog() -> Pet {
    Pet {
        id: PetId("pet-rex".to_string()),
        name: "Rex".to_string(),
        species: "Dog".to_string(),
        breed: "Labrador".to_string(),
        age: "3 years".to_string(),
        size: PetSize::Large,
        energy_level: EnergyLevel::High,
        description: "Loves long runs".to_string(),
        good_with_kids: true,
        good_with_pets: false,
        vaccinated: true,
        neutered: true,
    }
}

pub(super) fn lap_cat() -> Pet {
    Pet {
        id: PetId("pet-miso".to_string()),
        name: "Miso".to_string(),
        species: "Cat".to_string(),
        breed: "Siberian".to_string(),
        age: "8 years".to_string(),
        size: PetSize::Small,
        energy_level: EnergyLevel::Low,
        description: "Friendly and hypoallergenic".to_string(),
        good_with_kids: true,
        good_with_pets: true,
        vaccinated: true,
        neutered: true,
    }
}

pub(super) fn cat_person() -> PreferenceProfile {
    PreferenceProfile {
        pet_types: vec!["Cat".to_string()],
        preferred_sizes: vec![PetSize::Small],
        max_age: 12,
        lifestyle: Lifestyle::Calm,
        housing_type: HousingType::Apartment,
        experience_level: ExperienceLevel::Beginner,
        has_allergies: true,
    }
}

/// Store whose every call fails, standing in for an offline device store.
#[derive(Default)]
pub(super) struct UnavailableStore {
    locks: KeyLocks,
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }

    fn set(&self, _key: &str, _value: Value) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }

    fn locks(&self) -> &KeyLocks {
        &self.locks
    }
}

/// In-memory store that refuses writes to the status history.
#[derive(Default)]
pub(super) struct HistoryRejectingStore {
    inner: MemoryStore,
}

impl HistoryRejectingStore {
    pub(super) fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for HistoryRejectingStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        if key == keys::STATUS_HISTORY {
            return Err(StorageError::Unavailable("history log full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    fn locks(&self) -> &KeyLocks {
        self.inner.locks()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
