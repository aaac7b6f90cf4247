use crate::infra::{parse_date, parse_experience, parse_housing, parse_lifestyle, parse_size};
use chrono::{Local, NaiveDate};
use clap::Args;
use pawpath::error::AppError;
use pawpath::storage::{JsonFileStore, MemoryStore};
use pawpath::workflows::adoption::applications::{
    AdoptionApplicationService, Application, ApplicationStatus, ApplicationSubmission,
    ApplicationUpdate, LifestyleInfo, Ownership, PersonalInfo, PetExperience, ProcessingStats,
    Reference, ResidenceType, StatusChange,
};
use pawpath::workflows::adoption::matching::PetCatalogImporter;
use pawpath::workflows::adoption::{
    top_matches, ExperienceLevel, HousingType, Lifestyle, MatchResult, Pet, PetSize,
    PreferenceProfile,
};
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_CATALOG: &str = include_str!("../../../crates/pawpath/data/shelter_pets.csv");
const DEMO_ADOPTER: &str = "demo-adopter";

#[derive(Args, Debug, Default)]
pub(crate) struct MatchArgs {
    /// Shelter CSV export to rank. Defaults to the bundled sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Species the adopter wants (repeat or comma-separate)
    #[arg(long = "pet-type", value_delimiter = ',')]
    pub(crate) pet_types: Vec<String>,
    /// Preferred sizes: small, medium, large
    #[arg(long = "size", value_delimiter = ',', value_parser = parse_size)]
    pub(crate) sizes: Vec<PetSize>,
    /// Oldest acceptable age in years
    #[arg(long)]
    pub(crate) max_age: Option<u32>,
    /// Household lifestyle: active, calm, mixed
    #[arg(long, value_parser = parse_lifestyle)]
    pub(crate) lifestyle: Option<Lifestyle>,
    /// Housing: house-with-yard, house-no-yard, apartment
    #[arg(long, value_parser = parse_housing)]
    pub(crate) housing: Option<HousingType>,
    /// Owner experience: beginner, intermediate, experienced
    #[arg(long, value_parser = parse_experience)]
    pub(crate) experience: Option<ExperienceLevel>,
    /// Someone in the household has pet allergies
    #[arg(long)]
    pub(crate) allergies: bool,
    /// Number of matches to print
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: usize,
    /// Emit the ranked matches as JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// Directory holding the persisted JSON collections
    #[arg(long)]
    pub(crate) data_dir: PathBuf,
    /// Date used for the follow-up queue (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Shelter CSV export to use. Defaults to the bundled sample catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Skip the application review portion of the demo.
    #[arg(long)]
    pub(crate) skip_applications: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let pets = load_catalog(args.catalog.as_ref())?;
    let profile = profile_from_args(&args);
    let results = top_matches(&pets, &profile, args.limit);

    if args.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Match payload unavailable: {err}"),
        }
        return Ok(());
    }

    println!(
        "Top {} of {} pets for {}",
        results.len(),
        pets.len(),
        describe_profile(&profile)
    );
    render_matches(&results);
    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let StatsArgs { data_dir, today } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let service = AdoptionApplicationService::new(Arc::new(JsonFileStore::new(&data_dir)));
    println!("Adoption processing stats ({})", data_dir.display());
    render_stats(&service.processing_stats());

    let due = service.applications_requiring_follow_up(today);
    println!("\nFollow-ups due by {today}: {}", due.len());
    for application in &due {
        render_application_line(application);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog,
        skip_applications,
    } = args;

    let pets = load_catalog(catalog.as_ref())?;
    let service = AdoptionApplicationService::new(Arc::new(MemoryStore::default()));

    println!("PawPath adoption demo");
    println!("- Loaded {} adoptable pets", pets.len());

    let default_profile = service.preferences(DEMO_ADOPTER);
    println!(
        "- New adopter starts with defaults: {}",
        describe_profile(&default_profile)
    );

    let profile = PreferenceProfile {
        pet_types: vec!["Cat".to_string()],
        preferred_sizes: vec![PetSize::Small, PetSize::Medium],
        max_age: 12,
        lifestyle: Lifestyle::Calm,
        housing_type: HousingType::Apartment,
        experience_level: ExperienceLevel::Beginner,
        has_allergies: true,
    };
    if !service.save_preferences(DEMO_ADOPTER, profile.clone()) {
        println!("  Preferences could not be saved");
        return Ok(());
    }
    println!("- Saved preferences: {}", describe_profile(&profile));

    let matches = service.matches_for(DEMO_ADOPTER, &pets, Some(3));
    println!("\nTop matches");
    render_matches(&matches);

    if skip_applications {
        return Ok(());
    }

    let Some(best) = matches.first().map(|result| result.pet.clone()) else {
        println!("\nNo pets available to apply for");
        return Ok(());
    };

    println!("\nApplication review");
    let Some(application) = service.submit(demo_submission(&best)) else {
        println!("  Submission could not be stored");
        return Ok(());
    };
    println!(
        "- Received {} for {} -> {} ({}% complete)",
        application.id,
        application.pet_name,
        application.status.label(),
        application.progress
    );

    if let Some(outcome) = service.evaluate(&application.id) {
        println!("  Verification score {}:", outcome.total_score);
        for component in &outcome.components {
            println!(
                "    - {:?}: {} ({})",
                component.factor, component.score, component.notes
            );
        }
    }

    service.add_note(
        &application.id,
        "Casey",
        "Vet reference confirmed by phone",
        true,
    );

    let reviewer = |status, reason: Option<&str>| StatusChange {
        status,
        actor: "Casey".to_string(),
        reason: reason.map(str::to_string),
    };
    service.update_status(
        &application.id,
        reviewer(ApplicationStatus::UnderReview, None),
    );
    let approved = service.update_status(
        &application.id,
        reviewer(ApplicationStatus::Approved, Some("Home visit passed")),
    );
    if let Some(approved) = &approved {
        println!("  Timeline:");
        for step in &approved.timeline {
            let mark = if step.completed { "x" } else { " " };
            println!("    [{mark}] {}", step.title);
        }
    }

    let today = Local::now().date_naive();
    service.update_application(
        &application.id,
        ApplicationUpdate {
            follow_up_required: Some(true),
            follow_up_date: Some(today),
            ..ApplicationUpdate::default()
        },
    );

    let mut second_choice = demo_submission(&best);
    second_choice.applicant_name = "Jamie Rivera".to_string();
    second_choice.applicant_email = "jamie.rivera@example.com".to_string();
    second_choice.personal_info.ownership = Ownership::Rent;
    second_choice.personal_info.landlord_approval = false;
    if let Some(second) = service.submit(second_choice) {
        service.score_application(&second.id);
        service.update_status(
            &second.id,
            reviewer(
                ApplicationStatus::Rejected,
                Some("Pet already placed with another family"),
            ),
        );
    }

    println!("\nStatus history for {}", application.id);
    for entry in service.status_history(&application.id) {
        println!(
            "  - {} -> {} by {}{}",
            entry.previous_status.label(),
            entry.new_status.label(),
            entry.changed_by,
            entry
                .reason
                .map(|reason| format!(" ({reason})"))
                .unwrap_or_default()
        );
    }

    println!("\nNotes");
    for note in service.notes(&application.id) {
        let visibility = if note.is_internal { "internal" } else { "shared" };
        println!("  - [{visibility}] {}: {}", note.author, note.text);
    }

    println!("\nProcessing stats");
    render_stats(&service.processing_stats());

    let due = service.applications_requiring_follow_up(today);
    println!("\nFollow-ups due today: {}", due.len());
    for application in &due {
        render_application_line(application);
    }

    Ok(())
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Vec<Pet>, AppError> {
    let pets = match path {
        Some(path) => PetCatalogImporter::from_path(path)?,
        None => PetCatalogImporter::from_reader(SAMPLE_CATALOG.as_bytes())?,
    };
    Ok(pets)
}

fn profile_from_args(args: &MatchArgs) -> PreferenceProfile {
    let mut profile = PreferenceProfile::default();
    if !args.pet_types.is_empty() {
        profile.pet_types = args.pet_types.clone();
    }
    if !args.sizes.is_empty() {
        profile.preferred_sizes = args.sizes.clone();
    }
    if let Some(max_age) = args.max_age {
        profile.max_age = max_age;
    }
    if let Some(lifestyle) = args.lifestyle {
        profile.lifestyle = lifestyle;
    }
    if let Some(housing) = args.housing {
        profile.housing_type = housing;
    }
    if let Some(experience) = args.experience {
        profile.experience_level = experience;
    }
    profile.has_allergies = args.allergies;
    profile
}

fn describe_profile(profile: &PreferenceProfile) -> String {
    let sizes: Vec<&str> = profile
        .preferred_sizes
        .iter()
        .map(|size| size.label())
        .collect();
    format!(
        "{} | sizes {} | up to {} years | {:?} lifestyle | {:?} | {:?}{}",
        profile.pet_types.join("/"),
        sizes.join("/"),
        profile.max_age,
        profile.lifestyle,
        profile.housing_type,
        profile.experience_level,
        if profile.has_allergies {
            " | allergies"
        } else {
            ""
        }
    )
}

fn render_matches(results: &[MatchResult]) {
    if results.is_empty() {
        println!("  (no pets)");
        return;
    }
    for (rank, result) in results.iter().enumerate() {
        println!(
            "  {}. {} the {} ({}, {}) - {}%",
            rank + 1,
            result.pet.name,
            result.pet.breed,
            result.pet.species,
            result.pet.age,
            result.score
        );
        if !result.reasons.is_empty() {
            println!("     {}", result.reasons.join(", "));
        }
    }
}

fn render_stats(stats: &ProcessingStats) {
    println!(
        "- {} applications: {} pending | {} under review | {} approved | {} rejected | {} withdrawn",
        stats.total,
        stats.pending,
        stats.under_review,
        stats.approved,
        stats.rejected,
        stats.withdrawn
    );
    println!(
        "- Average score {} | approval rate {}% | {} follow-ups flagged | {} days average processing",
        stats.average_score,
        stats.approval_rate,
        stats.follow_ups_required,
        stats.average_processing_days
    );
}

fn render_application_line(application: &Application) {
    println!(
        "  - {} {} for {} ({})",
        application.id,
        application.applicant_name,
        application.pet_name,
        application.status.label()
    );
}

fn demo_submission(pet: &Pet) -> ApplicationSubmission {
    ApplicationSubmission {
        pet_id: pet.id.clone(),
        pet_name: pet.name.clone(),
        adopter_id: DEMO_ADOPTER.to_string(),
        applicant_name: "Robin Castillo".to_string(),
        applicant_email: "robin.castillo@example.com".to_string(),
        applicant_phone: "555-0142".to_string(),
        priority: None,
        personal_info: PersonalInfo {
            occupation: "Librarian".to_string(),
            residence_type: ResidenceType::Condo,
            ownership: Ownership::Own,
            landlord_approval: false,
            annual_income: "$75,000 - $100,000".to_string(),
        },
        pet_experience: PetExperience {
            has_owned_pets: true,
            previous_pets: "Two senior cats".to_string(),
            veterinarian: Some("Maple Street Vet".to_string()),
        },
        lifestyle: LifestyleInfo {
            work_schedule: "Part-time, mornings".to_string(),
            exercise_commitment: "Daily play sessions".to_string(),
            hours_alone_per_day: Some(4),
            pet_care_budget: "$150 per month".to_string(),
        },
        references: vec![Reference {
            name: "Jordan Ames".to_string(),
            relationship: "Former landlord".to_string(),
            phone: "555-0177".to_string(),
            contacted: true,
        }],
    }
}
