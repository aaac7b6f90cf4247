use super::super::domain::{Application, Ownership, ResidenceType};
use super::{ScoreComponent, VerificationFactor};

pub(crate) type VerificationRule = fn(&Application) -> Option<ScoreComponent>;

pub(crate) const VERIFICATION_RULES: [VerificationRule; 9] = [
    pet_ownership,
    veterinarian,
    housing_stability,
    residence_type,
    income_bracket,
    work_schedule,
    exercise_commitment,
    references,
    care_budget,
];

const POINTS_PER_REFERENCE: u8 = 3;
const MAX_REFERENCE_POINTS: u8 = 10;

fn component(factor: VerificationFactor, score: u8, notes: impl Into<String>) -> ScoreComponent {
    ScoreComponent {
        factor,
        score,
        notes: notes.into(),
    }
}

fn pet_ownership(application: &Application) -> Option<ScoreComponent> {
    application.pet_experience.has_owned_pets.then(|| {
        component(
            VerificationFactor::PetOwnership,
            20,
            "has owned pets before",
        )
    })
}

fn veterinarian(application: &Application) -> Option<ScoreComponent> {
    application
        .pet_experience
        .has_veterinarian()
        .then(|| component(VerificationFactor::Veterinarian, 10, "veterinarian on record"))
}

fn housing_stability(application: &Application) -> Option<ScoreComponent> {
    let info = &application.personal_info;
    match info.ownership {
        Ownership::Own => Some(component(
            VerificationFactor::HousingStability,
            15,
            "owns their home",
        )),
        Ownership::Rent if info.landlord_approval => Some(component(
            VerificationFactor::HousingStability,
            10,
            "landlord approved pets",
        )),
        Ownership::Rent => None,
    }
}

fn residence_type(application: &Application) -> Option<ScoreComponent> {
    (application.personal_info.residence_type == ResidenceType::House)
        .then(|| component(VerificationFactor::ResidenceType, 10, "lives in a house"))
}

// Substring match on the free-text bracket; "$50,000 - $75,000" counts as the upper band.
fn income_bracket(application: &Application) -> Option<ScoreComponent> {
    let income = &application.personal_info.annual_income;
    let score = if income.contains("75,000") {
        20
    } else if income.contains("50,000") {
        15
    } else {
        10
    };
    Some(component(
        VerificationFactor::Income,
        score,
        format!("income bracket '{income}'"),
    ))
}

fn work_schedule(application: &Application) -> Option<ScoreComponent> {
    let schedule = &application.lifestyle.work_schedule;
    (schedule.contains("Remote") || schedule.contains("home")).then(|| {
        component(
            VerificationFactor::WorkSchedule,
            10,
            "works remotely or from home",
        )
    })
}

fn exercise_commitment(application: &Application) -> Option<ScoreComponent> {
    application
        .lifestyle
        .exercise_commitment
        .contains("Daily")
        .then(|| component(VerificationFactor::Exercise, 5, "daily exercise commitment"))
}

fn references(application: &Application) -> Option<ScoreComponent> {
    let count = application.references.len();
    if count == 0 {
        return None;
    }

    let score = count
        .saturating_mul(usize::from(POINTS_PER_REFERENCE))
        .min(usize::from(MAX_REFERENCE_POINTS)) as u8;
    Some(component(
        VerificationFactor::References,
        score,
        format!("{count} reference(s) provided"),
    ))
}

fn care_budget(application: &Application) -> Option<ScoreComponent> {
    let budget = &application.lifestyle.pet_care_budget;
    (budget.contains("200") || budget.contains("300")).then(|| {
        component(
            VerificationFactor::CareBudget,
            5,
            format!("pet care budget '{budget}'"),
        )
    })
}
