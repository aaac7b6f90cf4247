use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use pawpath::workflows::adoption::{ExperienceLevel, HousingType, Lifestyle, PetSize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_size(raw: &str) -> Result<PetSize, String> {
    PetSize::parse(raw).ok_or_else(|| format!("unknown size '{raw}' (small, medium, large)"))
}

pub(crate) fn parse_lifestyle(raw: &str) -> Result<Lifestyle, String> {
    match normalized(raw).as_str() {
        "active" => Ok(Lifestyle::Active),
        "calm" => Ok(Lifestyle::Calm),
        "mixed" => Ok(Lifestyle::Mixed),
        _ => Err(format!("unknown lifestyle '{raw}' (active, calm, mixed)")),
    }
}

pub(crate) fn parse_housing(raw: &str) -> Result<HousingType, String> {
    match normalized(raw).as_str() {
        "house_with_yard" => Ok(HousingType::HouseWithYard),
        "house_no_yard" => Ok(HousingType::HouseNoYard),
        "apartment" => Ok(HousingType::Apartment),
        _ => Err(format!(
            "unknown housing '{raw}' (house-with-yard, house-no-yard, apartment)"
        )),
    }
}

pub(crate) fn parse_experience(raw: &str) -> Result<ExperienceLevel, String> {
    match normalized(raw).as_str() {
        "beginner" => Ok(ExperienceLevel::Beginner),
        "intermediate" => Ok(ExperienceLevel::Intermediate),
        "experienced" => Ok(ExperienceLevel::Experienced),
        _ => Err(format!(
            "unknown experience '{raw}' (beginner, intermediate, experienced)"
        )),
    }
}

fn normalized(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_require_iso_format() {
        assert_eq!(
            parse_date(" 2025-10-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"))
        );
        assert!(parse_date("10/01/2025").is_err());
    }

    #[test]
    fn profile_flags_accept_kebab_or_snake_case() {
        assert_eq!(parse_housing("House-With-Yard"), Ok(HousingType::HouseWithYard));
        assert_eq!(parse_housing("house_no_yard"), Ok(HousingType::HouseNoYard));
        assert_eq!(parse_lifestyle("CALM"), Ok(Lifestyle::Calm));
        assert_eq!(parse_experience("experienced"), Ok(ExperienceLevel::Experienced));
        assert_eq!(parse_size("medium"), Ok(PetSize::Medium));
        assert!(parse_lifestyle("sleepy").is_err());
    }
}
