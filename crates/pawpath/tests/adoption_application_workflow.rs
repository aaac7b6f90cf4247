use std::sync::Arc;
use std::thread;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use pawpath::storage::{JsonFileStore, MemoryStore};
use pawpath::workflows::adoption::applications::{
    AdoptionApplicationService, ApplicationStatus, ApplicationSubmission, ApplicationUpdate,
    LifestyleInfo, Ownership, PersonalInfo, PetExperience, Reference, ResidenceType,
    SearchCriteria, StatusChange,
};
use pawpath::workflows::adoption::PetId;

fn intake_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn submission(applicant: &str, email: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        pet_id: PetId("pet-002".to_string()),
        pet_name: "Miso".to_string(),
        adopter_id: email.to_string(),
        applicant_name: applicant.to_string(),
        applicant_email: email.to_string(),
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
            previous_pets: "Two cats".to_string(),
            veterinarian: Some("Maple Street Vet".to_string()),
        },
        lifestyle: LifestyleInfo {
            work_schedule: "Part-time".to_string(),
            exercise_commitment: "Daily play sessions".to_string(),
            hours_alone_per_day: Some(4),
            pet_care_budget: "$150 per month".to_string(),
        },
        references: vec![Reference {
            name: "Jordan".to_string(),
            relationship: "Friend".to_string(),
            phone: "555-0177".to_string(),
            contacted: false,
        }],
    }
}

fn change(status: ApplicationStatus, reason: Option<&str>) -> StatusChange {
    StatusChange {
        status,
        actor: "Casey".to_string(),
        reason: reason.map(str::to_string),
    }
}

#[test]
fn review_workflow_persists_across_service_instances() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = Arc::new(JsonFileStore::new(dir.path()));

    let intake = AdoptionApplicationService::new(store.clone()).with_clock(intake_clock);
    let application = intake
        .submit(submission("Robin Castillo", "robin@example.com"))
        .expect("submitted");
    let score = intake.score_application(&application.id);
    assert!(score > 0);
    intake
        .add_note(&application.id, "Casey", "Vet reference confirmed", true)
        .expect("note stored");
    drop(intake);

    let review = AdoptionApplicationService::new(store).with_clock(intake_clock);
    let reviewed = review
        .update_status(&application.id, change(ApplicationStatus::UnderReview, None))
        .expect("application survives restart");
    assert_eq!(reviewed.score, Some(score));
    assert_eq!(reviewed.progress, 40);

    let approved = review
        .update_status(
            &application.id,
            change(ApplicationStatus::Approved, Some("Great home")),
        )
        .expect("approved");
    assert_eq!(approved.progress, 100);
    assert!(approved.rejection_reason.is_none());

    let history = review.status_history(&application.id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].new_status, ApplicationStatus::Approved);
    assert_eq!(review.notes(&application.id).len(), 1);

    let stats = review.processing_stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.approval_rate, 100);
    assert_eq!(stats.average_processing_days, 0);

    assert!(dir.path().join("adoption_applications.json").exists());
    assert!(dir.path().join("application_status_history.json").exists());
}

#[test]
fn follow_up_scheduling_feeds_the_follow_up_queue() {
    let store = Arc::new(MemoryStore::default());
    let service = AdoptionApplicationService::new(store).with_clock(intake_clock);
    let application = service
        .submit(submission("Robin Castillo", "robin@example.com"))
        .expect("submitted");
    let visit = NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date");

    service
        .update_application(
            &application.id,
            ApplicationUpdate {
                follow_up_required: Some(true),
                follow_up_date: Some(visit),
                ..ApplicationUpdate::default()
            },
        )
        .expect("updated");

    let before = NaiveDate::from_ymd_opt(2025, 10, 14).expect("valid date");
    assert!(service.applications_requiring_follow_up(before).is_empty());
    assert_eq!(service.applications_requiring_follow_up(visit).len(), 1);
}

#[test]
fn concurrent_submissions_and_updates_are_not_lost() {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(AdoptionApplicationService::new(store).with_clock(intake_clock));

    let submitters: Vec<_> = (0..8)
        .map(|index| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service
                    .submit(submission(
                        &format!("Applicant {index}"),
                        &format!("applicant{index}@example.com"),
                    ))
                    .expect("submitted")
            })
        })
        .collect();
    let submitted: Vec<_> = submitters
        .into_iter()
        .map(|handle| handle.join().expect("thread completes"))
        .collect();

    let mut ids: Vec<String> = submitted
        .iter()
        .map(|application| application.id.0.clone())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(service.applications().len(), 8);

    let reviewers: Vec<_> = submitted
        .into_iter()
        .map(|application| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service
                    .update_status(&application.id, change(ApplicationStatus::UnderReview, None))
                    .expect("status updated");
            })
        })
        .collect();
    for handle in reviewers {
        handle.join().expect("thread completes");
    }

    let stats = service.processing_stats();
    assert_eq!(stats.under_review, 8);
    assert_eq!(stats.pending, 0);

    let reviewed = service.search(&SearchCriteria {
        status: Some(ApplicationStatus::UnderReview),
        ..SearchCriteria::default()
    });
    assert_eq!(reviewed.len(), 8);
}

#[test]
fn services_sharing_one_store_never_lose_submissions() {
    for _ in 0..20 {
        let store = Arc::new(MemoryStore::default());
        let front_desk = Arc::new(
            AdoptionApplicationService::new(Arc::clone(&store)).with_clock(intake_clock),
        );
        let website = Arc::new(
            AdoptionApplicationService::new(Arc::clone(&store)).with_clock(intake_clock),
        );

        let submitters: Vec<_> = (0..16)
            .map(|index| {
                let service = if index % 2 == 0 {
                    Arc::clone(&front_desk)
                } else {
                    Arc::clone(&website)
                };
                thread::spawn(move || {
                    service
                        .submit(submission(
                            &format!("Applicant {index}"),
                            &format!("applicant{index}@example.com"),
                        ))
                        .expect("submitted")
                })
            })
            .collect();
        for handle in submitters {
            handle.join().expect("thread completes");
        }

        let stored = front_desk.applications();
        assert_eq!(stored.len(), 16);
        let mut ids: Vec<String> = stored
            .iter()
            .map(|application| application.id.0.clone())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(website.applications().len(), 16);
    }
}

#[test]
fn file_store_clones_share_key_locks_across_services() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path());
    let services: Vec<_> = (0..2)
        .map(|_| {
            Arc::new(
                AdoptionApplicationService::new(Arc::new(store.clone()))
                    .with_clock(intake_clock),
            )
        })
        .collect();

    let submitters: Vec<_> = (0..8)
        .map(|index| {
            let service = Arc::clone(&services[index % 2]);
            thread::spawn(move || {
                service
                    .submit(submission(
                        &format!("Applicant {index}"),
                        &format!("applicant{index}@example.com"),
                    ))
                    .expect("submitted")
            })
        })
        .collect();
    for handle in submitters {
        handle.join().expect("thread completes");
    }

    assert_eq!(services[0].applications().len(), 8);
    assert_eq!(services[1].applications().len(), 8);
}
