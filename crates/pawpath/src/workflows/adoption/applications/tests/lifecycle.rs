use super::common::*;
use crate::storage::KeyValueStore;
use crate::workflows::adoption::applications::domain::{ApplicationId, ApplicationStatus};
use crate::workflows::adoption::applications::StatusChange;

fn change(status: ApplicationStatus, reason: Option<&str>) -> StatusChange {
    StatusChange {
        status,
        actor: "Morgan".to_string(),
        reason: reason.map(str::to_string),
    }
}

#[test]
fn rejection_records_reason_and_a_single_history_entry() {
    let (service, _) = build_service();
    let application = service.submit(submission()).expect("submitted");

    let updated = service
        .update_status(
            &application.id,
            change(ApplicationStatus::Rejected, Some("reason-X")),
        )
        .expect("application exists");

    assert_eq!(updated.status, ApplicationStatus::Rejected);
    assert_eq!(updated.rejection_reason.as_deref(), Some("reason-X"));

    let stored = service.application(&application.id).expect("stored");
    assert_eq!(stored.status, ApplicationStatus::Rejected);
    assert_eq!(stored.rejection_reason.as_deref(), Some("reason-X"));

    let history = service.status_history(&application.id);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_status, ApplicationStatus::Pending);
    assert_eq!(history[0].new_status, ApplicationStatus::Rejected);
    assert_eq!(history[0].changed_by, "Morgan");
    assert_eq!(history[0].reason.as_deref(), Some("reason-X"));
}

#[test]
fn reviewer_and_review_date_are_stamped_together() {
    let (service, _) = build_service();
    let application = service.submit(submission()).expect("submitted");
    assert!(application.reviewed_by.is_none());
    assert!(application.review_date.is_none());

    let updated = service
        .update_status(&application.id, change(ApplicationStatus::UnderReview, None))
        .expect("application exists");

    assert_eq!(updated.reviewed_by.as_deref(), Some("Morgan"));
    assert_eq!(updated.review_date, Some(fixed_now()));
    assert_eq!(updated.updated_at, fixed_now());
    assert!(updated.rejection_reason.is_none());
}

#[test]
fn non_rejection_transitions_clear_the_rejection_reason() {
    let (service, _) = build_service();
    let application = service.submit(submission()).expect("submitted");
    service
        .update_status(
            &application.id,
            change(ApplicationStatus::Rejected, Some("incomplete references")),
        )
        .expect("rejected");

    let reopened = service
        .update_status(
            &application.id,
            change(ApplicationStatus::Approved, Some("references verified")),
        )
        .expect("terminal applications may still move");

    assert_eq!(reopened.status, ApplicationStatus::Approved);
    assert!(reopened.rejection_reason.is_none());

    let history = service.status_history(&application.id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].previous_status, ApplicationStatus::Rejected);
    assert_eq!(history[0].new_status, ApplicationStatus::Approved);
    assert_eq!(history[1].new_status, ApplicationStatus::Rejected);
}

#[test]
fn unknown_application_is_a_no_op() {
    let (service, store) = build_service();
    service.submit(submission()).expect("submitted");
    let writes_before = store.writes();

    let result = service.update_status(
        &ApplicationId("app-999999".to_string()),
        change(ApplicationStatus::Approved, None),
    );

    assert!(result.is_none());
    assert_eq!(store.writes(), writes_before);
    assert!(store
        .get(crate::storage::keys::STATUS_HISTORY)
        .expect("get")
        .is_none());
}

#[test]
fn timeline_and_progress_follow_the_status() {
    let (service, _) = build_service();
    let application = service.submit(submission()).expect("submitted");
    assert_eq!(application.progress, 20);
    assert_eq!(application.timeline.len(), 5);
    assert!(application.timeline[0].completed);
    assert!(application.timeline[1..].iter().all(|step| !step.completed));

    let in_review = service
        .update_status(&application.id, change(ApplicationStatus::UnderReview, None))
        .expect("in review");
    assert_eq!(in_review.progress, 40);
    assert!(in_review.timeline[1].completed);
    assert_eq!(in_review.timeline[1].title, "Initial Review");

    let approved = service
        .update_status(&application.id, change(ApplicationStatus::Approved, None))
        .expect("approved");
    assert_eq!(approved.progress, 100);
    assert!(approved.timeline.iter().all(|step| step.completed));
}

#[test]
fn withdrawal_completes_the_final_decision_only() {
    let (service, _) = build_service();
    let application = service.submit(submission()).expect("submitted");

    let withdrawn = service
        .update_status(&application.id, change(ApplicationStatus::Withdrawn, None))
        .expect("withdrawn");

    assert_eq!(withdrawn.progress, 100);
    assert!(withdrawn.timeline[4].completed);
    assert!(!withdrawn.timeline[2].completed);
}

#[test]
fn history_is_scoped_and_most_recent_first() {
    let (service, _) = build_service();
    let first = service.submit(submission()).expect("first");
    let second = service.submit(renter_submission()).expect("second");

    service.update_status(&first.id, change(ApplicationStatus::UnderReview, None));
    service.update_status(&second.id, change(ApplicationStatus::Withdrawn, None));
    service.update_status(&first.id, change(ApplicationStatus::Approved, None));

    let history = service.status_history(&first.id);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].new_status, ApplicationStatus::Approved);
    assert_eq!(history[1].new_status, ApplicationStatus::UnderReview);
    assert!(history.iter().all(|entry| entry.application_id == first.id));
}

#[test]
fn notes_are_returned_newest_first() {
    let (service, _) = build_service();
    let application = service.submit(submission()).expect("submitted");
    let other = service.submit(renter_submission()).expect("other");

    let first = service
        .add_note(&application.id, "Morgan", "Called landlord", true)
        .expect("note stored");
    service
        .add_note(&other.id, "Morgan", "Unrelated", false)
        .expect("note stored");
    let second = service
        .add_note(&application.id, "Avery", "Home visit booked", false)
        .expect("note stored");

    let notes = service.notes(&application.id);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, second.id);
    assert_eq!(notes[1].id, first.id);
    assert!(notes[1].is_internal);
    assert!(!notes[0].is_internal);
    assert_ne!(first.id, second.id);
}
