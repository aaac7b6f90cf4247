use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::storage::KeyValueStore;
use crate::workflows::adoption::domain::{Pet, PreferenceProfile};

use super::domain::{ApplicationId, ApplicationSubmission, ApplicationUpdate};
use super::lifecycle::StatusChange;
use super::search::SearchCriteria;
use super::service::AdoptionApplicationService;

type SharedService<S> = State<Arc<AdoptionApplicationService<S>>>;

/// Router builder exposing the adoption workflows over HTTP.
///
/// Only writes that create records (submissions, notes, preferences) answer
/// 503 when storage fails. Lookups see the service's masked result, so a
/// failed read is a 404 for a single application and an empty 200 for lists.
pub fn adoption_router<S>(service: Arc<AdoptionApplicationService<S>>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/adoption/applications",
            get(list_handler::<S>).post(submit_handler::<S>),
        )
        .route(
            "/api/v1/adoption/applications/:application_id",
            get(fetch_handler::<S>).patch(update_handler::<S>),
        )
        .route(
            "/api/v1/adoption/applications/:application_id/status",
            post(status_handler::<S>),
        )
        .route(
            "/api/v1/adoption/applications/:application_id/score",
            post(score_handler::<S>),
        )
        .route(
            "/api/v1/adoption/applications/:application_id/notes",
            get(notes_handler::<S>).post(add_note_handler::<S>),
        )
        .route(
            "/api/v1/adoption/applications/:application_id/history",
            get(history_handler::<S>),
        )
        .route("/api/v1/adoption/search", post(search_handler::<S>))
        .route("/api/v1/adoption/stats", get(stats_handler::<S>))
        .route("/api/v1/adoption/follow-ups", get(follow_ups_handler::<S>))
        .route("/api/v1/adoption/matches", post(matches_handler::<S>))
        .route(
            "/api/v1/adoption/preferences/:adopter_id",
            get(preferences_handler::<S>).put(save_preferences_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct NoteRequest {
    pub(crate) author: String,
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) is_internal: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowUpQuery {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) pets: Vec<Pet>,
    #[serde(default)]
    pub(crate) preferences: Option<PreferenceProfile>,
    #[serde(default)]
    pub(crate) adopter_id: Option<String>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

fn not_found(id: &ApplicationId) -> Response {
    let payload = json!({
        "error": format!("application {} not found", id),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn storage_unavailable() -> Response {
    let payload = json!({
        "error": "adoption storage unavailable",
    });
    (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
}

pub(crate) async fn list_handler<S>(State(service): SharedService<S>) -> Response
where
    S: KeyValueStore + 'static,
{
    (StatusCode::OK, Json(service.applications())).into_response()
}

pub(crate) async fn submit_handler<S>(
    State(service): SharedService<S>,
    Json(submission): Json<ApplicationSubmission>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    match service.submit(submission) {
        Some(application) => (StatusCode::CREATED, Json(application)).into_response(),
        None => storage_unavailable(),
    }
}

pub(crate) async fn fetch_handler<S>(
    State(service): SharedService<S>,
    Path(application_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.application(&id) {
        Some(application) => (StatusCode::OK, Json(application)).into_response(),
        None => not_found(&id),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): SharedService<S>,
    Path(application_id): Path<String>,
    Json(update): Json<ApplicationUpdate>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_application(&id, update) {
        Some(application) => (StatusCode::OK, Json(application)).into_response(),
        None => not_found(&id),
    }
}

pub(crate) async fn status_handler<S>(
    State(service): SharedService<S>,
    Path(application_id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_status(&id, change) {
        Some(application) => (StatusCode::OK, Json(application)).into_response(),
        None => not_found(&id),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): SharedService<S>,
    Path(application_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.evaluate(&id) {
        Some(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        None => not_found(&id),
    }
}

pub(crate) async fn notes_handler<S>(
    State(service): SharedService<S>,
    Path(application_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = ApplicationId(application_id);
    (StatusCode::OK, Json(service.notes(&id))).into_response()
}

pub(crate) async fn add_note_handler<S>(
    State(service): SharedService<S>,
    Path(application_id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.add_note(&id, &request.author, &request.text, request.is_internal) {
        Some(note) => (StatusCode::CREATED, Json(note)).into_response(),
        None => storage_unavailable(),
    }
}

pub(crate) async fn history_handler<S>(
    State(service): SharedService<S>,
    Path(application_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let id = ApplicationId(application_id);
    (StatusCode::OK, Json(service.status_history(&id))).into_response()
}

pub(crate) async fn search_handler<S>(
    State(service): SharedService<S>,
    Json(criteria): Json<SearchCriteria>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    (StatusCode::OK, Json(service.search(&criteria))).into_response()
}

pub(crate) async fn stats_handler<S>(State(service): SharedService<S>) -> Response
where
    S: KeyValueStore + 'static,
{
    (StatusCode::OK, Json(service.processing_stats())).into_response()
}

pub(crate) async fn follow_ups_handler<S>(
    State(service): SharedService<S>,
    Query(query): Query<FollowUpQuery>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    (
        StatusCode::OK,
        Json(service.applications_requiring_follow_up(today)),
    )
        .into_response()
}

pub(crate) async fn matches_handler<S>(
    State(service): SharedService<S>,
    Json(request): Json<MatchRequest>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let MatchRequest {
        pets,
        preferences,
        adopter_id,
        limit,
    } = request;

    let results = match (preferences, adopter_id) {
        (Some(profile), _) => service.top_matches(&pets, &profile, limit),
        (None, Some(adopter_id)) => service.matches_for(&adopter_id, &pets, limit),
        (None, None) => {
            let payload = json!({
                "error": "either preferences or adopter_id is required",
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    (StatusCode::OK, Json(results)).into_response()
}

pub(crate) async fn preferences_handler<S>(
    State(service): SharedService<S>,
    Path(adopter_id): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    (StatusCode::OK, Json(service.preferences(&adopter_id))).into_response()
}

pub(crate) async fn save_preferences_handler<S>(
    State(service): SharedService<S>,
    Path(adopter_id): Path<String>,
    Json(profile): Json<PreferenceProfile>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    if service.save_preferences(&adopter_id, profile.clone()) {
        (StatusCode::OK, Json(profile)).into_response()
    } else {
        storage_unavailable()
    }
}
