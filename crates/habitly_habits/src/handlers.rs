// --- File: crates/habitly_habits/src/handlers.rs ---
use crate::logic::{
    changes_from_request, draft_from_request, is_valid_date_key, BatchCreateRequest,
    CreateHabitRequest, DayHabitView, DayHabitsResponse, DayQuery, HabitView,
    RegisterTokenRequest, ToggleCompletionRequest, ToggleCompletionResponse, UpdateHabitRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use habitly_common::models::{date_key_in_reference_zone, weekday_of};
use habitly_common::{external_service_error, validation_error, HabitlyError, HttpStatusCode};
use habitly_config::AppConfig;
use habitly_firestore::client::FirestoreError;
use habitly_firestore::completions::CompletionRepository;
use habitly_firestore::habits::HabitRepository;
use habitly_firestore::tokens::TokenRepository;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};

// Shared state for the habit handlers
#[derive(Clone)]
pub struct HabitsState {
    pub config: Arc<AppConfig>,
    pub habits: HabitRepository,
    pub completions: CompletionRepository,
    pub tokens: TokenRepository,
}

// Runtime flag check, mirrored by every handler in this crate
fn ensure_enabled(state: &HabitsState) -> Result<(), (StatusCode, String)> {
    if !state.config.use_habits {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Habits service is disabled.".to_string(),
        ));
    }
    Ok(())
}

fn http_error(err: HabitlyError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

fn store_error(context: &str, err: FirestoreError) -> (StatusCode, String) {
    error!("{context}: {err}");
    http_error(external_service_error("firestore", context))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, String) {
    http_error(validation_error(message.into()))
}

/// Handler for the per-day habit listing.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/habits", // Path relative to /api
    params(DayQuery),
    responses(
        (status = 200, description = "Habits applying on the given day", body = DayHabitsResponse),
        (status = 400, description = "Bad request (e.g., invalid date format)"),
        (status = 500, description = "Internal error")
    ),
    tag = "Habits"
))]
pub async fn list_day_habits_handler(
    State(state): State<Arc<HabitsState>>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayHabitsResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;
    if !is_valid_date_key(&query.date) {
        return Err(bad_request("Invalid date format (YYYY-MM-DD)"));
    }
    // Valid date keys always parse to a weekday.
    let weekday = weekday_of(&query.date)
        .ok_or_else(|| bad_request("Invalid date format (YYYY-MM-DD)"))?;

    let habits = state
        .habits
        .find_by_user(&query.user_id)
        .await
        .map_err(|e| store_error("listing habits", e))?;

    let completions = state
        .completions
        .find_for_day(&query.user_id, &query.date)
        .await
        .map_err(|e| store_error("listing completions", e))?;
    let done: HashSet<&str> = completions
        .iter()
        .filter(|c| c.completed)
        .map(|c| c.habit_id.as_str())
        .collect();

    let views: Vec<DayHabitView> = habits
        .into_iter()
        .filter(|h| h.is_due_on(&query.date, weekday))
        .map(|h| {
            let completed = done.contains(h.id.as_str());
            DayHabitView {
                habit: HabitView::from_habit(h),
                completed,
            }
        })
        .collect();

    Ok(Json(DayHabitsResponse {
        date: query.date,
        habits: views,
    }))
}

/// Handler to create one habit.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/habits",
    request_body = CreateHabitRequest,
    responses(
        (status = 201, description = "Habit created", body = HabitView),
        (status = 400, description = "Invalid habit payload"),
        (status = 500, description = "Internal error")
    ),
    tag = "Habits"
))]
pub async fn create_habit_handler(
    State(state): State<Arc<HabitsState>>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitView>), (StatusCode, String)> {
    ensure_enabled(&state)?;
    let today = date_key_in_reference_zone(Utc::now());
    let draft = draft_from_request(payload, &today).map_err(|e| bad_request(e.to_string()))?;

    let habit = state
        .habits
        .create(draft)
        .await
        .map_err(|e| store_error("creating habit", e))?;

    info!(habit_id = %habit.id, "Habit created");
    Ok((StatusCode::CREATED, Json(HabitView::from_habit(habit))))
}

/// Handler to create several habits in one request.
///
/// All payloads are validated before anything is written, so an invalid
/// entry rejects the whole batch.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/habits/batch",
    request_body = BatchCreateRequest,
    responses(
        (status = 201, description = "All habits created", body = [HabitView]),
        (status = 400, description = "Invalid habit payload in the batch"),
        (status = 500, description = "Internal error")
    ),
    tag = "Habits"
))]
pub async fn create_habits_batch_handler(
    State(state): State<Arc<HabitsState>>,
    Json(payload): Json<BatchCreateRequest>,
) -> Result<(StatusCode, Json<Vec<HabitView>>), (StatusCode, String)> {
    ensure_enabled(&state)?;
    if payload.habits.is_empty() {
        return Err(bad_request("habits must not be empty"));
    }

    let today = date_key_in_reference_zone(Utc::now());
    let drafts = payload
        .habits
        .into_iter()
        .enumerate()
        .map(|(i, req)| {
            draft_from_request(req, &today).map_err(|e| bad_request(format!("habits[{i}]: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let habit = state
            .habits
            .create(draft)
            .await
            .map_err(|e| store_error("creating habit batch", e))?;
        created.push(HabitView::from_habit(habit));
    }

    info!(count = created.len(), "Habit batch created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler to update a habit's mutable fields.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/habits/{habit_id}",
    params(("habit_id" = String, Path, description = "Habit document id")),
    request_body = UpdateHabitRequest,
    responses(
        (status = 204, description = "Habit updated"),
        (status = 400, description = "Invalid habit payload"),
        (status = 500, description = "Internal error")
    ),
    tag = "Habits"
))]
pub async fn update_habit_handler(
    State(state): State<Arc<HabitsState>>,
    Path(habit_id): Path<String>,
    Json(payload): Json<UpdateHabitRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    ensure_enabled(&state)?;
    let changes = changes_from_request(payload).map_err(|e| bad_request(e.to_string()))?;

    state
        .habits
        .update(&habit_id, changes)
        .await
        .map_err(|e| store_error("updating habit", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler to delete a habit.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/habits/{habit_id}",
    params(("habit_id" = String, Path, description = "Habit document id")),
    responses(
        (status = 204, description = "Habit deleted (idempotent)"),
        (status = 500, description = "Internal error")
    ),
    tag = "Habits"
))]
pub async fn delete_habit_handler(
    State(state): State<Arc<HabitsState>>,
    Path(habit_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    ensure_enabled(&state)?;
    state
        .habits
        .delete(&habit_id)
        .await
        .map_err(|e| store_error("deleting habit", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler to flip a habit's completion state on a date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/completions/toggle",
    request_body = ToggleCompletionRequest,
    responses(
        (status = 200, description = "New completion state", body = ToggleCompletionResponse),
        (status = 400, description = "Invalid date format"),
        (status = 500, description = "Internal error")
    ),
    tag = "Habits"
))]
pub async fn toggle_completion_handler(
    State(state): State<Arc<HabitsState>>,
    Json(payload): Json<ToggleCompletionRequest>,
) -> Result<Json<ToggleCompletionResponse>, (StatusCode, String)> {
    ensure_enabled(&state)?;
    if !is_valid_date_key(&payload.date) {
        return Err(bad_request("Invalid date format (YYYY-MM-DD)"));
    }

    let completed = state
        .completions
        .toggle(&payload.user_id, &payload.habit_id, &payload.date)
        .await
        .map_err(|e| store_error("toggling completion", e))?;

    Ok(Json(ToggleCompletionResponse { completed }))
}

/// Handler to store (or overwrite) a user's push delivery token.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/push-tokens",
    request_body = RegisterTokenRequest,
    responses(
        (status = 204, description = "Token stored"),
        (status = 400, description = "Empty token"),
        (status = 500, description = "Internal error")
    ),
    tag = "Push Tokens"
))]
pub async fn register_token_handler(
    State(state): State<Arc<HabitsState>>,
    Json(payload): Json<RegisterTokenRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    ensure_enabled(&state)?;
    if payload.token.trim().is_empty() {
        return Err(bad_request("token must not be empty"));
    }

    state
        .tokens
        .set(&payload.user_id, &payload.token)
        .await
        .map_err(|e| store_error("storing token", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler to delete a user's push delivery token.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/push-tokens/{user_id}",
    params(("user_id" = String, Path, description = "Owning user id")),
    responses(
        (status = 204, description = "Token deleted (idempotent)"),
        (status = 500, description = "Internal error")
    ),
    tag = "Push Tokens"
))]
pub async fn delete_token_handler(
    State(state): State<Arc<HabitsState>>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    ensure_enabled(&state)?;
    state
        .tokens
        .delete(&user_id)
        .await
        .map_err(|e| store_error("deleting token", e))?;

    Ok(StatusCode::NO_CONTENT)
}
