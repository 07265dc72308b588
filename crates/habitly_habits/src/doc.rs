// --- File: crates/habitly_habits/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    create_habit_handler, create_habits_batch_handler, delete_habit_handler,
    delete_token_handler, list_day_habits_handler, register_token_handler,
    toggle_completion_handler, update_habit_handler,
};
use crate::logic::{
    BatchCreateRequest, CreateHabitRequest, DayHabitView, DayHabitsResponse, HabitView,
    RegisterTokenRequest, ToggleCompletionRequest, ToggleCompletionResponse, UpdateHabitRequest,
};

/// OpenAPI documentation for the habits API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_day_habits_handler,
        create_habit_handler,
        create_habits_batch_handler,
        update_habit_handler,
        delete_habit_handler,
        toggle_completion_handler,
        register_token_handler,
        delete_token_handler
    ),
    components(
        schemas(
            CreateHabitRequest,
            BatchCreateRequest,
            UpdateHabitRequest,
            HabitView,
            DayHabitView,
            DayHabitsResponse,
            ToggleCompletionRequest,
            ToggleCompletionResponse,
            RegisterTokenRequest
        )
    ),
    tags(
        (name = "Habits", description = "Habit CRUD and per-day listing"),
        (name = "Push Tokens", description = "Push delivery token registration")
    )
)]
pub struct HabitsApiDoc;
