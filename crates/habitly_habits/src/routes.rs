// --- File: crates/habitly_habits/src/routes.rs ---

use crate::handlers::{
    create_habit_handler, create_habits_batch_handler, delete_habit_handler,
    delete_token_handler, list_day_habits_handler, register_token_handler,
    toggle_completion_handler, update_habit_handler, HabitsState,
};
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use habitly_config::AppConfig;
use habitly_firestore::client::FirestoreClient;
use habitly_firestore::completions::CompletionRepository;
use habitly_firestore::habits::HabitRepository;
use habitly_firestore::tokens::TokenRepository;
use std::sync::Arc;

/// Creates a router containing all routes for the habits feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let firebase = config
        .firebase
        .clone()
        .expect("Firebase config missing for habits routes");
    let client = Arc::new(FirestoreClient::new(firebase));

    let state = Arc::new(HabitsState {
        config,
        habits: HabitRepository::new(Arc::clone(&client)),
        completions: CompletionRepository::new(Arc::clone(&client)),
        tokens: TokenRepository::new(client),
    });

    Router::new()
        .route(
            "/habits",
            get(list_day_habits_handler).post(create_habit_handler),
        )
        .route("/habits/batch", post(create_habits_batch_handler))
        .route(
            "/habits/{habit_id}",
            patch(update_habit_handler).delete(delete_habit_handler),
        )
        .route("/completions/toggle", post(toggle_completion_handler))
        .route("/push-tokens", post(register_token_handler))
        .route("/push-tokens/{user_id}", delete(delete_token_handler))
        .with_state(state)
}
