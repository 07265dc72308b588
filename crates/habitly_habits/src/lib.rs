// --- File: crates/habitly_habits/src/lib.rs ---

//! HTTP API for managing habits, completions, and push delivery tokens.
//!
//! The per-day listing applies the same recurrence rule the reminder job
//! uses, so a habit shows up on exactly the days it can alert on.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use routes::routes;
