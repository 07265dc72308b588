//! Firestore integration for Habitly
//!
//! This crate talks to the Firestore REST API (v1) and is the only place
//! that knows the stored document layout. It provides:
//!
//! - a thin [`client::FirestoreClient`] over the REST surface
//! - the typed field-value mapping in [`value`]
//! - repositories for habits, completions and delivery tokens
//! - normalization of legacy-shaped habit documents into the canonical
//!   domain model at the boundary
//! - adapters implementing the store traits from `habitly_common`
//!
//! Authentication uses a service account key file; without one the client
//! runs unauthenticated, which suits the Firestore emulator and the mock
//! server used in tests.

pub mod auth;
pub mod client;
pub mod completions;
pub mod habits;
#[cfg(test)]
mod habits_test;
pub mod service;
pub mod tokens;
pub mod value;

pub use client::{FirestoreClient, FirestoreError};
pub use service::{FirestoreHabitStore, FirestoreTokenStore};
