// --- File: crates/habitly_fcm/src/lib.rs ---

//! Push delivery over Firebase Cloud Messaging.
//!
//! Wraps the FCM HTTP v1 API behind the [`habitly_common::services::PushSender`]
//! trait. Authentication uses the same service-account flow as the Firestore
//! client, with the messaging OAuth scope.

pub mod auth;
pub mod client;
pub mod service;

pub use client::{FcmClient, FcmError, DEFAULT_CHANNEL_ID};
pub use service::FcmPushSender;
