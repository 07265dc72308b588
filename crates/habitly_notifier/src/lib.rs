// --- File: crates/habitly_notifier/src/lib.rs ---

//! Scheduled habit reminders.
//!
//! Once per minute the [`job::NotifierJob`] asks the habit store for every
//! habit whose alert time equals the current `HH:MM` in the reference zone,
//! filters them by recurrence and start date, and pushes one notification
//! per match through the configured [`habitly_common::services::PushSender`].
//! Tokens the provider reports as dead are deleted on the spot.

pub mod clock;
pub mod job;
pub mod scheduler;

pub use clock::{minute_stamp, MinuteStamp, REFERENCE_ZONE};
pub use job::{NotifierJob, TickSummary, DEFAULT_BODY_TEMPLATE, DEFAULT_TITLE};
pub use scheduler::spawn_minutely;

#[cfg(test)]
mod clock_test;
#[cfg(test)]
mod job_test;
