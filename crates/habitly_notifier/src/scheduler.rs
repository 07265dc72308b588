// --- File: crates/habitly_notifier/src/scheduler.rs ---

use crate::job::NotifierJob;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use habitly_common::logging::log_error;
use tokio::task::JoinHandle;
use tracing::info;

/// Spawns the background task that runs the reminder job once per minute.
///
/// Each iteration sleeps until the next minute boundary before running, so
/// ticks land near `:00` seconds and each wall-clock minute is evaluated
/// once. The task runs until the process exits.
pub fn spawn_minutely(job: Arc<NotifierJob>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Reminder scheduler started");
        loop {
            tokio::time::sleep(until_next_minute()).await;
            let now = Utc::now();
            if let Err(e) = job.run_once(now).await {
                // Next minute gets a fresh attempt.
                log_error(e, "Reminder tick failed");
            }
        }
    })
}

fn until_next_minute() -> Duration {
    let millis_into_minute = Utc::now().timestamp_millis().rem_euclid(60_000) as u64;
    Duration::from_millis(60_000 - millis_into_minute)
}
