// --- File: crates/habitly_notifier/src/job.rs ---

use crate::clock::minute_stamp;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use habitly_common::models::{Habit, PushNote};
use habitly_common::services::{HabitStore, PushSender, StoreError, TokenStore};
use habitly_config::NotifierConfig;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Default notification title.
pub const DEFAULT_TITLE: &str = "습관 트래커";

/// Default body template; `{name}` is replaced with the habit's name.
pub const DEFAULT_BODY_TEMPLATE: &str = "지금 \"{name}\" 할 시간이에요!";

/// Counters for one reminder tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Habits whose alert time and recurrence matched this minute.
    pub matched: usize,
    /// Notifications accepted by the push provider.
    pub sent: usize,
    /// Matched habits skipped because the user has no delivery token.
    pub skipped: usize,
    /// Deliveries that failed for transient or unexpected reasons.
    pub failed: usize,
    /// Token records deleted because the provider reported them dead.
    pub cleaned: usize,
}

enum DeliveryOutcome {
    Sent,
    Skipped,
    Failed,
    Cleaned,
}

/// The per-minute reminder job: match due habits, fan out notifications.
pub struct NotifierJob {
    habits: Arc<dyn HabitStore>,
    tokens: Arc<dyn TokenStore>,
    push: Arc<dyn PushSender>,
    title: String,
    body_template: String,
}

impl NotifierJob {
    pub fn new(
        habits: Arc<dyn HabitStore>,
        tokens: Arc<dyn TokenStore>,
        push: Arc<dyn PushSender>,
        config: Option<&NotifierConfig>,
    ) -> Self {
        let title = config
            .and_then(|c| c.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let body_template = config
            .and_then(|c| c.body_template.clone())
            .unwrap_or_else(|| DEFAULT_BODY_TEMPLATE.to_string());
        Self {
            habits,
            tokens,
            push,
            title,
            body_template,
        }
    }

    fn note_for(&self, habit: &Habit) -> PushNote {
        PushNote {
            title: self.title.clone(),
            body: self.body_template.replace("{name}", &habit.name),
        }
    }

    /// Runs one reminder tick for the given instant.
    ///
    /// Queries habits by the minute's `HH:MM`, filters by recurrence and
    /// start date, and delivers one notification per match. Per-habit
    /// failures are contained: one bad token or provider error never
    /// affects delivery for the others.
    ///
    /// # Errors
    ///
    /// Only the initial habit query can fail the tick as a whole.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<TickSummary, StoreError> {
        let stamp = minute_stamp(now);

        let candidates = self.habits.find_by_alert_time(&stamp.time).await?;
        let due: Vec<Habit> = candidates
            .into_iter()
            .filter(|h| h.is_due_on(&stamp.date_key, stamp.weekday))
            .collect();

        let mut summary = TickSummary {
            matched: due.len(),
            ..TickSummary::default()
        };

        if due.is_empty() {
            debug!(time = %stamp.time, date = %stamp.date_key, "No habits due this minute");
            return Ok(summary);
        }

        let outcomes = join_all(due.iter().map(|habit| self.deliver(habit))).await;
        for outcome in outcomes {
            match outcome {
                DeliveryOutcome::Sent => summary.sent += 1,
                DeliveryOutcome::Skipped => summary.skipped += 1,
                DeliveryOutcome::Failed => summary.failed += 1,
                DeliveryOutcome::Cleaned => summary.cleaned += 1,
            }
        }

        info!(
            time = %stamp.time,
            date = %stamp.date_key,
            matched = summary.matched,
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            cleaned = summary.cleaned,
            "Reminder tick finished"
        );
        Ok(summary)
    }

    async fn deliver(&self, habit: &Habit) -> DeliveryOutcome {
        let token = match self.tokens.token_for_user(&habit.user_id).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!(user_id = %habit.user_id, habit_id = %habit.id, "No delivery token, skipping");
                return DeliveryOutcome::Skipped;
            }
            Err(e) => {
                error!(user_id = %habit.user_id, error = %e, "Token lookup failed");
                return DeliveryOutcome::Failed;
            }
        };

        let note = self.note_for(habit);
        match self.push.send_push(&token, &note).await {
            Ok(receipt) => {
                debug!(habit_id = %habit.id, message_id = %receipt.message_id, "Notification sent");
                DeliveryOutcome::Sent
            }
            Err(e) if e.is_unregistered() => {
                warn!(user_id = %habit.user_id, "Token no longer valid, deleting record");
                if let Err(del_err) = self.tokens.delete_token(&habit.user_id).await {
                    error!(user_id = %habit.user_id, error = %del_err, "Stale token cleanup failed");
                }
                DeliveryOutcome::Cleaned
            }
            Err(e) => {
                error!(habit_id = %habit.id, error = %e, "Notification delivery failed");
                DeliveryOutcome::Failed
            }
        }
    }
}
