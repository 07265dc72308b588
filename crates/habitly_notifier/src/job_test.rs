// --- File: crates/habitly_notifier/src/job_test.rs ---

use crate::job::{NotifierJob, DEFAULT_TITLE};
use chrono::{DateTime, TimeZone, Utc};
use habitly_common::models::{Habit, PushNote, PushReceipt, Recurrence};
use habitly_common::services::{
    BoxFuture, HabitStore, PushDeliveryError, PushSender, StoreError, TokenStore,
};
use habitly_config::NotifierConfig;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

// 2024-03-01 00:00 UTC is Friday 2024-03-01 09:00 in the reference zone.
fn friday_nine() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

fn daily_habit(id: &str, user_id: &str, name: &str) -> Habit {
    Habit {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        alert_time: Some("09:00".to_string()),
        start_date: None,
        recurrence: Recurrence::Daily,
    }
}

struct StubHabits(Vec<Habit>);

impl HabitStore for StubHabits {
    fn find_by_alert_time(&self, _alert_time: &str) -> BoxFuture<'_, Vec<Habit>, StoreError> {
        let habits = self.0.clone();
        Box::pin(async move { Ok(habits) })
    }
}

#[derive(Default)]
struct StubTokens {
    tokens: Mutex<HashMap<String, String>>,
    deleted: Mutex<Vec<String>>,
}

impl StubTokens {
    fn with(pairs: &[(&str, &str)]) -> Self {
        let stub = Self::default();
        {
            let mut tokens = stub.tokens.lock().unwrap();
            for (user, token) in pairs {
                tokens.insert(user.to_string(), token.to_string());
            }
        }
        stub
    }
}

impl TokenStore for StubTokens {
    fn token_for_user(&self, user_id: &str) -> BoxFuture<'_, Option<String>, StoreError> {
        let token = self.tokens.lock().unwrap().get(user_id).cloned();
        Box::pin(async move { Ok(token) })
    }

    fn put_token(&self, user_id: &str, token: &str) -> BoxFuture<'_, (), StoreError> {
        self.tokens
            .lock()
            .unwrap()
            .insert(user_id.to_string(), token.to_string());
        Box::pin(async move { Ok(()) })
    }

    fn delete_token(&self, user_id: &str) -> BoxFuture<'_, (), StoreError> {
        self.tokens.lock().unwrap().remove(user_id);
        self.deleted.lock().unwrap().push(user_id.to_string());
        Box::pin(async move { Ok(()) })
    }
}

#[derive(Default)]
struct StubPush {
    dead_tokens: HashSet<String>,
    sent: Mutex<Vec<(String, PushNote)>>,
}

impl StubPush {
    fn with_dead_token(token: &str) -> Self {
        let mut stub = Self::default();
        stub.dead_tokens.insert(token.to_string());
        stub
    }
}

impl PushSender for StubPush {
    fn send_push(
        &self,
        token: &str,
        note: &PushNote,
    ) -> BoxFuture<'_, PushReceipt, PushDeliveryError> {
        if self.dead_tokens.contains(token) {
            return Box::pin(async move { Err(PushDeliveryError::Unregistered) });
        }
        self.sent
            .lock()
            .unwrap()
            .push((token.to_string(), note.clone()));
        Box::pin(async move {
            Ok(PushReceipt {
                message_id: "projects/p/messages/1".to_string(),
            })
        })
    }
}

fn job(habits: Vec<Habit>, tokens: Arc<StubTokens>, push: Arc<StubPush>) -> NotifierJob {
    NotifierJob::new(Arc::new(StubHabits(habits)), tokens, push, None)
}

#[tokio::test]
async fn delivers_to_token_holders_and_skips_the_rest() {
    let tokens = Arc::new(StubTokens::with(&[("alice", "tok-alice")]));
    let push = Arc::new(StubPush::default());
    let job = job(
        vec![
            daily_habit("h1", "alice", "물 마시기"),
            daily_habit("h2", "bob", "달리기"),
        ],
        Arc::clone(&tokens),
        Arc::clone(&push),
    );

    let summary = job.run_once(friday_nine()).await.unwrap();

    assert_eq!(summary.matched, 2);
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.cleaned, 0);

    let sent = push.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "tok-alice");
    assert_eq!(sent[0].1.title, DEFAULT_TITLE);
    assert_eq!(sent[0].1.body, "지금 \"물 마시기\" 할 시간이에요!");
}

#[tokio::test]
async fn dead_token_is_deleted_without_affecting_others() {
    let tokens = Arc::new(StubTokens::with(&[
        ("alice", "tok-alice"),
        ("bob", "tok-dead"),
    ]));
    let push = Arc::new(StubPush::with_dead_token("tok-dead"));
    let job = job(
        vec![
            daily_habit("h1", "alice", "물 마시기"),
            daily_habit("h2", "bob", "달리기"),
        ],
        Arc::clone(&tokens),
        Arc::clone(&push),
    );

    let summary = job.run_once(friday_nine()).await.unwrap();

    assert_eq!(summary.sent, 1);
    assert_eq!(summary.cleaned, 1);
    assert_eq!(summary.failed, 0);

    let deleted = tokens.deleted.lock().unwrap();
    assert_eq!(deleted.as_slice(), ["bob"]);
    assert!(tokens.tokens.lock().unwrap().contains_key("alice"));
}

#[tokio::test]
async fn recurrence_filter_runs_on_the_reference_zone_day() {
    // Friday in the reference zone: the Monday-only habit and the
    // not-yet-started habit must not match.
    let mut monday_only = daily_habit("h1", "alice", "요가");
    monday_only.recurrence = Recurrence::Weekly { days: vec![1] };
    let mut not_started = daily_habit("h2", "alice", "독서");
    not_started.start_date = Some("2024-03-02".to_string());
    let friday_too = {
        let mut h = daily_habit("h3", "alice", "스트레칭");
        h.recurrence = Recurrence::Weekly { days: vec![5] };
        h
    };

    let tokens = Arc::new(StubTokens::with(&[("alice", "tok-alice")]));
    let push = Arc::new(StubPush::default());
    let job = job(
        vec![monday_only, not_started, friday_too],
        tokens,
        Arc::clone(&push),
    );

    let summary = job.run_once(friday_nine()).await.unwrap();

    assert_eq!(summary.matched, 1);
    assert_eq!(summary.sent, 1);
    let sent = push.sent.lock().unwrap();
    assert_eq!(sent[0].1.body, "지금 \"스트레칭\" 할 시간이에요!");
}

#[tokio::test]
async fn configured_strings_override_the_defaults() {
    let tokens = Arc::new(StubTokens::with(&[("alice", "tok-alice")]));
    let push = Arc::new(StubPush::default());
    let config = NotifierConfig {
        title: Some("Reminders".to_string()),
        body_template: Some("Time for {name}".to_string()),
        channel_id: None,
    };
    let push_sender: Arc<StubPush> = Arc::clone(&push);
    let job = NotifierJob::new(
        Arc::new(StubHabits(vec![daily_habit("h1", "alice", "Stretch")])),
        tokens,
        push_sender,
        Some(&config),
    );

    let summary = job.run_once(friday_nine()).await.unwrap();

    assert_eq!(summary.sent, 1);
    let sent = push.sent.lock().unwrap();
    assert_eq!(sent[0].1.title, "Reminders");
    assert_eq!(sent[0].1.body, "Time for Stretch");
}

#[tokio::test]
async fn empty_minute_sends_nothing() {
    let tokens = Arc::new(StubTokens::default());
    let push = Arc::new(StubPush::default());
    let job = job(vec![], tokens, Arc::clone(&push));

    let summary = job.run_once(friday_nine()).await.unwrap();

    assert_eq!(summary.matched, 0);
    assert!(push.sent.lock().unwrap().is_empty());
}
