//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime};
use venue_events::api::EventPayload;
use venue_events::models::{EventDraft, TimeWindow};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Access to the process environment is serialized across tests, and the
/// previous values are restored even if `f` panics.
///
/// Each `(key, Some(v))` sets a variable; `(key, None)` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    previous: HashMap<String, Option<String>>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let previous = changes
            .iter()
            .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            set_or_remove(k, *v);
        }

        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (k, v) in self.previous.drain() {
            set_or_remove(&k, v.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(val) => std::env::set_var(key, val),
        None => std::env::remove_var(key),
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

/// Draft named `name` at `location` on `day` from `start` to `end`.
pub fn draft(name: &str, location: &str, day: &str, start: &str, end: &str) -> EventDraft {
    EventDraft::new(
        name,
        TimeWindow::new(location, date(day), time(start), time(end)),
        None,
    )
}

/// Complete create/update body.
pub fn payload(name: &str, location: &str, day: &str, start: &str, end: &str) -> EventPayload {
    EventPayload {
        name: Some(name.to_string()),
        date: Some(day.to_string()),
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        location: Some(location.to_string()),
        description: None,
    }
}
