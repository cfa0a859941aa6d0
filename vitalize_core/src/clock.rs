//! Time source abstraction.
//!
//! The record store never reads the wall clock directly; it asks an
//! injected `Clock`. Tests drive TTL expiry by stepping a `FixedClock`
//! instead of sleeping.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of "now" for anything with time-based behavior
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually stepped clock for deterministic tests
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Move the clock forward by the given number of seconds
    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.lock();
        *now += Duration::seconds(secs);
    }

    // The guarded value is a plain timestamp; recover a poisoned lock.
    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        self.now
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}
