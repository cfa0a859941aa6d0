//! In-memory record store with time-based expiry.
//!
//! Records live in an insertion-ordered collection (most-recent-first)
//! guarded by a single mutex; writers, readers and the periodic sweep
//! all serialize on it. The store holds records in volatile memory only
//! and reads time exclusively through its injected [`Clock`].

use crate::clock::Clock;
use crate::engine;
use crate::types::{BmiRecord, RecordInput};
use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Retention constants for stored records
///
/// These are fixed behavior, not user configuration; `Default` encodes
/// the reference values. Tests construct shorter policies to exercise
/// expiry deterministically.
#[derive(Clone, Debug)]
pub struct RetentionPolicy {
    /// Maximum record age before eviction
    pub ttl: Duration,
    /// Cadence of the background expiry sweep
    pub sweep_interval: std::time::Duration,
    /// Maximum records returned by a single list call
    pub max_records: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(1),
            sweep_interval: std::time::Duration::from_secs(60),
            max_records: 10,
        }
    }
}

/// Append-only, insertion-ordered store of submitted records
pub struct RecordStore {
    records: Mutex<Vec<BmiRecord>>,
    policy: RetentionPolicy,
    clock: Arc<dyn Clock>,
}

impl RecordStore {
    /// Create a store with the reference retention policy
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(clock, RetentionPolicy::default())
    }

    pub fn with_policy(clock: Arc<dyn Clock>, policy: RetentionPolicy) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Validate a submission, derive its BMI and category, and store it
    ///
    /// `name`, `height` and `weight` are mandatory; a submission missing
    /// any of them is rejected without mutating the store. The BMI and
    /// category are always re-derived from height and weight, so a stored
    /// category can never disagree with the value it came from. Returns
    /// the stored record with its assigned id and timestamp.
    pub fn add(&self, input: RecordInput) -> Result<BmiRecord> {
        let mut missing = Vec::new();
        let name = match input.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => {
                missing.push("name");
                None
            }
        };
        if input.height.is_none() {
            missing.push("height");
        }
        if input.weight.is_none() {
            missing.push("weight");
        }
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        // All three checked above
        let name = name.unwrap_or_default();
        let height = input.height.unwrap_or_default();
        let weight = input.weight.unwrap_or_default();

        let result = engine::compute(height, weight)?;

        let record = BmiRecord {
            id: Uuid::new_v4(),
            name,
            age: input.age,
            gender: input.gender.unwrap_or_default(),
            height,
            weight,
            bmi: result.value,
            category: result.category,
            created_at: self.clock.now(),
        };

        let mut records = self.lock();
        records.insert(0, record.clone());
        tracing::debug!("stored record {} ({} total)", record.id, records.len());

        Ok(record)
    }

    /// List live records, most-recent-first
    ///
    /// Returns only records younger than the TTL, truncated to
    /// `min(limit, max_records)` (default `max_records`). Read-only:
    /// expired records are skipped here but only physically removed by
    /// [`RecordStore::sweep`].
    pub fn list(&self, limit: Option<usize>) -> Vec<BmiRecord> {
        let now = self.clock.now();
        let cap = limit
            .unwrap_or(self.policy.max_records)
            .min(self.policy.max_records);

        let records = self.lock();
        records
            .iter()
            .filter(|record| is_live(record, now, self.policy.ttl))
            .take(cap)
            .cloned()
            .collect()
    }

    /// Physically remove every expired record, returning the count
    ///
    /// Silent to callers; eviction is observable only through subsequent
    /// `list` calls. Uses the same TTL and age computation as `list`.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut records = self.lock();
        let before = records.len();
        records.retain(|record| is_live(record, now, self.policy.ttl));
        let removed = before - records.len();
        if removed > 0 {
            tracing::info!("sweep removed {} expired records", removed);
        }
        removed
    }

    // A poisoned lock only means another thread panicked mid-read; the
    // collection itself is mutated by single insert/retain calls and
    // stays consistent, so recover the guard instead of propagating.
    fn lock(&self) -> MutexGuard<'_, Vec<BmiRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Age check shared by `list` and `sweep`: live means age strictly
/// below the TTL.
fn is_live(record: &BmiRecord, now: DateTime<Utc>, ttl: Duration) -> bool {
    now.signed_duration_since(record.created_at) < ttl
}
