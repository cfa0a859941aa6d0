//! Server transport and fallback handling.
//!
//! Every server call goes through a short uniform timeout; any failure
//! (connect error, timeout, non-success status, garbled body) is treated
//! identically as "server unavailable". Submissions then land in the
//! local fallback cache, and history reads fall back to it. Nothing is
//! retried, and transport trouble is never a hard failure for the user.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;
use vitalize_core::{BmiCategory, BmiRecord, Error, FallbackCache, Gender, Result};

/// A record as the client submits it over the wire
///
/// Carries the locally computed `bmi`/`category` alongside the raw
/// inputs, matching the public POST body; the server re-derives both.
#[derive(Clone, Debug, Serialize)]
pub struct Submission {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub category: BmiCategory,
}

impl Submission {
    /// Materialize a cache record for this submission
    ///
    /// Mirrors what the server would have stored: a fresh id and the
    /// current time as `created_at`.
    fn into_record(self) -> BmiRecord {
        BmiRecord {
            id: Uuid::new_v4(),
            name: self.name,
            age: Some(self.age),
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: self.bmi,
            category: self.category,
            created_at: Utc::now(),
        }
    }
}

/// Where a submission ended up
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The server accepted the record and assigned this id
    Server { id: Uuid },
    /// The server was unreachable; the record went to the local cache
    LocalFallback { cached: usize },
}

/// Which source served a history read
#[derive(Debug)]
pub enum History {
    Server(Vec<BmiRecord>),
    Local(Vec<BmiRecord>),
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    id: Uuid,
}

/// HTTP client for the Vitalize server
pub struct ServerClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ServerClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let timeout = Duration::from_millis(timeout_ms.max(100));
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    /// Submit a record, returning the server-assigned id
    fn submit(&self, submission: &Submission) -> Result<Uuid> {
        let response = self
            .agent
            .post(&format!("{}/bmi", self.base_url))
            .send_json(submission)
            .map_err(unavailable)?;
        let body: SaveResponse = response
            .into_json()
            .map_err(|e| Error::Transport(format!("invalid server response: {e}")))?;
        Ok(body.id)
    }

    /// Fetch the server's recent records, most-recent-first
    fn fetch_recent(&self) -> Result<Vec<BmiRecord>> {
        let response = self
            .agent
            .get(&format!("{}/bmi", self.base_url))
            .call()
            .map_err(unavailable)?;
        response
            .into_json()
            .map_err(|e| Error::Transport(format!("invalid server response: {e}")))
    }
}

fn unavailable(err: ureq::Error) -> Error {
    // Status and transport errors collapse into one bucket on purpose:
    // no partial-success state is defined.
    Error::Transport(format!("server unavailable: {err}"))
}

/// Submit to the server, absorbing transport failure into the cache
pub fn submit_or_cache(
    client: &ServerClient,
    cache: &FallbackCache,
    submission: Submission,
) -> Result<SubmitOutcome> {
    match client.submit(&submission) {
        Ok(id) => Ok(SubmitOutcome::Server { id }),
        Err(Error::Transport(reason)) => {
            tracing::warn!("{reason}; caching record locally");
            let cached = cache.push(submission.into_record())?;
            Ok(SubmitOutcome::LocalFallback {
                cached: cached.len(),
            })
        }
        Err(other) => Err(other),
    }
}

/// Read history from the server, falling back to the local cache
///
/// Server data wins whenever a response succeeds; the two sources are
/// never merged.
pub fn fetch_history(client: &ServerClient, cache: &FallbackCache) -> Result<History> {
    match client.fetch_recent() {
        Ok(records) => Ok(History::Server(records)),
        Err(Error::Transport(reason)) => {
            tracing::warn!("{reason}; reading local history");
            Ok(History::Local(cache.load()?))
        }
        Err(other) => Err(other),
    }
}
