#![forbid(unsafe_code)]

//! Core domain model and business logic for the Vitalize BMI system.
//!
//! This crate provides:
//! - Domain types (records, genders, BMI categories)
//! - The BMI computation and classification engine
//! - The per-category advice table
//! - The in-memory record store with time-based expiry
//! - The client-side fallback cache

pub mod types;
pub mod error;
pub mod advice;
pub mod config;
pub mod logging;
pub mod clock;
pub mod engine;
pub mod store;
pub mod cache;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use advice::{profile, CategoryProfile};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use engine::{classify, compute};
pub use store::{RecordStore, RetentionPolicy};
pub use cache::FallbackCache;
