//! Core domain types for the Vitalize BMI system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Gender and BMI category enumerations
//! - Stored measurement records
//! - Submission inputs and engine results
//!
//! Wire spellings (capitalized variant names, `created_at` RFC 3339
//! timestamps) match the public JSON surface exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported gender of the person behind a measurement
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

/// BMI classification band
///
/// Closed enumeration: invalid categories are unrepresentable, and a
/// record's category is always derived from its own BMI value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::Normal => write!(f, "Normal"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// A stored measurement event
///
/// Created exactly once at submission time, immutable thereafter, and
/// destroyed either by TTL expiry (server) or capacity trimming (client
/// fallback cache).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BmiRecord {
    pub id: Uuid,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Gender,
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Derived BMI value, rounded to 2 decimal places
    pub bmi: f64,
    /// Always equals `classify` of the BMI this record was derived from
    pub category: BmiCategory,
    /// Insertion timestamp; origin of the TTL clock
    pub created_at: DateTime<Utc>,
}

/// A submission as it arrives over the wire
///
/// All fields are optional at this layer; `RecordStore::add` enforces
/// the presence of `name`, `height` and `weight`. Submissions may also
/// carry `bmi`/`category` fields (the original client sent them) — both
/// are ignored and re-derived server-side so that a record can never
/// hold a category inconsistent with its own BMI.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Ideal weight range for a given height, in kilograms
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

/// Outcome of a BMI computation
#[derive(Clone, Debug, Serialize)]
pub struct BmiResult {
    /// BMI rounded to 2 decimal places for display
    pub value: f64,
    pub category: BmiCategory,
    /// Advisory tip for the category
    pub tip: &'static str,
    /// Display accent for the category
    pub accent: &'static str,
    /// Ideal weight range, rounded to 1 decimal place
    pub ideal_range: IdealRange,
}
