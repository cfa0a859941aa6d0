//! BMI computation and classification engine.
//!
//! Pure functions: no state, no I/O, deterministic, safe to call
//! concurrently without synchronization.

use crate::advice;
use crate::types::{BmiCategory, BmiResult, IdealRange};
use crate::{Error, Result};

/// Classify a BMI value into its category band
///
/// Total on positive values. Boundaries are half-open so that no value
/// falls between bands:
/// - `bmi < 18.5` → Underweight
/// - `18.5 ≤ bmi < 25.0` → Normal
/// - `25.0 ≤ bmi < 30.0` → Overweight
/// - `bmi ≥ 30.0` → Obese
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Compute BMI, category, ideal weight range and advisory tip
///
/// `height_cm` and `weight_kg` must be positive and finite; anything
/// else is a domain error rather than an Infinity/NaN result.
/// Classification happens at full precision; the returned value is
/// rounded to 2 decimal places for display.
pub fn compute(height_cm: f64, weight_kg: f64) -> Result<BmiResult> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(Error::Computation(format!(
            "height must be a positive number of centimeters, got {height_cm}"
        )));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(Error::Computation(format!(
            "weight must be a positive number of kilograms, got {weight_kg}"
        )));
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    let category = classify(bmi);
    let profile = advice::profile(category);

    Ok(BmiResult {
        value: round2(bmi),
        category,
        tip: profile.tip,
        accent: profile.accent,
        ideal_range: IdealRange {
            min: round1(18.5 * height_m * height_m),
            max: round1(24.9 * height_m * height_m),
        },
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries_are_exact() {
        assert_eq!(classify(18.49), BmiCategory::Underweight);
        assert_eq!(classify(18.5), BmiCategory::Normal);
        assert_eq!(classify(24.9), BmiCategory::Normal);
        assert_eq!(classify(25.0), BmiCategory::Overweight);
        assert_eq!(classify(29.9), BmiCategory::Overweight);
        assert_eq!(classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn classify_is_total_between_bands() {
        // No value can fall between Normal and Overweight or between
        // Overweight and Obese.
        assert_eq!(classify(24.95), BmiCategory::Normal);
        assert_eq!(classify(29.95), BmiCategory::Overweight);
    }

    #[test]
    fn compute_reference_case() {
        let result = compute(170.0, 65.0).unwrap();
        assert_eq!(result.value, 22.49);
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(result.ideal_range, IdealRange { min: 53.5, max: 72.0 });
        assert!(result.tip.contains("Maintain"));
        assert_eq!(result.accent, "green");
    }

    #[test]
    fn compute_is_deterministic() {
        let a = compute(182.5, 77.3).unwrap();
        let b = compute(182.5, 77.3).unwrap();
        assert_eq!(a.value, b.value);
        assert_eq!(a.category, b.category);
        assert_eq!(a.ideal_range, b.ideal_range);
    }

    #[test]
    fn compute_rejects_non_positive_inputs() {
        assert!(matches!(compute(0.0, 65.0), Err(Error::Computation(_))));
        assert!(matches!(compute(170.0, 0.0), Err(Error::Computation(_))));
        assert!(matches!(compute(-170.0, 65.0), Err(Error::Computation(_))));
    }

    #[test]
    fn compute_rejects_non_finite_inputs() {
        assert!(matches!(compute(f64::NAN, 65.0), Err(Error::Computation(_))));
        assert!(matches!(
            compute(170.0, f64::INFINITY),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn compute_extremes_stay_in_band() {
        assert_eq!(compute(250.0, 10.0).unwrap().category, BmiCategory::Underweight);
        assert_eq!(compute(50.0, 300.0).unwrap().category, BmiCategory::Obese);
    }
}
