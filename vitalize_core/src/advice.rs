//! Per-category advice table.
//!
//! Static configuration mapping each BMI category to its advisory tip
//! and display accent.

use crate::types::BmiCategory;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Advisory tip and display accent for a BMI category
#[derive(Clone, Copy, Debug)]
pub struct CategoryProfile {
    pub tip: &'static str,
    pub accent: &'static str,
}

/// Cached advice table - built once and reused across all operations
static PROFILES: Lazy<HashMap<BmiCategory, CategoryProfile>> = Lazy::new(build_profiles);

fn build_profiles() -> HashMap<BmiCategory, CategoryProfile> {
    let mut profiles = HashMap::new();

    profiles.insert(
        BmiCategory::Underweight,
        CategoryProfile {
            tip: "Focus on a nutrient-rich diet with healthy fats and proteins to reach a balanced weight.",
            accent: "blue",
        },
    );

    profiles.insert(
        BmiCategory::Normal,
        CategoryProfile {
            tip: "Great job! Maintain your current lifestyle with balanced meals and regular activity.",
            accent: "green",
        },
    );

    profiles.insert(
        BmiCategory::Overweight,
        CategoryProfile {
            tip: "Incorporate more physical activity and monitor calorie intake for a healthier balance.",
            accent: "yellow",
        },
    );

    profiles.insert(
        BmiCategory::Obese,
        CategoryProfile {
            tip: "Consider consulting a healthcare professional for a tailored nutrition and exercise plan.",
            accent: "red",
        },
    );

    profiles
}

/// Look up the advice profile for a category
///
/// Total over the closed `BmiCategory` enum.
pub fn profile(category: BmiCategory) -> &'static CategoryProfile {
    PROFILES
        .get(&category)
        .expect("advice table covers every category")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_profile() {
        for category in [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ] {
            let p = profile(category);
            assert!(!p.tip.is_empty());
            assert!(!p.accent.is_empty());
        }
    }

    #[test]
    fn obese_tip_points_at_professional_consultation() {
        assert!(profile(BmiCategory::Obese).tip.contains("healthcare professional"));
    }
}
