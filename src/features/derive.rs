//! Feature derivation rules

use super::city::CityTierTable;
use crate::types::{AgeGroup, DerivedFeatures, LifestyleRisk, UserInput};

/// BMI above this (with smoking) is high risk.
const HIGH_RISK_BMI: f64 = 30.0;

/// BMI above this (or smoking) is medium risk.
const MEDIUM_RISK_BMI: f64 = 27.0;

/// Body mass index: kg / m².
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Smoking combined with BMI. The smoker-and-obese rule is checked first
/// since it overlaps the medium rule.
pub fn lifestyle_risk(smoker: bool, bmi: f64) -> LifestyleRisk {
    if smoker && bmi > HIGH_RISK_BMI {
        LifestyleRisk::High
    } else if smoker || bmi > MEDIUM_RISK_BMI {
        LifestyleRisk::Medium
    } else {
        LifestyleRisk::Low
    }
}

pub fn age_group(age: u8) -> AgeGroup {
    match age {
        0..=24 => AgeGroup::Young,
        25..=44 => AgeGroup::Adult,
        45..=59 => AgeGroup::MiddleAged,
        _ => AgeGroup::Senior,
    }
}

/// Compute every derived feature of a validated input.
pub fn derive(input: &UserInput, tiers: &CityTierTable) -> DerivedFeatures {
    let bmi = bmi(input.weight(), input.height());
    DerivedFeatures {
        bmi,
        lifestyle_risk: lifestyle_risk(input.smoker(), bmi),
        age_group: age_group(input.age()),
        city_tier: tiers.tier_of(input.city()),
        income_lpa: input.income_lpa(),
        occupation: input.occupation(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_formula() {
        assert_eq!(bmi(70.0, 1.75), 70.0 / (1.75 * 1.75));
        assert_eq!(bmi(0.0, 1.6), 0.0);
    }

    #[test]
    fn test_age_group_boundaries() {
        let cases = [
            (0, AgeGroup::Young),
            (24, AgeGroup::Young),
            (25, AgeGroup::Adult),
            (44, AgeGroup::Adult),
            (45, AgeGroup::MiddleAged),
            (59, AgeGroup::MiddleAged),
            (60, AgeGroup::Senior),
            (120, AgeGroup::Senior),
        ];
        for (age, expected) in cases {
            assert_eq!(age_group(age), expected, "age {age}");
        }
    }

    #[test]
    fn test_lifestyle_risk_priority() {
        assert_eq!(lifestyle_risk(true, 31.0), LifestyleRisk::High);
        assert_eq!(lifestyle_risk(true, 20.0), LifestyleRisk::Medium);
        assert_eq!(lifestyle_risk(false, 28.0), LifestyleRisk::Medium);
        assert_eq!(lifestyle_risk(false, 20.0), LifestyleRisk::Low);
    }

    #[test]
    fn test_lifestyle_risk_thresholds_are_strict() {
        assert_eq!(lifestyle_risk(true, 30.0), LifestyleRisk::Medium);
        assert_eq!(lifestyle_risk(false, 27.0), LifestyleRisk::Low);
        assert_eq!(lifestyle_risk(false, 31.0), LifestyleRisk::Medium);
    }
}
