//! Derived categorical features and the gateway feature row

use serde::{Deserialize, Serialize};

use super::Occupation;

// ============================================================================
// Age Group
// ============================================================================

/// Age bucket. Lower bounds inclusive, upper bounds exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    /// age < 25
    #[serde(rename = "young")]
    Young,
    /// 25 <= age < 45
    #[serde(rename = "adult")]
    Adult,
    /// 45 <= age < 60
    #[serde(rename = "middle-aged")]
    MiddleAged,
    /// age >= 60
    #[serde(rename = "senior")]
    Senior,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "young",
            AgeGroup::Adult => "adult",
            AgeGroup::MiddleAged => "middle-aged",
            AgeGroup::Senior => "senior",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Lifestyle Risk
// ============================================================================

/// Three-level risk signal combining smoking status and BMI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleRisk {
    Low,
    Medium,
    High,
}

impl LifestyleRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifestyleRisk::Low => "low",
            LifestyleRisk::Medium => "medium",
            LifestyleRisk::High => "high",
        }
    }
}

impl std::fmt::Display for LifestyleRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// City Tier
// ============================================================================

/// Cost-of-living bucket assigned by static membership lists.
///
/// Serialized as the bare integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CityTier {
    Tier1,
    Tier2,
    /// Everything not listed in tier 1 or tier 2
    Tier3,
}

impl CityTier {
    pub fn as_u8(&self) -> u8 {
        match self {
            CityTier::Tier1 => 1,
            CityTier::Tier2 => 2,
            CityTier::Tier3 => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(CityTier::Tier1),
            2 => Some(CityTier::Tier2),
            3 => Some(CityTier::Tier3),
            _ => None,
        }
    }
}

impl std::fmt::Display for CityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for CityTier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for CityTier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        CityTier::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid city tier {value}, expected 1-3")))
    }
}

// ============================================================================
// Derived Features
// ============================================================================

/// Features computed once from a validated [`super::UserInput`].
///
/// Built by [`crate::features::derive`] and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DerivedFeatures {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: CityTier,
    pub income_lpa: f64,
    pub occupation: Occupation,
}

impl DerivedFeatures {
    /// The gateway row for this feature set.
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow {
            bmi: self.bmi,
            age_group: self.age_group,
            lifestyle_risk: self.lifestyle_risk,
            city_tier: self.city_tier,
            income_lpa: self.income_lpa,
            occupation: self.occupation,
        }
    }
}

// ============================================================================
// Feature Row
// ============================================================================

/// Names of the six fields a [`FeatureRow`] carries.
pub const FEATURE_NAMES: [&str; 6] = [
    "bmi",
    "age_group",
    "lifestyle_risk",
    "city_tier",
    "income_lpa",
    "occupation",
];

/// A single feature value as the model sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    /// Categorical level in the encoding the model was fit on
    Category(&'static str),
}

/// One row of model input: exactly the prediction-relevant subset of
/// [`DerivedFeatures`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRow {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: CityTier,
    pub income_lpa: f64,
    pub occupation: Occupation,
}

impl FeatureRow {
    /// Look up a field by name in model encoding.
    ///
    /// `city_tier` is numeric; [`FeatureRow::category`] exposes its
    /// categorical form.
    pub fn value(&self, name: &str) -> Option<FeatureValue> {
        match name {
            "bmi" => Some(FeatureValue::Numeric(self.bmi)),
            "income_lpa" => Some(FeatureValue::Numeric(self.income_lpa)),
            "city_tier" => Some(FeatureValue::Numeric(f64::from(self.city_tier.as_u8()))),
            "age_group" => Some(FeatureValue::Category(self.age_group.as_str())),
            "lifestyle_risk" => Some(FeatureValue::Category(self.lifestyle_risk.as_str())),
            "occupation" => Some(FeatureValue::Category(self.occupation.as_str())),
            _ => None,
        }
    }

    /// Categorical level of a field, if it has one.
    pub fn category(&self, name: &str) -> Option<&'static str> {
        match name {
            "city_tier" => Some(match self.city_tier {
                CityTier::Tier1 => "1",
                CityTier::Tier2 => "2",
                CityTier::Tier3 => "3",
            }),
            _ => match self.value(name) {
                Some(FeatureValue::Category(level)) => Some(level),
                _ => None,
            },
        }
    }

    /// Numeric value of a field, if it has one.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match self.value(name) {
            Some(FeatureValue::Numeric(v)) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> FeatureRow {
        FeatureRow {
            bmi: 22.5,
            age_group: AgeGroup::MiddleAged,
            lifestyle_risk: LifestyleRisk::Medium,
            city_tier: CityTier::Tier2,
            income_lpa: 8.0,
            occupation: Occupation::GovernmentJob,
        }
    }

    #[test]
    fn test_row_serializes_in_model_encoding() {
        let v = serde_json::to_value(row()).unwrap();
        assert_eq!(v["age_group"], "middle-aged");
        assert_eq!(v["lifestyle_risk"], "medium");
        assert_eq!(v["city_tier"], 2);
        assert_eq!(v["occupation"], "government_job");
        assert_eq!(v.as_object().unwrap().len(), FEATURE_NAMES.len());
    }

    #[test]
    fn test_city_tier_rejects_out_of_range() {
        assert!(serde_json::from_str::<CityTier>("4").is_err());
        assert_eq!(serde_json::from_str::<CityTier>("1").unwrap(), CityTier::Tier1);
    }

    #[test]
    fn test_city_tier_is_numeric_and_categorical() {
        let r = row();
        assert_eq!(r.numeric("city_tier"), Some(2.0));
        assert_eq!(r.category("city_tier"), Some("2"));
        assert_eq!(r.category("bmi"), None);
        assert_eq!(r.numeric("occupation"), None);
        assert_eq!(r.value("unknown"), None);
    }

    #[test]
    fn test_every_feature_name_resolves() {
        let r = row();
        for name in FEATURE_NAMES {
            assert!(r.value(name).is_some(), "{name} should resolve");
        }
    }
}
