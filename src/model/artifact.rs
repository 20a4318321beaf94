//! JSON model artifact: a linear model over one-hot encoded categories.
//!
//! Layout on disk:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "intercept": 4500.0,
//!   "numeric": { "bmi": 120.0, "income_lpa": -15.0 },
//!   "categorical": {
//!     "lifestyle_risk": { "low": 0.0, "medium": 2500.0, "high": 7000.0 },
//!     "city_tier": { "1": 1500.0, "2": 800.0, "3": 0.0 }
//!   },
//!   "floor": 1000.0
//! }
//! ```
//!
//! `premium = intercept + Σ numeric weight × value + Σ weight of the row's
//! level`, clamped below at `floor` when present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{PredictionError, PremiumModel};
use crate::types::{FeatureRow, FEATURE_NAMES};

/// Features an artifact is allowed to reference.
pub const ARTIFACT_FEATURES: [&str; 6] = FEATURE_NAMES;

/// Failure to load a model artifact. Fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact I/O error ({0}): {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("model artifact parse error ({0}): {1}")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("invalid model artifact: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Linear premium model with one-hot categorical terms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LinearArtifact {
    pub version: String,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
    /// Minimum premium returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<f64>,
}

impl LinearArtifact {
    /// Load and validate an artifact from disk.
    pub fn load_from_disk(path: &Path) -> Result<Self, ArtifactError> {
        let data = std::fs::read(path).map_err(|e| ArtifactError::Io(path.to_path_buf(), e))?;
        let artifact: Self = serde_json::from_slice(&data)
            .map_err(|e| ArtifactError::Parse(path.to_path_buf(), e))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Structural checks. Collects every problem instead of stopping at the first.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let mut errors = Vec::new();

        if self.version.trim().is_empty() {
            errors.push("version must not be empty".to_string());
        }
        if !self.intercept.is_finite() {
            errors.push("intercept must be finite".to_string());
        }
        if let Some(floor) = self.floor {
            if !floor.is_finite() {
                errors.push("floor must be finite".to_string());
            }
        }

        for (name, weight) in &self.numeric {
            if !ARTIFACT_FEATURES.contains(&name.as_str()) {
                errors.push(format!("numeric feature '{name}' is not a model input"));
            }
            if !weight.is_finite() {
                errors.push(format!("numeric weight for '{name}' must be finite"));
            }
            if self.categorical.contains_key(name) {
                errors.push(format!("feature '{name}' is both numeric and categorical"));
            }
        }

        for (name, levels) in &self.categorical {
            if !ARTIFACT_FEATURES.contains(&name.as_str()) {
                errors.push(format!("categorical feature '{name}' is not a model input"));
            }
            if levels.is_empty() {
                errors.push(format!("categorical feature '{name}' has no levels"));
            }
            for (level, weight) in levels {
                if !weight.is_finite() {
                    errors.push(format!("weight for '{name}={level}' must be finite"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ArtifactError::Invalid(errors))
        }
    }

    fn score(&self, index: usize, row: &FeatureRow) -> Result<f64, PredictionError> {
        let mut total = self.intercept;

        for (name, weight) in &self.numeric {
            let value = row.numeric(name).ok_or_else(|| PredictionError::SchemaMismatch {
                row: index,
                feature: name.clone(),
                reason: "expected a numeric value".to_string(),
            })?;
            total += weight * value;
        }

        for (name, levels) in &self.categorical {
            let level = row.category(name).ok_or_else(|| PredictionError::SchemaMismatch {
                row: index,
                feature: name.clone(),
                reason: "expected a categorical value".to_string(),
            })?;
            let weight = levels.get(level).ok_or_else(|| PredictionError::UnknownCategory {
                row: index,
                feature: name.clone(),
                level: level.to_string(),
            })?;
            total += weight;
        }

        // Checked before the floor: f64::max(NaN, floor) would hide a NaN.
        if !total.is_finite() {
            return Err(PredictionError::NonFinite { row: index });
        }

        Ok(self.floor.map_or(total, |floor| total.max(floor)))
    }
}

impl PremiumModel for LinearArtifact {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PredictionError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.score(i, row))
            .collect()
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgeGroup, CityTier, LifestyleRisk, Occupation};

    fn artifact() -> LinearArtifact {
        serde_json::from_str(
            r#"{
                "version": "test-1",
                "intercept": 1000.0,
                "numeric": { "bmi": 10.0, "income_lpa": 2.0 },
                "categorical": {
                    "lifestyle_risk": { "low": 0.0, "medium": 100.0, "high": 300.0 },
                    "city_tier": { "1": 50.0, "2": 20.0, "3": 0.0 }
                }
            }"#,
        )
        .unwrap()
    }

    fn row() -> FeatureRow {
        FeatureRow {
            bmi: 20.0,
            age_group: AgeGroup::Adult,
            lifestyle_risk: LifestyleRisk::Medium,
            city_tier: CityTier::Tier1,
            income_lpa: 10.0,
            occupation: Occupation::Student,
        }
    }

    #[test]
    fn test_linear_prediction() {
        let out = artifact().predict(&[row()]).unwrap();
        // 1000 + 200 + 20 + 100 + 50
        assert_eq!(out, vec![1370.0]);
    }

    #[test]
    fn test_predictions_keep_row_order() {
        let mut second = row();
        second.lifestyle_risk = LifestyleRisk::High;
        let out = artifact().predict(&[row(), second]).unwrap();
        assert_eq!(out, vec![1370.0, 1570.0]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(artifact().predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let mut a = artifact();
        a.categorical
            .get_mut("city_tier")
            .unwrap()
            .remove("3");
        let mut r = row();
        r.city_tier = CityTier::Tier3;

        let err = a.predict(&[row(), r]).unwrap_err();
        assert_eq!(
            err,
            PredictionError::UnknownCategory {
                row: 1,
                feature: "city_tier".to_string(),
                level: "3".to_string(),
            }
        );
    }

    #[test]
    fn test_categorical_feature_used_as_numeric_is_mismatch() {
        let mut a = artifact();
        a.numeric.insert("occupation".to_string(), 1.0);
        let err = a.predict(&[row()]).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { ref feature, .. } if feature == "occupation"));
    }

    #[test]
    fn test_floor_clamps() {
        let mut a = artifact();
        a.intercept = -5000.0;
        a.floor = Some(500.0);
        assert_eq!(a.predict(&[row()]).unwrap(), vec![500.0]);
    }

    #[test]
    fn test_nan_row_is_not_hidden_by_floor() {
        let mut a = artifact();
        a.floor = Some(500.0);
        let mut r = row();
        r.bmi = f64::NAN;
        assert_eq!(a.predict(&[r]).unwrap_err(), PredictionError::NonFinite { row: 0 });
    }

    #[test]
    fn test_infinite_row_is_non_finite() {
        let mut r = row();
        r.income_lpa = f64::INFINITY;
        assert_eq!(artifact().predict(&[row(), r]).unwrap_err(), PredictionError::NonFinite { row: 1 });
    }

    #[test]
    fn test_validate_collects_problems() {
        let mut a = artifact();
        a.version = " ".to_string();
        a.numeric.insert("height".to_string(), 1.0);
        a.categorical.insert("bmi".to_string(), BTreeMap::new());

        let Err(ArtifactError::Invalid(errors)) = a.validate() else {
            panic!("expected validation errors");
        };
        assert!(errors.iter().any(|e| e.contains("version")));
        assert!(errors.iter().any(|e| e.contains("'height' is not a model input")));
        assert!(errors.iter().any(|e| e.contains("both numeric and categorical")));
        assert!(errors.iter().any(|e| e.contains("has no levels")));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, serde_json::to_vec(&artifact()).unwrap()).unwrap();

        let loaded = LinearArtifact::load_from_disk(&path).unwrap();
        assert_eq!(loaded, artifact());
        assert_eq!(loaded.version(), "test-1");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinearArtifact::load_from_disk(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io(..)));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            LinearArtifact::load_from_disk(&path).unwrap_err(),
            ArtifactError::Parse(..)
        ));
    }

    #[test]
    fn test_shipped_artifact_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/premium_model.json");
        let loaded = LinearArtifact::load_from_disk(&path).unwrap();
        assert!(!loaded.version.is_empty());
    }
}
