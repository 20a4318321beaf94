//! Raw and validated user attributes

use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Payload
// ============================================================================

/// Body of `POST /predict` as it arrives on the wire.
///
/// Types are enforced by the JSON extractor; ranges and the occupation
/// vocabulary are enforced by [`crate::features::validate`]. `age` is signed
/// and `occupation` is a free string so those violations reach the validator
/// and are reported against the right field. Unknown JSON fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    /// Age in years
    pub age: i64,
    /// Weight in kg
    pub weight: f64,
    /// Height in meters
    pub height: f64,
    /// Income in lakhs per annum
    pub income_lpa: f64,
    pub smoker: bool,
    pub city: String,
    pub occupation: String,
}

// ============================================================================
// Occupation
// ============================================================================

/// Occupation vocabulary the premium model was fit on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    pub const ALL: [Occupation; 7] = [
        Occupation::Retired,
        Occupation::Freelancer,
        Occupation::Student,
        Occupation::GovernmentJob,
        Occupation::BusinessOwner,
        Occupation::Unemployed,
        Occupation::PrivateJob,
    ];

    /// Wire/model encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Retired => "retired",
            Occupation::Freelancer => "freelancer",
            Occupation::Student => "student",
            Occupation::GovernmentJob => "government_job",
            Occupation::BusinessOwner => "business_owner",
            Occupation::Unemployed => "unemployed",
            Occupation::PrivateJob => "private_job",
        }
    }

    /// Exact, case-sensitive match against the wire encoding.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == value)
    }
}

impl std::fmt::Display for Occupation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Validated Input
// ============================================================================

/// User attributes that passed every field constraint.
///
/// Only constructed by [`crate::features::validate`]; fields are read-only
/// afterwards. `city` is already normalized to title case.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserInput {
    pub(crate) age: u8,
    pub(crate) weight: f64,
    pub(crate) height: f64,
    pub(crate) income_lpa: f64,
    pub(crate) smoker: bool,
    pub(crate) city: String,
    pub(crate) occupation: Occupation,
}

impl UserInput {
    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn income_lpa(&self) -> f64 {
        self.income_lpa
    }

    pub fn smoker(&self) -> bool {
        self.smoker
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn occupation(&self) -> Occupation {
        self.occupation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupation_parse_is_exact() {
        assert_eq!(Occupation::parse("private_job"), Some(Occupation::PrivateJob));
        assert_eq!(Occupation::parse("Private_Job"), None);
        assert_eq!(Occupation::parse("ceo"), None);
    }

    #[test]
    fn test_occupation_serde_matches_as_str() {
        for occ in Occupation::ALL {
            let json = serde_json::to_string(&occ).unwrap();
            assert_eq!(json, format!("\"{}\"", occ.as_str()));
        }
    }

    #[test]
    fn test_predict_request_ignores_unknown_fields() {
        let body = r#"{"age":30,"weight":70.0,"height":1.7,"income_lpa":5.0,
            "smoker":false,"city":"Pune","occupation":"student","extra":1}"#;
        let req: PredictRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.age, 30);
        assert_eq!(req.occupation, "student");
    }

    #[test]
    fn test_predict_request_accepts_integer_floats() {
        let body = r#"{"age":30,"weight":70,"height":2,"income_lpa":5,
            "smoker":true,"city":"Pune","occupation":"student"}"#;
        let req: PredictRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.weight, 70.0);
        assert!(req.smoker);
    }
}
