//! Field-level validation of user-supplied attributes

use thiserror::Error;

use super::city::normalize_city;
use super::derive::bmi;
use crate::types::{Occupation, PredictRequest, UserInput};

/// Oldest accepted age (inclusive).
pub const MAX_AGE: i64 = 120;

/// Exclusive upper bound on height. Anything taller is almost certainly
/// centimeters sent where meters are expected.
pub const MAX_HEIGHT_M: f64 = 2.5;

/// A raw field violated its constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: {value} violates constraint {constraint}")]
    OutOfRange {
        field: &'static str,
        value: String,
        constraint: &'static str,
    },

    #[error("{field}: value must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error(
        "occupation: '{0}' is not one of retired, freelancer, student, government_job, \
         business_owner, unemployed, private_job"
    )]
    UnknownOccupation(String),
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::Empty { field } => field,
            ValidationError::UnknownOccupation(_) => "occupation",
        }
    }
}

/// Check every field of `request` and build a [`UserInput`].
///
/// Fields are checked in declaration order and the first violation is
/// returned. The city is trimmed and title-cased before it is stored.
pub fn validate(request: &PredictRequest) -> Result<UserInput, ValidationError> {
    let age = u8::try_from(request.age)
        .ok()
        .filter(|a| i64::from(*a) <= MAX_AGE)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "age",
            value: request.age.to_string(),
            constraint: "0 <= age <= 120",
        })?;

    let weight = finite("weight", request.weight)?;
    if weight < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "weight",
            value: weight.to_string(),
            constraint: "weight >= 0",
        });
    }

    // Zero height is rejected: BMI would be undefined. So is any height
    // whose square underflows to zero or a subnormal.
    let height = finite("height", request.height)?;
    if height <= 0.0 || height >= MAX_HEIGHT_M || !(height * height).is_normal() {
        return Err(ValidationError::OutOfRange {
            field: "height",
            value: height.to_string(),
            constraint: "0 < height < 2.5 (meters)",
        });
    }
    if !bmi(weight, height).is_finite() {
        return Err(ValidationError::OutOfRange {
            field: "weight",
            value: weight.to_string(),
            constraint: "weight / height^2 must be finite",
        });
    }

    let income_lpa = finite("income_lpa", request.income_lpa)?;
    if income_lpa < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "income_lpa",
            value: income_lpa.to_string(),
            constraint: "income_lpa >= 0",
        });
    }

    let city = normalize_city(&request.city);
    if city.is_empty() {
        return Err(ValidationError::Empty { field: "city" });
    }

    let occupation = Occupation::parse(&request.occupation)
        .ok_or_else(|| ValidationError::UnknownOccupation(request.occupation.clone()))?;

    Ok(UserInput {
        age,
        weight,
        height,
        income_lpa,
        smoker: request.smoker,
        city,
        occupation,
    })
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}
