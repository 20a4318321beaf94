//! Input validation and feature derivation
//!
//! Turns an untrusted [`PredictRequest`] into [`DerivedFeatures`]:
//!
//! 1. [`validate`] checks every field constraint and normalizes the city,
//!    producing a [`UserInput`] or the first [`ValidationError`].
//! 2. [`derive`] computes BMI, lifestyle risk, age group and city tier.
//!
//! Both steps are pure; nothing here touches the model or shared state.

mod city;
mod derive;
mod validate;

pub use city::{normalize_city, CityTierTable};
pub use derive::{age_group, bmi, derive, lifestyle_risk};
pub use validate::{validate, ValidationError, MAX_AGE, MAX_HEIGHT_M};

use crate::types::{DerivedFeatures, PredictRequest};

/// Validate a request and derive its features in one step.
pub fn prepare(
    request: &PredictRequest,
    tiers: &CityTierTable,
) -> Result<DerivedFeatures, ValidationError> {
    let input = validate(request)?;
    Ok(derive(&input, tiers))
}
