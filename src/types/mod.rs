//! Shared data structures for premium prediction
//!
//! This module defines the request-to-prediction data flow:
//! - `PredictRequest`: untrusted wire payload of `POST /predict`
//! - `UserInput`: validated user attributes (only built by the validator)
//! - `DerivedFeatures`: categorical features computed from `UserInput`
//! - `FeatureRow`: the six-field row handed to the prediction gateway

mod input;
mod features;

pub use input::*;
pub use features::*;
