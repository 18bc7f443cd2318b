//! Feature extraction for model inference
//!
//! Builds the feature row both models were trained on:
//! [gender, age, height, weight, bmi, activity, goal].

use crate::categories::{gender_code, ActivityLevel, Goal};
use crate::models::{FeatureVector, Profile};

/// Convert a validated profile into the model input row. `bmi` must be
/// the rounded value used everywhere else in the plan, the models were
/// trained on the rounded figure.
pub fn extract_features(profile: &Profile, bmi: f64) -> FeatureVector {
    FeatureVector {
        gender_code: gender_code(&profile.gender),
        age: profile.age as f32,
        height_cm: profile.height_cm as f32,
        weight_kg: profile.weight_kg as f32,
        bmi: bmi as f32,
        activity_code: ActivityLevel::classify(&profile.activity).code(),
        goal_code: Goal::classify(&profile.goal).code(),
    }
}
