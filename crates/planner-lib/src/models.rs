//! Core data models for the plan engine

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PlanError;

/// Required request fields, in reporting order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "gender",
    "age",
    "height_cm",
    "weight_kg",
    "activity",
    "goal",
];

/// Advisory note attached to every plan.
pub const EXERCISE_NOTE: &str = "These are guideline suggestions. Adjust intensity and consult a professional if you have medical conditions.";

/// Validated biometric profile for one request.
///
/// Categorical fields keep the caller's raw spelling; classification into
/// the lenient enums happens at each point of use, so the report renderer
/// can echo the input verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub gender: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: String,
    pub goal: String,
}

impl Profile {
    /// Build a profile from an untyped request mapping.
    ///
    /// Field presence is checked first and reported as one error naming
    /// every missing field; type coercion follows with the same
    /// all-at-once reporting.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, PlanError> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|key| !payload.contains_key(**key))
            .map(|key| (*key).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PlanError::MissingFields(missing));
        }

        let mut invalid = Vec::new();
        let gender = take_string(payload, "gender", &mut invalid);
        let age = take_age(payload, &mut invalid);
        let height_cm = take_positive(payload, "height_cm", &mut invalid);
        let weight_kg = take_positive(payload, "weight_kg", &mut invalid);
        let activity = take_string(payload, "activity", &mut invalid);
        let goal = take_string(payload, "goal", &mut invalid);
        if !invalid.is_empty() {
            return Err(PlanError::InvalidFieldTypes(invalid));
        }

        Ok(Self {
            gender,
            age,
            height_cm,
            weight_kg,
            activity,
            goal,
        })
    }
}

fn take_string(payload: &Map<String, Value>, key: &str, invalid: &mut Vec<String>) -> String {
    match coerce_string(&payload[key]) {
        Some(value) => value,
        None => {
            invalid.push(format!("{key}: expected a string or number"));
            String::new()
        }
    }
}

fn take_age(payload: &Map<String, Value>, invalid: &mut Vec<String>) -> u32 {
    match coerce_age(&payload["age"]) {
        Some(value) => value,
        None => {
            invalid.push("age: expected a non-negative integer".to_string());
            0
        }
    }
}

fn take_positive(payload: &Map<String, Value>, key: &str, invalid: &mut Vec<String>) -> f64 {
    match coerce_positive(&payload[key]) {
        Some(value) => value,
        None => {
            invalid.push(format!("{key}: expected a positive number"));
            0.0
        }
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers truncate toward zero; numeric strings must parse as integers.
fn coerce_age(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                u32::try_from(i).ok()
            } else {
                let f = n.as_f64()?;
                (f.is_finite() && f >= 0.0 && f < f64::from(u32::MAX)).then(|| f as u32)
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn coerce_positive(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// Feature vector consumed by the predictive models. Field order is the
/// trained column order; see `predictor::features`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub gender_code: f32,
    pub age: f32,
    pub height_cm: f32,
    pub weight_kg: f32,
    pub bmi: f32,
    pub activity_code: f32,
    pub goal_code: f32,
}

/// Daily calorie window in kcal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieRange {
    pub low: i64,
    pub high: i64,
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

/// Truncated metabolic intermediates exposed for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetabolics {
    pub bmr: i64,
    pub tdee: i64,
}

/// Derived metabolic numbers for one request, computed once and never
/// mutated.
#[derive(Debug, Clone)]
pub struct MetabolicProfile {
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_range: CalorieRange,
    pub macros_g: MacroTargets,
}

/// Final plan aggregate returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub bmi: f64,
    pub diet_style: String,
    pub calorie_range: CalorieRange,
    pub macros_g: MacroTargets,
    pub meal_suggestions: Vec<String>,
    pub exercise_suggestions: Vec<String>,
    pub exercise_note: String,
    pub raw: RawMetabolics,
}
