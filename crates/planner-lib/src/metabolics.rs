//! Pure metabolic calculations
//!
//! BMI, Mifflin-St Jeor BMR, TDEE, goal-based calorie windows and macro
//! targets. Every function is side-effect free and expects validated
//! numeric inputs; integer outputs are truncated, never rounded.

use crate::categories::{ActivityLevel, Goal};
use crate::error::PlanError;
use crate::models::{CalorieRange, MacroTargets, MetabolicProfile, Profile};

/// Safety floor for calorie targets, in kcal.
pub const CALORIE_FLOOR: i64 = 900;

/// Body mass index from weight in kilograms and height in centimeters.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Round to two decimals for presentation. BMI is rounded once at
/// computation time and the rounded value feeds every downstream use.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mifflin-St Jeor basal metabolic rate. The literal "Male" selects the
/// male constant; any other gender string takes the female equation.
pub fn bmr(gender: &str, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    if gender == "Male" {
        base + 5.0
    } else {
        base - 161.0
    }
}

/// Total daily energy expenditure.
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.factor()
}

/// Goal-dependent calorie window, truncated to whole kcal. Both ends are
/// clamped to [`CALORIE_FLOOR`] no matter how extreme the inputs are.
pub fn calorie_range(tdee: f64, goal: Goal) -> CalorieRange {
    let (low, high) = match goal {
        Goal::LoseWeight => (tdee - 600.0, tdee - 300.0),
        Goal::GainWeight => (tdee + 250.0, tdee + 500.0),
        Goal::Maintain => (tdee - 100.0, tdee + 100.0),
    };
    CalorieRange {
        low: (low as i64).max(CALORIE_FLOOR),
        high: (high as i64).max(CALORIE_FLOOR),
    }
}

/// Macro ratio triple (protein, carbs, fat). Each triple sums to 1.0.
pub fn macro_split(goal: Goal) -> (f64, f64, f64) {
    match goal {
        Goal::LoseWeight => (0.30, 0.40, 0.30),
        Goal::GainWeight => (0.25, 0.50, 0.25),
        Goal::Maintain => (0.25, 0.45, 0.30),
    }
}

/// Gram targets from average daily calories: protein and carbs at
/// 4 kcal/g, fat at 9 kcal/g, truncated to whole grams.
pub fn macro_grams(avg_calories: f64, split: (f64, f64, f64)) -> MacroTargets {
    let (protein, carbs, fats) = split;
    MacroTargets {
        protein_g: (avg_calories * protein / 4.0) as i64,
        carbs_g: (avg_calories * carbs / 4.0) as i64,
        fats_g: (avg_calories * fats / 9.0) as i64,
    }
}

/// Compute the full metabolic picture for a profile. `bmi_value` is the
/// rounded BMI shared with the rest of the plan. Non-finite intermediate
/// results are rejected rather than leaking NaN into calorie math.
pub fn compute_metabolics(
    profile: &Profile,
    bmi_value: f64,
) -> Result<MetabolicProfile, PlanError> {
    let activity = ActivityLevel::classify(&profile.activity);
    let goal = Goal::classify(&profile.goal);

    let bmr_value = bmr(&profile.gender, profile.weight_kg, profile.height_cm, profile.age);
    let tdee_value = tdee(bmr_value, activity);
    if !bmr_value.is_finite() || !tdee_value.is_finite() {
        return Err(PlanError::Computation(format!(
            "non-finite BMR {bmr_value} or TDEE {tdee_value}"
        )));
    }

    let calories = calorie_range(tdee_value, goal);
    let avg_calories = (calories.low + calories.high) as f64 / 2.0;
    let macros_g = macro_grams(avg_calories, macro_split(goal));

    Ok(MetabolicProfile {
        bmi: bmi_value,
        bmr: bmr_value,
        tdee: tdee_value,
        calorie_range: calories,
        macros_g,
    })
}
