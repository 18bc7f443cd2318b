//! Plain-text report rendering
//!
//! Produces the downloadable report: the submitted profile echoed back,
//! followed by the computed plan. Line layout is part of the public
//! contract, clients diff these reports.

use crate::models::{Plan, Profile};

/// Download filename for the rendered report
pub const REPORT_FILENAME: &str = "diet_exercise_report.txt";

/// Render the plan report as newline-joined text
pub fn render_report(profile: &Profile, plan: &Plan) -> String {
    let mut lines = Vec::new();
    lines.push("SMART DIET & EXERCISE PLAN".to_string());
    lines.push("--------------------------".to_string());
    lines.push(format!("Gender: {}", profile.gender));
    lines.push(format!("Age: {}", profile.age));
    lines.push(format!("Height: {} cm", profile.height_cm));
    lines.push(format!("Weight: {} kg", profile.weight_kg));
    lines.push(format!("BMI: {}", plan.bmi));
    lines.push(format!("Suggested diet style: {}", plan.diet_style));
    lines.push(format!(
        "Calorie range: {} - {} kcal",
        plan.calorie_range.low, plan.calorie_range.high
    ));
    lines.push(String::new());
    lines.push("Meal suggestions:".to_string());
    for meal in &plan.meal_suggestions {
        lines.push(format!("- {meal}"));
    }
    lines.push(String::new());
    lines.push("Exercise suggestions:".to_string());
    for exercise in &plan.exercise_suggestions {
        lines.push(format!("- {exercise}"));
    }
    lines.join("\n")
}
