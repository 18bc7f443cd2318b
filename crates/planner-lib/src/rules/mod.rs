//! Deterministic rule engines for exercise and meal suggestions

mod exercise;
mod meals;

pub use exercise::{exercise_plan, SlotRole, Suggestion, PLAN_SLOTS};
pub use meals::{meal_plan, MEAL_SLOTS};
