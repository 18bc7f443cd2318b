//! Rule-based exercise suggestions
//!
//! Five-slot plans selected by BMI band, then reshaped by age, goal and
//! activity overlays in that order. Later overlays may overwrite or remove
//! entries from earlier ones; the precedence is part of the output
//! contract. Slots carry a role tag so overlays address content rather
//! than match substrings; the rendered strings are the stable surface.

use crate::categories::{ActivityLevel, Goal};

/// Number of suggestions in a finished plan.
pub const PLAN_SLOTS: usize = 5;

const FLEXIBILITY_DRILLS: &str = "Flexibility & balance drills daily";
const DAILY_MOBILITY: &str = "Mobility & stretching - daily 10 min";

/// Content role of a suggestion slot. Overlays target roles, not text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Strength,
    CompoundLifts,
    Core,
    Cardio,
    Hiit,
    /// The daily mobility block the high-activity overlay checks for.
    DailyMobility,
    /// Plain stretching in the overweight band. Tagged distinct from
    /// `DailyMobility` so the high-activity overlay still inserts the
    /// daily block there, matching the engine's historical output.
    Stretching,
    ResistanceBands,
    Flexibility,
    Recovery,
    MedicalGuidance,
}

/// One suggestion slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub role: SlotRole,
    pub text: String,
}

impl Suggestion {
    fn new(role: SlotRole, text: &str) -> Self {
        Self {
            role,
            text: text.to_string(),
        }
    }
}

/// Build the five-suggestion exercise plan for a profile.
pub fn exercise_plan(age: u32, bmi: f64, goal: Goal, activity: ActivityLevel) -> Vec<String> {
    let mut slots = base_band(bmi);
    apply_age_overlay(&mut slots, age);
    apply_goal_overlay(&mut slots, goal);
    apply_activity_overlay(&mut slots, activity);
    finalize(slots)
}

/// Base five-slot plan per BMI band: underweight, normal, overweight,
/// obese.
fn base_band(bmi: f64) -> Vec<Suggestion> {
    use SlotRole::*;
    if bmi < 18.5 {
        vec![
            Suggestion::new(Strength, "Resistance training - full body (3x/week)"),
            Suggestion::new(CompoundLifts, "Compound lifts (progressive overload)"),
            Suggestion::new(Core, "Core strengthening (planks, 3x/week)"),
            Suggestion::new(Cardio, "Light cardio 10-15 min post-workout"),
            Suggestion::new(Recovery, "High-calorie recovery snack (protein + carbs)"),
        ]
    } else if bmi < 25.0 {
        vec![
            Suggestion::new(Strength, "Strength training - 2x/week (full-body)"),
            Suggestion::new(Cardio, "Cardio - 30 min moderate (3x/week)"),
            Suggestion::new(DailyMobility, DAILY_MOBILITY),
            Suggestion::new(Core, "Core stability exercises"),
            Suggestion::new(Hiit, "Optional HIIT 1x/week"),
        ]
    } else if bmi < 30.0 {
        vec![
            Suggestion::new(Cardio, "Brisk walking - 30-45 min daily"),
            Suggestion::new(Strength, "Bodyweight circuit - 3x/week (circuits 20-30 min)"),
            Suggestion::new(Cardio, "Low-impact cardio (cycling/swim)"),
            Suggestion::new(ResistanceBands, "Resistance bands - full body 2-3x/week"),
            Suggestion::new(Stretching, "Mobility & stretching"),
        ]
    } else {
        vec![
            Suggestion::new(Cardio, "Low-impact cardio - walking/cycling 30 min daily"),
            Suggestion::new(Strength, "Chair/low-impact strength exercises - 3x/week"),
            Suggestion::new(ResistanceBands, "Resistance bands - light intensity"),
            Suggestion::new(Flexibility, FLEXIBILITY_DRILLS),
            Suggestion::new(MedicalGuidance, "Consult physician / supervised program recommended"),
        ]
    }
}

/// Seniors get HIIT softened to low-impact intervals, compound lifts
/// removed, and a flexibility slot guaranteed last. Minors keep compound
/// lifts under supervision.
fn apply_age_overlay(slots: &mut Vec<Suggestion>, age: u32) {
    if age >= 60 {
        for slot in slots.iter_mut() {
            if slot.role == SlotRole::Hiit {
                slot.text = slot.text.replace("HIIT", "low-impact intervals");
                slot.role = SlotRole::Cardio;
            }
        }
        slots.retain(|slot| slot.role != SlotRole::CompoundLifts);
        if !slots.iter().any(|slot| slot.role == SlotRole::Flexibility) {
            let flexibility = Suggestion::new(SlotRole::Flexibility, FLEXIBILITY_DRILLS);
            if slots.len() < PLAN_SLOTS {
                // A drop above left a vacant slot; fill it.
                slots.push(flexibility);
            } else if let Some(last) = slots.last_mut() {
                *last = flexibility;
            }
        }
    } else if age < 18 {
        for slot in slots.iter_mut() {
            if slot.role == SlotRole::CompoundLifts {
                slot.text = slot.text.replace("Compound lifts", "Supervised compound lifts");
            }
        }
    }
}

fn apply_goal_overlay(slots: &mut Vec<Suggestion>, goal: Goal) {
    match goal {
        Goal::GainWeight => {
            if let Some(first) = slots.first_mut() {
                *first = Suggestion::new(
                    SlotRole::Strength,
                    "Progressive resistance training - 3x/week (focus on strength)",
                );
            }
            if let Some(last) = slots.last_mut() {
                *last = Suggestion::new(
                    SlotRole::Recovery,
                    "Increase caloric intake + protein timing (post-workout snack)",
                );
            }
        }
        Goal::LoseWeight => {
            if let Some(first) = slots.first_mut() {
                *first = Suggestion::new(
                    SlotRole::Cardio,
                    "Interval cardio or brisk walking 30-45 min (daily)",
                );
            }
        }
        Goal::Maintain => {}
    }
}

fn apply_activity_overlay(slots: &mut Vec<Suggestion>, activity: ActivityLevel) {
    if activity == ActivityLevel::High {
        slots.retain(|slot| slot.role != SlotRole::Hiit);
        if !slots.iter().any(|slot| slot.role == SlotRole::DailyMobility) {
            slots.insert(1, Suggestion::new(SlotRole::DailyMobility, DAILY_MOBILITY));
        }
    }
}

/// Settle the plan at exactly [`PLAN_SLOTS`] entries: truncate overflow
/// from inserts, pad drop-induced shortfalls with sentinel fillers not
/// already present.
fn finalize(mut slots: Vec<Suggestion>) -> Vec<String> {
    slots.truncate(PLAN_SLOTS);
    let fillers = [
        (SlotRole::Flexibility, FLEXIBILITY_DRILLS),
        (SlotRole::DailyMobility, DAILY_MOBILITY),
    ];
    for (role, text) in fillers {
        if slots.len() >= PLAN_SLOTS {
            break;
        }
        if !slots.iter().any(|slot| slot.role == role) {
            slots.push(Suggestion::new(role, text));
        }
    }
    debug_assert_eq!(slots.len(), PLAN_SLOTS);
    slots.into_iter().map(|slot| slot.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND_SAMPLES: [f64; 4] = [16.0, 22.0, 27.0, 35.0];
    const GOALS: [Goal; 3] = [Goal::LoseWeight, Goal::Maintain, Goal::GainWeight];
    const ACTIVITIES: [ActivityLevel; 3] = [
        ActivityLevel::Low,
        ActivityLevel::Medium,
        ActivityLevel::High,
    ];

    #[test]
    fn test_normal_band_untouched_for_plain_adult() {
        let plan = exercise_plan(25, 23.15, Goal::Maintain, ActivityLevel::Medium);
        assert_eq!(
            plan,
            vec![
                "Strength training - 2x/week (full-body)",
                "Cardio - 30 min moderate (3x/week)",
                "Mobility & stretching - daily 10 min",
                "Core stability exercises",
                "Optional HIIT 1x/week",
            ]
        );
    }

    #[test]
    fn test_always_exactly_five() {
        for age in [10u32, 16, 25, 59, 60, 75] {
            for bmi in BAND_SAMPLES {
                for goal in GOALS {
                    for activity in ACTIVITIES {
                        let plan = exercise_plan(age, bmi, goal, activity);
                        assert_eq!(
                            plan.len(),
                            PLAN_SLOTS,
                            "len for age={age} bmi={bmi} {goal:?} {activity:?}: {plan:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_senior_never_sees_compound_lifts() {
        for bmi in BAND_SAMPLES {
            for goal in GOALS {
                for activity in ACTIVITIES {
                    let plan = exercise_plan(72, bmi, goal, activity);
                    for text in &plan {
                        assert!(!text.contains("Compound lifts"), "{text}");
                        assert!(!text.contains("progressive overload"), "{text}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_senior_flexibility_forced_into_last_slot() {
        // Normal band: the forced slot overwrites the softened HIIT entry.
        let plan = exercise_plan(65, 22.0, Goal::Maintain, ActivityLevel::Low);
        assert_eq!(plan.last().map(String::as_str), Some(FLEXIBILITY_DRILLS));
        assert_eq!(plan.len(), PLAN_SLOTS);

        // Underweight band: the compound-lift drop vacates a slot, so the
        // forced entry fills it instead of clobbering the recovery snack.
        let plan = exercise_plan(65, 16.0, Goal::Maintain, ActivityLevel::Low);
        assert_eq!(plan.last().map(String::as_str), Some(FLEXIBILITY_DRILLS));
        assert!(plan.contains(&"High-calorie recovery snack (protein + carbs)".to_string()));
        assert_eq!(plan.len(), PLAN_SLOTS);
    }

    #[test]
    fn test_senior_output_never_mentions_hiit() {
        for bmi in BAND_SAMPLES {
            for activity in ACTIVITIES {
                let plan = exercise_plan(60, bmi, Goal::Maintain, activity);
                assert!(!plan.iter().any(|s| s.contains("HIIT")), "{plan:?}");
            }
        }
    }

    #[test]
    fn test_minor_gets_supervised_compound_lifts() {
        let plan = exercise_plan(16, 16.0, Goal::Maintain, ActivityLevel::Low);
        assert_eq!(plan[1], "Supervised compound lifts (progressive overload)");
    }

    #[test]
    fn test_gain_weight_rewrites_first_and_last_slots() {
        let plan = exercise_plan(30, 22.0, Goal::GainWeight, ActivityLevel::Low);
        assert_eq!(
            plan[0],
            "Progressive resistance training - 3x/week (focus on strength)"
        );
        assert_eq!(
            plan[4],
            "Increase caloric intake + protein timing (post-workout snack)"
        );
    }

    #[test]
    fn test_lose_weight_rewrites_first_slot_only() {
        let plan = exercise_plan(30, 35.0, Goal::LoseWeight, ActivityLevel::Low);
        assert_eq!(
            plan,
            vec![
                "Interval cardio or brisk walking 30-45 min (daily)",
                "Chair/low-impact strength exercises - 3x/week",
                "Resistance bands - light intensity",
                "Flexibility & balance drills daily",
                "Consult physician / supervised program recommended",
            ]
        );
    }

    #[test]
    fn test_high_activity_never_mentions_hiit() {
        for age in [16u32, 30, 65] {
            for bmi in BAND_SAMPLES {
                for goal in GOALS {
                    let plan = exercise_plan(age, bmi, goal, ActivityLevel::High);
                    assert!(!plan.iter().any(|s| s.contains("HIIT")), "{plan:?}");
                }
            }
        }
    }

    #[test]
    fn test_high_activity_inserts_daily_mobility_in_overweight_band() {
        let plan = exercise_plan(30, 27.0, Goal::Maintain, ActivityLevel::High);
        assert_eq!(plan[1], DAILY_MOBILITY);
        // The plain stretching slot is pushed out by the insert-then-truncate.
        assert!(!plan.contains(&"Mobility & stretching".to_string()));
        assert_eq!(
            plan,
            vec![
                "Brisk walking - 30-45 min daily",
                DAILY_MOBILITY,
                "Bodyweight circuit - 3x/week (circuits 20-30 min)",
                "Low-impact cardio (cycling/swim)",
                "Resistance bands - full body 2-3x/week",
            ]
        );
    }

    #[test]
    fn test_high_activity_normal_band_backfills_flexibility() {
        // Dropping HIIT leaves four entries and the mobility block already
        // present, so the filler supplies the fifth slot.
        let plan = exercise_plan(30, 22.0, Goal::Maintain, ActivityLevel::High);
        assert_eq!(
            plan,
            vec![
                "Strength training - 2x/week (full-body)",
                "Cardio - 30 min moderate (3x/week)",
                DAILY_MOBILITY,
                "Core stability exercises",
                FLEXIBILITY_DRILLS,
            ]
        );
    }

    #[test]
    fn test_goal_overlay_runs_before_activity_overlay() {
        // GainWeight replaces the HIIT slot first, so the high-activity
        // drop finds nothing and the plan keeps all five entries.
        let plan = exercise_plan(30, 22.0, Goal::GainWeight, ActivityLevel::High);
        assert_eq!(
            plan,
            vec![
                "Progressive resistance training - 3x/week (focus on strength)",
                "Cardio - 30 min moderate (3x/week)",
                DAILY_MOBILITY,
                "Core stability exercises",
                "Increase caloric intake + protein timing (post-workout snack)",
            ]
        );
    }

    #[test]
    fn test_age_overlay_runs_before_goal_overlay() {
        // Sequence for a senior gaining weight in the underweight band:
        // drop frees a slot, flexibility fills it, then the goal overlay
        // overwrites both ends.
        let plan = exercise_plan(70, 16.0, Goal::GainWeight, ActivityLevel::Low);
        assert_eq!(
            plan,
            vec![
                "Progressive resistance training - 3x/week (focus on strength)",
                "Core strengthening (planks, 3x/week)",
                "Light cardio 10-15 min post-workout",
                "High-calorie recovery snack (protein + carbs)",
                "Increase caloric intake + protein timing (post-workout snack)",
            ]
        );
    }

    #[test]
    fn test_band_boundaries() {
        // 18.5 and 25.0 belong to the bands above them; 30.0 is obese.
        assert_eq!(
            exercise_plan(30, 18.5, Goal::Maintain, ActivityLevel::Low)[0],
            "Strength training - 2x/week (full-body)"
        );
        assert_eq!(
            exercise_plan(30, 25.0, Goal::Maintain, ActivityLevel::Low)[0],
            "Brisk walking - 30-45 min daily"
        );
        assert_eq!(
            exercise_plan(30, 30.0, Goal::Maintain, ActivityLevel::Low)[0],
            "Low-impact cardio - walking/cycling 30 min daily"
        );
    }
}
