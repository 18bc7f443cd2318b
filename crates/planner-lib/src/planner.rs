//! Plan computation pipeline
//!
//! Ties validation, metabolic math, model inference and the rule
//! engines together into a single plan per profile.

use std::time::Instant;

use crate::categories::{ActivityLevel, Goal};
use crate::error::PlanError;
use crate::metabolics::{bmi, compute_metabolics, round2};
use crate::models::{Plan, Profile, RawMetabolics, EXERCISE_NOTE};
use crate::observability::{PlannerMetrics, StructuredLogger};
use crate::predictor::{extract_features, ExercisePrediction, PredictionAdapter};
use crate::rules::{exercise_plan, meal_plan};

/// Computes personalized plans. Owns the model adapter; everything else
/// arrives per request.
pub struct Planner {
    models: PredictionAdapter,
    metrics: PlannerMetrics,
    logger: StructuredLogger,
}

impl Planner {
    pub fn new(models: PredictionAdapter) -> Self {
        Self {
            models,
            metrics: PlannerMetrics::new(),
            logger: StructuredLogger::new("planner"),
        }
    }

    pub fn has_exercise_model(&self) -> bool {
        self.models.has_exercise_model()
    }

    pub fn diet_model_version(&self) -> &str {
        self.models.diet_model_version()
    }

    pub fn exercise_model_version(&self) -> Option<&str> {
        self.models.exercise_model_version()
    }

    /// Compute the full plan for a validated profile.
    ///
    /// BMI is rounded to two decimals up front and that rounded value
    /// feeds every downstream consumer: the feature vector, the meal
    /// band and the exercise band all see the same figure.
    pub fn plan(&self, profile: &Profile) -> Result<Plan, PlanError> {
        let start = Instant::now();

        let bmi_value = round2(bmi(profile.weight_kg, profile.height_cm));
        if !bmi_value.is_finite() {
            return Err(PlanError::Computation(format!(
                "non-finite BMI for weight {} kg and height {} cm",
                profile.weight_kg, profile.height_cm
            )));
        }

        let features = extract_features(profile, bmi_value);

        let inference_start = Instant::now();
        let diet_style = self.models.diet_style(&features).map_err(|e| {
            self.metrics.inc_prediction_errors();
            e
        })?;
        self.metrics
            .observe_inference_latency(inference_start.elapsed().as_secs_f64());

        let metabolics = compute_metabolics(profile, bmi_value)?;

        let goal = Goal::classify(&profile.goal);
        let activity = ActivityLevel::classify(&profile.activity);
        let meal_suggestions = meal_plan(bmi_value, goal);

        let (exercise_suggestions, exercise_source) = match self.models.exercises(&features) {
            ExercisePrediction::Predicted(labels) => (labels, "model"),
            ExercisePrediction::Unavailable => {
                if self.models.has_exercise_model() {
                    self.metrics.inc_exercise_fallbacks();
                    self.logger.log_exercise_fallback();
                }
                (exercise_plan(profile.age, bmi_value, goal, activity), "rules")
            }
        };

        let plan = Plan {
            bmi: bmi_value,
            diet_style,
            calorie_range: metabolics.calorie_range,
            macros_g: metabolics.macros_g,
            meal_suggestions,
            exercise_suggestions,
            exercise_note: EXERCISE_NOTE.to_string(),
            raw: RawMetabolics {
                bmr: metabolics.bmr as i64,
                tdee: metabolics.tdee as i64,
            },
        };

        self.metrics.inc_plans_computed();
        self.metrics
            .observe_plan_latency(start.elapsed().as_secs_f64());
        self.logger.log_plan_computed(
            profile.age,
            plan.bmi,
            &plan.diet_style,
            plan.calorie_range.low,
            plan.calorie_range.high,
            exercise_source,
            self.models.diet_model_version(),
        );

        Ok(plan)
    }
}
