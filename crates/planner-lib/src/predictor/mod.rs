//! ML prediction engine

mod bundle;
mod features;
mod inference;

pub use bundle::{
    load_diet_model, load_exercise_model, DietModelManifest, ExerciseModelManifest,
};
pub use features::extract_features;
pub use inference::{
    InferenceStats, OnnxDietStyleModel, OnnxExercisePlanModel, MAX_EXERCISE_LABELS, NUM_FEATURES,
};

use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use crate::error::PlanError;
use crate::models::FeatureVector;

/// Trait for diet style classifiers
pub trait DietStyleModel: Send + Sync {
    /// Predict a diet style label from profile features
    fn predict_diet_style(&self, features: &FeatureVector) -> Result<String>;

    /// Get current model version
    fn model_version(&self) -> &str;
}

/// Trait for the optional extended exercise classifier
pub trait ExercisePlanModel: Send + Sync {
    /// Predict per-category exercise labels from profile features
    fn predict_exercises(&self, features: &FeatureVector) -> Result<Vec<String>>;

    /// Get current model version
    fn model_version(&self) -> &str;
}

/// Outcome of the extended exercise path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExercisePrediction {
    /// Labels from the extended model, at most [`MAX_EXERCISE_LABELS`]
    Predicted(Vec<String>),
    /// No extended model, or its prediction failed; callers fall back
    /// to the rule engine
    Unavailable,
}

/// Front door to both models, applying the engine's failure policy:
/// diet style failures propagate, extended exercise failures degrade.
pub struct PredictionAdapter {
    diet_model: Arc<dyn DietStyleModel>,
    exercise_model: Option<Arc<dyn ExercisePlanModel>>,
}

impl PredictionAdapter {
    pub fn new(
        diet_model: Arc<dyn DietStyleModel>,
        exercise_model: Option<Arc<dyn ExercisePlanModel>>,
    ) -> Self {
        Self {
            diet_model,
            exercise_model,
        }
    }

    pub fn has_exercise_model(&self) -> bool {
        self.exercise_model.is_some()
    }

    pub fn diet_model_version(&self) -> &str {
        self.diet_model.model_version()
    }

    pub fn exercise_model_version(&self) -> Option<&str> {
        self.exercise_model
            .as_deref()
            .map(ExercisePlanModel::model_version)
    }

    /// Predict the diet style. Failures become [`PlanError::Prediction`]
    /// and must reach the caller, the plan cannot be built without one.
    pub fn diet_style(&self, features: &FeatureVector) -> Result<String, PlanError> {
        self.diet_model
            .predict_diet_style(features)
            .map_err(PlanError::Prediction)
    }

    /// Run the extended exercise path. Never fails: any error is logged
    /// and reported as `Unavailable`.
    pub fn exercises(&self, features: &FeatureVector) -> ExercisePrediction {
        let Some(model) = &self.exercise_model else {
            return ExercisePrediction::Unavailable;
        };

        match model.predict_exercises(features) {
            Ok(mut labels) => {
                labels.truncate(MAX_EXERCISE_LABELS);
                ExercisePrediction::Predicted(labels)
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Extended exercise prediction failed, falling back to rules");
                ExercisePrediction::Unavailable
            }
        }
    }
}
