//! ONNX inference using tract
//!
//! Runs the diet style classifier and the optional extended exercise
//! classifier as optimized tract plans and decodes their integer class
//! outputs into labels.

use super::{DietStyleModel, ExercisePlanModel};
use crate::models::FeatureVector;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Number of input features expected by both models
pub const NUM_FEATURES: usize = 7;

/// Maximum number of labels taken from the extended model
pub const MAX_EXERCISE_LABELS: usize = 5;

/// Maximum inference latency before warning (5ms target)
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Load and optimize an ONNX model from bytes
fn load_model(model_bytes: &[u8]) -> Result<TractModel> {
    let model = tract_onnx::onnx()
        .model_for_read(&mut std::io::Cursor::new(model_bytes))
        .context("Failed to parse ONNX model")?
        .with_input_fact(0, f32::fact([1, NUM_FEATURES]).into())
        .context("Failed to set input shape")?
        .into_optimized()
        .context("Failed to optimize model")?
        .into_runnable()
        .context("Failed to create runnable model")?;
    Ok(model)
}

/// Convert a feature vector to the `[1, NUM_FEATURES]` tensor input
fn features_to_tensor(features: &FeatureVector) -> Tensor {
    let data = vec![
        features.gender_code,
        features.age,
        features.height_cm,
        features.weight_kg,
        features.bmi,
        features.activity_code,
        features.goal_code,
    ];
    tract_ndarray::Array2::from_shape_vec((1, NUM_FEATURES), data)
        .unwrap()
        .into()
}

/// Per-model inference counters
struct ModelCounters {
    inference_count: std::sync::atomic::AtomicU64,
    slow_inference_count: std::sync::atomic::AtomicU64,
}

impl ModelCounters {
    fn new() -> Self {
        Self {
            inference_count: std::sync::atomic::AtomicU64::new(0),
            slow_inference_count: std::sync::atomic::AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> InferenceStats {
        InferenceStats {
            total_inferences: self.inference_count.load(std::sync::atomic::Ordering::Relaxed),
            slow_inferences: self.slow_inference_count.load(std::sync::atomic::Ordering::Relaxed),
        }
    }
}

/// Run a model on the features, tracking latency against the target
fn run_model(
    model: &TractModel,
    features: &FeatureVector,
    counters: &ModelCounters,
) -> Result<TVec<TValue>> {
    let start = Instant::now();
    let input = features_to_tensor(features);
    let result = model.run(tvec!(input.into()))?;

    let elapsed = start.elapsed();
    counters
        .inference_count
        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

    if elapsed.as_millis() > MAX_INFERENCE_MS {
        counters
            .slow_inference_count
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        warn!(elapsed_ms = elapsed.as_millis(), "Inference exceeded {}ms target", MAX_INFERENCE_MS);
    } else {
        debug!(elapsed_us = elapsed.as_micros(), "Inference completed");
    }

    Ok(result)
}

/// ONNX-backed diet style classifier
pub struct OnnxDietStyleModel {
    model: TractModel,
    diet_styles: Vec<String>,
    version: String,
    counters: ModelCounters,
}

impl OnnxDietStyleModel {
    /// Build from raw ONNX bytes and the manifest's label table
    pub fn from_parts(
        model_bytes: &[u8],
        diet_styles: Vec<String>,
        version: String,
    ) -> Result<Self> {
        if diet_styles.is_empty() {
            anyhow::bail!("Diet style label table is empty");
        }
        Ok(Self {
            model: load_model(model_bytes)?,
            diet_styles,
            version,
            counters: ModelCounters::new(),
        })
    }

    /// Get inference statistics
    pub fn stats(&self) -> InferenceStats {
        self.counters.snapshot()
    }
}

impl DietStyleModel for OnnxDietStyleModel {
    fn predict_diet_style(&self, features: &FeatureVector) -> Result<String> {
        let result = run_model(&self.model, features, &self.counters)?;
        let output = result.get(0).context("No output from model")?;

        let codes = output
            .cast_to::<i64>()
            .context("Unsupported diet style output type")?;
        let view = codes.to_array_view::<i64>()?;
        let code = view.iter().next().copied().context("Empty diet style output")?;

        let style = usize::try_from(code)
            .ok()
            .and_then(|index| self.diet_styles.get(index))
            .with_context(|| {
                format!(
                    "Diet style class {} out of range ({} labels)",
                    code,
                    self.diet_styles.len()
                )
            })?;
        Ok(style.clone())
    }

    fn model_version(&self) -> &str {
        &self.version
    }
}

/// ONNX-backed extended exercise classifier. Label encoders come from
/// the manifest; without them raw outputs are stringified.
pub struct OnnxExercisePlanModel {
    model: TractModel,
    encoders: Option<BTreeMap<String, Vec<String>>>,
    version: String,
    counters: ModelCounters,
}

impl OnnxExercisePlanModel {
    /// Build from raw ONNX bytes and the manifest's per-category encoders
    pub fn from_parts(
        model_bytes: &[u8],
        encoders: Option<BTreeMap<String, Vec<String>>>,
        version: String,
    ) -> Result<Self> {
        Ok(Self {
            model: load_model(model_bytes)?,
            encoders,
            version,
            counters: ModelCounters::new(),
        })
    }

    /// Get inference statistics
    pub fn stats(&self) -> InferenceStats {
        self.counters.snapshot()
    }
}

impl ExercisePlanModel for OnnxExercisePlanModel {
    fn predict_exercises(&self, features: &FeatureVector) -> Result<Vec<String>> {
        let result = run_model(&self.model, features, &self.counters)?;
        let output = result.get(0).context("No output from model")?;

        let Some(encoders) = &self.encoders else {
            // Without encoders the raw outputs are the best labels available
            let values = output
                .cast_to::<f32>()
                .context("Unsupported exercise output type")?;
            let view = values.to_array_view::<f32>()?;
            return Ok(view
                .iter()
                .take(MAX_EXERCISE_LABELS)
                .map(|v| v.to_string())
                .collect());
        };

        let codes = output
            .cast_to::<i64>()
            .context("Unsupported exercise output type")?;
        let view = codes.to_array_view::<i64>()?;
        let flat: Vec<i64> = view.iter().copied().collect();
        if flat.is_empty() {
            anyhow::bail!("Empty exercise output");
        }

        let mut labels = Vec::with_capacity(encoders.len());
        for (slot, (category, classes)) in encoders.iter().enumerate() {
            // A single output value broadcasts across every category
            let code = if flat.len() == 1 {
                flat[0]
            } else {
                *flat
                    .get(slot)
                    .with_context(|| format!("No output value for category {category}"))?
            };

            let label = usize::try_from(code)
                .ok()
                .and_then(|index| classes.get(index))
                .with_context(|| {
                    format!("Class {code} out of range for category {category}")
                })?;
            labels.push(label.clone());
        }

        labels.truncate(MAX_EXERCISE_LABELS);
        Ok(labels)
    }

    fn model_version(&self) -> &str {
        &self.version
    }
}

/// Inference statistics
#[derive(Debug, Clone)]
pub struct InferenceStats {
    pub total_inferences: u64,
    pub slow_inferences: u64,
}
