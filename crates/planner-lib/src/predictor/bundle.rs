//! Model bundle loading and validation
//!
//! A model bundle is an `.onnx` weights file plus a `.json` manifest
//! sidecar with the same stem. The manifest carries label tables and an
//! optional SHA256 checksum that is validated before the weights are
//! handed to tract.

use super::{DietStyleModel, ExercisePlanModel, OnnxDietStyleModel, OnnxExercisePlanModel};
use anyhow::{Context, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Manifest sidecar for the required diet style model
#[derive(Debug, Clone, Deserialize)]
pub struct DietModelManifest {
    pub version: String,
    pub diet_styles: Vec<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Manifest sidecar for the optional extended exercise model. Every
/// field may be absent, including the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseModelManifest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub exercise_encoders: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Path of the manifest sidecar next to a weights file
fn manifest_path(model_path: &Path) -> PathBuf {
    model_path.with_extension("json")
}

/// Compute SHA256 checksum of data
fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Read weights from disk, enforcing the manifest checksum when present
fn read_weights(model_path: &Path, expected_sha256: Option<&str>) -> Result<Vec<u8>> {
    let weights = fs::read(model_path)
        .with_context(|| format!("Failed to read model file {:?}", model_path))?;

    if let Some(expected) = expected_sha256 {
        let computed = compute_checksum(&weights);
        if !computed.eq_ignore_ascii_case(expected) {
            anyhow::bail!("Checksum mismatch: expected {}, got {}", expected, computed);
        }
        info!(
            path = %model_path.display(),
            checksum = %computed,
            "Model checksum validated"
        );
    }

    Ok(weights)
}

/// Load the required diet style model bundle. The manifest must exist
/// and name at least one diet style.
pub fn load_diet_model(model_path: &Path) -> Result<OnnxDietStyleModel> {
    if !model_path.exists() {
        anyhow::bail!(
            "Model file not found at {}. Place your model there.",
            model_path.display()
        );
    }

    let manifest_file = manifest_path(model_path);
    let manifest_bytes = fs::read(&manifest_file)
        .with_context(|| format!("Failed to read model manifest {:?}", manifest_file))?;
    let manifest: DietModelManifest = serde_json::from_slice(&manifest_bytes)
        .with_context(|| format!("Failed to parse model manifest {:?}", manifest_file))?;

    let weights = read_weights(model_path, manifest.sha256.as_deref())?;
    let model = OnnxDietStyleModel::from_parts(&weights, manifest.diet_styles, manifest.version)?;

    info!(
        path = %model_path.display(),
        version = %model.model_version(),
        "Diet style model loaded"
    );
    Ok(model)
}

/// Load the optional extended exercise model bundle. A missing manifest
/// is tolerated; raw outputs are then stringified at prediction time.
pub fn load_exercise_model(model_path: &Path) -> Result<OnnxExercisePlanModel> {
    if !model_path.exists() {
        anyhow::bail!(
            "Model file not found at {}. Place your model there.",
            model_path.display()
        );
    }

    let manifest_file = manifest_path(model_path);
    let manifest = if manifest_file.exists() {
        let manifest_bytes = fs::read(&manifest_file)
            .with_context(|| format!("Failed to read model manifest {:?}", manifest_file))?;
        serde_json::from_slice::<ExerciseModelManifest>(&manifest_bytes)
            .with_context(|| format!("Failed to parse model manifest {:?}", manifest_file))?
    } else {
        warn!(
            path = %manifest_file.display(),
            "Extended model has no manifest, raw outputs will be stringified"
        );
        ExerciseModelManifest::default()
    };

    let has_encoders = manifest.exercise_encoders.is_some();
    let weights = read_weights(model_path, manifest.sha256.as_deref())?;
    let version = manifest.version.unwrap_or_else(|| "unknown".to_string());
    let model = OnnxExercisePlanModel::from_parts(&weights, manifest.exercise_encoders, version)?;

    info!(
        path = %model_path.display(),
        version = %model.model_version(),
        has_encoders,
        "Extended exercise model loaded"
    );
    Ok(model)
}
