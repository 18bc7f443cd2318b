//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Path to the required diet style model bundle
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the optional extended exercise model bundle
    #[serde(default = "default_extended_model_path")]
    pub extended_model_path: String,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_port() -> u16 {
    8080
}

fn default_model_path() -> String {
    "models/diet_exercise_model.onnx".to_string()
}

fn default_extended_model_path() -> String {
    "models/extended_diet_exercise_model.onnx".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load configuration from PLANNER_-prefixed environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("PLANNER"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            api_port: default_api_port(),
            model_path: default_model_path(),
            extended_model_path: default_extended_model_path(),
            log_level: default_log_level(),
        }))
    }
}
