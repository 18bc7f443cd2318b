//! Diet & Exercise Planner service
//!
//! Loads the ONNX model bundles, builds the plan engine and serves the
//! HTTP API.

use anyhow::{Context, Result};
use planner_lib::{
    health::{components, HealthRegistry},
    observability::{PlannerMetrics, StructuredLogger},
    predictor::{
        load_diet_model, load_exercise_model, DietStyleModel, ExercisePlanModel,
        PredictionAdapter,
    },
    Planner,
};
use planner_server::{api, config::ServerConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(fmt::layer().json())
        .init();

    info!("Starting planner-server");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::PRIMARY_MODEL).await;
    health_registry.register(components::EXTENDED_MODEL).await;
    health_registry.register(components::PLANNER).await;

    // Initialize metrics
    let metrics = PlannerMetrics::new();

    // The primary diet model is required; without it no plan can be served
    let diet_model = load_diet_model(Path::new(&config.model_path))
        .context("Failed to load diet style model")?;
    let diet_version = diet_model.model_version().to_string();
    metrics.set_model_version("diet_style", &diet_version);

    // The extended exercise model is optional; a failed load only narrows
    // the service to rule-based exercise suggestions
    let exercise_model: Option<Arc<dyn ExercisePlanModel>> =
        match load_exercise_model(Path::new(&config.extended_model_path)) {
            Ok(model) => {
                metrics.set_model_version("extended_exercise", model.model_version());
                Some(Arc::new(model))
            }
            Err(e) => {
                warn!(
                    path = %config.extended_model_path,
                    error = %format!("{e:#}"),
                    "Extended exercise model unavailable, exercises come from rules"
                );
                health_registry
                    .set_degraded(components::EXTENDED_MODEL, format!("{e:#}"))
                    .await;
                None
            }
        };
    let extended_version = exercise_model
        .as_deref()
        .map(|model| model.model_version().to_string());

    // Initialize structured logger
    let logger = StructuredLogger::new("server");
    logger.log_startup(SERVICE_VERSION, &diet_version, extended_version.as_deref());

    let adapter = PredictionAdapter::new(Arc::new(diet_model), exercise_model);
    let planner = Planner::new(adapter);

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        planner,
        health_registry.clone(),
        metrics.clone(),
    ));

    // Mark service as ready after initialization
    health_registry.set_ready(true).await;

    // Start the API server and wait for shutdown signal
    let mut server = tokio::spawn(api::serve(config.api_port, app_state));
    tokio::select! {
        result = &mut server => {
            result.context("API server task failed")??;
        }
        _ = tokio::signal::ctrl_c() => {
            logger.log_shutdown("SIGINT received");
            info!("Shutting down");
            server.abort();
        }
    }

    Ok(())
}
