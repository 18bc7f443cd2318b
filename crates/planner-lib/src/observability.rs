//! Observability infrastructure for the plan engine
//!
//! Provides:
//! - Prometheus metrics (plan latency, inference latency, error counters, model version)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_gauge, GaugeVec, Histogram, IntGauge,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<PlannerMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct PlannerMetricsInner {
    plan_latency_seconds: Histogram,
    inference_latency_seconds: Histogram,
    model_version_info: GaugeVec,
    plans_computed: IntGauge,
    reports_generated: IntGauge,
    validation_errors: IntGauge,
    prediction_errors: IntGauge,
    exercise_fallbacks: IntGauge,
}

impl PlannerMetricsInner {
    fn new() -> Self {
        Self {
            plan_latency_seconds: register_histogram!(
                "diet_planner_plan_latency_seconds",
                "Time spent computing a full plan",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register plan_latency_seconds"),

            inference_latency_seconds: register_histogram!(
                "diet_planner_inference_latency_seconds",
                "Time spent running ML inference for diet style",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register inference_latency_seconds"),

            model_version_info: register_gauge_vec!(
                "diet_planner_model_version_info",
                "Information about the currently loaded ML models",
                &["model", "version"]
            )
            .expect("Failed to register model_version_info"),

            plans_computed: register_int_gauge!(
                "diet_planner_plans_computed_total",
                "Total number of plans computed"
            )
            .expect("Failed to register plans_computed"),

            reports_generated: register_int_gauge!(
                "diet_planner_reports_generated_total",
                "Total number of text reports generated"
            )
            .expect("Failed to register reports_generated"),

            validation_errors: register_int_gauge!(
                "diet_planner_validation_errors_total",
                "Total number of payload validation errors"
            )
            .expect("Failed to register validation_errors"),

            prediction_errors: register_int_gauge!(
                "diet_planner_prediction_errors_total",
                "Total number of diet style prediction errors"
            )
            .expect("Failed to register prediction_errors"),

            exercise_fallbacks: register_int_gauge!(
                "diet_planner_exercise_fallbacks_total",
                "Times the extended exercise model was unavailable and rules were used"
            )
            .expect("Failed to register exercise_fallbacks"),
        }
    }
}

/// Planner metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct PlannerMetrics {
    // This is just a marker - we use the global instance
    _private: (),
}

impl Default for PlannerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        // Initialize global metrics on first call
        GLOBAL_METRICS.get_or_init(PlannerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &PlannerMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record a plan computation latency observation
    pub fn observe_plan_latency(&self, duration_secs: f64) {
        self.inner().plan_latency_seconds.observe(duration_secs);
    }

    /// Record an inference latency observation
    pub fn observe_inference_latency(&self, duration_secs: f64) {
        self.inner().inference_latency_seconds.observe(duration_secs);
    }

    /// Record a loaded model version. Set once per model at startup.
    pub fn set_model_version(&self, model: &str, version: &str) {
        self.inner()
            .model_version_info
            .with_label_values(&[model, version])
            .set(1.0);
    }

    /// Increment plans computed counter
    pub fn inc_plans_computed(&self) {
        self.inner().plans_computed.inc();
    }

    /// Increment reports generated counter
    pub fn inc_reports_generated(&self) {
        self.inner().reports_generated.inc();
    }

    /// Increment validation errors counter
    pub fn inc_validation_errors(&self) {
        self.inner().validation_errors.inc();
    }

    /// Increment prediction errors counter
    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors.inc();
    }

    /// Increment exercise fallback counter
    pub fn inc_exercise_fallbacks(&self) {
        self.inner().exercise_fallbacks.inc();
    }
}

/// Structured logger for plan engine events
///
/// Provides consistent JSON-formatted logging for plan computation
/// and other significant events.
#[derive(Clone)]
pub struct StructuredLogger {
    component: String,
}

impl StructuredLogger {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Log a plan computation event
    pub fn log_plan_computed(
        &self,
        age: u32,
        bmi: f64,
        diet_style: &str,
        calorie_low: i64,
        calorie_high: i64,
        exercise_source: &str,
        model_version: &str,
    ) {
        info!(
            event = "plan_computed",
            component = %self.component,
            age = age,
            bmi = bmi,
            diet_style = %diet_style,
            calorie_low = calorie_low,
            calorie_high = calorie_high,
            exercise_source = %exercise_source,
            model_version = %model_version,
            "Computed personalized plan"
        );
    }

    /// Log a payload validation failure
    pub fn log_validation_failure(&self, reason: &str) {
        info!(
            event = "validation_failed",
            component = %self.component,
            reason = %reason,
            "Rejected plan request payload"
        );
    }

    /// Log a fall back from the extended exercise model to the rules
    pub fn log_exercise_fallback(&self) {
        warn!(
            event = "exercise_fallback",
            component = %self.component,
            "Extended exercise model unavailable, using rule engine"
        );
    }

    /// Log service startup
    pub fn log_startup(
        &self,
        version: &str,
        model_version: &str,
        extended_model_version: Option<&str>,
    ) {
        info!(
            event = "service_started",
            component = %self.component,
            service_version = %version,
            model_version = %model_version,
            extended_model_version = ?extended_model_version,
            "Plan service started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            component = %self.component,
            reason = %reason,
            "Plan service shutting down"
        );
    }
}
