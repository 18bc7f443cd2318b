//! HTTP API for plan computation, reports, health checks and metrics

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use planner_lib::{
    health::{ComponentStatus, HealthRegistry},
    models::{Plan, Profile},
    observability::PlannerMetrics,
    planner::Planner,
    report::{render_report, REPORT_FILENAME},
    ErrorClass, PlanError,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Hint returned when /predict receives no usable payload
const PREDICT_PAYLOAD_HINT: &str =
    "Request must contain JSON (Content-Type: application/json) or form data.";

/// Hint returned when /report receives no usable payload
const REPORT_PAYLOAD_HINT: &str =
    "Please POST JSON or form data with the same payload as /predict.";

/// Shared application state
pub struct AppState {
    pub planner: Planner,
    pub health_registry: HealthRegistry,
    pub metrics: PlannerMetrics,
}

impl AppState {
    pub fn new(planner: Planner, health_registry: HealthRegistry, metrics: PlannerMetrics) -> Self {
        Self {
            planner,
            health_registry,
            metrics,
        }
    }
}

/// Pull a key/value payload out of the request. JSON object bodies,
/// urlencoded forms and raw JSON text all work; anything else (including
/// an empty object) yields None.
fn extract_payload(headers: &HeaderMap, body: &Bytes) -> Option<Map<String, Value>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let payload = if content_type.starts_with("application/json") {
        serde_json::from_slice::<Value>(body).ok()
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .ok()
            .map(|pairs| {
                Value::Object(
                    pairs
                        .into_iter()
                        .map(|(key, value)| (key, Value::String(value)))
                        .collect(),
                )
            })
    } else if !body.is_empty() {
        // No recognized content type; a raw JSON body still counts
        serde_json::from_slice::<Value>(body).ok()
    } else {
        None
    };

    match payload {
        Some(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

/// Build the `{"error": ..., "details": ...}` body every failure uses
fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    let mut body = serde_json::json!({ "error": error });
    if let Some(details) = details {
        body["details"] = Value::String(details);
    }
    (status, Json(body)).into_response()
}

/// Map a plan error onto the wire, counting client errors as validation
/// failures (prediction errors are already counted inside the planner)
fn plan_error_response(state: &AppState, error: &PlanError) -> Response {
    let status = match error.class() {
        ErrorClass::Client => {
            state.metrics.inc_validation_errors();
            StatusCode::BAD_REQUEST
        }
        ErrorClass::Server => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, &error.to_string(), error.details())
}

fn compute_plan(state: &AppState, payload: &Map<String, Value>) -> Result<(Profile, Plan), PlanError> {
    let profile = Profile::from_payload(payload)?;
    let plan = state.planner.plan(&profile)?;
    Ok((profile, plan))
}

/// Service banner
async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Diet & Exercise API running. Use POST /predict with JSON."
    }))
}

/// Compute a plan and return it as JSON
async fn predict(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(payload) = extract_payload(&headers, &body) else {
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            PREDICT_PAYLOAD_HINT,
            None,
        );
    };

    match compute_plan(&state, &payload) {
        Ok((_profile, plan)) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => plan_error_response(&state, &e),
    }
}

/// Compute a plan and return it as a downloadable text report
async fn report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(payload) = extract_payload(&headers, &body) else {
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            REPORT_PAYLOAD_HINT,
            None,
        );
    };

    match compute_plan(&state, &payload) {
        Ok((profile, plan)) => {
            let text = render_report(&profile, &plan);
            state.metrics.inc_reports_generated();
            (
                StatusCode::OK,
                [
                    (
                        header::CONTENT_TYPE,
                        "text/plain; charset=utf-8".to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{REPORT_FILENAME}\""),
                    ),
                ],
                text,
            )
                .into_response()
        }
        Err(e) => plan_error_response(&state, &e),
    }
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/report", post(report))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
