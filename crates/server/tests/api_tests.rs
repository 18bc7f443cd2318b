//! Integration tests for the planner API endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use planner_lib::{
    health::{components, HealthRegistry},
    models::FeatureVector,
    observability::PlannerMetrics,
    predictor::{DietStyleModel, PredictionAdapter},
    Planner,
};
use planner_server::api::{create_router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

struct StubDiet;

impl DietStyleModel for StubDiet {
    fn predict_diet_style(&self, _features: &FeatureVector) -> anyhow::Result<String> {
        Ok("Balanced".to_string())
    }

    fn model_version(&self) -> &str {
        "test"
    }
}

struct BrokenDiet;

impl DietStyleModel for BrokenDiet {
    fn predict_diet_style(&self, _features: &FeatureVector) -> anyhow::Result<String> {
        anyhow::bail!("output tensor missing")
    }

    fn model_version(&self) -> &str {
        "test"
    }
}

async fn setup_app_with(diet: Arc<dyn DietStyleModel>) -> (Router, Arc<AppState>) {
    let health_registry = HealthRegistry::new();
    health_registry.register(components::PRIMARY_MODEL).await;
    health_registry.register(components::EXTENDED_MODEL).await;

    let planner = Planner::new(PredictionAdapter::new(diet, None));
    let metrics = PlannerMetrics::new();
    let state = Arc::new(AppState::new(planner, health_registry, metrics));
    let router = create_router(state.clone());

    (router, state)
}

async fn setup_test_app() -> (Router, Arc<AppState>) {
    setup_app_with(Arc::new(StubDiet)).await
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn reference_payload() -> serde_json::Value {
    serde_json::json!({
        "gender": "Male",
        "age": 25,
        "height_cm": 180,
        "weight_kg": 75,
        "activity": "Medium",
        "goal": "Maintain"
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_index_returns_banner() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Diet & Exercise API running. Use POST /predict with JSON."
    );
}

#[tokio::test]
async fn test_predict_computes_reference_plan() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json("/predict", reference_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let plan = body_json(response).await;
    assert_eq!(plan["bmi"], 23.15);
    assert_eq!(plan["diet_style"], "Balanced");
    assert_eq!(plan["calorie_range"]["low"], 2620);
    assert_eq!(plan["calorie_range"]["high"], 2820);
    assert_eq!(plan["macros_g"]["protein_g"], 170);
    assert_eq!(plan["macros_g"]["carbs_g"], 306);
    assert_eq!(plan["macros_g"]["fats_g"], 90);
    assert_eq!(plan["meal_suggestions"].as_array().unwrap().len(), 4);
    assert_eq!(plan["exercise_suggestions"].as_array().unwrap().len(), 5);
    assert!(plan["exercise_note"].as_str().unwrap().starts_with("These are guideline"));
    assert_eq!(plan["raw"]["bmr"], 1755);
    assert_eq!(plan["raw"]["tdee"], 2720);
}

#[tokio::test]
async fn test_predict_missing_fields_in_declaration_order() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json("/predict", serde_json::json!({ "gender": "Male" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "missing fields: age, height_cm, weight_kg, activity, goal"
    );
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_predict_invalid_types_includes_details() {
    let (app, _state) = setup_test_app().await;

    let mut payload = reference_payload();
    payload["age"] = serde_json::json!("twenty-five");

    let response = app.oneshot(post_json("/predict", payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid field types");
    assert!(body["details"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn test_predict_accepts_form_payload() {
    let (app, _state) = setup_test_app().await;

    let form = "gender=Male&age=25&height_cm=180&weight_kg=75&activity=Medium&goal=Maintain";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let plan = body_json(response).await;
    assert_eq!(plan["bmi"], 23.15);
    assert_eq!(plan["calorie_range"]["low"], 2620);
}

#[tokio::test]
async fn test_predict_accepts_raw_json_without_content_type() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from(reference_payload().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let plan = body_json(response).await;
    assert_eq!(plan["bmi"], 23.15);
}

#[tokio::test]
async fn test_predict_empty_body_is_unsupported_media() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Request must contain JSON (Content-Type: application/json) or form data."
    );
}

#[tokio::test]
async fn test_predict_empty_object_is_unsupported_media() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json("/predict", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_predict_model_failure_is_server_error() {
    let (app, _state) = setup_app_with(Arc::new(BrokenDiet)).await;

    let response = app
        .oneshot(post_json("/predict", reference_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "model prediction failed");
    assert!(body["details"].as_str().unwrap().contains("output tensor missing"));
}

#[tokio::test]
async fn test_report_returns_text_attachment() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json("/report", reference_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));

    let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert_eq!(
        disposition.to_str().unwrap(),
        "attachment; filename=\"diet_exercise_report.txt\""
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.starts_with("SMART DIET & EXERCISE PLAN\n"));
    assert!(text.contains("Gender: Male\n"));
    assert!(text.contains("BMI: 23.15\n"));
    assert!(text.contains("Calorie range: 2620 - 2820 kcal"));
    assert!(text.contains("- Breakfast:"));
}

#[tokio::test]
async fn test_report_empty_payload_uses_report_hint() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/report")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Please POST JSON or form data with the same payload as /predict."
    );
}

#[tokio::test]
async fn test_report_validation_failure_is_json_error() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json("/report", serde_json::json!({ "age": 30 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "missing fields: gender, height_cm, weight_kg, activity, goal"
    );
}

#[tokio::test]
async fn test_healthz_returns_ok_when_healthy() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert!(health["components"]["primary_model"].is_object());
    assert!(health["components"]["extended_model"].is_object());
}

#[tokio::test]
async fn test_healthz_returns_503_when_unhealthy() {
    let (app, state) = setup_test_app().await;

    state
        .health_registry
        .set_unhealthy(components::PRIMARY_MODEL, "Model file unreadable")
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let health = body_json(response).await;
    assert_eq!(health["status"], "unhealthy");
}

#[tokio::test]
async fn test_readyz_reflects_readiness() {
    let (app, state) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.health_registry.set_ready(true).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let readiness = body_json(response).await;
    assert_eq!(readiness["ready"], true);
}

#[tokio::test]
async fn test_metrics_endpoint_returns_prometheus_format() {
    let (app, state) = setup_test_app().await;

    // Label a model version as startup does, and generate one plan so
    // counters move
    state.metrics.set_model_version("diet_style", "test");
    let _ = app
        .clone()
        .oneshot(post_json("/predict", reference_payload()))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let metrics_text = String::from_utf8(body.to_vec()).unwrap();

    assert!(metrics_text.contains("diet_planner_plan_latency_seconds"));
    assert!(metrics_text.contains("diet_planner_plans_computed_total"));
    assert!(metrics_text.contains("diet_planner_model_version_info"));
}
