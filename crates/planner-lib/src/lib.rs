//! Plan-computation engine for the diet and exercise planner
//!
//! This crate provides the core functionality for:
//! - Metabolic calculations (BMI, BMR, TDEE, calorie and macro targets)
//! - Rule-based exercise and meal suggestions with layered overlays
//! - ONNX model inference for diet-style and exercise predictions
//! - Health checks and observability

pub mod categories;
pub mod error;
pub mod health;
pub mod metabolics;
pub mod models;
pub mod observability;
pub mod planner;
pub mod predictor;
pub mod report;
pub mod rules;

pub use error::{ErrorClass, PlanError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{PlannerMetrics, StructuredLogger};
pub use planner::Planner;
