//! HTTP service for the diet and exercise planner
//!
//! Exposes plan computation, report download, health probes and
//! Prometheus metrics over axum. The binary in `main.rs` wires the
//! model bundles and configuration into this router.

pub mod api;
pub mod config;
