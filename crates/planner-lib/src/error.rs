//! Error taxonomy for plan computation
//!
//! Only validation failures and primary-model/arithmetic failures cross the
//! engine boundary. Extended-model failures are absorbed internally by the
//! rule-based fallback and never surface to the caller.

use thiserror::Error;

/// Coarse classification a transport adapter maps to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent bad input and can correct it.
    Client,
    /// Engine-side failure; retrying with the same input will not help.
    Server,
}

/// Errors surfaced by the plan engine.
///
/// Display strings are the stable boundary messages; diagnostic detail
/// lives in [`PlanError::details`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// Required profile fields absent from the request payload.
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Fields present but not coercible to their expected types.
    #[error("invalid field types")]
    InvalidFieldTypes(Vec<String>),

    /// The primary diet-style model failed. No rule-based fallback exists
    /// for diet style, so this propagates.
    #[error("model prediction failed")]
    Prediction(anyhow::Error),

    /// Metabolic arithmetic produced a non-finite value.
    #[error("failed to compute metabolic values")]
    Computation(String),
}

impl PlanError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingFields(_) | Self::InvalidFieldTypes(_) => ErrorClass::Client,
            Self::Prediction(_) | Self::Computation(_) => ErrorClass::Server,
        }
    }

    /// Diagnostic detail suitable for an error response body.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::MissingFields(_) => None,
            Self::InvalidFieldTypes(fields) => Some(fields.join("; ")),
            Self::Prediction(cause) => Some(format!("{cause:#}")),
            Self::Computation(detail) => Some(detail.clone()),
        }
    }
}
