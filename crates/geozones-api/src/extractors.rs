//! # Request Extractors
//!
//! Validated-JSON extraction shared by every mutating handler. Handlers take
//! `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_validated_json`], which normalizes body parse failures and
//! business-rule violations to 422 responses.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request types that carry their own field-level validation rules.
pub trait Validate {
    /// Check field-level invariants, returning a human-readable message on
    /// the first violation.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON extraction result and run the payload's validation.
///
/// Parse failures become [`AppError::BadRequest`] and validation failures
/// become [`AppError::Validation`]; both render as 422.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(payload) = body.map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;
    payload.validate().map_err(AppError::Validation)?;
    Ok(payload)
}
