use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tombola_core::error::CoreError;
use tombola_core::prize_rules::PrizeRuleViolation;

use crate::backend::BackendError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tombola_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// One or more violated prize rules, surfaced together.
    #[error("Prize validation failed")]
    Rules(Vec<PrizeRuleViolation>),

    /// An error talking to the upstream raffle backend.
    #[error(transparent)]
    Upstream(#[from] BackendError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Prize rule violations: list every broken rule ---
            AppError::Rules(violations) => {
                let body = json!({
                    "error": "Prize validation failed",
                    "code": "PRIZE_RULE_VIOLATION",
                    "violations": violations.iter().map(violation_json).collect::<Vec<_>>(),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }

            // --- Upstream backend errors ---
            AppError::Upstream(err) => classify_backend_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Serialize a violation as its code plus rule-specific fields and the
/// rendered human-readable message.
fn violation_json(violation: &PrizeRuleViolation) -> serde_json::Value {
    let mut value = serde_json::to_value(violation).unwrap_or_else(|_| json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert("message".to_string(), json!(violation.to_string()));
    }
    value
}

/// Classify an upstream backend error into an HTTP status, code, and message.
///
/// - Upstream 404s pass through as 404.
/// - Everything else maps to 502 with a sanitized message.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Api { status: 404, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found upstream".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Upstream backend error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The raffle backend request failed".to_string(),
            )
        }
    }
}
