//! Client-side error taxonomy.
//!
//! HTTP statuses are folded into these variants once, close to the wire;
//! everything above works with the taxonomy only. Transition and permission
//! failures detected locally by the engine map into the same variants, so a
//! caller cannot tell whether the refusal came from the engine or the
//! backend.

use engine::{EngineError, SupplyStatus};
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("a user with this email already exists")]
    UserAlreadyExists,
    #[error("no user matches these credentials")]
    UserNotFound,
    #[error("authorization required")]
    Unauthorized,
    #[error("insufficient permissions: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: SupplyStatus,
        to: SupplyStatus,
    },
    #[error("conflicting update: {0}")]
    Conflict(String),
    #[error("server error {status}: {message}")]
    Server {
        status: StatusCode,
        message: String,
    },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(message) | EngineError::InvalidAmount(message) => {
                ApiError::Validation(message)
            }
            EngineError::Forbidden(message) => ApiError::Forbidden(message),
            EngineError::InvalidTransition { from, to } => {
                ApiError::InvalidTransition { from, to }
            }
        }
    }
}

impl ApiError {
    /// `true` for transport and 5xx failures, where a manual retry makes
    /// sense.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server { .. })
    }
}
