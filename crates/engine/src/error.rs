//! The module contains the errors the engine can raise.
//!
//! The engine is pure: every error here is detected locally, before any
//! request reaches the backend.

use thiserror::Error;

use crate::SupplyStatus;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not permitted: {0}")]
    Forbidden(String),
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: SupplyStatus,
        to: SupplyStatus,
    },
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
