// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! This is the taxonomy callers program against. `ValidationFailed` is
//! recoverable and carries field-level detail for re-display;
//! `TooManyConsequences` and `Forbidden` are recoverable but terminal
//! for the attempted action; `NotFound` and `StorageFailure` are fatal
//! to the request.

use thiserror::Error;

use tds_core::CoreError;
use tds_domain::DomainError;
use tds_persistence::PersistenceError;

/// API-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The disruption (or its overlay) does not exist for the given
    /// id and organisation.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The actor lacks the privilege, or the operator ownership does
    /// not match. Raised before any state change.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The consequence capacity invariant was violated.
    #[error("A disruption may have at most {max} consequences")]
    TooManyConsequences { max: usize },

    /// A payload failed schema or business-rule validation.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// A transaction could not commit. No partial state remains.
    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::TooManyConsequences { max } => Self::TooManyConsequences { max },
            DomainError::ValidationFailed { field, message } => {
                Self::ValidationFailed { field, message }
            }
            DomainError::ConsequenceNotFound { .. } | DomainError::SocialMediaPostNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            other => Self::ValidationFailed {
                field: String::from("payload"),
                message: other.to_string(),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Forbidden { reason } => Self::Forbidden(reason),
            CoreError::InvalidTransition { .. } => Self::ValidationFailed {
                field: String::from("publish_status"),
                message: err.to_string(),
            },
            CoreError::DomainViolation(domain_err) => domain_err.into(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(what) => Self::NotFound(what),
            other => Self::StorageFailure(other.to_string()),
        }
    }
}
