// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed schema or business-rule validation.
    ///
    /// Recoverable: the caller re-displays the offending field.
    ValidationFailed {
        /// The field that failed validation.
        field: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// The disruption already holds the maximum number of consequences.
    ///
    /// Distinguished from `ValidationFailed` so the caller can render
    /// a capacity-specific message.
    TooManyConsequences {
        /// The capacity limit that was hit.
        max: usize,
    },
    /// Publish status string is not a recognised status.
    InvalidPublishStatus(String),
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not allowed.
        reason: String,
    },
    /// Severity string is not a recognised severity.
    InvalidSeverity(String),
    /// Vehicle mode string is not a recognised mode.
    InvalidVehicleMode(String),
    /// Direction string is not a recognised direction.
    InvalidDirection(String),
    /// Social media post status string is not recognised.
    InvalidPostStatus(String),
    /// A consequence index referenced an entry that does not exist.
    ConsequenceNotFound {
        /// The disruption the lookup was scoped to.
        disruption_id: String,
        /// The missing index.
        consequence_index: u32,
    },
    /// A social media post index referenced an entry that does not exist.
    SocialMediaPostNotFound {
        /// The disruption the lookup was scoped to.
        disruption_id: String,
        /// The missing index.
        social_media_post_index: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { field, message } => {
                write!(f, "Validation failed for '{field}': {message}")
            }
            Self::TooManyConsequences { max } => {
                write!(f, "A disruption may have at most {max} consequences")
            }
            Self::InvalidPublishStatus(status) => {
                write!(f, "Invalid publish status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidSeverity(severity) => write!(f, "Invalid severity: {severity}"),
            Self::InvalidVehicleMode(mode) => write!(f, "Invalid vehicle mode: {mode}"),
            Self::InvalidDirection(direction) => write!(f, "Invalid direction: {direction}"),
            Self::InvalidPostStatus(status) => {
                write!(f, "Invalid social media post status: {status}")
            }
            Self::ConsequenceNotFound {
                disruption_id,
                consequence_index,
            } => {
                write!(
                    f,
                    "Consequence {consequence_index} not found on disruption {disruption_id}"
                )
            }
            Self::SocialMediaPostNotFound {
                disruption_id,
                social_media_post_index,
            } => {
                write!(
                    f,
                    "Social media post {social_media_post_index} not found on disruption {disruption_id}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
