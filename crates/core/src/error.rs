// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::action::PublishAction;
use tds_domain::DomainError;

/// Errors that can occur while planning a workflow transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The actor is not permitted to perform this action. Raised before
    /// any state change.
    Forbidden {
        /// Why the action was refused.
        reason: String,
    },
    /// The action is not a valid transition from the current status.
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested action.
        action: PublishAction,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden { reason } => write!(f, "Forbidden: {reason}"),
            Self::InvalidTransition { from, action } => {
                write!(f, "Action {action:?} is not valid from status '{from}'")
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
