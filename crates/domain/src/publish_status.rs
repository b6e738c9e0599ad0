// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Publish status tracking for disruptions.
//!
//! This module defines the publication states a disruption moves through
//! and the predicates the state machine consults. Transitions themselves
//! are actor-gated and live in the core crate; the system never advances
//! status based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Publication states for a disruption or template.
///
/// Status is tracked per disruption record. A record "in edit" exists
/// twice: the canonical row keeps its published status while the overlay
/// row carries one of the in-edit statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    /// Newly authored, never submitted or published.
    Draft,
    /// Submitted by a non-privileged author, awaiting staff approval.
    PendingApproval,
    /// Live. The canonical row is authoritative and publicly visible.
    Published,
    /// A published disruption with an in-progress edit overlay.
    Editing,
    /// A pending-approval disruption with an in-progress edit overlay.
    PendingAndEditing,
    /// An edit overlay submitted for staff approval.
    EditPendingApproval,
    /// Rejected by staff. Terminal.
    Rejected,
}

impl PublishStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Published => "published",
            Self::Editing => "editing",
            Self::PendingAndEditing => "pending_and_editing",
            Self::EditPendingApproval => "edit_pending_approval",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPublishStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_approval" => Ok(Self::PendingApproval),
            "published" => Ok(Self::Published),
            "editing" => Ok(Self::Editing),
            "pending_and_editing" => Ok(Self::PendingAndEditing),
            "edit_pending_approval" => Ok(Self::EditPendingApproval),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidPublishStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    /// Returns true if this status marks an in-progress edit overlay.
    #[must_use]
    pub const fn is_in_edit(&self) -> bool {
        matches!(
            self,
            Self::Editing | Self::PendingAndEditing | Self::EditPendingApproval
        )
    }

    /// Returns true if a disruption in this status may be mutated by its
    /// author without materializing an overlay first.
    #[must_use]
    pub const fn allows_direct_mutation(&self) -> bool {
        matches!(self, Self::Draft | Self::Editing | Self::PendingAndEditing)
    }
}

impl FromStr for PublishStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
