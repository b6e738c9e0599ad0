// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Actor identity and the history diff engine.
//!
//! Every successful workflow transition appends exactly one
//! `HistoryEntry` to a disruption. The diff engine here decides what the
//! entry says; it never writes anything itself.

mod diff;

#[cfg(test)]
mod tests;

pub use diff::{creation_items, diff_snapshots, humanise_consequence_type};

use tds_domain::{HistoryEntry, PublishStatus};

/// The entity performing a workflow action.
///
/// Resolved by the identity collaborator at the boundary and passed
/// explicitly into every core operation. The core never reads ambient
/// session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Display name, recorded on history entries.
    pub name: String,
    /// The organisation the actor belongs to.
    pub org_id: String,
    /// True for privileged approvers ("staff").
    pub is_org_staff: bool,
    /// True when the actor represents an external operator.
    pub is_operator_user: bool,
    /// The operator organisation the actor represents, when any.
    pub operator_org_id: Option<String>,
}

impl Actor {
    /// Creates a new staff actor for the given organisation.
    #[must_use]
    pub fn staff(name: &str, org_id: &str) -> Self {
        Self {
            name: name.to_string(),
            org_id: org_id.to_string(),
            is_org_staff: true,
            is_operator_user: false,
            operator_org_id: None,
        }
    }

    /// Creates a new non-privileged author for the given organisation.
    #[must_use]
    pub fn author(name: &str, org_id: &str) -> Self {
        Self {
            name: name.to_string(),
            org_id: org_id.to_string(),
            is_org_staff: false,
            is_operator_user: false,
            operator_org_id: None,
        }
    }

    /// Creates an external operator actor.
    #[must_use]
    pub fn operator(name: &str, org_id: &str, operator_org_id: &str) -> Self {
        Self {
            name: name.to_string(),
            org_id: org_id.to_string(),
            is_org_staff: false,
            is_operator_user: true,
            operator_org_id: Some(operator_org_id.to_string()),
        }
    }

    /// Whether this actor may publish unilaterally, without a further
    /// approval step.
    #[must_use]
    pub const fn can_publish(&self) -> bool {
        self.is_org_staff
    }
}

/// Wraps diff items into a history entry attributed to an actor.
///
/// The entry records the status that resulted from the change and the
/// moment it was recorded. Entries are append-only: callers push the
/// result onto a disruption's history and never rewrite what is there.
#[must_use]
pub fn new_entry(
    items: Vec<String>,
    actor: &Actor,
    status: PublishStatus,
    datetime: &str,
) -> HistoryEntry {
    HistoryEntry {
        items,
        user: actor.name.clone(),
        status,
        datetime: datetime.to_string(),
    }
}
