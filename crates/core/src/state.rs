// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tds_domain::{Disruption, PublishStatus};

/// A disruption as loaded from storage: the canonical record plus its
/// edit overlay, when one exists.
///
/// This is the single place "what is the current working snapshot"
/// is answered; every read-modify-write operation goes through
/// [`LoadedDisruption::effective`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDisruption {
    /// The authoritative record.
    pub canonical: Disruption,
    /// The in-progress edit, when one has been materialized.
    pub overlay: Option<Disruption>,
}

impl LoadedDisruption {
    /// Creates a loaded view from a canonical record and optional overlay.
    #[must_use]
    pub const fn new(canonical: Disruption, overlay: Option<Disruption>) -> Self {
        Self { canonical, overlay }
    }

    /// The current working snapshot: the overlay when present, otherwise
    /// the canonical record.
    #[must_use]
    pub fn effective(&self) -> &Disruption {
        self.overlay.as_ref().unwrap_or(&self.canonical)
    }

    /// Whether an edit overlay currently exists. The overlay's existence
    /// is itself meaningful state, not a cache.
    #[must_use]
    pub const fn edit_exists(&self) -> bool {
        self.overlay.is_some()
    }
}

/// What happens to the overlay pair when a transition is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEffect {
    /// No overlay change; the status change applies to the working record
    /// in place.
    None,
    /// Materialize a new overlay as a deep copy of canonical.
    Create,
    /// Replace canonical with the overlay's data and delete the overlay.
    /// Bumps the version.
    Merge,
    /// Delete the overlay, leaving canonical untouched.
    Discard,
    /// Delete the canonical record and any overlay.
    DeleteAll,
}

/// The planned outcome of a workflow transition.
///
/// Planning is pure; the persistence layer applies the effect
/// atomically and the boundary appends the history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    /// The status the working record ends up in.
    pub new_status: PublishStatus,
    /// What happens to the overlay pair.
    pub effect: OverlayEffect,
    /// Whether pending social media posts are handed to the outbound
    /// publisher. True only on a privileged publish of a non-template
    /// disruption, never on cancel or rejection.
    pub handoff_posts: bool,
}
