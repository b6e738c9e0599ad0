// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Index allocation for consequences and social media posts.
//!
//! Indices are unique within a disruption and never reused while the
//! entry holding them is live: the next free index is `max + 1`, never a
//! count. Both helpers are pure.

use crate::error::DomainError;

/// The most consequences a single disruption may carry.
pub const MAX_CONSEQUENCES: usize = 10;

/// Returns the next free index given the indices currently in use.
///
/// `max(existing) + 1`, or 0 when no indices exist. Removal of a lower
/// index never causes reuse.
#[must_use]
pub fn next_index<I>(existing: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    existing.into_iter().max().map_or(0, |max| max + 1)
}

/// Enforces the per-disruption consequence capacity.
///
/// Only a new entry counts against capacity; editing an entry already
/// holding an index never fails here.
///
/// # Errors
///
/// Returns `DomainError::TooManyConsequences` if the incoming entry is
/// new and the disruption is already at capacity.
pub fn assert_capacity(current_count: usize, incoming_is_new: bool) -> Result<(), DomainError> {
    if incoming_is_new && current_count >= MAX_CONSEQUENCES {
        return Err(DomainError::TooManyConsequences {
            max: MAX_CONSEQUENCES,
        });
    }
    Ok(())
}
