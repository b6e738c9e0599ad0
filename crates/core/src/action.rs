// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A publish action represents actor intent as data only.
///
/// Actions are the only way to request a status transition. The mapping
/// from `(current status, action, actor privilege)` to an outcome lives
/// in the transition planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// Submit a draft: direct publish for staff, review queue otherwise.
    Submit,
    /// Approve a pending submission or a pending edit (staff only).
    Approve,
    /// Reject a pending submission or a pending edit (staff only).
    Reject,
    /// Start editing a published disruption, materializing an overlay.
    StartEdit,
    /// Submit an in-progress edit for the next review stage.
    SubmitEdit,
    /// Publish an edit: merge for staff, approval queue otherwise.
    PublishEdit,
    /// Abandon the in-progress edit, keeping the canonical record.
    CancelEdit,
    /// Remove the disruption entirely (staff only).
    Delete,
}
