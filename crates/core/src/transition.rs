// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The publication state machine.
//!
//! `plan_transition` is a pure function from the loaded disruption, the
//! requested action and the acting identity to a transition plan. The
//! authorization rule is embedded in the table: whether a publish merges
//! immediately or only advances to a pending-approval status depends on
//! the actor's publish privilege. Ownership is checked before any state
//! change, so a `Forbidden` outcome can never leave a partial write.

use crate::action::PublishAction;
use crate::error::CoreError;
use crate::state::{LoadedDisruption, OverlayEffect, TransitionPlan};
use tds_domain::{Disruption, PublishStatus};
use tds_history::{Actor, new_entry};

/// Checks that the actor may operate on this disruption at all.
///
/// Operator-authored disruptions require the acting operator's identity
/// to match the authoring operator.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` on an organisation or operator
/// ownership mismatch.
pub fn ensure_ownership(canonical: &Disruption, actor: &Actor) -> Result<(), CoreError> {
    if actor.org_id != canonical.org_id {
        return Err(CoreError::Forbidden {
            reason: format!(
                "actor belongs to organisation '{}', disruption to '{}'",
                actor.org_id, canonical.org_id
            ),
        });
    }
    if actor.is_operator_user
        && let Some(owner) = &canonical.created_by_operator_org_id
        && actor.operator_org_id.as_ref() != Some(owner)
    {
        return Err(CoreError::Forbidden {
            reason: format!("disruption is owned by operator organisation '{owner}'"),
        });
    }
    Ok(())
}

/// Plans a workflow transition without performing it.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` when the actor may not act on this
/// disruption or lacks the privilege the action requires, and
/// `CoreError::InvalidTransition` when the action is not valid from the
/// current status.
pub fn plan_transition(
    loaded: &LoadedDisruption,
    action: PublishAction,
    actor: &Actor,
) -> Result<TransitionPlan, CoreError> {
    ensure_ownership(&loaded.canonical, actor)?;

    let current = loaded.effective().publish_status;
    let staff = actor.can_publish();
    // Posts are only ever handed over on a privileged publish of a
    // non-template disruption.
    let handoff = staff && !loaded.canonical.template;

    let invalid = || CoreError::InvalidTransition {
        from: current.as_str().to_string(),
        action,
    };
    let needs_staff = |what: &str| CoreError::Forbidden {
        reason: format!("only staff may {what}"),
    };

    if current.is_terminal() && action != PublishAction::Delete {
        return Err(invalid());
    }

    let plan = match (current, action) {
        (PublishStatus::Draft, PublishAction::Submit) => {
            if staff {
                TransitionPlan {
                    new_status: PublishStatus::Published,
                    effect: OverlayEffect::None,
                    handoff_posts: handoff,
                }
            } else {
                TransitionPlan {
                    new_status: PublishStatus::PendingApproval,
                    effect: OverlayEffect::None,
                    handoff_posts: false,
                }
            }
        }
        (PublishStatus::PendingApproval, PublishAction::Approve) => {
            if !staff {
                return Err(needs_staff("approve a submission"));
            }
            TransitionPlan {
                new_status: PublishStatus::Published,
                effect: OverlayEffect::None,
                handoff_posts: handoff,
            }
        }
        (PublishStatus::PendingApproval, PublishAction::Reject) => {
            if !staff {
                return Err(needs_staff("reject a submission"));
            }
            TransitionPlan {
                new_status: PublishStatus::Rejected,
                effect: OverlayEffect::None,
                handoff_posts: false,
            }
        }
        (PublishStatus::Published, PublishAction::StartEdit) => TransitionPlan {
            new_status: PublishStatus::Editing,
            effect: OverlayEffect::Create,
            handoff_posts: false,
        },
        (PublishStatus::Editing, PublishAction::SubmitEdit) => TransitionPlan {
            new_status: PublishStatus::PendingAndEditing,
            effect: OverlayEffect::None,
            handoff_posts: false,
        },
        (
            PublishStatus::Editing | PublishStatus::PendingAndEditing,
            PublishAction::PublishEdit,
        ) => {
            if staff {
                TransitionPlan {
                    new_status: PublishStatus::Published,
                    effect: OverlayEffect::Merge,
                    handoff_posts: handoff,
                }
            } else {
                // The overlay is retained, not merged; it now awaits
                // staff approval.
                TransitionPlan {
                    new_status: PublishStatus::EditPendingApproval,
                    effect: OverlayEffect::None,
                    handoff_posts: false,
                }
            }
        }
        (
            PublishStatus::EditPendingApproval,
            PublishAction::Approve | PublishAction::PublishEdit,
        ) => {
            if !staff {
                return Err(needs_staff("approve a pending edit"));
            }
            TransitionPlan {
                new_status: PublishStatus::Published,
                effect: OverlayEffect::Merge,
                handoff_posts: handoff,
            }
        }
        (PublishStatus::EditPendingApproval, PublishAction::Reject) => {
            if !staff {
                return Err(needs_staff("reject a pending edit"));
            }
            // Rejecting an edit discards the overlay; the published
            // canonical record stands.
            TransitionPlan {
                new_status: PublishStatus::Published,
                effect: OverlayEffect::Discard,
                handoff_posts: false,
            }
        }
        (
            PublishStatus::Editing
            | PublishStatus::PendingAndEditing
            | PublishStatus::EditPendingApproval,
            PublishAction::CancelEdit,
        ) => TransitionPlan {
            new_status: PublishStatus::Published,
            effect: OverlayEffect::Discard,
            handoff_posts: false,
        },
        (_, PublishAction::Delete) => {
            if !staff {
                return Err(needs_staff("delete a disruption"));
            }
            TransitionPlan {
                new_status: current,
                effect: OverlayEffect::DeleteAll,
                handoff_posts: false,
            }
        }
        _ => return Err(invalid()),
    };

    Ok(plan)
}

/// Materializes an edit overlay from a published canonical record.
///
/// The overlay is a deep copy with an updated status and an appended
/// history entry describing the mutation that triggered the edit. Called
/// only when no overlay exists yet and a mutation is requested against a
/// published disruption.
#[must_use]
pub fn begin_edit(
    canonical: &Disruption,
    actor: &Actor,
    items: Vec<String>,
    now: &str,
) -> Disruption {
    let new_status = if canonical.publish_status == PublishStatus::PendingApproval {
        PublishStatus::PendingAndEditing
    } else {
        PublishStatus::Editing
    };

    let mut overlay = canonical.clone();
    overlay.publish_status = new_status;
    overlay.history.push(new_entry(items, actor, new_status, now));
    overlay.last_updated = now.to_string();
    overlay
}
