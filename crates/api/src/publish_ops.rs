// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workflow operations: the publish, reject, cancel and delete paths.
//!
//! Each operation plans its transition through the pure state machine,
//! applies the planned overlay effect through the persistence layer,
//! and appends exactly one history entry describing the transition.
//! Outbound side effects happen after the write: pending posts are
//! handed to the publisher only on a privileged publish of a
//! non-template disruption, and approver notifications are
//! fire-and-forget.

use tracing::{debug, info, warn};

use tds_core::{OverlayEffect, PublishAction, plan_transition};
use tds_domain::{Disruption, PublishStatus, SocialMediaPostStatus, validate_disruption};
use tds_history::{Actor, creation_items, diff_snapshots, new_entry};
use tds_persistence::{Target, WriteOp};

use crate::error::ApiError;
use crate::{Api, now_rfc3339};

impl Api {
    /// Publishes a draft, or approves a pending submission.
    ///
    /// A staff actor publishes directly; a non-staff actor's draft
    /// advances to `pending_approval` and approvers are notified. The
    /// single history entry appended here is the record's creation
    /// entry: the audit trail starts when a record first leaves draft
    /// authoring.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the actor may not perform
    /// the step, [`ApiError::ValidationFailed`] when the record is not
    /// in a publishable state.
    pub fn publish_draft(
        &mut self,
        id: &str,
        org_id: &str,
        actor: &Actor,
    ) -> Result<(), ApiError> {
        let now = now_rfc3339()?;
        let loaded = self.persistence.load(id, org_id)?;

        let action = match loaded.effective().publish_status {
            PublishStatus::Draft => PublishAction::Submit,
            PublishStatus::PendingApproval => PublishAction::Approve,
            other => {
                return Err(ApiError::ValidationFailed {
                    field: String::from("publish_status"),
                    message: format!("a {other} disruption has already left draft authoring"),
                });
            }
        };
        let plan = plan_transition(&loaded, action, actor)?;

        let mut canonical = loaded.canonical;
        canonical.publish_status = plan.new_status;
        canonical.history.push(new_entry(
            creation_items(canonical.template, plan.new_status),
            actor,
            plan.new_status,
            &now,
        ));
        canonical.last_updated = now;
        validate_disruption(&canonical)?;

        info!(id, org_id, new_status = %plan.new_status, "Publishing draft");
        self.persistence.commit(
            Target::Canonical,
            &[WriteOp::UpsertDisruption(Box::new(canonical.clone()))],
        )?;

        if plan.new_status == PublishStatus::PendingApproval {
            self.notify_pending(&canonical, actor);
        }
        if plan.handoff_posts {
            self.handoff_posts(&mut canonical, actor)?;
        }
        Ok(())
    }

    /// Publishes (or submits) an in-progress edit.
    ///
    /// A staff actor merges the overlay into the canonical record,
    /// bumping the version. A non-staff actor only advances the overlay
    /// towards approval: from `editing` to `pending_and_editing`, from
    /// `pending_and_editing` to `edit_pending_approval`. The appended
    /// entry carries the diff of the overlay against the last published
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when no edit is in progress,
    /// [`ApiError::Forbidden`] on a privilege or ownership mismatch.
    pub fn publish_edit(&mut self, id: &str, org_id: &str, actor: &Actor) -> Result<(), ApiError> {
        let now = now_rfc3339()?;
        let loaded = self.persistence.load(id, org_id)?;

        let action = if !actor.can_publish()
            && loaded.effective().publish_status == PublishStatus::Editing
        {
            PublishAction::SubmitEdit
        } else {
            PublishAction::PublishEdit
        };
        let plan = plan_transition(&loaded, action, actor)?;

        let Some(overlay) = loaded.overlay else {
            return Err(ApiError::NotFound(format!(
                "no edit in progress for disruption '{id}'"
            )));
        };
        validate_disruption(&overlay)?;
        let mut items = diff_snapshots(&loaded.canonical, &overlay);

        match plan.effect {
            OverlayEffect::Merge => {
                if items.is_empty() {
                    items.push(String::from("Disruption edited and published"));
                }
                let entry = new_entry(items, actor, PublishStatus::Published, &now);
                info!(id, org_id, "Publishing edit");
                let mut merged = self.persistence.merge_overlay(id, org_id, &now, Some(entry))?;
                if plan.handoff_posts {
                    self.handoff_posts(&mut merged, actor)?;
                }
            }
            OverlayEffect::None => {
                if items.is_empty() {
                    items.push(String::from("Disruption submitted for review"));
                }
                let mut overlay = overlay;
                overlay.publish_status = plan.new_status;
                overlay
                    .history
                    .push(new_entry(items, actor, plan.new_status, &now));
                overlay.last_updated = now;
                info!(id, org_id, new_status = %plan.new_status, "Submitting edit for approval");
                self.persistence.commit(
                    Target::Overlay,
                    &[WriteOp::UpsertDisruption(Box::new(overlay.clone()))],
                )?;
                self.notify_pending(&overlay, actor);
            }
            _ => {
                return Err(ApiError::StorageFailure(String::from(
                    "unexpected overlay effect for a publish-edit transition",
                )));
            }
        }
        Ok(())
    }

    /// Rejects a pending submission or a pending edit.
    ///
    /// A first-round submission lands in the terminal `rejected` state.
    /// Rejecting a pending edit discards the overlay; the published
    /// canonical record stands, annotated with the rejection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the actor is not staff,
    /// [`ApiError::ValidationFailed`] when nothing is awaiting approval.
    pub fn reject_disruption(
        &mut self,
        id: &str,
        org_id: &str,
        actor: &Actor,
    ) -> Result<(), ApiError> {
        let now = now_rfc3339()?;
        let loaded = self.persistence.load(id, org_id)?;
        let plan = plan_transition(&loaded, PublishAction::Reject, actor)?;

        let mut canonical = loaded.canonical;
        match plan.effect {
            OverlayEffect::Discard => {
                info!(id, org_id, "Rejecting pending edit");
                canonical.history.push(new_entry(
                    vec![String::from("Disruption edit rejected")],
                    actor,
                    plan.new_status,
                    &now,
                ));
                canonical.last_updated = now;
                self.persistence
                    .discard_overlay_with_canonical(id, org_id, &canonical)?;
            }
            OverlayEffect::None => {
                info!(id, org_id, "Rejecting submission");
                canonical.publish_status = plan.new_status;
                canonical.history.push(new_entry(
                    creation_items(canonical.template, plan.new_status),
                    actor,
                    plan.new_status,
                    &now,
                ));
                canonical.last_updated = now;
                self.persistence.commit(
                    Target::Canonical,
                    &[WriteOp::UpsertDisruption(Box::new(canonical))],
                )?;
            }
            _ => {
                return Err(ApiError::StorageFailure(String::from(
                    "unexpected overlay effect for a rejection",
                )));
            }
        }
        Ok(())
    }

    /// Abandons an in-progress edit. The overlay is discarded (its own
    /// entries go with it) and the canonical record is annotated with
    /// the cancellation, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] when no edit is in
    /// progress, [`ApiError::Forbidden`] on an ownership mismatch.
    pub fn cancel_edit(&mut self, id: &str, org_id: &str, actor: &Actor) -> Result<(), ApiError> {
        let now = now_rfc3339()?;
        let loaded = self.persistence.load(id, org_id)?;
        let plan = plan_transition(&loaded, PublishAction::CancelEdit, actor)?;

        let mut canonical = loaded.canonical;
        canonical.history.push(new_entry(
            vec![String::from("Disruption edit cancelled")],
            actor,
            plan.new_status,
            &now,
        ));
        canonical.last_updated = now;
        info!(id, org_id, "Cancelling edit");
        self.persistence
            .discard_overlay_with_canonical(id, org_id, &canonical)?;
        Ok(())
    }

    /// Deletes a disruption and everything attached to it, overlay
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the actor is not staff,
    /// [`ApiError::NotFound`] when the disruption does not exist.
    pub fn delete_disruption(
        &mut self,
        id: &str,
        org_id: &str,
        actor: &Actor,
    ) -> Result<(), ApiError> {
        let loaded = self.persistence.load(id, org_id)?;
        plan_transition(&loaded, PublishAction::Delete, actor)?;
        info!(id, org_id, "Deleting disruption");
        self.persistence.delete_disruption(id, org_id)?;
        Ok(())
    }

    /// Hands the pending posts of a freshly published disruption to the
    /// outbound publisher and records the outcome on each post. A
    /// publisher failure marks the posts rejected but never unwinds the
    /// publish itself.
    fn handoff_posts(
        &mut self,
        canonical: &mut Disruption,
        actor: &Actor,
    ) -> Result<(), ApiError> {
        let pending = canonical.pending_posts();
        if pending.is_empty() {
            return Ok(());
        }

        let outcome = self
            .publisher
            .publish(&pending, &canonical.org_id, actor.can_publish());
        let delivered_status = match outcome {
            Ok(()) => {
                debug!(id = %canonical.id, post_count = pending.len(), "Posts handed to publisher");
                SocialMediaPostStatus::Successful
            }
            Err(err) => {
                warn!(id = %canonical.id, error = %err, "Outbound post publishing failed");
                SocialMediaPostStatus::Rejected
            }
        };
        for post in &mut canonical.social_media_posts {
            if post.status == SocialMediaPostStatus::Pending {
                post.status = delivered_status;
            }
        }
        self.persistence.commit(
            Target::Canonical,
            &[WriteOp::UpsertDisruption(Box::new(canonical.clone()))],
        )?;
        Ok(())
    }

    /// Notifies approvers of a submission. Failures are logged and
    /// swallowed; a notification never rolls back a write.
    fn notify_pending(&self, disruption: &Disruption, actor: &Actor) {
        if let Err(err) =
            self.notifier
                .notify_submission(&disruption.id, &disruption.org_id, &actor.name)
        {
            warn!(id = %disruption.id, error = %err, "Submission notification failed");
        }
    }
}
