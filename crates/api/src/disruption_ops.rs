// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authoring operations: overview, consequences and social media posts.
//!
//! Every operation here is a read-modify-write of the current working
//! snapshot. Which record that is, and whether the write lands in the
//! canonical or the overlay store, is decided once in
//! [`Api::apply_mutation`]: drafts are amended in place, records already
//! in edit amend their overlay, and a mutation against a published (or
//! pending-approval) record transparently materializes an overlay first.
//!
//! Mutations in an edit context append their own history entry at
//! mutation time. "Added" items are synthesized here, where the new
//! index is allocated; the diff engine deliberately never derives them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tds_core::{begin_edit, ensure_ownership};
use tds_domain::{
    Consequence, Disruption, DomainError, PublishStatus, SocialMediaPost, ValidityPeriod,
    assert_capacity, next_index, validate_consequence, validate_disruption, validate_post,
};
use tds_history::{Actor, diff_snapshots, humanise_consequence_type, new_entry};
use tds_persistence::{Target, WriteOp};

use crate::error::ApiError;
use crate::{Api, now_rfc3339};

/// The overview field set of a disruption, as submitted by a caller.
///
/// Identity fields (`id`, `display_id`) are included so one payload
/// serves both creation and amendment; everything else a disruption
/// carries (status, version, history, sub-entities) is owned by the
/// service and never accepted from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisruptionInfo {
    pub id: String,
    pub display_id: String,
    pub summary: String,
    pub description: String,
    pub disruption_type: String,
    pub reason: String,
    pub associated_link: Option<String>,
    pub publish_start_date: String,
    pub publish_end_date: Option<String>,
    pub validity: Vec<ValidityPeriod>,
}

fn apply_info(disruption: &mut Disruption, info: &DisruptionInfo) {
    disruption.display_id = info.display_id.clone();
    disruption.summary = info.summary.clone();
    disruption.description = info.description.clone();
    disruption.disruption_type = info.disruption_type.clone();
    disruption.reason = info.reason.clone();
    disruption.associated_link = info.associated_link.clone();
    disruption.publish_start_date = info.publish_start_date.clone();
    disruption.publish_end_date = info.publish_end_date.clone();
    disruption.validity = info.validity.clone();
}

impl Api {
    /// Creates a disruption (or template) from its overview fields, or
    /// amends the overview of an existing one.
    ///
    /// New records start in `draft` with no history; the audit trail
    /// begins when the record first leaves draft authoring. Amending a
    /// published record materializes an edit overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] if the overview fields are
    /// invalid, [`ApiError::Forbidden`] on an ownership mismatch.
    pub fn create_or_update_disruption_info(
        &mut self,
        info: &DisruptionInfo,
        org_id: &str,
        actor: &Actor,
        is_template: bool,
        operator_org_id: Option<&str>,
    ) -> Result<(), ApiError> {
        if self.persistence.try_load(&info.id, org_id)?.is_some() {
            self.apply_mutation(&info.id, org_id, actor, |working| {
                let before = working.clone();
                apply_info(working, info);
                Ok(diff_snapshots(&before, working))
            })?;
            return Ok(());
        }

        let now = now_rfc3339()?;
        let created_by_operator_org_id = operator_org_id.map(str::to_string).or_else(|| {
            if actor.is_operator_user {
                actor.operator_org_id.clone()
            } else {
                None
            }
        });
        let mut disruption = Disruption {
            id: info.id.clone(),
            org_id: org_id.to_string(),
            display_id: String::new(),
            publish_status: PublishStatus::Draft,
            template: is_template,
            version: 0,
            summary: String::new(),
            description: String::new(),
            disruption_type: String::new(),
            reason: String::new(),
            associated_link: None,
            publish_start_date: String::new(),
            publish_end_date: None,
            validity: Vec::new(),
            history: Vec::new(),
            consequences: Vec::new(),
            social_media_posts: Vec::new(),
            created_by_operator_org_id,
            creation_time: now.clone(),
            last_updated: now,
        };
        apply_info(&mut disruption, info);
        validate_disruption(&disruption)?;

        debug!(id = %disruption.id, org_id, is_template, "Creating disruption");
        self.persistence.commit(
            Target::Canonical,
            &[WriteOp::UpsertDisruption(Box::new(disruption))],
        )?;
        Ok(())
    }

    /// Inserts or replaces a consequence and returns the highest
    /// consequence index now in use.
    ///
    /// A new index counts against the per-disruption capacity; replacing
    /// an existing index never does.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TooManyConsequences`] when a new consequence
    /// would exceed capacity, [`ApiError::ValidationFailed`] on an
    /// invalid payload.
    pub fn upsert_consequence(
        &mut self,
        consequence: Consequence,
        org_id: &str,
        actor: &Actor,
    ) -> Result<u32, ApiError> {
        let id = consequence.disruption_id.clone();
        let committed = self.apply_mutation(&id, org_id, actor, |working| {
            let existing = working.consequence_at(consequence.consequence_index);
            let is_new = existing.is_none();
            let changed = existing != Some(&consequence);
            assert_capacity(working.consequences.len(), is_new)?;
            validate_consequence(&consequence)?;

            let humanised = humanise_consequence_type(consequence.detail.type_tag());
            working.put_consequence(consequence);
            let items = if is_new {
                vec![format!("Disruption Consequence - {humanised}: Added")]
            } else if changed {
                vec![format!("Disruption Consequence - {humanised}: Edited")]
            } else {
                Vec::new()
            };
            Ok(items)
        })?;
        Ok(committed.consequence_indices().max().unwrap_or(0))
    }

    /// Removes the consequence holding the given index. The index is
    /// retired, never reallocated while the disruption lives.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no consequence holds the index.
    pub fn remove_consequence(
        &mut self,
        index: u32,
        disruption_id: &str,
        org_id: &str,
        actor: &Actor,
    ) -> Result<(), ApiError> {
        self.apply_mutation(disruption_id, org_id, actor, |working| {
            let Some(existing) = working.consequence_at(index) else {
                return Err(DomainError::ConsequenceNotFound {
                    disruption_id: working.id.clone(),
                    consequence_index: index,
                }
                .into());
            };
            let humanised = humanise_consequence_type(existing.detail.type_tag());
            working.remove_consequence(index);
            Ok(vec![format!(
                "Disruption Consequence - {humanised}: Removed"
            )])
        })?;
        Ok(())
    }

    /// The next free consequence index for a disruption: one past the
    /// highest index ever live, never a reused one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the disruption does not exist.
    pub fn next_consequence_index(&mut self, id: &str, org_id: &str) -> Result<u32, ApiError> {
        let loaded = self.persistence.load(id, org_id)?;
        Ok(next_index(loaded.effective().consequence_indices()))
    }

    /// The next free social media post index for a disruption.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the disruption does not exist.
    pub fn next_post_index(&mut self, id: &str, org_id: &str) -> Result<u32, ApiError> {
        let loaded = self.persistence.load(id, org_id)?;
        Ok(next_index(loaded.effective().post_indices()))
    }

    /// Inserts or replaces a social media post.
    ///
    /// `is_publishing` marks a post being written as part of a publish
    /// action, where the schedule fields may legitimately still be
    /// absent; the schedule requirement is relaxed for that call only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ValidationFailed`] on an invalid payload.
    pub fn upsert_social_media_post(
        &mut self,
        post: SocialMediaPost,
        org_id: &str,
        actor: &Actor,
        is_publishing: bool,
    ) -> Result<(), ApiError> {
        let id = post.disruption_id.clone();
        self.apply_mutation(&id, org_id, actor, |working| {
            if let Err(err) = validate_post(&post) {
                let schedule_relaxed = is_publishing
                    && matches!(
                        &err,
                        DomainError::ValidationFailed { field, .. } if field.starts_with("publish_")
                    );
                if !schedule_relaxed {
                    return Err(err.into());
                }
            }
            let changed = working.post_at(post.social_media_post_index) != Some(&post);
            working.put_post(post);
            let items = if changed {
                vec![String::from("Disruption Social Media Posts: Edited")]
            } else {
                Vec::new()
            };
            Ok(items)
        })?;
        Ok(())
    }

    /// Removes the social media post holding the given index.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no post holds the index.
    pub fn remove_social_media_post(
        &mut self,
        index: u32,
        disruption_id: &str,
        org_id: &str,
        actor: &Actor,
    ) -> Result<(), ApiError> {
        self.apply_mutation(disruption_id, org_id, actor, |working| {
            if working.post_at(index).is_none() {
                return Err(DomainError::SocialMediaPostNotFound {
                    disruption_id: working.id.clone(),
                    social_media_post_index: index,
                }
                .into());
            }
            working.remove_post(index);
            Ok(vec![String::from("Disruption Social Media Posts: Edited")])
        })?;
        Ok(())
    }

    /// Runs one authoring mutation against the correct working record
    /// and commits it to the correct store.
    ///
    /// The closure mutates the working snapshot and returns the history
    /// items describing what it did. In an edit context those items
    /// become a history entry; draft amendments carry no audit trail
    /// until first publish.
    fn apply_mutation<F>(
        &mut self,
        id: &str,
        org_id: &str,
        actor: &Actor,
        mutate: F,
    ) -> Result<Disruption, ApiError>
    where
        F: FnOnce(&mut Disruption) -> Result<Vec<String>, ApiError>,
    {
        let now = now_rfc3339()?;
        let loaded = self.persistence.load(id, org_id)?;
        ensure_ownership(&loaded.canonical, actor)?;

        let edit_exists = loaded.edit_exists();
        let status = loaded.effective().publish_status;
        if !edit_exists
            && !matches!(
                status,
                PublishStatus::Draft | PublishStatus::Published | PublishStatus::PendingApproval
            )
        {
            return Err(ApiError::ValidationFailed {
                field: String::from("publish_status"),
                message: format!("a {status} disruption cannot be modified"),
            });
        }

        let mut working = loaded.effective().clone();
        let items = mutate(&mut working)?;
        validate_disruption(&working)?;

        let committed = if edit_exists {
            if !items.is_empty() {
                let entry_status = working.publish_status;
                working
                    .history
                    .push(new_entry(items, actor, entry_status, &now));
            }
            working.last_updated = now;
            debug!(id, org_id, "Amending edit overlay");
            self.persistence.commit(
                Target::Overlay,
                &[WriteOp::UpsertDisruption(Box::new(working.clone()))],
            )?;
            working
        } else if status == PublishStatus::Draft {
            working.last_updated = now;
            debug!(id, org_id, "Amending draft");
            self.persistence.commit(
                Target::Canonical,
                &[WriteOp::UpsertDisruption(Box::new(working.clone()))],
            )?;
            working
        } else {
            // First mutation against a published or pending record:
            // materialize the overlay carrying this mutation.
            let overlay = begin_edit(&working, actor, items, &now);
            debug!(id, org_id, new_status = %overlay.publish_status, "Materializing edit overlay");
            self.persistence.commit(
                Target::Overlay,
                &[WriteOp::UpsertDisruption(Box::new(overlay.clone()))],
            )?;
            overlay
        };
        Ok(committed)
    }
}
