// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Overlay lifecycle mutations.
//!
//! Merging an overlay back into the canonical store, discarding it,
//! and deleting a disruption outright. Each operation runs in its own
//! transaction so a failure part-way leaves both stores untouched.

use diesel::prelude::*;
use tracing::{debug, info};

use crate::diesel_schema::{disruptions, disruptions_edited};
use crate::error::PersistenceError;
use crate::mutations::writer::{Target, WriteOp, apply};
use crate::queries::{load_canonical, load_overlay};
use tds_domain::{Disruption, HistoryEntry, PublishStatus};

/// Merges the overlay into the canonical store and deletes it.
///
/// The merged record becomes the published truth: its status is set
/// to `Published`, its version is the canonical version plus one, and
/// `publish_entry` (when given) is appended to its history. Both the
/// canonical rewrite and the overlay deletion happen in one
/// transaction.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no overlay (or no
/// canonical record) exists for the given keys.
pub fn merge_overlay(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
    now: &str,
    publish_entry: Option<HistoryEntry>,
) -> Result<Disruption, PersistenceError> {
    conn.transaction(|conn| {
        let overlay = load_overlay(conn, id, org_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("overlay for disruption {id}")))?;
        let canonical = load_canonical(conn, id, org_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("disruption {id}")))?;

        let mut merged = overlay;
        merged.publish_status = PublishStatus::Published;
        merged.version = canonical.version + 1;
        merged.last_updated = now.to_string();
        if let Some(entry) = publish_entry {
            merged.history.push(entry);
        }

        apply(
            conn,
            Target::Canonical,
            &WriteOp::UpsertDisruption(Box::new(merged.clone())),
        )?;

        diesel::delete(
            disruptions_edited::table
                .filter(disruptions_edited::id.eq(id))
                .filter(disruptions_edited::org_id.eq(org_id)),
        )
        .execute(conn)?;

        info!(
            disruption_id = %id,
            org_id = %org_id,
            version = merged.version,
            "Merged overlay into canonical store"
        );

        Ok(merged)
    })
}

/// Discards the overlay and rewrites the canonical record, both in one
/// transaction.
///
/// Used by transitions that annotate the canonical record as they throw
/// the overlay away (rejecting or cancelling an edit): either the
/// overlay is gone and the annotation is recorded, or neither happened.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no overlay exists; the
/// canonical record is left untouched in that case.
pub fn discard_overlay_with_canonical(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
    canonical: &Disruption,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let deleted = diesel::delete(
            disruptions_edited::table
                .filter(disruptions_edited::id.eq(id))
                .filter(disruptions_edited::org_id.eq(org_id)),
        )
        .execute(conn)?;

        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!(
                "overlay for disruption {id}"
            )));
        }

        apply(
            conn,
            Target::Canonical,
            &WriteOp::UpsertDisruption(Box::new(canonical.clone())),
        )?;

        info!(
            disruption_id = %id,
            org_id = %org_id,
            "Discarded overlay and rewrote canonical record"
        );

        Ok(())
    })
}

/// Deletes the overlay for a disruption, leaving the canonical record
/// untouched. Overlay consequence rows cascade.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no overlay exists.
pub fn discard_overlay(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
) -> Result<(), PersistenceError> {
    let deleted = diesel::delete(
        disruptions_edited::table
            .filter(disruptions_edited::id.eq(id))
            .filter(disruptions_edited::org_id.eq(org_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "overlay for disruption {id}"
        )));
    }

    debug!(disruption_id = %id, org_id = %org_id, "Discarded overlay");
    Ok(())
}

/// Deletes a disruption from both stores. Consequence rows and any
/// overlay cascade from the canonical row.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the disruption does not
/// exist.
pub fn delete_disruption(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
) -> Result<(), PersistenceError> {
    let deleted = diesel::delete(
        disruptions::table
            .filter(disruptions::id.eq(id))
            .filter(disruptions::org_id.eq(org_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("disruption {id}")));
    }

    info!(disruption_id = %id, org_id = %org_id, "Deleted disruption");
    Ok(())
}
