// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read paths over the canonical and overlay stores.

use std::collections::HashMap;

use diesel::prelude::*;

use crate::data_models::{
    ConsequenceEditRow, ConsequenceRow, DisruptionEditRow, DisruptionRow, rows_to_disruption,
};
use crate::diesel_schema::{consequences, consequences_edited, disruptions, disruptions_edited};
use crate::error::PersistenceError;
use tds_core::LoadedDisruption;
use tds_domain::Disruption;

/// Loads a disruption together with its overlay, if one exists.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot
/// be deserialized. A missing record is `Ok(None)`, not an error.
pub fn try_load(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
) -> Result<Option<LoadedDisruption>, PersistenceError> {
    let Some(canonical) = load_canonical(conn, id, org_id)? else {
        return Ok(None);
    };
    let overlay = load_overlay(conn, id, org_id)?;
    Ok(Some(LoadedDisruption::new(canonical, overlay)))
}

/// Loads a disruption together with its overlay.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if no canonical record
/// exists for the given keys.
pub fn load(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
) -> Result<LoadedDisruption, PersistenceError> {
    try_load(conn, id, org_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("disruption {id}")))
}

/// Lists the effective snapshots of all disruptions (or templates)
/// for an organisation. Where an overlay exists it shadows the
/// canonical record.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a row cannot
/// be deserialized.
pub fn list(
    conn: &mut SqliteConnection,
    org_id: &str,
    template: bool,
) -> Result<Vec<Disruption>, PersistenceError> {
    let disruption_rows: Vec<DisruptionRow> = disruptions::table
        .filter(disruptions::org_id.eq(org_id))
        .filter(disruptions::template.eq(i32::from(template)))
        .order(disruptions::last_updated.desc())
        .load(conn)?;

    let consequence_rows: Vec<ConsequenceRow> = consequences::table
        .filter(consequences::org_id.eq(org_id))
        .load(conn)?;
    let mut consequences_by_id: HashMap<String, Vec<ConsequenceRow>> = HashMap::new();
    for row in consequence_rows {
        consequences_by_id
            .entry(row.disruption_id.clone())
            .or_default()
            .push(row);
    }

    let overlay_rows: Vec<DisruptionEditRow> = disruptions_edited::table
        .filter(disruptions_edited::org_id.eq(org_id))
        .load(conn)?;
    let overlay_consequence_rows: Vec<ConsequenceEditRow> = consequences_edited::table
        .filter(consequences_edited::org_id.eq(org_id))
        .load(conn)?;
    let mut overlay_consequences_by_id: HashMap<String, Vec<ConsequenceRow>> = HashMap::new();
    for row in overlay_consequence_rows {
        overlay_consequences_by_id
            .entry(row.disruption_id.clone())
            .or_default()
            .push(row.into());
    }
    let mut overlays: HashMap<String, Disruption> = HashMap::new();
    for row in overlay_rows {
        let id = row.id.clone();
        let children = overlay_consequences_by_id.remove(&id).unwrap_or_default();
        overlays.insert(id, rows_to_disruption(row.into(), children)?);
    }

    let mut out = Vec::with_capacity(disruption_rows.len());
    for row in disruption_rows {
        let id = row.id.clone();
        if let Some(overlay) = overlays.remove(&id) {
            out.push(overlay);
        } else {
            let children = consequences_by_id.remove(&id).unwrap_or_default();
            out.push(rows_to_disruption(row, children)?);
        }
    }
    Ok(out)
}

pub(crate) fn load_canonical(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
) -> Result<Option<Disruption>, PersistenceError> {
    let row: Option<DisruptionRow> = disruptions::table
        .filter(disruptions::id.eq(id))
        .filter(disruptions::org_id.eq(org_id))
        .first(conn)
        .optional()?;
    let Some(row) = row else {
        return Ok(None);
    };

    let consequence_rows: Vec<ConsequenceRow> = consequences::table
        .filter(consequences::disruption_id.eq(id))
        .filter(consequences::org_id.eq(org_id))
        .load(conn)?;

    Ok(Some(rows_to_disruption(row, consequence_rows)?))
}

pub(crate) fn load_overlay(
    conn: &mut SqliteConnection,
    id: &str,
    org_id: &str,
) -> Result<Option<Disruption>, PersistenceError> {
    let row: Option<DisruptionEditRow> = disruptions_edited::table
        .filter(disruptions_edited::id.eq(id))
        .filter(disruptions_edited::org_id.eq(org_id))
        .first(conn)
        .optional()?;
    let Some(row) = row else {
        return Ok(None);
    };

    let consequence_rows: Vec<ConsequenceEditRow> = consequences_edited::table
        .filter(consequences_edited::disruption_id.eq(id))
        .filter(consequences_edited::org_id.eq(org_id))
        .load(conn)?;
    let consequence_rows: Vec<ConsequenceRow> =
        consequence_rows.into_iter().map(Into::into).collect();

    Ok(Some(rows_to_disruption(row.into(), consequence_rows)?))
}
