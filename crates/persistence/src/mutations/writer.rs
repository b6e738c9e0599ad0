// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional write batches.
//!
//! Callers describe a mutation as a sequence of [`WriteOp`] values
//! aimed at either the canonical or the overlay store, and
//! [`commit`] applies the whole batch inside one transaction. A
//! disruption upsert is a full replacement: the row is upserted and
//! its consequence rows are rewritten to match the aggregate.

use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::debug;

use crate::data_models::{
    ConsequenceEditRow, ConsequenceRow, DisruptionEditRow, DisruptionRow, consequence_to_row,
    disruption_to_rows,
};
use crate::diesel_schema::{consequences, consequences_edited, disruptions, disruptions_edited};
use crate::error::PersistenceError;
use tds_domain::{Consequence, Disruption};

/// Which of the two stores a write batch is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The live `disruptions`/`consequences` tables.
    Canonical,
    /// The `disruptions_edited`/`consequences_edited` shadow tables.
    Overlay,
}

/// A single write operation within a batch.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Upsert the disruption row and rewrite its consequence rows to
    /// match the aggregate.
    UpsertDisruption(Box<Disruption>),
    /// Upsert a single consequence row.
    UpsertConsequence {
        org_id: String,
        consequence: Consequence,
    },
    /// Delete a single consequence row.
    DeleteConsequence {
        disruption_id: String,
        org_id: String,
        consequence_index: u32,
    },
    /// Delete the disruption row; consequence rows cascade.
    DeleteDisruption { id: String, org_id: String },
}

/// Applies a batch of write operations in a single transaction.
///
/// Either every operation in the batch takes effect or none do.
///
/// # Errors
///
/// Returns an error if serialization or any database operation fails;
/// the transaction is rolled back in that case.
pub fn commit(
    conn: &mut SqliteConnection,
    target: Target,
    ops: &[WriteOp],
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        for op in ops {
            apply(conn, target, op)?;
        }
        Ok(())
    })
}

pub(crate) fn apply(
    conn: &mut SqliteConnection,
    target: Target,
    op: &WriteOp,
) -> Result<(), PersistenceError> {
    match op {
        WriteOp::UpsertDisruption(disruption) => {
            let (row, consequence_rows) = disruption_to_rows(disruption)?;
            match target {
                Target::Canonical => {
                    upsert_disruption_canonical(conn, &row)?;
                    replace_consequences_canonical(
                        conn,
                        &disruption.id,
                        &disruption.org_id,
                        consequence_rows,
                    )?;
                }
                Target::Overlay => {
                    upsert_disruption_overlay(conn, &row.into())?;
                    replace_consequences_overlay(
                        conn,
                        &disruption.id,
                        &disruption.org_id,
                        consequence_rows,
                    )?;
                }
            }
            debug!(
                disruption_id = %disruption.id,
                org_id = %disruption.org_id,
                ?target,
                "Upserted disruption"
            );
        }
        WriteOp::UpsertConsequence {
            org_id,
            consequence,
        } => {
            let row = consequence_to_row(consequence, org_id)?;
            match target {
                Target::Canonical => upsert_consequence_canonical(conn, &row)?,
                Target::Overlay => upsert_consequence_overlay(conn, &row.into())?,
            }
            debug!(
                disruption_id = %consequence.disruption_id,
                consequence_index = consequence.consequence_index,
                ?target,
                "Upserted consequence"
            );
        }
        WriteOp::DeleteConsequence {
            disruption_id,
            org_id,
            consequence_index,
        } => {
            let index = i32::try_from(*consequence_index)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
            let deleted = match target {
                Target::Canonical => diesel::delete(
                    consequences::table
                        .filter(consequences::disruption_id.eq(disruption_id))
                        .filter(consequences::org_id.eq(org_id))
                        .filter(consequences::consequence_index.eq(index)),
                )
                .execute(conn)?,
                Target::Overlay => diesel::delete(
                    consequences_edited::table
                        .filter(consequences_edited::disruption_id.eq(disruption_id))
                        .filter(consequences_edited::org_id.eq(org_id))
                        .filter(consequences_edited::consequence_index.eq(index)),
                )
                .execute(conn)?,
            };
            if deleted == 0 {
                return Err(PersistenceError::NotFound(format!(
                    "consequence {consequence_index} of disruption {disruption_id}"
                )));
            }
        }
        WriteOp::DeleteDisruption { id, org_id } => {
            let deleted = match target {
                Target::Canonical => diesel::delete(
                    disruptions::table
                        .filter(disruptions::id.eq(id))
                        .filter(disruptions::org_id.eq(org_id)),
                )
                .execute(conn)?,
                Target::Overlay => diesel::delete(
                    disruptions_edited::table
                        .filter(disruptions_edited::id.eq(id))
                        .filter(disruptions_edited::org_id.eq(org_id)),
                )
                .execute(conn)?,
            };
            if deleted == 0 {
                return Err(PersistenceError::NotFound(format!("disruption {id}")));
            }
            debug!(disruption_id = %id, ?target, "Deleted disruption");
        }
    }
    Ok(())
}

// INSERT OR REPLACE would delete-and-reinsert the parent row, which
// cascades into the consequence tables and silently wipes child rows.
// Both upserts therefore use ON CONFLICT DO UPDATE.
fn upsert_disruption_canonical(
    conn: &mut SqliteConnection,
    row: &DisruptionRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(disruptions::table)
        .values(row)
        .on_conflict((disruptions::id, disruptions::org_id))
        .do_update()
        .set((
            disruptions::display_id.eq(excluded(disruptions::display_id)),
            disruptions::publish_status.eq(excluded(disruptions::publish_status)),
            disruptions::template.eq(excluded(disruptions::template)),
            disruptions::version.eq(excluded(disruptions::version)),
            disruptions::summary.eq(excluded(disruptions::summary)),
            disruptions::description.eq(excluded(disruptions::description)),
            disruptions::disruption_type.eq(excluded(disruptions::disruption_type)),
            disruptions::reason.eq(excluded(disruptions::reason)),
            disruptions::associated_link.eq(excluded(disruptions::associated_link)),
            disruptions::publish_start_date.eq(excluded(disruptions::publish_start_date)),
            disruptions::publish_end_date.eq(excluded(disruptions::publish_end_date)),
            disruptions::validity_json.eq(excluded(disruptions::validity_json)),
            disruptions::social_media_posts_json.eq(excluded(disruptions::social_media_posts_json)),
            disruptions::history_json.eq(excluded(disruptions::history_json)),
            disruptions::created_by_operator_org_id
                .eq(excluded(disruptions::created_by_operator_org_id)),
            disruptions::creation_time.eq(excluded(disruptions::creation_time)),
            disruptions::last_updated.eq(excluded(disruptions::last_updated)),
        ))
        .execute(conn)?;
    Ok(())
}

fn upsert_disruption_overlay(
    conn: &mut SqliteConnection,
    row: &DisruptionEditRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(disruptions_edited::table)
        .values(row)
        .on_conflict((disruptions_edited::id, disruptions_edited::org_id))
        .do_update()
        .set((
            disruptions_edited::display_id.eq(excluded(disruptions_edited::display_id)),
            disruptions_edited::publish_status.eq(excluded(disruptions_edited::publish_status)),
            disruptions_edited::template.eq(excluded(disruptions_edited::template)),
            disruptions_edited::version.eq(excluded(disruptions_edited::version)),
            disruptions_edited::summary.eq(excluded(disruptions_edited::summary)),
            disruptions_edited::description.eq(excluded(disruptions_edited::description)),
            disruptions_edited::disruption_type.eq(excluded(disruptions_edited::disruption_type)),
            disruptions_edited::reason.eq(excluded(disruptions_edited::reason)),
            disruptions_edited::associated_link.eq(excluded(disruptions_edited::associated_link)),
            disruptions_edited::publish_start_date
                .eq(excluded(disruptions_edited::publish_start_date)),
            disruptions_edited::publish_end_date.eq(excluded(disruptions_edited::publish_end_date)),
            disruptions_edited::validity_json.eq(excluded(disruptions_edited::validity_json)),
            disruptions_edited::social_media_posts_json
                .eq(excluded(disruptions_edited::social_media_posts_json)),
            disruptions_edited::history_json.eq(excluded(disruptions_edited::history_json)),
            disruptions_edited::created_by_operator_org_id
                .eq(excluded(disruptions_edited::created_by_operator_org_id)),
            disruptions_edited::creation_time.eq(excluded(disruptions_edited::creation_time)),
            disruptions_edited::last_updated.eq(excluded(disruptions_edited::last_updated)),
        ))
        .execute(conn)?;
    Ok(())
}

fn replace_consequences_canonical(
    conn: &mut SqliteConnection,
    disruption_id: &str,
    org_id: &str,
    rows: Vec<ConsequenceRow>,
) -> Result<(), PersistenceError> {
    diesel::delete(
        consequences::table
            .filter(consequences::disruption_id.eq(disruption_id))
            .filter(consequences::org_id.eq(org_id)),
    )
    .execute(conn)?;
    diesel::insert_into(consequences::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn replace_consequences_overlay(
    conn: &mut SqliteConnection,
    disruption_id: &str,
    org_id: &str,
    rows: Vec<ConsequenceRow>,
) -> Result<(), PersistenceError> {
    let rows: Vec<ConsequenceEditRow> = rows.into_iter().map(Into::into).collect();
    diesel::delete(
        consequences_edited::table
            .filter(consequences_edited::disruption_id.eq(disruption_id))
            .filter(consequences_edited::org_id.eq(org_id)),
    )
    .execute(conn)?;
    diesel::insert_into(consequences_edited::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn upsert_consequence_canonical(
    conn: &mut SqliteConnection,
    row: &ConsequenceRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(consequences::table)
        .values(row)
        .on_conflict((
            consequences::disruption_id,
            consequences::org_id,
            consequences::consequence_index,
        ))
        .do_update()
        .set((
            consequences::consequence_type.eq(excluded(consequences::consequence_type)),
            consequences::description.eq(excluded(consequences::description)),
            consequences::severity.eq(excluded(consequences::severity)),
            consequences::vehicle_mode.eq(excluded(consequences::vehicle_mode)),
            consequences::remove_from_journey_planners
                .eq(excluded(consequences::remove_from_journey_planners)),
            consequences::delay_minutes.eq(excluded(consequences::delay_minutes)),
            consequences::detail_json.eq(excluded(consequences::detail_json)),
        ))
        .execute(conn)?;
    Ok(())
}

fn upsert_consequence_overlay(
    conn: &mut SqliteConnection,
    row: &ConsequenceEditRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(consequences_edited::table)
        .values(row)
        .on_conflict((
            consequences_edited::disruption_id,
            consequences_edited::org_id,
            consequences_edited::consequence_index,
        ))
        .do_update()
        .set((
            consequences_edited::consequence_type
                .eq(excluded(consequences_edited::consequence_type)),
            consequences_edited::description.eq(excluded(consequences_edited::description)),
            consequences_edited::severity.eq(excluded(consequences_edited::severity)),
            consequences_edited::vehicle_mode.eq(excluded(consequences_edited::vehicle_mode)),
            consequences_edited::remove_from_journey_planners
                .eq(excluded(consequences_edited::remove_from_journey_planners)),
            consequences_edited::delay_minutes.eq(excluded(consequences_edited::delay_minutes)),
            consequences_edited::detail_json.eq(excluded(consequences_edited::detail_json)),
        ))
        .execute(conn)?;
    Ok(())
}
