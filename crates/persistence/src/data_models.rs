// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and domain conversions.
//!
//! The canonical and overlay table pairs share one shape, but Diesel's
//! `Insertable` is table-bound, so each pair gets its own struct with a
//! lossless conversion between them. `history`, `validity`, posts and
//! variant payloads travel as serialized JSON text columns.

use std::str::FromStr;

use diesel::prelude::*;

use crate::diesel_schema::{consequences, consequences_edited, disruptions, disruptions_edited};
use crate::error::PersistenceError;
use tds_domain::{
    Consequence, ConsequenceDetail, Disruption, HistoryEntry, PublishStatus, Severity,
    SocialMediaPost, ValidityPeriod, VehicleMode,
};

/// Canonical disruption row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = disruptions)]
pub struct DisruptionRow {
    pub id: String,
    pub org_id: String,
    pub display_id: String,
    pub publish_status: String,
    pub template: i32,
    pub version: i64,
    pub summary: String,
    pub description: String,
    pub disruption_type: String,
    pub reason: String,
    pub associated_link: Option<String>,
    pub publish_start_date: String,
    pub publish_end_date: Option<String>,
    pub validity_json: String,
    pub social_media_posts_json: String,
    pub history_json: String,
    pub created_by_operator_org_id: Option<String>,
    pub creation_time: String,
    pub last_updated: String,
}

/// Overlay disruption row. Same shape as [`DisruptionRow`].
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = disruptions_edited)]
pub struct DisruptionEditRow {
    pub id: String,
    pub org_id: String,
    pub display_id: String,
    pub publish_status: String,
    pub template: i32,
    pub version: i64,
    pub summary: String,
    pub description: String,
    pub disruption_type: String,
    pub reason: String,
    pub associated_link: Option<String>,
    pub publish_start_date: String,
    pub publish_end_date: Option<String>,
    pub validity_json: String,
    pub social_media_posts_json: String,
    pub history_json: String,
    pub created_by_operator_org_id: Option<String>,
    pub creation_time: String,
    pub last_updated: String,
}

/// Canonical consequence row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = consequences)]
pub struct ConsequenceRow {
    pub disruption_id: String,
    pub org_id: String,
    pub consequence_index: i32,
    pub consequence_type: String,
    pub description: String,
    pub severity: String,
    pub vehicle_mode: String,
    pub remove_from_journey_planners: i32,
    pub delay_minutes: Option<i32>,
    pub detail_json: String,
}

/// Overlay consequence row. Same shape as [`ConsequenceRow`].
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = consequences_edited)]
pub struct ConsequenceEditRow {
    pub disruption_id: String,
    pub org_id: String,
    pub consequence_index: i32,
    pub consequence_type: String,
    pub description: String,
    pub severity: String,
    pub vehicle_mode: String,
    pub remove_from_journey_planners: i32,
    pub delay_minutes: Option<i32>,
    pub detail_json: String,
}

impl From<DisruptionRow> for DisruptionEditRow {
    fn from(row: DisruptionRow) -> Self {
        Self {
            id: row.id,
            org_id: row.org_id,
            display_id: row.display_id,
            publish_status: row.publish_status,
            template: row.template,
            version: row.version,
            summary: row.summary,
            description: row.description,
            disruption_type: row.disruption_type,
            reason: row.reason,
            associated_link: row.associated_link,
            publish_start_date: row.publish_start_date,
            publish_end_date: row.publish_end_date,
            validity_json: row.validity_json,
            social_media_posts_json: row.social_media_posts_json,
            history_json: row.history_json,
            created_by_operator_org_id: row.created_by_operator_org_id,
            creation_time: row.creation_time,
            last_updated: row.last_updated,
        }
    }
}

impl From<DisruptionEditRow> for DisruptionRow {
    fn from(row: DisruptionEditRow) -> Self {
        Self {
            id: row.id,
            org_id: row.org_id,
            display_id: row.display_id,
            publish_status: row.publish_status,
            template: row.template,
            version: row.version,
            summary: row.summary,
            description: row.description,
            disruption_type: row.disruption_type,
            reason: row.reason,
            associated_link: row.associated_link,
            publish_start_date: row.publish_start_date,
            publish_end_date: row.publish_end_date,
            validity_json: row.validity_json,
            social_media_posts_json: row.social_media_posts_json,
            history_json: row.history_json,
            created_by_operator_org_id: row.created_by_operator_org_id,
            creation_time: row.creation_time,
            last_updated: row.last_updated,
        }
    }
}

impl From<ConsequenceRow> for ConsequenceEditRow {
    fn from(row: ConsequenceRow) -> Self {
        Self {
            disruption_id: row.disruption_id,
            org_id: row.org_id,
            consequence_index: row.consequence_index,
            consequence_type: row.consequence_type,
            description: row.description,
            severity: row.severity,
            vehicle_mode: row.vehicle_mode,
            remove_from_journey_planners: row.remove_from_journey_planners,
            delay_minutes: row.delay_minutes,
            detail_json: row.detail_json,
        }
    }
}

impl From<ConsequenceEditRow> for ConsequenceRow {
    fn from(row: ConsequenceEditRow) -> Self {
        Self {
            disruption_id: row.disruption_id,
            org_id: row.org_id,
            consequence_index: row.consequence_index,
            consequence_type: row.consequence_type,
            description: row.description,
            severity: row.severity,
            vehicle_mode: row.vehicle_mode,
            remove_from_journey_planners: row.remove_from_journey_planners,
            delay_minutes: row.delay_minutes,
            detail_json: row.detail_json,
        }
    }
}

/// Flattens a disruption aggregate into its row pair.
///
/// # Errors
///
/// Returns an error if a blob column cannot be serialized.
pub fn disruption_to_rows(
    disruption: &Disruption,
) -> Result<(DisruptionRow, Vec<ConsequenceRow>), PersistenceError> {
    let row = DisruptionRow {
        id: disruption.id.clone(),
        org_id: disruption.org_id.clone(),
        display_id: disruption.display_id.clone(),
        publish_status: disruption.publish_status.as_str().to_string(),
        template: i32::from(disruption.template),
        version: disruption.version,
        summary: disruption.summary.clone(),
        description: disruption.description.clone(),
        disruption_type: disruption.disruption_type.clone(),
        reason: disruption.reason.clone(),
        associated_link: disruption.associated_link.clone(),
        publish_start_date: disruption.publish_start_date.clone(),
        publish_end_date: disruption.publish_end_date.clone(),
        validity_json: serde_json::to_string(&disruption.validity)?,
        social_media_posts_json: serde_json::to_string(&disruption.social_media_posts)?,
        history_json: serde_json::to_string(&disruption.history)?,
        created_by_operator_org_id: disruption.created_by_operator_org_id.clone(),
        creation_time: disruption.creation_time.clone(),
        last_updated: disruption.last_updated.clone(),
    };

    let consequence_rows = disruption
        .consequences
        .iter()
        .map(|c| consequence_to_row(c, &disruption.org_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((row, consequence_rows))
}

/// Flattens a single consequence into its row. The owning org is keyed on
/// the disruption, so the caller supplies it.
///
/// # Errors
///
/// Returns an error if the variant payload cannot be serialized.
pub fn consequence_to_row(
    consequence: &Consequence,
    org_id: &str,
) -> Result<ConsequenceRow, PersistenceError> {
    let index = i32::try_from(consequence.consequence_index)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    Ok(ConsequenceRow {
        disruption_id: consequence.disruption_id.clone(),
        org_id: org_id.to_string(),
        consequence_index: index,
        consequence_type: consequence.detail.type_tag().to_string(),
        description: consequence.description.clone(),
        severity: consequence.severity.as_str().to_string(),
        vehicle_mode: consequence.vehicle_mode.as_str().to_string(),
        remove_from_journey_planners: i32::from(consequence.remove_from_journey_planners),
        delay_minutes: consequence
            .delay_minutes
            .map(i32::try_from)
            .transpose()
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
        detail_json: serde_json::to_string(&consequence.detail)?,
    })
}

/// Rebuilds a disruption aggregate from its row pair.
///
/// # Errors
///
/// Returns an error if a blob or enum column cannot be parsed.
pub fn rows_to_disruption(
    row: DisruptionRow,
    mut consequence_rows: Vec<ConsequenceRow>,
) -> Result<Disruption, PersistenceError> {
    let publish_status = PublishStatus::from_str(&row.publish_status)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let validity: Vec<ValidityPeriod> = serde_json::from_str(&row.validity_json)?;
    let social_media_posts: Vec<SocialMediaPost> =
        serde_json::from_str(&row.social_media_posts_json)?;
    let history: Vec<HistoryEntry> = serde_json::from_str(&row.history_json)?;

    consequence_rows.sort_by_key(|c| c.consequence_index);
    let consequences = consequence_rows
        .into_iter()
        .map(row_to_consequence)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Disruption {
        id: row.id,
        org_id: row.org_id,
        display_id: row.display_id,
        publish_status,
        template: row.template != 0,
        version: row.version,
        summary: row.summary,
        description: row.description,
        disruption_type: row.disruption_type,
        reason: row.reason,
        associated_link: row.associated_link,
        publish_start_date: row.publish_start_date,
        publish_end_date: row.publish_end_date,
        validity,
        history,
        consequences,
        social_media_posts,
        created_by_operator_org_id: row.created_by_operator_org_id,
        creation_time: row.creation_time,
        last_updated: row.last_updated,
    })
}

fn row_to_consequence(row: ConsequenceRow) -> Result<Consequence, PersistenceError> {
    let detail: ConsequenceDetail = serde_json::from_str(&row.detail_json)?;
    let severity = Severity::from_str(&row.severity)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let vehicle_mode = VehicleMode::from_str(&row.vehicle_mode)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let index = u32::try_from(row.consequence_index)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    Ok(Consequence {
        disruption_id: row.disruption_id,
        consequence_index: index,
        description: row.description,
        severity,
        vehicle_mode,
        remove_from_journey_planners: row.remove_from_journey_planners != 0,
        delay_minutes: row
            .delay_minutes
            .map(u32::try_from)
            .transpose()
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
        detail,
    })
}
