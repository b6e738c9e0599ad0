// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural diff of disruption snapshots into audit items.
//!
//! This is an explicit field-classification diff, not a generic deep
//! diff: the mapping from "which field changed" to "which message is
//! emitted" is spelled out here so it can be audited and tested in
//! isolation.
//!
//! Added consequences deliberately produce no item. The write path that
//! allocates a new index synthesizes its own "Added" message; deriving
//! one here as well would double-report.

use tds_domain::{Disruption, PublishStatus};

/// Selects the creation message for a record with no prior snapshot.
///
/// Emitted the first time a disruption leaves draft authoring: on direct
/// publish, on submission for review, or on rejection.
#[must_use]
pub fn creation_items(is_template: bool, status: PublishStatus) -> Vec<String> {
    let item = if is_template {
        "Template created"
    } else {
        match status {
            PublishStatus::PendingApproval => "Disruption submitted for review",
            PublishStatus::Rejected => "Disruption rejected",
            PublishStatus::Draft => "Disruption created",
            _ => "Disruption created and published",
        }
    };
    vec![item.to_string()]
}

/// Compares two snapshots and produces the audit items describing what
/// changed, deduplicated in insertion order.
///
/// Overview changes collapse into a single item no matter how many
/// overview fields moved. Consequence items name the humanised type of
/// the consequence as it now reads (or read, for removals).
#[must_use]
pub fn diff_snapshots(before: &Disruption, after: &Disruption) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    if overview_changed(before, after) {
        push_unique(&mut items, "Disruption Overview: Edited".to_string());
    }

    for old in &before.consequences {
        match after.consequence_at(old.consequence_index) {
            None => {
                push_unique(
                    &mut items,
                    format!(
                        "Disruption Consequence - {}: Removed",
                        humanise_consequence_type(old.detail.type_tag())
                    ),
                );
            }
            Some(new) if new != old => {
                push_unique(
                    &mut items,
                    format!(
                        "Disruption Consequence - {}: Edited",
                        humanise_consequence_type(new.detail.type_tag())
                    ),
                );
            }
            Some(_) => {}
        }
    }

    items
}

/// Converts a camelCase consequence type tag to space-separated words,
/// e.g. `networkWide` → "Network Wide".
#[must_use]
pub fn humanise_consequence_type(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len() + 4);
    for (i, c) in tag.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// The disruption-overview field set: any change to one of these fields
/// emits the single overview item. Sub-entities (consequences, posts)
/// and bookkeeping fields (status, version, history, timestamps) are
/// excluded.
fn overview_changed(before: &Disruption, after: &Disruption) -> bool {
    before.summary != after.summary
        || before.description != after.description
        || before.disruption_type != after.disruption_type
        || before.reason != after.reason
        || before.associated_link != after.associated_link
        || before.publish_start_date != after.publish_start_date
        || before.publish_end_date != after.publish_end_date
        || before.validity != after.validity
}
