// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, creation_items, diff_snapshots, humanise_consequence_type, new_entry};
use tds_domain::{
    Consequence, ConsequenceDetail, Disruption, PublishStatus, Severity, StopRef, ValidityPeriod,
    VehicleMode,
};

fn snapshot(id: &str) -> Disruption {
    Disruption {
        id: id.to_string(),
        org_id: String::from("org-1"),
        display_id: String::from("8fg3ha"),
        publish_status: PublishStatus::Published,
        template: false,
        version: 0,
        summary: String::from("Road closed for resurfacing"),
        description: String::from("The A38 is closed between junctions 2 and 3."),
        disruption_type: String::from("planned"),
        reason: String::from("roadworks"),
        associated_link: None,
        publish_start_date: String::from("2026-03-01T00:00:00Z"),
        publish_end_date: None,
        validity: vec![ValidityPeriod {
            start_time: String::from("2026-03-01T00:00:00Z"),
            end_time: None,
            repeats: None,
        }],
        history: Vec::new(),
        consequences: Vec::new(),
        social_media_posts: Vec::new(),
        created_by_operator_org_id: None,
        creation_time: String::from("2026-02-20T09:00:00Z"),
        last_updated: String::from("2026-02-20T09:00:00Z"),
    }
}

fn network_wide(disruption_id: &str, index: u32) -> Consequence {
    Consequence {
        disruption_id: disruption_id.to_string(),
        consequence_index: index,
        description: String::from("All services disrupted"),
        severity: Severity::Severe,
        vehicle_mode: VehicleMode::Bus,
        remove_from_journey_planners: false,
        delay_minutes: None,
        detail: ConsequenceDetail::NetworkWide,
    }
}

fn stops(disruption_id: &str, index: u32) -> Consequence {
    Consequence {
        disruption_id: disruption_id.to_string(),
        consequence_index: index,
        description: String::from("Stop closed"),
        severity: Severity::Normal,
        vehicle_mode: VehicleMode::Bus,
        remove_from_journey_planners: true,
        delay_minutes: Some(10),
        detail: ConsequenceDetail::Stops {
            stops: vec![StopRef {
                atco_code: String::from("0100BRP90310"),
                common_name: String::from("Temple Meads"),
            }],
        },
    }
}

#[test]
fn test_creation_message_selection() {
    assert_eq!(
        creation_items(true, PublishStatus::Published),
        vec![String::from("Template created")]
    );
    assert_eq!(
        creation_items(false, PublishStatus::Published),
        vec![String::from("Disruption created and published")]
    );
    assert_eq!(
        creation_items(false, PublishStatus::PendingApproval),
        vec![String::from("Disruption submitted for review")]
    );
    assert_eq!(
        creation_items(false, PublishStatus::Rejected),
        vec![String::from("Disruption rejected")]
    );
}

#[test]
fn test_identical_snapshots_produce_no_items() {
    let before = snapshot("d-1");
    assert!(diff_snapshots(&before, &before.clone()).is_empty());
}

#[test]
fn test_overview_edit_emits_single_item() {
    let before = snapshot("d-1");
    let mut after = before.clone();
    // Several overview fields change; one item comes out.
    after.summary = String::from("Road closed longer than planned");
    after.description = String::from("Works extended by a week.");
    after.reason = String::from("emergency_works");

    assert_eq!(
        diff_snapshots(&before, &after),
        vec![String::from("Disruption Overview: Edited")]
    );
}

#[test]
fn test_consequence_edit_emits_humanised_type() {
    let mut before = snapshot("d-1");
    before.put_consequence(network_wide("d-1", 0));
    let mut after = before.clone();
    let mut edited = network_wide("d-1", 0);
    edited.description = String::from("All services severely disrupted");
    after.put_consequence(edited);

    assert_eq!(
        diff_snapshots(&before, &after),
        vec![String::from("Disruption Consequence - Network Wide: Edited")]
    );
}

#[test]
fn test_consequence_removal_emits_removed() {
    let mut before = snapshot("d-1");
    before.put_consequence(stops("d-1", 0));
    let mut after = before.clone();
    after.remove_consequence(0);

    assert_eq!(
        diff_snapshots(&before, &after),
        vec![String::from("Disruption Consequence - Stops: Removed")]
    );
}

#[test]
fn test_added_consequence_is_not_reported_by_diff() {
    // The write path synthesizes "Added" itself; the diff stays silent.
    let before = snapshot("d-1");
    let mut after = before.clone();
    after.put_consequence(stops("d-1", 0));

    assert!(diff_snapshots(&before, &after).is_empty());
}

#[test]
fn test_duplicate_items_are_deduplicated_in_order() {
    let mut before = snapshot("d-1");
    before.put_consequence(network_wide("d-1", 0));
    before.put_consequence(network_wide("d-1", 1));
    let mut after = before.clone();
    after.summary = String::from("Changed");
    after.remove_consequence(0);
    after.remove_consequence(1);

    // Two removals of the same type collapse into one item, after the
    // overview item.
    assert_eq!(
        diff_snapshots(&before, &after),
        vec![
            String::from("Disruption Overview: Edited"),
            String::from("Disruption Consequence - Network Wide: Removed"),
        ]
    );
}

#[test]
fn test_humanise_consequence_type() {
    assert_eq!(humanise_consequence_type("networkWide"), "Network Wide");
    assert_eq!(humanise_consequence_type("operatorWide"), "Operator Wide");
    assert_eq!(humanise_consequence_type("stops"), "Stops");
    assert_eq!(humanise_consequence_type("services"), "Services");
    assert_eq!(humanise_consequence_type("journeys"), "Journeys");
}

#[test]
fn test_new_entry_attribution() {
    let actor = Actor::staff("Jo Staff", "org-1");
    let entry = new_entry(
        vec![String::from("Disruption Overview: Edited")],
        &actor,
        PublishStatus::Editing,
        "2026-03-02T10:00:00Z",
    );

    assert_eq!(entry.user, "Jo Staff");
    assert_eq!(entry.status, PublishStatus::Editing);
    assert_eq!(entry.datetime, "2026-03-02T10:00:00Z");
    assert_eq!(entry.items.len(), 1);
}

#[test]
fn test_actor_privilege() {
    assert!(Actor::staff("Jo", "org-1").can_publish());
    assert!(!Actor::author("Sam", "org-1").can_publish());
    assert!(!Actor::operator("Op", "org-1", "op-9").can_publish());
}
