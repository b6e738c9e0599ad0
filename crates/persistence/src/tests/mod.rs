// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use tds_domain::{
    Consequence, ConsequenceDetail, Disruption, PublishStatus, Severity, StopRef, ValidityPeriod,
    VehicleMode,
};

pub fn test_consequence(disruption_id: &str, index: u32) -> Consequence {
    Consequence {
        disruption_id: disruption_id.to_string(),
        consequence_index: index,
        description: String::from("Stops closed in both directions"),
        severity: Severity::Severe,
        vehicle_mode: VehicleMode::Bus,
        remove_from_journey_planners: true,
        delay_minutes: Some(20),
        detail: ConsequenceDetail::Stops {
            stops: vec![StopRef {
                atco_code: String::from("0100BRP90340"),
                common_name: String::from("Temple Meads"),
            }],
        },
    }
}

pub fn test_disruption(id: &str, status: PublishStatus) -> Disruption {
    Disruption {
        id: id.to_string(),
        org_id: String::from("org-1"),
        display_id: String::from("8fg3ha"),
        publish_status: status,
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
        consequences: vec![test_consequence(id, 0), test_consequence(id, 1)],
        social_media_posts: Vec::new(),
        created_by_operator_org_id: None,
        creation_time: String::from("2026-02-20T09:00:00Z"),
        last_updated: String::from("2026-02-20T09:00:00Z"),
    }
}
