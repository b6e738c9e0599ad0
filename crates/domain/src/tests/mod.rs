// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod validation;

use crate::{
    Consequence, ConsequenceDetail, Disruption, PublishStatus, Severity, SocialMediaPost,
    SocialMediaPostStatus, StopRef, ValidityPeriod, VehicleMode,
};

/// Builds a minimally valid disruption for tests.
pub fn test_disruption(id: &str) -> Disruption {
    Disruption {
        id: id.to_string(),
        org_id: String::from("org-1"),
        display_id: String::from("8fg3ha"),
        publish_status: PublishStatus::Draft,
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
            end_time: Some(String::from("2026-03-08T00:00:00Z")),
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

/// Builds a stops consequence at the given index.
pub fn test_consequence(disruption_id: &str, index: u32) -> Consequence {
    Consequence {
        disruption_id: disruption_id.to_string(),
        consequence_index: index,
        description: String::from("Stop closed, use the next stop along"),
        severity: Severity::Normal,
        vehicle_mode: VehicleMode::Bus,
        remove_from_journey_planners: false,
        delay_minutes: None,
        detail: ConsequenceDetail::Stops {
            stops: vec![StopRef {
                atco_code: String::from("0100BRP90310"),
                common_name: String::from("Temple Meads"),
            }],
        },
    }
}

/// Builds a pending scheduled post at the given index.
pub fn test_post(disruption_id: &str, index: u32) -> SocialMediaPost {
    SocialMediaPost {
        disruption_id: disruption_id.to_string(),
        social_media_post_index: index,
        status: SocialMediaPostStatus::Pending,
        message_content: String::from("A38 closed this week, allow extra time"),
        publish_date: Some(String::from("2026-03-01")),
        publish_time: Some(String::from("07:00")),
        account_type: String::from("hootsuite"),
        social_account: String::from("@travelwest"),
        image: None,
    }
}
