// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod transition_tests;

use tds_domain::{Disruption, PublishStatus, ValidityPeriod};

/// Builds a canonical disruption in the given status.
pub fn disruption_with_status(id: &str, status: PublishStatus) -> Disruption {
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
        consequences: Vec::new(),
        social_media_posts: Vec::new(),
        created_by_operator_org_id: None,
        creation_time: String::from("2026-02-20T09:00:00Z"),
        last_updated: String::from("2026-02-20T09:00:00Z"),
    }
}
