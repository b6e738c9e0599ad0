// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod mutation_tests;

use std::sync::{Arc, Mutex};

use crate::collaborators::{CollaboratorError, EmailNotifier, SocialMediaPublisher};
use crate::{Api, DisruptionInfo};
use tds_domain::{
    Consequence, ConsequenceDetail, Severity, SocialMediaPost, SocialMediaPostStatus,
    ValidityPeriod, VehicleMode,
};
use tds_history::Actor;
use tds_persistence::Persistence;

pub const ORG: &str = "org-1";

pub fn api() -> Api {
    Api::new(Persistence::new_in_memory().unwrap())
}

pub fn staff() -> Actor {
    Actor::staff("Jo Staff", ORG)
}

pub fn author() -> Actor {
    Actor::author("Sam Author", ORG)
}

pub fn test_info(id: &str) -> DisruptionInfo {
    DisruptionInfo {
        id: id.to_string(),
        display_id: String::from("8fg3ha"),
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
    }
}

pub fn network_consequence(disruption_id: &str, index: u32) -> Consequence {
    Consequence {
        disruption_id: disruption_id.to_string(),
        consequence_index: index,
        description: String::from("All services suspended"),
        severity: Severity::VerySevere,
        vehicle_mode: VehicleMode::Bus,
        remove_from_journey_planners: false,
        delay_minutes: None,
        detail: ConsequenceDetail::NetworkWide,
    }
}

pub fn test_post(disruption_id: &str, index: u32) -> SocialMediaPost {
    SocialMediaPost {
        disruption_id: disruption_id.to_string(),
        social_media_post_index: index,
        status: SocialMediaPostStatus::Pending,
        message_content: String::from("The A38 is closed this weekend, plan ahead."),
        publish_date: Some(String::from("2026-03-01")),
        publish_time: Some(String::from("08:00")),
        account_type: String::from("hootsuite"),
        social_account: String::from("@travelwest"),
        image: None,
    }
}

pub fn create_draft(api: &mut Api, id: &str) {
    api.create_or_update_disruption_info(&test_info(id), ORG, &author(), false, None)
        .unwrap();
}

pub fn create_published(api: &mut Api, id: &str) {
    create_draft(api, id);
    api.publish_draft(id, ORG, &staff()).unwrap();
}

/// Publisher stub that records every handoff and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    pub calls: Arc<Mutex<Vec<(usize, String, bool)>>>,
    pub fail: bool,
}

impl SocialMediaPublisher for RecordingPublisher {
    fn publish(
        &self,
        posts: &[SocialMediaPost],
        org_id: &str,
        actor_is_staff: bool,
    ) -> Result<(), CollaboratorError> {
        self.calls
            .lock()
            .unwrap()
            .push((posts.len(), org_id.to_string(), actor_is_staff));
        if self.fail {
            Err(CollaboratorError(String::from("publisher offline")))
        } else {
            Ok(())
        }
    }
}

/// Notifier stub that records every submission notice.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub submissions: Arc<Mutex<Vec<String>>>,
}

impl EmailNotifier for RecordingNotifier {
    fn notify_submission(
        &self,
        disruption_id: &str,
        _org_id: &str,
        _submitted_by: &str,
    ) -> Result<(), CollaboratorError> {
        self.submissions
            .lock()
            .unwrap()
            .push(disruption_id.to_string());
        Ok(())
    }
}
