// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collaborators::ObjectStore;
use crate::error::ApiError;
use crate::tests::{
    ORG, api, author, create_draft, create_published, network_consequence, staff, test_info,
    test_post,
};
use tds_domain::{MAX_CONSEQUENCES, PublishStatus};
use tds_history::Actor;

#[test]
fn test_create_starts_as_draft_with_no_history() {
    let mut api = api();
    create_draft(&mut api, "d-1");

    let snapshot = api.get_effective_disruption("d-1", ORG).unwrap().unwrap();
    assert_eq!(snapshot.publish_status, PublishStatus::Draft);
    assert_eq!(snapshot.summary, "Road closed for resurfacing");
    assert!(snapshot.history.is_empty());
    assert_eq!(snapshot.version, 0);
}

#[test]
fn test_create_rejects_invalid_overview() {
    let mut api = api();
    let mut info = test_info("d-1");
    info.summary = String::new();

    let result = api.create_or_update_disruption_info(&info, ORG, &author(), false, None);
    assert!(matches!(
        result,
        Err(ApiError::ValidationFailed { field, .. }) if field == "summary"
    ));
    assert!(api.get_effective_disruption("d-1", ORG).unwrap().is_none());
}

#[test]
fn test_draft_amendment_has_no_audit_trail() {
    let mut api = api();
    create_draft(&mut api, "d-1");

    let mut info = test_info("d-1");
    info.summary = String::from("Amended summary");
    api.create_or_update_disruption_info(&info, ORG, &author(), false, None)
        .unwrap();

    let snapshot = api.get_effective_disruption("d-1", ORG).unwrap().unwrap();
    assert_eq!(snapshot.summary, "Amended summary");
    assert!(snapshot.history.is_empty());
}

#[test]
fn test_adding_second_consequence_advances_next_index() {
    let mut api = api();
    create_draft(&mut api, "d-1");

    let max = api
        .upsert_consequence(network_consequence("d-1", 0), ORG, &author())
        .unwrap();
    assert_eq!(max, 0);
    assert_eq!(api.next_consequence_index("d-1", ORG).unwrap(), 1);

    let max = api
        .upsert_consequence(network_consequence("d-1", 1), ORG, &author())
        .unwrap();
    assert_eq!(max, 1);
    assert_eq!(api.next_consequence_index("d-1", ORG).unwrap(), 2);
}

#[test]
fn test_capacity_blocks_eleventh_consequence_but_not_edits() {
    let mut api = api();
    create_draft(&mut api, "d-1");
    for index in 0..u32::try_from(MAX_CONSEQUENCES).unwrap() {
        api.upsert_consequence(network_consequence("d-1", index), ORG, &author())
            .unwrap();
    }

    let result = api.upsert_consequence(network_consequence("d-1", 10), ORG, &author());
    assert!(matches!(
        result,
        Err(ApiError::TooManyConsequences { max }) if max == MAX_CONSEQUENCES
    ));

    // Editing an index already held never counts against capacity.
    let mut edited = network_consequence("d-1", 3);
    edited.description = String::from("Buses diverted via the ring road");
    assert!(api.upsert_consequence(edited, ORG, &author()).is_ok());
}

#[test]
fn test_removed_index_is_never_reused() {
    let mut api = api();
    create_draft(&mut api, "d-1");
    for index in 0..3 {
        api.upsert_consequence(network_consequence("d-1", index), ORG, &author())
            .unwrap();
    }

    api.remove_consequence(1, "d-1", ORG, &author()).unwrap();
    assert_eq!(api.next_consequence_index("d-1", ORG).unwrap(), 3);

    api.upsert_consequence(network_consequence("d-1", 3), ORG, &author())
        .unwrap();
    let snapshot = api.get_effective_disruption("d-1", ORG).unwrap().unwrap();
    let indices: Vec<u32> = snapshot.consequence_indices().collect();
    assert_eq!(indices, vec![0, 2, 3]);
}

#[test]
fn test_remove_missing_consequence_is_not_found() {
    let mut api = api();
    create_draft(&mut api, "d-1");
    let result = api.remove_consequence(5, "d-1", ORG, &author());
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_mutation_against_published_record_materializes_overlay() {
    let mut api = api();
    create_published(&mut api, "d-1");

    api.upsert_consequence(network_consequence("d-1", 0), ORG, &author())
        .unwrap();

    let loaded = api.persistence.load("d-1", ORG).unwrap();
    assert!(loaded.edit_exists());
    assert!(loaded.canonical.consequences.is_empty());
    assert_eq!(loaded.canonical.publish_status, PublishStatus::Published);

    let overlay = loaded.overlay.unwrap();
    assert_eq!(overlay.publish_status, PublishStatus::Editing);
    assert_eq!(overlay.consequences.len(), 1);
    let last = overlay.history.last().unwrap();
    assert_eq!(
        last.items,
        vec!["Disruption Consequence - Network Wide: Added"]
    );
}

#[test]
fn test_overview_edit_in_edit_context_appends_single_item() {
    let mut api = api();
    create_published(&mut api, "d-1");

    let mut info = test_info("d-1");
    info.summary = String::from("Amended while live");
    info.description = String::from("Both overview fields change at once.");
    api.create_or_update_disruption_info(&info, ORG, &author(), false, None)
        .unwrap();

    let loaded = api.persistence.load("d-1", ORG).unwrap();
    let overlay = loaded.overlay.unwrap();
    let entries = overlay.history.len();
    assert_eq!(
        overlay.history.last().unwrap().items,
        vec!["Disruption Overview: Edited"]
    );

    // Re-submitting the identical overview is not a change and appends
    // nothing.
    api.create_or_update_disruption_info(&info, ORG, &author(), false, None)
        .unwrap();
    let loaded = api.persistence.load("d-1", ORG).unwrap();
    assert_eq!(loaded.overlay.unwrap().history.len(), entries);
}

#[test]
fn test_post_schedule_required_unless_exempt_or_publishing() {
    let mut api = api();
    create_draft(&mut api, "d-1");

    let mut unscheduled = test_post("d-1", 0);
    unscheduled.publish_date = None;
    unscheduled.publish_time = None;
    let result = api.upsert_social_media_post(unscheduled.clone(), ORG, &author(), false);
    assert!(matches!(
        result,
        Err(ApiError::ValidationFailed { field, .. }) if field == "publish_date"
    ));

    // Account types that cannot schedule are exempt.
    let mut nextdoor = unscheduled.clone();
    nextdoor.account_type = String::from("nextdoor");
    assert!(
        api.upsert_social_media_post(nextdoor, ORG, &author(), false)
            .is_ok()
    );

    // A post written as part of a publish action may still lack its
    // schedule.
    unscheduled.social_media_post_index = 1;
    assert!(
        api.upsert_social_media_post(unscheduled, ORG, &author(), true)
            .is_ok()
    );
}

#[test]
fn test_remove_social_media_post() {
    let mut api = api();
    create_draft(&mut api, "d-1");
    api.upsert_social_media_post(test_post("d-1", 0), ORG, &author(), false)
        .unwrap();
    assert_eq!(api.next_post_index("d-1", ORG).unwrap(), 1);

    api.remove_social_media_post(0, "d-1", ORG, &author())
        .unwrap();
    let snapshot = api.get_effective_disruption("d-1", ORG).unwrap().unwrap();
    assert!(snapshot.social_media_posts.is_empty());

    let result = api.remove_social_media_post(0, "d-1", ORG, &author());
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[test]
fn test_cross_org_actor_is_forbidden() {
    let mut api = api();
    create_draft(&mut api, "d-1");

    let outsider = Actor::staff("Eve", "org-2");
    let result = api.upsert_consequence(network_consequence("d-1", 0), "org-1", &outsider);
    assert!(matches!(result, Err(ApiError::Forbidden(_))));

    // Reads are organisation-scoped too.
    assert!(api.get_effective_disruption("d-1", "org-2").unwrap().is_none());
}

#[test]
fn test_rejected_record_cannot_be_mutated() {
    let mut api = api();
    create_draft(&mut api, "d-1");
    api.publish_draft("d-1", ORG, &author()).unwrap();
    api.reject_disruption("d-1", ORG, &staff()).unwrap();

    let result = api.upsert_consequence(network_consequence("d-1", 0), ORG, &author());
    assert!(matches!(
        result,
        Err(ApiError::ValidationFailed { field, .. }) if field == "publish_status"
    ));
}

#[test]
fn test_put_post_image_round_trip() {
    let mut api = api();
    let image = api
        .put_post_image("org-1/d-1/map.png", b"not a real png", Some(String::from("map.png")))
        .unwrap();
    assert_eq!(image.key, "org-1/d-1/map.png");
    assert_eq!(image.original_filename.as_deref(), Some("map.png"));
    assert_eq!(
        api.object_store.get("org-1/d-1/map.png").unwrap(),
        b"not a real png"
    );
}
