// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::disruption_with_status;
use crate::{
    CoreError, LoadedDisruption, OverlayEffect, PublishAction, begin_edit, plan_transition,
};
use tds_domain::PublishStatus;
use tds_history::Actor;

fn staff() -> Actor {
    Actor::staff("Jo Staff", "org-1")
}

fn author() -> Actor {
    Actor::author("Sam Author", "org-1")
}

fn loaded(status: PublishStatus) -> LoadedDisruption {
    LoadedDisruption::new(disruption_with_status("d-1", status), None)
}

fn loaded_with_overlay(
    canonical_status: PublishStatus,
    overlay_status: PublishStatus,
) -> LoadedDisruption {
    let canonical = disruption_with_status("d-1", canonical_status);
    let overlay = disruption_with_status("d-1", overlay_status);
    LoadedDisruption::new(canonical, Some(overlay))
}

#[test]
fn test_staff_submit_publishes_directly() {
    let plan = plan_transition(&loaded(PublishStatus::Draft), PublishAction::Submit, &staff())
        .unwrap();
    assert_eq!(plan.new_status, PublishStatus::Published);
    assert_eq!(plan.effect, OverlayEffect::None);
    assert!(plan.handoff_posts);
}

#[test]
fn test_non_staff_submit_goes_to_review() {
    let plan = plan_transition(&loaded(PublishStatus::Draft), PublishAction::Submit, &author())
        .unwrap();
    assert_eq!(plan.new_status, PublishStatus::PendingApproval);
    assert_eq!(plan.effect, OverlayEffect::None);
    assert!(!plan.handoff_posts);
}

#[test]
fn test_staff_approve_pending_submission() {
    let plan = plan_transition(
        &loaded(PublishStatus::PendingApproval),
        PublishAction::Approve,
        &staff(),
    )
    .unwrap();
    assert_eq!(plan.new_status, PublishStatus::Published);
    assert_eq!(plan.effect, OverlayEffect::None);
}

#[test]
fn test_non_staff_cannot_approve() {
    let result = plan_transition(
        &loaded(PublishStatus::PendingApproval),
        PublishAction::Approve,
        &author(),
    );
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_staff_reject_is_terminal() {
    let plan = plan_transition(
        &loaded(PublishStatus::PendingApproval),
        PublishAction::Reject,
        &staff(),
    )
    .unwrap();
    assert_eq!(plan.new_status, PublishStatus::Rejected);
    assert!(!plan.handoff_posts);
}

#[test]
fn test_start_edit_creates_overlay() {
    for actor in [staff(), author()] {
        let plan = plan_transition(
            &loaded(PublishStatus::Published),
            PublishAction::StartEdit,
            &actor,
        )
        .unwrap();
        assert_eq!(plan.new_status, PublishStatus::Editing);
        assert_eq!(plan.effect, OverlayEffect::Create);
    }
}

#[test]
fn test_submit_edit_advances_overlay() {
    let view = loaded_with_overlay(PublishStatus::Published, PublishStatus::Editing);
    let plan = plan_transition(&view, PublishAction::SubmitEdit, &author()).unwrap();
    assert_eq!(plan.new_status, PublishStatus::PendingAndEditing);
    assert_eq!(plan.effect, OverlayEffect::None);
}

#[test]
fn test_staff_publish_edit_merges() {
    for overlay_status in [PublishStatus::Editing, PublishStatus::PendingAndEditing] {
        let view = loaded_with_overlay(PublishStatus::Published, overlay_status);
        let plan = plan_transition(&view, PublishAction::PublishEdit, &staff()).unwrap();
        assert_eq!(plan.new_status, PublishStatus::Published);
        assert_eq!(plan.effect, OverlayEffect::Merge);
        assert!(plan.handoff_posts);
    }
}

#[test]
fn test_non_staff_publish_edit_retains_overlay() {
    let view = loaded_with_overlay(PublishStatus::Published, PublishStatus::PendingAndEditing);
    let plan = plan_transition(&view, PublishAction::PublishEdit, &author()).unwrap();
    assert_eq!(plan.new_status, PublishStatus::EditPendingApproval);
    assert_eq!(plan.effect, OverlayEffect::None);
    assert!(!plan.handoff_posts);
}

#[test]
fn test_staff_approve_pending_edit_merges() {
    let view = loaded_with_overlay(PublishStatus::Published, PublishStatus::EditPendingApproval);
    let plan = plan_transition(&view, PublishAction::Approve, &staff()).unwrap();
    assert_eq!(plan.new_status, PublishStatus::Published);
    assert_eq!(plan.effect, OverlayEffect::Merge);
}

#[test]
fn test_staff_reject_pending_edit_discards_overlay() {
    let view = loaded_with_overlay(PublishStatus::Published, PublishStatus::EditPendingApproval);
    let plan = plan_transition(&view, PublishAction::Reject, &staff()).unwrap();
    assert_eq!(plan.new_status, PublishStatus::Published);
    assert_eq!(plan.effect, OverlayEffect::Discard);
    assert!(!plan.handoff_posts);
}

#[test]
fn test_cancel_edit_discards_from_any_in_edit_state() {
    for overlay_status in [
        PublishStatus::Editing,
        PublishStatus::PendingAndEditing,
        PublishStatus::EditPendingApproval,
    ] {
        let view = loaded_with_overlay(PublishStatus::Published, overlay_status);
        let plan = plan_transition(&view, PublishAction::CancelEdit, &author()).unwrap();
        assert_eq!(plan.new_status, PublishStatus::Published);
        assert_eq!(plan.effect, OverlayEffect::Discard);
        assert!(!plan.handoff_posts);
    }
}

#[test]
fn test_staff_delete_from_any_state() {
    for status in [
        PublishStatus::Draft,
        PublishStatus::PendingApproval,
        PublishStatus::Published,
        PublishStatus::Rejected,
    ] {
        let plan = plan_transition(&loaded(status), PublishAction::Delete, &staff()).unwrap();
        assert_eq!(plan.effect, OverlayEffect::DeleteAll);
    }
}

#[test]
fn test_non_staff_cannot_delete() {
    let result = plan_transition(&loaded(PublishStatus::Draft), PublishAction::Delete, &author());
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_rejected_allows_nothing_but_delete() {
    for action in [
        PublishAction::Submit,
        PublishAction::Approve,
        PublishAction::StartEdit,
        PublishAction::PublishEdit,
        PublishAction::CancelEdit,
    ] {
        let result = plan_transition(&loaded(PublishStatus::Rejected), action, &staff());
        assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
    }
}

#[test]
fn test_invalid_combinations_rejected() {
    let result = plan_transition(
        &loaded(PublishStatus::Draft),
        PublishAction::PublishEdit,
        &staff(),
    );
    assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));

    let result = plan_transition(
        &loaded(PublishStatus::Published),
        PublishAction::Submit,
        &staff(),
    );
    assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
}

#[test]
fn test_wrong_org_is_forbidden_before_any_state_check() {
    let outsider = Actor::staff("Eve", "org-2");
    let result = plan_transition(&loaded(PublishStatus::Published), PublishAction::Delete, &outsider);
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_operator_ownership_mismatch_is_forbidden() {
    let mut canonical = disruption_with_status("d-1", PublishStatus::Published);
    canonical.created_by_operator_org_id = Some(String::from("op-x"));
    let view = LoadedDisruption::new(canonical, None);

    let wrong_operator = Actor::operator("Op", "org-1", "op-y");
    let result = plan_transition(&view, PublishAction::StartEdit, &wrong_operator);
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));

    let right_operator = Actor::operator("Op", "org-1", "op-x");
    assert!(plan_transition(&view, PublishAction::StartEdit, &right_operator).is_ok());
}

#[test]
fn test_effective_prefers_overlay() {
    let view = loaded_with_overlay(PublishStatus::Published, PublishStatus::Editing);
    assert_eq!(view.effective().publish_status, PublishStatus::Editing);
    assert!(view.edit_exists());

    let plain = loaded(PublishStatus::Published);
    assert_eq!(plain.effective().publish_status, PublishStatus::Published);
    assert!(!plain.edit_exists());
}

#[test]
fn test_begin_edit_copies_and_appends_history() {
    let canonical = disruption_with_status("d-1", PublishStatus::Published);
    let overlay = begin_edit(
        &canonical,
        &author(),
        vec![String::from("Disruption Overview: Edited")],
        "2026-03-02T10:00:00Z",
    );

    assert_eq!(overlay.publish_status, PublishStatus::Editing);
    assert_eq!(overlay.id, canonical.id);
    assert_eq!(overlay.summary, canonical.summary);
    assert_eq!(overlay.version, canonical.version);
    assert_eq!(overlay.history.len(), 1);
    assert_eq!(
        overlay.history[0].items,
        vec![String::from("Disruption Overview: Edited")]
    );
    // Canonical is never mutated by beginning an edit.
    assert!(canonical.history.is_empty());
}

#[test]
fn test_begin_edit_on_pending_record() {
    let canonical = disruption_with_status("d-1", PublishStatus::PendingApproval);
    let overlay = begin_edit(&canonical, &author(), vec![], "2026-03-02T10:00:00Z");
    assert_eq!(overlay.publish_status, PublishStatus::PendingAndEditing);
}

#[test]
fn test_templates_never_hand_off_posts() {
    let mut canonical = disruption_with_status("d-1", PublishStatus::Draft);
    canonical.template = true;
    let view = LoadedDisruption::new(canonical, None);
    let plan = plan_transition(&view, PublishAction::Submit, &staff()).unwrap();
    assert_eq!(plan.new_status, PublishStatus::Published);
    assert!(!plan.handoff_posts);
}
