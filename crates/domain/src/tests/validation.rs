// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{test_consequence, test_disruption, test_post};
use crate::{
    ConsequenceDetail, DomainError, validate_consequence, validate_disruption, validate_post,
};

fn failed_field(result: Result<(), DomainError>) -> String {
    match result {
        Err(DomainError::ValidationFailed { field, .. }) => field,
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn test_valid_disruption_passes() {
    assert!(validate_disruption(&test_disruption("d-1")).is_ok());
}

#[test]
fn test_empty_summary_rejected() {
    let mut disruption = test_disruption("d-1");
    disruption.summary = String::from("  ");
    assert_eq!(failed_field(validate_disruption(&disruption)), "summary");
}

#[test]
fn test_over_long_summary_rejected() {
    let mut disruption = test_disruption("d-1");
    disruption.summary = "x".repeat(101);
    assert_eq!(failed_field(validate_disruption(&disruption)), "summary");
}

#[test]
fn test_unknown_disruption_type_rejected() {
    let mut disruption = test_disruption("d-1");
    disruption.disruption_type = String::from("surprise");
    assert_eq!(
        failed_field(validate_disruption(&disruption)),
        "disruption_type"
    );
}

#[test]
fn test_missing_validity_rejected() {
    let mut disruption = test_disruption("d-1");
    disruption.validity.clear();
    assert_eq!(failed_field(validate_disruption(&disruption)), "validity");
}

#[test]
fn test_valid_consequence_passes() {
    assert!(validate_consequence(&test_consequence("d-1", 0)).is_ok());
}

#[test]
fn test_empty_variant_payload_rejected() {
    let mut consequence = test_consequence("d-1", 0);
    consequence.detail = ConsequenceDetail::Stops { stops: vec![] };
    assert_eq!(failed_field(validate_consequence(&consequence)), "stops");

    consequence.detail = ConsequenceDetail::OperatorWide { operators: vec![] };
    assert_eq!(failed_field(validate_consequence(&consequence)), "operators");
}

#[test]
fn test_network_wide_needs_no_payload() {
    let mut consequence = test_consequence("d-1", 0);
    consequence.detail = ConsequenceDetail::NetworkWide;
    assert!(validate_consequence(&consequence).is_ok());
}

#[test]
fn test_excessive_delay_rejected() {
    let mut consequence = test_consequence("d-1", 0);
    consequence.delay_minutes = Some(1000);
    assert_eq!(
        failed_field(validate_consequence(&consequence)),
        "delay_minutes"
    );
}

#[test]
fn test_valid_post_passes() {
    assert!(validate_post(&test_post("d-1", 0)).is_ok());
}

#[test]
fn test_over_long_message_rejected() {
    let mut post = test_post("d-1", 0);
    post.message_content = "x".repeat(281);
    assert_eq!(failed_field(validate_post(&post)), "message_content");
}

#[test]
fn test_schedule_required_for_scheduled_account_type() {
    let mut post = test_post("d-1", 0);
    post.publish_date = None;
    assert_eq!(failed_field(validate_post(&post)), "publish_date");
}

#[test]
fn test_schedule_optional_for_nextdoor() {
    let mut post = test_post("d-1", 0);
    post.account_type = String::from("nextdoor");
    post.publish_date = None;
    post.publish_time = None;
    assert!(validate_post(&post).is_ok());
}
