// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field validation for disruptions, consequences and posts.
//!
//! Failures are recoverable `ValidationFailed` errors carrying the field
//! name, so the boundary can re-display the offending field.

use crate::consequence::{Consequence, ConsequenceDetail};
use crate::error::DomainError;
use crate::types::{Disruption, SocialMediaPost};

/// Maximum length of a disruption summary.
pub const MAX_SUMMARY_LENGTH: usize = 100;
/// Maximum length of a disruption or consequence description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
/// Maximum length of a social media message.
pub const MAX_POST_MESSAGE_LENGTH: usize = 280;
/// Maximum delay a consequence may declare, in minutes.
pub const MAX_DELAY_MINUTES: u32 = 999;

/// Account types whose posts cannot be scheduled, so no schedule is
/// required of them.
const UNSCHEDULED_ACCOUNT_TYPES: &[&str] = &["nextdoor"];

fn fail(field: &str, message: &str) -> DomainError {
    DomainError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Validates the overview fields of a disruption.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` naming the first offending
/// field.
pub fn validate_disruption(disruption: &Disruption) -> Result<(), DomainError> {
    if disruption.id.trim().is_empty() {
        return Err(fail("id", "must not be empty"));
    }
    if disruption.org_id.trim().is_empty() {
        return Err(fail("org_id", "must not be empty"));
    }
    if disruption.summary.trim().is_empty() {
        return Err(fail("summary", "must not be empty"));
    }
    if disruption.summary.chars().count() > MAX_SUMMARY_LENGTH {
        return Err(fail(
            "summary",
            "must be 100 characters or fewer",
        ));
    }
    if disruption.description.trim().is_empty() {
        return Err(fail("description", "must not be empty"));
    }
    if disruption.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(fail("description", "must be 500 characters or fewer"));
    }
    if !matches!(disruption.disruption_type.as_str(), "planned" | "unplanned") {
        return Err(fail(
            "disruption_type",
            "must be 'planned' or 'unplanned'",
        ));
    }
    if disruption.publish_start_date.trim().is_empty() {
        return Err(fail("publish_start_date", "must not be empty"));
    }
    if disruption.validity.is_empty() {
        return Err(fail("validity", "at least one validity period is required"));
    }
    for (i, period) in disruption.validity.iter().enumerate() {
        if period.start_time.trim().is_empty() {
            return Err(fail(
                &format!("validity[{i}].start_time"),
                "must not be empty",
            ));
        }
    }
    Ok(())
}

/// Validates a consequence, including that the payload of its active
/// variant is populated.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` naming the first offending
/// field.
pub fn validate_consequence(consequence: &Consequence) -> Result<(), DomainError> {
    if consequence.description.trim().is_empty() {
        return Err(fail("description", "must not be empty"));
    }
    if consequence.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(fail("description", "must be 500 characters or fewer"));
    }
    if let Some(delay) = consequence.delay_minutes
        && delay > MAX_DELAY_MINUTES
    {
        return Err(fail("delay_minutes", "must be 999 or fewer"));
    }
    match &consequence.detail {
        ConsequenceDetail::NetworkWide => Ok(()),
        ConsequenceDetail::OperatorWide { operators } => {
            if operators.is_empty() {
                return Err(fail("operators", "at least one operator is required"));
            }
            Ok(())
        }
        ConsequenceDetail::Stops { stops } => {
            if stops.is_empty() {
                return Err(fail("stops", "at least one stop is required"));
            }
            Ok(())
        }
        ConsequenceDetail::Services { services, .. } => {
            if services.is_empty() {
                return Err(fail("services", "at least one service is required"));
            }
            Ok(())
        }
        ConsequenceDetail::Journeys { services, journeys } => {
            if services.is_empty() {
                return Err(fail("services", "at least one service is required"));
            }
            if journeys.is_empty() {
                return Err(fail("journeys", "at least one journey is required"));
            }
            Ok(())
        }
    }
}

/// Validates a social media post.
///
/// Scheduled account types require a publish date and time; account
/// types that cannot schedule are exempt.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` naming the first offending
/// field.
pub fn validate_post(post: &SocialMediaPost) -> Result<(), DomainError> {
    if post.message_content.trim().is_empty() {
        return Err(fail("message_content", "must not be empty"));
    }
    if post.message_content.chars().count() > MAX_POST_MESSAGE_LENGTH {
        return Err(fail("message_content", "must be 280 characters or fewer"));
    }
    if post.social_account.trim().is_empty() {
        return Err(fail("social_account", "must not be empty"));
    }
    let schedule_exempt = UNSCHEDULED_ACCOUNT_TYPES.contains(&post.account_type.as_str());
    if !schedule_exempt {
        if post.publish_date.is_none() {
            return Err(fail("publish_date", "required for this account type"));
        }
        if post.publish_time.is_none() {
            return Err(fail("publish_time", "required for this account type"));
        }
    }
    Ok(())
}
