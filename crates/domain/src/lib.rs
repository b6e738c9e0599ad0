// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod consequence;
mod error;
mod index;
mod publish_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use consequence::{
    Consequence, ConsequenceDetail, JourneyRef, OperatorRef, ServiceRef, StopRef,
};
pub use error::DomainError;
pub use index::{MAX_CONSEQUENCES, assert_capacity, next_index};
pub use publish_status::PublishStatus;
pub use types::{
    Direction, Disruption, HistoryEntry, ImageRef, Severity, SocialMediaPost,
    SocialMediaPostStatus, ValidityPeriod, VehicleMode,
};
pub use validation::{
    MAX_DELAY_MINUTES, MAX_DESCRIPTION_LENGTH, MAX_POST_MESSAGE_LENGTH, MAX_SUMMARY_LENGTH,
    validate_consequence, validate_disruption, validate_post,
};
