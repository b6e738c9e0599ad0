// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core domain types for the Transport Disruptions Service.
//!
//! All date-times are carried as RFC 3339 text. The core never does date
//! arithmetic on them; they are opaque, ordered values supplied by the
//! boundary and validated there.

use crate::consequence::Consequence;
use crate::error::DomainError;
use crate::publish_status::PublishStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity classification for a consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Unknown,
    VerySlight,
    Slight,
    Normal,
    Severe,
    VerySevere,
}

impl Severity {
    /// Returns the string representation of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::VerySlight => "very_slight",
            Self::Slight => "slight",
            Self::Normal => "normal",
            Self::Severe => "severe",
            Self::VerySevere => "very_severe",
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "very_slight" => Ok(Self::VerySlight),
            "slight" => Ok(Self::Slight),
            "normal" => Ok(Self::Normal),
            "severe" => Ok(Self::Severe),
            "very_severe" => Ok(Self::VerySevere),
            _ => Err(DomainError::InvalidSeverity(s.to_string())),
        }
    }
}

/// Mode of transport affected by a consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleMode {
    Bus,
    Coach,
    Tram,
    Rail,
    Underground,
    FerryService,
}

impl VehicleMode {
    /// Returns the string representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Coach => "coach",
            Self::Tram => "tram",
            Self::Rail => "rail",
            Self::Underground => "underground",
            Self::FerryService => "ferry_service",
        }
    }
}

impl FromStr for VehicleMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bus" => Ok(Self::Bus),
            "coach" => Ok(Self::Coach),
            "tram" => Ok(Self::Tram),
            "rail" => Ok(Self::Rail),
            "underground" => Ok(Self::Underground),
            "ferry_service" => Ok(Self::FerryService),
            _ => Err(DomainError::InvalidVehicleMode(s.to_string())),
        }
    }
}

/// Direction of travel a service consequence applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
    AllDirections,
}

impl Direction {
    /// Returns the string representation of the direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::AllDirections => "all_directions",
        }
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(Self::Inbound),
            "outbound" => Ok(Self::Outbound),
            "all_directions" => Ok(Self::AllDirections),
            _ => Err(DomainError::InvalidDirection(s.to_string())),
        }
    }
}

/// Delivery status of a scheduled social media post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialMediaPostStatus {
    /// Authored but not yet handed to the outbound publisher.
    Pending,
    /// The outbound publisher rejected the post.
    Rejected,
    /// Handed over and accepted by the outbound publisher.
    Successful,
}

impl SocialMediaPostStatus {
    /// Returns the string representation of the post status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Successful => "successful",
        }
    }
}

impl FromStr for SocialMediaPostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            "successful" => Ok(Self::Successful),
            _ => Err(DomainError::InvalidPostStatus(s.to_string())),
        }
    }
}

/// One period during which a disruption is in effect.
///
/// A disruption always carries at least one validity period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    /// Period start, RFC 3339.
    pub start_time: String,
    /// Period end, RFC 3339. Absent for open-ended periods.
    pub end_time: Option<String>,
    /// Optional repeat rule (e.g. "daily", "weekly").
    pub repeats: Option<String>,
}

/// One append-only audit record on a disruption.
///
/// Entries are only ever appended; existing entries are never rewritten
/// or truncated. The diff engine in the history crate produces the
/// `items` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Human-readable change descriptions, deduplicated, insertion order.
    pub items: Vec<String>,
    /// Display name of the actor who made the change.
    pub user: String,
    /// The publish status resulting from the change.
    pub status: PublishStatus,
    /// When the change was recorded, RFC 3339.
    pub datetime: String,
}

/// Reference to an uploaded post image held in the object store.
///
/// The core persists only the key; image bytes are never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Object-store key of the uploaded image.
    pub key: String,
    /// Original file name, for display.
    pub original_filename: Option<String>,
}

/// A scheduled social media announcement attached to a disruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaPost {
    /// The disruption this post belongs to.
    pub disruption_id: String,
    /// Unique index within the disruption. Never reused while live.
    pub social_media_post_index: u32,
    /// Delivery status.
    pub status: SocialMediaPostStatus,
    /// The message to publish.
    pub message_content: String,
    /// Scheduled publish date, RFC 3339 date. Optional for account
    /// types that do not support scheduling.
    pub publish_date: Option<String>,
    /// Scheduled publish time (HH:MM). Optional as above.
    pub publish_time: Option<String>,
    /// The social account type (e.g. "hootsuite", "nextdoor").
    pub account_type: String,
    /// The social account identifier the post targets.
    pub social_account: String,
    /// Optional attached image reference.
    pub image: Option<ImageRef>,
}

/// The disruption root aggregate.
///
/// A disruption "in edit" exists as two records of this shape: the
/// canonical row and an overlay row. The overlay's existence is itself
/// state, owned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disruption {
    /// Stable identity. Immutable after creation.
    pub id: String,
    /// Owning organisation (tenant).
    pub org_id: String,
    /// Short human-readable code.
    pub display_id: String,
    /// Current publication state.
    pub publish_status: PublishStatus,
    /// True for templates. Templates follow the same state machine but
    /// are never publicly live.
    pub template: bool,
    /// Publish counter. Starts at 0, incremented only on a successful
    /// publish of an edit.
    pub version: i64,
    /// One-line summary.
    pub summary: String,
    /// Full description.
    pub description: String,
    /// "planned" or "unplanned".
    pub disruption_type: String,
    /// Reason classification (free-form reference-data code).
    pub reason: String,
    /// Optional link to further information.
    pub associated_link: Option<String>,
    /// When the notice becomes publicly visible, RFC 3339.
    pub publish_start_date: String,
    /// When the notice stops being publicly visible, RFC 3339.
    pub publish_end_date: Option<String>,
    /// Ordered validity periods. At least one always exists.
    pub validity: Vec<ValidityPeriod>,
    /// Append-only audit log.
    pub history: Vec<HistoryEntry>,
    /// Impact records, ordered by `consequence_index`.
    pub consequences: Vec<Consequence>,
    /// Scheduled announcements, ordered by `social_media_post_index`.
    pub social_media_posts: Vec<SocialMediaPost>,
    /// Set when an external operator authored the disruption. Constrains
    /// who may later edit it.
    pub created_by_operator_org_id: Option<String>,
    /// When the record was first created, RFC 3339.
    pub creation_time: String,
    /// When the record was last written, RFC 3339.
    pub last_updated: String,
}

impl Disruption {
    /// Looks up a consequence by its index.
    #[must_use]
    pub fn consequence_at(&self, index: u32) -> Option<&Consequence> {
        self.consequences
            .iter()
            .find(|c| c.consequence_index == index)
    }

    /// Returns the indices of all live consequences.
    pub fn consequence_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.consequences.iter().map(|c| c.consequence_index)
    }

    /// Looks up a social media post by its index.
    #[must_use]
    pub fn post_at(&self, index: u32) -> Option<&SocialMediaPost> {
        self.social_media_posts
            .iter()
            .find(|p| p.social_media_post_index == index)
    }

    /// Returns the indices of all live social media posts.
    pub fn post_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.social_media_posts
            .iter()
            .map(|p| p.social_media_post_index)
    }

    /// Replaces or inserts a consequence, keeping index order.
    pub fn put_consequence(&mut self, consequence: Consequence) {
        self.consequences
            .retain(|c| c.consequence_index != consequence.consequence_index);
        self.consequences.push(consequence);
        self.consequences.sort_by_key(|c| c.consequence_index);
    }

    /// Removes a consequence by index. Returns true if one was removed.
    pub fn remove_consequence(&mut self, index: u32) -> bool {
        let before = self.consequences.len();
        self.consequences.retain(|c| c.consequence_index != index);
        self.consequences.len() != before
    }

    /// Replaces or inserts a social media post, keeping index order.
    pub fn put_post(&mut self, post: SocialMediaPost) {
        self.social_media_posts
            .retain(|p| p.social_media_post_index != post.social_media_post_index);
        self.social_media_posts.push(post);
        self.social_media_posts
            .sort_by_key(|p| p.social_media_post_index);
    }

    /// Removes a social media post by index. Returns true if one was removed.
    pub fn remove_post(&mut self, index: u32) -> bool {
        let before = self.social_media_posts.len();
        self.social_media_posts
            .retain(|p| p.social_media_post_index != index);
        self.social_media_posts.len() != before
    }

    /// Returns the pending posts eligible for outbound publishing.
    #[must_use]
    pub fn pending_posts(&self) -> Vec<SocialMediaPost> {
        self.social_media_posts
            .iter()
            .filter(|p| p.status == SocialMediaPostStatus::Pending)
            .cloned()
            .collect()
    }
}
