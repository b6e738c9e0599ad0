// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consequence records: one structured statement of impact per entry.
//!
//! The variant payload is a tagged union keyed by consequence type, so a
//! consequence can never carry fields irrelevant to its variant. Code
//! branching on the type pattern-matches exhaustively.

use crate::types::{Direction, Severity, VehicleMode};
use serde::{Deserialize, Serialize};

/// A stop affected by a consequence, by ATCO code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRef {
    pub atco_code: String,
    pub common_name: String,
}

/// A service affected by a consequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub service_id: String,
    pub line_name: String,
    pub operator_noc: String,
}

/// A single vehicle journey affected by a consequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyRef {
    pub journey_id: String,
    pub departure_time: String,
}

/// An operator affected by an operator-wide consequence, by NOC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRef {
    pub noc: String,
    pub operator_name: String,
}

/// Variant-specific payload of a consequence.
///
/// Exactly the fields relevant to the variant exist; everything else is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "consequence_type", rename_all = "camelCase")]
pub enum ConsequenceDetail {
    /// The whole network is affected.
    NetworkWide,
    /// Everything run by the listed operators is affected.
    OperatorWide { operators: Vec<OperatorRef> },
    /// The listed stops are affected.
    Stops { stops: Vec<StopRef> },
    /// The listed services are affected, optionally narrowed to specific
    /// stops, a direction, or named areas.
    Services {
        services: Vec<ServiceRef>,
        stops: Vec<StopRef>,
        direction: Option<Direction>,
        area: Vec<String>,
    },
    /// The listed individual journeys are affected.
    Journeys {
        services: Vec<ServiceRef>,
        journeys: Vec<JourneyRef>,
    },
}

impl ConsequenceDetail {
    /// Returns the camelCase type tag for this variant.
    ///
    /// This is the value persisted in the `consequence_type` column and
    /// humanised by the history crate.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::NetworkWide => "networkWide",
            Self::OperatorWide { .. } => "operatorWide",
            Self::Stops { .. } => "stops",
            Self::Services { .. } => "services",
            Self::Journeys { .. } => "journeys",
        }
    }
}

/// One impact record attached to a disruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consequence {
    /// The disruption this consequence belongs to.
    pub disruption_id: String,
    /// Unique 0-based index within the disruption. Not necessarily
    /// contiguous; never reused while live.
    pub consequence_index: u32,
    /// Human-readable description of the impact.
    pub description: String,
    /// Severity classification.
    pub severity: Severity,
    /// Mode of transport affected.
    pub vehicle_mode: VehicleMode,
    /// Whether affected entities should be hidden from journey planners.
    pub remove_from_journey_planners: bool,
    /// Delay in minutes, when the impact is a delay.
    pub delay_minutes: Option<u32>,
    /// Variant-specific payload.
    pub detail: ConsequenceDetail,
}
