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

mod action;
mod error;
mod state;
mod transition;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use action::PublishAction;
pub use error::CoreError;
pub use state::{LoadedDisruption, OverlayEffect, TransitionPlan};
pub use transition::{begin_edit, ensure_ownership, plan_transition};
