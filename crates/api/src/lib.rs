// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary layer for the Transport Disruptions Service.
//!
//! [`Api`] is what the HTTP layer (or any other frontend) talks to. It
//! owns the persistence adapter and the outbound collaborators, wires
//! the pure state machine and diff engine to storage, and translates
//! every failure into the [`ApiError`] taxonomy.
//!
//! Operations fall into three groups:
//!
//! - **authoring** — create or amend the overview, consequences and
//!   social media posts of a disruption ([`Api::create_or_update_disruption_info`]
//!   and friends). Against a published record these transparently
//!   materialize an edit overlay.
//! - **workflow** — drive the publication state machine
//!   ([`Api::publish_draft`], [`Api::publish_edit`],
//!   [`Api::reject_disruption`], [`Api::cancel_edit`],
//!   [`Api::delete_disruption`]).
//! - **reads** — effective snapshots ([`Api::get_effective_disruption`],
//!   [`Api::list_disruptions`]).

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
#![allow(clippy::multiple_crate_versions)]

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use tds_domain::{Disruption, ImageRef};
use tds_persistence::Persistence;

mod collaborators;
mod disruption_ops;
mod error;
mod publish_ops;

#[cfg(test)]
mod tests;

pub use collaborators::{
    CollaboratorError, EmailNotifier, InMemoryObjectStore, NoopNotifier, NoopPublisher,
    ObjectStore, SocialMediaPublisher,
};
pub use disruption_ops::DisruptionInfo;
pub use error::ApiError;

/// The service boundary: storage plus outbound collaborators.
pub struct Api {
    pub(crate) persistence: Persistence,
    pub(crate) publisher: Box<dyn SocialMediaPublisher>,
    pub(crate) notifier: Box<dyn EmailNotifier>,
    pub(crate) object_store: Box<dyn ObjectStore>,
}

impl Api {
    /// Creates an API boundary with no-op outbound collaborators.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self::with_collaborators(
            persistence,
            Box::new(NoopPublisher),
            Box::new(NoopNotifier),
            Box::new(InMemoryObjectStore::default()),
        )
    }

    /// Creates an API boundary with the given outbound collaborators.
    #[must_use]
    pub fn with_collaborators(
        persistence: Persistence,
        publisher: Box<dyn SocialMediaPublisher>,
        notifier: Box<dyn EmailNotifier>,
        object_store: Box<dyn ObjectStore>,
    ) -> Self {
        Self {
            persistence,
            publisher,
            notifier,
            object_store,
        }
    }

    /// Returns the effective snapshot of a disruption: the edit overlay
    /// when one exists, otherwise the canonical record. `Ok(None)` when
    /// the disruption does not exist for this organisation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] if the store cannot be read.
    pub fn get_effective_disruption(
        &mut self,
        id: &str,
        org_id: &str,
    ) -> Result<Option<Disruption>, ApiError> {
        let loaded = self.persistence.try_load(id, org_id)?;
        Ok(loaded.map(|l| l.effective().clone()))
    }

    /// Lists the effective snapshots of all disruptions (or templates)
    /// for an organisation, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] if the store cannot be read.
    pub fn list_disruptions(
        &mut self,
        org_id: &str,
        is_template: bool,
    ) -> Result<Vec<Disruption>, ApiError> {
        debug!(org_id, is_template, "Listing disruptions");
        Ok(self.persistence.list(org_id, is_template)?)
    }

    /// Stores post image bytes in the object store and returns the
    /// reference to attach to a social media post. The bytes themselves
    /// are never interpreted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] if the object store refused
    /// the upload.
    pub fn put_post_image(
        &mut self,
        key: &str,
        bytes: &[u8],
        original_filename: Option<String>,
    ) -> Result<ImageRef, ApiError> {
        self.object_store
            .put(key, bytes)
            .map_err(|e| ApiError::StorageFailure(e.to_string()))?;
        debug!(key, byte_count = bytes.len(), "Stored post image");
        Ok(ImageRef {
            key: key.to_string(),
            original_filename,
        })
    }
}

/// The current instant as RFC 3339 text, the format every stored
/// date-time uses.
pub(crate) fn now_rfc3339() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::StorageFailure(format!("failed to format timestamp: {e}")))
}
