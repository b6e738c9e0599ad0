// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Transport Disruptions Service.
//!
//! Disruptions live in two parallel stores backed by `SQLite` via
//! Diesel:
//!
//! - the **canonical** store (`disruptions`, `consequences`) holds
//!   the published truth plus drafts and templates;
//! - the **overlay** store (`disruptions_edited`,
//!   `consequences_edited`) holds the in-progress edit of a published
//!   disruption until it is merged back or discarded.
//!
//! All writes go through transactional batches ([`Target`],
//! [`WriteOp`]) so a multi-row mutation either lands completely or
//! not at all. Reads return the canonical record together with its
//! overlay so callers can decide which snapshot is effective.
//!
//! ## Testing
//!
//! Tests run against unique in-memory databases; see
//! [`Persistence::new_in_memory`].

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

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;

use tds_core::LoadedDisruption;
use tds_domain::{Disruption, HistoryEntry};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{Target, WriteOp};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID so
/// tests are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over the canonical and overlay stores.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or
    /// initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Loads a disruption together with its overlay, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried. A missing
    /// record is `Ok(None)`, not an error.
    pub fn try_load(
        &mut self,
        id: &str,
        org_id: &str,
    ) -> Result<Option<LoadedDisruption>, PersistenceError> {
        queries::try_load(&mut self.conn, id, org_id)
    }

    /// Loads a disruption together with its overlay.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if no canonical record
    /// exists for the given keys.
    pub fn load(&mut self, id: &str, org_id: &str) -> Result<LoadedDisruption, PersistenceError> {
        queries::load(&mut self.conn, id, org_id)
    }

    /// Lists the effective snapshots of all disruptions (or
    /// templates) for an organisation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list(
        &mut self,
        org_id: &str,
        template: bool,
    ) -> Result<Vec<Disruption>, PersistenceError> {
        queries::list(&mut self.conn, org_id, template)
    }

    /// Applies a batch of write operations in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any operation fails; the whole batch is
    /// rolled back in that case.
    pub fn commit(&mut self, target: Target, ops: &[WriteOp]) -> Result<(), PersistenceError> {
        mutations::commit(&mut self.conn, target, ops)
    }

    /// Merges the overlay into the canonical store and deletes it,
    /// returning the merged record.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if no overlay exists.
    pub fn merge_overlay(
        &mut self,
        id: &str,
        org_id: &str,
        now: &str,
        publish_entry: Option<HistoryEntry>,
    ) -> Result<Disruption, PersistenceError> {
        mutations::merge_overlay(&mut self.conn, id, org_id, now, publish_entry)
    }

    /// Deletes the overlay for a disruption, leaving the canonical
    /// record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if no overlay exists.
    pub fn discard_overlay(&mut self, id: &str, org_id: &str) -> Result<(), PersistenceError> {
        mutations::discard_overlay(&mut self.conn, id, org_id)
    }

    /// Discards the overlay and rewrites the canonical record in one
    /// transaction. On failure neither store is changed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if no overlay exists.
    pub fn discard_overlay_with_canonical(
        &mut self,
        id: &str,
        org_id: &str,
        canonical: &Disruption,
    ) -> Result<(), PersistenceError> {
        mutations::discard_overlay_with_canonical(&mut self.conn, id, org_id, canonical)
    }

    /// Deletes a disruption from both stores.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the disruption does
    /// not exist.
    pub fn delete_disruption(&mut self, id: &str, org_id: &str) -> Result<(), PersistenceError> {
        mutations::delete_disruption(&mut self.conn, id, org_id)
    }
}
