// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary collaborators consumed by the API layer.
//!
//! The workflow itself never talks to the outside world directly; it
//! goes through these traits. Real deployments plug in HTTP-backed
//! implementations, tests and local runs use the stubs below.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

use tds_domain::SocialMediaPost;

/// A collaborator call failed. The message is operator-facing; the
/// caller decides whether the failure is fatal to the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

/// Outbound social media publisher.
///
/// Invoked with the pending posts of a disruption on a privileged
/// publish, never on cancel or rejection.
pub trait SocialMediaPublisher: Send {
    /// Hands the given posts to the outbound publishing service.
    ///
    /// # Errors
    ///
    /// Returns an error if the publishing service rejected the batch.
    fn publish(
        &self,
        posts: &[SocialMediaPost],
        org_id: &str,
        actor_is_staff: bool,
    ) -> Result<(), CollaboratorError>;
}

/// Fire-and-forget notifier for submissions awaiting approval.
pub trait EmailNotifier: Send {
    /// Notifies approvers that a submission is waiting for them.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be sent. Callers
    /// log the failure and carry on; it never rolls back a write.
    fn notify_submission(
        &self,
        disruption_id: &str,
        org_id: &str,
        submitted_by: &str,
    ) -> Result<(), CollaboratorError>;
}

/// Object store for post images. Only the key is ever persisted on a
/// disruption; the bytes are opaque to the workflow.
pub trait ObjectStore: Send {
    /// Stores bytes under the given key, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object could not be stored.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CollaboratorError>;

    /// Retrieves the bytes stored under the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if no object exists under the key.
    fn get(&self, key: &str) -> Result<Vec<u8>, CollaboratorError>;
}

/// Publisher stub that accepts every batch without sending anything.
pub struct NoopPublisher;

impl SocialMediaPublisher for NoopPublisher {
    fn publish(
        &self,
        posts: &[SocialMediaPost],
        org_id: &str,
        actor_is_staff: bool,
    ) -> Result<(), CollaboratorError> {
        debug!(
            post_count = posts.len(),
            org_id, actor_is_staff, "No-op publisher accepted posts"
        );
        Ok(())
    }
}

/// Notifier stub that drops every notification.
pub struct NoopNotifier;

impl EmailNotifier for NoopNotifier {
    fn notify_submission(
        &self,
        disruption_id: &str,
        org_id: &str,
        submitted_by: &str,
    ) -> Result<(), CollaboratorError> {
        debug!(
            disruption_id,
            org_id, submitted_by, "No-op notifier dropped submission notice"
        );
        Ok(())
    }
}

/// In-memory object store.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl ObjectStore for InMemoryObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), CollaboratorError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| CollaboratorError(String::from("object store lock poisoned")))?;
        objects.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, CollaboratorError> {
        let objects = self
            .objects
            .lock()
            .map_err(|_| CollaboratorError(String::from("object store lock poisoned")))?;
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| CollaboratorError(format!("no object stored under key '{key}'")))
    }
}
