//! Document-database adapter.
//!
//! Persistence is delegated to an external per-user document database.
//! This module provides a trait-based abstraction over it in the same
//! shape as [`crate::llm`]: the [`DocumentStore`] trait, a real client
//! ([`FirestoreStore`]) speaking the service's REST API, and an
//! in-memory fake ([`MemoryStore`]) for tests. The typed submodules
//! (`recipes`, `preferences`, `meal_plans`) translate domain values to
//! and from per-collection, per-key documents and enforce that writes
//! are attributed to the authenticated caller.

mod firestore;
mod memory;

pub mod meal_plans;
pub mod preferences;
pub mod recipes;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Error taxonomy surfaced to callers.
///
/// `PermissionDenied` and `Unavailable` are distinct from "not found":
/// a missing document is `Ok(None)`, never an error at this layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Security-rule rejection: usually a misconfigured deployment or an
    /// identity mismatch between the caller and the document owner.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Transient connectivity or service overload; safe to retry.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Store error: {0}")]
    Other(String),
}

/// Trait for document stores: one JSON document per (collection, key).
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Point lookup. `Ok(None)` when the document does not exist.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Create or overwrite the document at (collection, key).
    async fn set(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError>;

    /// Delete by key. Idempotent: deleting a missing key is not an error.
    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    /// Equality query on a top-level document field, optionally ordered
    /// by a field, newest first.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        order_by_desc: Option<&str>,
    ) -> Result<Vec<Value>, StoreError>;
}

/// Reject an operation whose target user differs from the caller.
///
/// The database's own security rules enforce this too, but checking here
/// turns a deployment-dependent rejection into a deterministic one with
/// no network call.
pub(crate) fn ensure_owner(auth_uid: &str, user_id: &str) -> Result<(), StoreError> {
    if auth_uid == user_id {
        Ok(())
    } else {
        Err(StoreError::PermissionDenied(format!(
            "caller {auth_uid} cannot write documents owned by {user_id}"
        )))
    }
}
