//! Policy storage.
//!
//! This module provides append-only storage for policy snapshots.

mod in_memory;

pub use in_memory::InMemoryPolicyStore;

use chrono::{DateTime, Utc};
use covenant_core::error::Result;
use covenant_core::id::PolicyKey;

use crate::model::Policy;

/// One saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPolicy {
    /// The key the snapshot was saved under.
    pub key: PolicyKey,

    /// The policy as saved, including any store-assigned identifier.
    pub policy: Policy,

    /// When the snapshot was saved.
    pub saved_at: DateTime<Utc>,
}

/// Trait for policy storage.
///
/// A policy store keeps every saved snapshot in insertion order. Nothing is
/// ever updated or removed; saving a policy again appends a new entry.
pub trait PolicyStore: Send + Sync {
    /// Save a snapshot of a policy.
    ///
    /// Callers are expected to validate the policy first. The store does
    /// not check.
    ///
    /// # Arguments
    ///
    /// * `policy` - The policy to save.
    ///
    /// # Returns
    ///
    /// * `Ok(PolicyKey)` - The policy's own identifier, or a generated one
    ///   if it had none.
    /// * `Err` - If the snapshot could not be saved.
    fn save(&self, policy: &Policy) -> Result<PolicyKey>;

    /// Load the most recent snapshot saved under a key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key returned by `save`.
    ///
    /// # Returns
    ///
    /// * `Ok(Policy)` - An owned copy of the snapshot.
    /// * `Err` - If nothing was saved under the key.
    fn load(&self, key: &PolicyKey) -> Result<Policy>;

    /// List saved snapshots, most recent last.
    ///
    /// # Arguments
    ///
    /// * `limit` - If given, only the most recent `limit` entries are
    ///   returned, still oldest first.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<StoredPolicy>)` - The entries.
    /// * `Err` - If the entries could not be read.
    fn list(&self, limit: Option<usize>) -> Result<Vec<StoredPolicy>>;

    /// Number of saved snapshots.
    fn len(&self) -> Result<usize>;

    /// Whether nothing has been saved yet.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
