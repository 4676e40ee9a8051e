//! In-memory policy store.
//!
//! This module provides an in-memory implementation of the policy store.

use covenant_core::error::{Result, StoreError};
use covenant_core::id::PolicyKey;
use covenant_core::log_event;
use covenant_core::utils::config::{StoreConfig, DEFAULT_KEY_PREFIX};
use covenant_core::utils::{Clock, LogLevel, SystemClock};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{PolicyStore, StoredPolicy};
use crate::model::{GenericField, OdrlField, Policy};

#[derive(Debug)]
struct StoreState {
    /// Every snapshot, in save order.
    entries: Vec<StoredPolicy>,

    /// Position of the latest snapshot for each key.
    latest: HashMap<PolicyKey, usize>,

    /// Next generated generic policy id, above every id seen. `None` once
    /// `u64::MAX` has been used.
    next_generic_id: Option<u64>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            latest: HashMap::new(),
            next_generic_id: Some(1),
        }
    }
}

/// An in-memory policy store.
///
/// Clones share the same underlying entries.
#[derive(Debug, Clone)]
pub struct InMemoryPolicyStore {
    /// The saved snapshots.
    inner: Arc<RwLock<StoreState>>,

    /// Source of `saved_at` timestamps.
    clock: Arc<dyn Clock>,

    /// Prefix of keys generated for ODRL policies.
    key_prefix: String,
}

impl InMemoryPolicyStore {
    /// Create a new in-memory policy store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreState::default())),
            clock: Arc::new(SystemClock),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Create a store from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new().with_key_prefix(config.key_prefix.clone())
    }

    /// Use `clock` for `saved_at` timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Use `prefix` for keys generated for ODRL policies.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.inner
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()).into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.inner
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()).into())
    }

    /// Resolve the key for `policy`, writing a generated one into the
    /// snapshot when the policy has none.
    ///
    /// ODRL uids and generic ids share one key space. An own key held by a
    /// policy of the other family is rejected; generated keys skip every
    /// key already in use.
    fn assign_key(&self, state: &mut StoreState, policy: &Policy) -> Result<(PolicyKey, Policy)> {
        if let Some(key) = policy.own_key() {
            if let Some(&position) = state.latest.get(&key) {
                let existing = state.entries[position].policy.family();
                if existing != policy.family() {
                    return Err(StoreError::KeyConflict {
                        key,
                        existing: existing.to_string(),
                    }
                    .into());
                }
            }

            if let Some(id) = policy.as_generic().and_then(|generic| generic.id()) {
                state.next_generic_id = match (state.next_generic_id, id.checked_add(1)) {
                    (Some(next), Some(after)) => Some(next.max(after)),
                    _ => None,
                };
            }

            return Ok((key, policy.clone()));
        }

        let (key, snapshot) = match policy {
            Policy::Odrl(odrl) => {
                let key = loop {
                    let key = PolicyKey::generate(&self.key_prefix);
                    if !state.latest.contains_key(&key) {
                        break key;
                    }
                };
                let snapshot = odrl.with_field(OdrlField::Uid(key.to_string()));
                (key, Policy::Odrl(snapshot))
            }
            Policy::Generic(generic) => {
                let (id, key) = Self::next_generic_key(state)?;
                let snapshot = generic.with_field(GenericField::Id(Some(id)));
                (key, Policy::Generic(snapshot))
            }
        };

        debug!("Generated key {} for {} policy", key, snapshot.family());

        Ok((key, snapshot))
    }

    /// Take the next free generic id.
    fn next_generic_key(state: &mut StoreState) -> Result<(u64, PolicyKey)> {
        let mut id = state.next_generic_id.ok_or(StoreError::IdsExhausted)?;

        loop {
            let key = PolicyKey::new(id.to_string());
            if !state.latest.contains_key(&key) {
                state.next_generic_id = id.checked_add(1);
                return Ok((id, key));
            }
            id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        }
    }
}

impl Default for InMemoryPolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyStore for InMemoryPolicyStore {
    fn save(&self, policy: &Policy) -> Result<PolicyKey> {
        // Key assignment and append happen under the same guard
        let mut state = self.write()?;

        let (key, snapshot) = self.assign_key(&mut state, policy)?;
        let revision = state.latest.contains_key(&key);

        let position = state.entries.len();
        state.entries.push(StoredPolicy {
            key: key.clone(),
            policy: snapshot,
            saved_at: self.clock.now(),
        });
        state.latest.insert(key.clone(), position);

        log_event!(LogLevel::Debug, "Policy saved",
            key => key,
            revision => revision,
            entries => state.entries.len(),
        );

        Ok(key)
    }

    fn load(&self, key: &PolicyKey) -> Result<Policy> {
        let state = self.read()?;

        // Get the latest snapshot
        let position = state
            .latest
            .get(key)
            .copied()
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;

        Ok(state.entries[position].policy.clone())
    }

    fn list(&self, limit: Option<usize>) -> Result<Vec<StoredPolicy>> {
        let state = self.read()?;

        let start = match limit {
            Some(limit) => state.entries.len().saturating_sub(limit),
            None => 0,
        };

        Ok(state.entries[start..].to_vec())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read()?.entries.len())
    }
}
