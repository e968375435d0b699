// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for device state subscriptions.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`StateCallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::snapshot::DeviceSnapshot;
use crate::types::EntityId;

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a subscription ID with the given value.
    ///
    /// Hosts that keep their own subscription tables use this to hand out
    /// IDs.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Callback invoked with a device's new state.
pub type StateCallback = Arc<dyn Fn(&DeviceSnapshot) + Send + Sync>;

/// Registry of per-entity state-change callbacks.
///
/// Hosts can embed this to implement
/// [`ClimateHost::subscribe`](crate::host::ClimateHost::subscribe). It uses
/// `parking_lot::RwLock` for interior mutability, so it can be shared across
/// threads.
///
/// Callbacks run outside the registry lock: a callback may subscribe or
/// unsubscribe without deadlocking.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// use heatercooler_bridge::snapshot::DeviceSnapshot;
/// use heatercooler_bridge::subscription::StateCallbackRegistry;
/// use heatercooler_bridge::types::{EntityId, HvacMode};
///
/// let registry = StateCallbackRegistry::new();
/// let entity = EntityId::new("climate.attic").unwrap();
/// let calls = Arc::new(AtomicU32::new(0));
/// let calls_clone = calls.clone();
///
/// let id = registry.on_state_changed(&entity, move |_snapshot| {
///     calls_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// registry.dispatch(&DeviceSnapshot::new(entity.clone(), HvacMode::Heat));
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
///
/// assert!(registry.unsubscribe(id));
/// ```
pub struct StateCallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Callbacks with the entity each one watches.
    callbacks: RwLock<HashMap<SubscriptionId, (EntityId, StateCallback)>>,
}

impl StateCallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Generates a new unique subscription ID.
    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a shared callback for one entity's state changes.
    pub fn subscribe(&self, entity_id: &EntityId, callback: StateCallback) -> SubscriptionId {
        let id = self.next_id();
        self.callbacks
            .write()
            .insert(id, (entity_id.clone(), callback));
        id
    }

    /// Registers a closure for one entity's state changes.
    pub fn on_state_changed<F>(&self, entity_id: &EntityId, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceSnapshot) + Send + Sync + 'static,
    {
        self.subscribe(entity_id, Arc::new(callback))
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    /// Dispatches a snapshot to the callbacks of its entity.
    ///
    /// Returns the number of callbacks invoked.
    pub fn dispatch(&self, snapshot: &DeviceSnapshot) -> usize {
        let matching: Vec<StateCallback> = self
            .callbacks
            .read()
            .values()
            .filter(|(entity_id, _)| *entity_id == snapshot.entity_id)
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &matching {
            callback(snapshot);
        }
        matching.len()
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Returns the number of callbacks watching one entity.
    #[must_use]
    pub fn subscriber_count(&self, entity_id: &EntityId) -> usize {
        self.callbacks
            .read()
            .values()
            .filter(|(watched, _)| watched == entity_id)
            .count()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for StateCallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
