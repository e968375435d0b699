// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge coordinating the HeaterCooler accessories of one host.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use crate::accessory::{DispatchReport, HeaterCooler};
use crate::characteristic::WriteBatch;
use crate::error::{Error, Result};
use crate::event::{BridgeEvent, EventBus};
use crate::host::ClimateHost;
use crate::snapshot::DeviceSnapshot;
use crate::subscription::{StateCallback, SubscriptionId};
use crate::types::EntityId;

use super::{BridgeConfig, BridgeStatus};

/// An accessory shared between the bridge and its state subscription.
///
/// The mutex serializes state changes and client writes for one device.
pub type SharedAccessory<H> = Arc<Mutex<HeaterCooler<H>>>;

struct Registration<H: ClimateHost> {
    accessory: SharedAccessory<H>,
    subscription: SubscriptionId,
}

/// Decides which climate entities become HeaterCooler accessories and
/// routes state changes and client writes to them.
///
/// Entities the configuration does not select, entities outside the climate
/// domain and devices without fan or swing control are left to the caller's
/// default accessory handling: [`Bridge::create_accessory`] returns `None`
/// for them.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use heatercooler_bridge::host::ClimateHost;
/// use heatercooler_bridge::manager::{Bridge, BridgeConfig};
/// use heatercooler_bridge::types::EntityId;
///
/// fn start<H: ClimateHost + 'static>(host: Arc<H>) -> heatercooler_bridge::Result<()> {
///     let lounge = EntityId::new("climate.lounge")?;
///     let bridge = Bridge::new(host, BridgeConfig::new().with_include(lounge.clone()));
///
///     let status = bridge.refresh(bridge.config());
///     println!("bridging {} device(s)", status.bridged_count);
///
///     if let Some(accessory) = bridge.create_accessory(&lounge)? {
///         println!("{:?}", accessory.lock().characteristics());
///     }
///     Ok(())
/// }
/// ```
pub struct Bridge<H: ClimateHost + 'static> {
    host: Arc<H>,
    config: RwLock<BridgeConfig>,
    accessories: RwLock<HashMap<EntityId, Registration<H>>>,
    status: RwLock<BridgeStatus>,
    event_bus: EventBus,
}

impl<H: ClimateHost + 'static> Bridge<H> {
    /// Creates a bridge over a host with the given entity selection.
    #[must_use]
    pub fn new(host: Arc<H>, config: BridgeConfig) -> Self {
        Self::with_capacity(host, config, crate::event::DEFAULT_EVENT_CAPACITY)
    }

    /// Creates a bridge with a custom event bus capacity.
    #[must_use]
    pub fn with_capacity(host: Arc<H>, config: BridgeConfig, event_capacity: usize) -> Self {
        Self {
            host,
            config: RwLock::new(config),
            accessories: RwLock::new(HashMap::new()),
            status: RwLock::new(BridgeStatus::default()),
            event_bus: EventBus::with_capacity(event_capacity),
        }
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to bridge events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Returns the current entity selection.
    #[must_use]
    pub fn config(&self) -> BridgeConfig {
        self.config.read().clone()
    }

    /// Returns the diagnostics computed by the last refresh.
    #[must_use]
    pub fn status(&self) -> BridgeStatus {
        self.status.read().clone()
    }

    /// Replaces the entity selection and recomputes the diagnostics.
    ///
    /// Accessories for entities the new selection no longer includes are
    /// removed. Newly selected entities are bridged on their next
    /// [`create_accessory`](Self::create_accessory) call.
    pub fn refresh(&self, config: BridgeConfig) -> BridgeStatus {
        let stale: Vec<EntityId> = self
            .accessories
            .read()
            .keys()
            .filter(|entity_id| !config.should_bridge(entity_id))
            .cloned()
            .collect();
        for entity_id in &stale {
            self.remove_accessory(entity_id);
        }

        let status = BridgeStatus::compute(&config, self.host.as_ref());
        tracing::info!(
            include = ?status.include_entities,
            exclude = ?status.exclude_entities,
            bridged = ?status.bridged_entities,
            "HeaterCooler bridge refreshed"
        );
        if !status.missing_entities.is_empty() {
            tracing::warn!(
                missing = ?status.missing_entities,
                "Selected entities have no state"
            );
        }

        *self.config.write() = config;
        *self.status.write() = status.clone();
        self.event_bus
            .publish(BridgeEvent::status_updated(status.clone()));
        status
    }

    // =========================================================================
    // Accessory Management
    // =========================================================================

    /// Creates the HeaterCooler accessory for an entity.
    ///
    /// Returns the existing accessory if the entity is already bridged, and
    /// `None` if the entity is not selected, not a climate entity or has no
    /// fan or swing control. A new accessory is subscribed to the entity's
    /// state changes.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if a selected entity has no state.
    pub fn create_accessory(&self, entity_id: &EntityId) -> Result<Option<SharedAccessory<H>>> {
        if !entity_id.is_climate() || !self.config.read().should_bridge(entity_id) {
            return Ok(None);
        }

        let mut accessories = self.accessories.write();
        if let Some(existing) = accessories.get(entity_id) {
            return Ok(Some(Arc::clone(&existing.accessory)));
        }

        let snapshot = self
            .host
            .snapshot(entity_id)
            .ok_or_else(|| Error::EntityNotFound(entity_id.to_string()))?;
        if !snapshot.supports_heatercooler() {
            tracing::debug!(%entity_id, "Device has no fan or swing control, not bridging");
            return Ok(None);
        }

        let accessory: SharedAccessory<H> = Arc::new(Mutex::new(HeaterCooler::from_snapshot(
            &snapshot,
            Arc::clone(&self.host),
        )));
        let subscription = self
            .host
            .subscribe(entity_id, state_callback(&accessory));
        let characteristics = accessory.lock().characteristics();

        accessories.insert(
            entity_id.clone(),
            Registration {
                accessory: Arc::clone(&accessory),
                subscription,
            },
        );
        drop(accessories);

        tracing::info!(
            %entity_id,
            %subscription,
            characteristics = characteristics.len(),
            "Created HeaterCooler accessory"
        );
        self.event_bus.publish(BridgeEvent::accessory_created(
            entity_id.clone(),
            characteristics,
        ));
        Ok(Some(accessory))
    }

    /// Removes an entity's accessory and its state subscription.
    ///
    /// Returns `true` if the entity was bridged.
    pub fn remove_accessory(&self, entity_id: &EntityId) -> bool {
        let Some(registration) = self.accessories.write().remove(entity_id) else {
            return false;
        };
        if !self.host.unsubscribe(registration.subscription) {
            tracing::warn!(
                %entity_id,
                subscription = %registration.subscription,
                "State subscription was already gone"
            );
        }
        tracing::info!(%entity_id, "Removed HeaterCooler accessory");
        self.event_bus
            .publish(BridgeEvent::accessory_removed(entity_id.clone()));
        true
    }

    /// Returns the accessory for an entity, if it is bridged.
    #[must_use]
    pub fn accessory(&self, entity_id: &EntityId) -> Option<SharedAccessory<H>> {
        self.accessories
            .read()
            .get(entity_id)
            .map(|registration| Arc::clone(&registration.accessory))
    }

    /// Returns the bridged entities, sorted.
    #[must_use]
    pub fn bridged_entities(&self) -> Vec<EntityId> {
        let mut entities: Vec<EntityId> = self.accessories.read().keys().cloned().collect();
        entities.sort();
        entities
    }

    /// Returns the number of bridged entities.
    #[must_use]
    pub fn accessory_count(&self) -> usize {
        self.accessories.read().len()
    }

    // =========================================================================
    // Client Writes
    // =========================================================================

    /// Applies a client write to a bridged entity.
    ///
    /// Each command the host rejects is published as
    /// [`BridgeEvent::CommandRejected`].
    ///
    /// # Errors
    ///
    /// Returns `Error::NotBridged` if the entity has no accessory.
    pub fn write(&self, entity_id: &EntityId, batch: &WriteBatch) -> Result<DispatchReport> {
        let accessory = self
            .accessory(entity_id)
            .ok_or_else(|| Error::NotBridged(entity_id.to_string()))?;

        let report = accessory.lock().on_characteristic_write(batch);
        for (command, reason) in &report.rejected {
            self.event_bus.publish(BridgeEvent::command_rejected(
                entity_id.clone(),
                command.clone(),
                reason.clone(),
            ));
        }
        Ok(report)
    }
}

impl<H: ClimateHost + 'static> Drop for Bridge<H> {
    fn drop(&mut self) {
        for (_, registration) in self.accessories.get_mut().drain() {
            self.host.unsubscribe(registration.subscription);
        }
    }
}

impl<H: ClimateHost + 'static> std::fmt::Debug for Bridge<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &*self.config.read())
            .field("accessory_count", &self.accessory_count())
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}

/// Builds the state callback for an accessory.
///
/// The callback holds a weak reference so a removed accessory is dropped
/// even if the host keeps the callback around.
fn state_callback<H: ClimateHost + 'static>(
    accessory: &SharedAccessory<H>,
) -> StateCallback {
    let weak = Arc::downgrade(accessory);
    Arc::new(move |snapshot: &DeviceSnapshot| {
        if let Some(accessory) = weak.upgrade() {
            accessory.lock().on_state_change(snapshot);
        }
    })
}
