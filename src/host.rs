// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The host platform's device registry, as seen by the bridge.

use std::sync::Arc;

use crate::command::ClimateCommand;
use crate::error::CommandError;
use crate::snapshot::DeviceSnapshot;
use crate::subscription::{StateCallback, SubscriptionId};
use crate::types::EntityId;

/// Access to the host's device registry and climate services.
///
/// Implementations parse their own state representation into
/// [`DeviceSnapshot`] (see [`DeviceSnapshot::from_state`]) so the bridge
/// never inspects untyped attributes.
///
/// `invoke` is fire-and-forget: the host may apply the command later and
/// report the result through a state change, but must not run state-change
/// callbacks from inside `invoke`. State-change callbacks for one entity must
/// not be invoked concurrently with each other.
pub trait ClimateHost: Send + Sync {
    /// Returns the current state of a device, if the host knows it.
    fn snapshot(&self, entity_id: &EntityId) -> Option<DeviceSnapshot>;

    /// Issues a command to a device.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::NotFound` if the host has no such service, or
    /// `CommandError::ValidationRejected` if the service rejected the data.
    fn invoke(&self, entity_id: &EntityId, command: &ClimateCommand) -> Result<(), CommandError>;

    /// Registers a callback for a device's state changes.
    fn subscribe(&self, entity_id: &EntityId, callback: StateCallback) -> SubscriptionId;

    /// Removes a callback. Returns `true` if it was registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

impl<H: ClimateHost + ?Sized> ClimateHost for Arc<H> {
    fn snapshot(&self, entity_id: &EntityId) -> Option<DeviceSnapshot> {
        (**self).snapshot(entity_id)
    }

    fn invoke(&self, entity_id: &EntityId, command: &ClimateCommand) -> Result<(), CommandError> {
        (**self).invoke(entity_id, command)
    }

    fn subscribe(&self, entity_id: &EntityId, callback: StateCallback) -> SubscriptionId {
        (**self).subscribe(entity_id, callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        (**self).unsubscribe(id)
    }
}
