// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge event types.

use crate::characteristic::Characteristic;
use crate::command::ClimateCommand;
use crate::error::CommandError;
use crate::manager::BridgeStatus;
use crate::types::EntityId;

/// Events emitted by the bridge.
///
/// These events notify subscribers about accessory lifecycle changes,
/// status refreshes and commands the host rejected.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::event::BridgeEvent;
/// use heatercooler_bridge::types::EntityId;
///
/// let entity_id = EntityId::new("climate.nursery").unwrap();
/// let removed = BridgeEvent::accessory_removed(entity_id.clone());
///
/// assert!(removed.is_lifecycle());
/// assert_eq!(removed.entity_id(), Some(&entity_id));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// A HeaterCooler accessory was created for a device.
    AccessoryCreated {
        /// The bridged device.
        entity_id: EntityId,
        /// The registered characteristics.
        characteristics: Vec<Characteristic>,
    },

    /// An accessory was removed and unsubscribed.
    AccessoryRemoved {
        /// The device that is no longer bridged.
        entity_id: EntityId,
    },

    /// The bridge configuration was refreshed.
    StatusUpdated {
        /// The recomputed diagnostics.
        status: Box<BridgeStatus>,
    },

    /// The host rejected a command resolved from a client write.
    ///
    /// The write itself was still accepted.
    CommandRejected {
        /// The device the command was for.
        entity_id: EntityId,
        /// The rejected command.
        command: ClimateCommand,
        /// Why the host rejected it.
        reason: CommandError,
    },
}

impl BridgeEvent {
    /// Returns the device this event is about, if any.
    #[must_use]
    pub fn entity_id(&self) -> Option<&EntityId> {
        match self {
            Self::AccessoryCreated { entity_id, .. }
            | Self::AccessoryRemoved { entity_id }
            | Self::CommandRejected { entity_id, .. } => Some(entity_id),
            Self::StatusUpdated { .. } => None,
        }
    }

    /// Returns `true` if this is an accessory lifecycle event.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::AccessoryCreated { .. } | Self::AccessoryRemoved { .. }
        )
    }

    /// Creates an accessory created event.
    #[must_use]
    pub fn accessory_created(entity_id: EntityId, characteristics: Vec<Characteristic>) -> Self {
        Self::AccessoryCreated {
            entity_id,
            characteristics,
        }
    }

    /// Creates an accessory removed event.
    #[must_use]
    pub fn accessory_removed(entity_id: EntityId) -> Self {
        Self::AccessoryRemoved { entity_id }
    }

    /// Creates a status updated event.
    #[must_use]
    pub fn status_updated(status: BridgeStatus) -> Self {
        Self::StatusUpdated {
            status: Box::new(status),
        }
    }

    /// Creates a command rejected event.
    #[must_use]
    pub fn command_rejected(
        entity_id: EntityId,
        command: ClimateCommand,
        reason: CommandError,
    ) -> Self {
        Self::CommandRejected {
            entity_id,
            command,
            reason,
        }
    }
}
