// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HeaterCooler accessory for one climate device.

use std::sync::Arc;

use crate::characteristic::{
    CharValue, Characteristic, CharacteristicProperties, CurrentHeaterCoolerState,
    HeaterCoolerService, TargetHeaterCoolerState, WriteBatch,
};
use crate::command::{ClimateCommand, Command};
use crate::error::{CommandError, Error, Result};
use crate::host::ClimateHost;
use crate::profile::MappingState;
use crate::projector::project;
use crate::resolver::resolve;
use crate::snapshot::DeviceSnapshot;
use crate::types::EntityId;

/// Current temperature shown until the device reports one.
const INITIAL_CURRENT_TEMPERATURE: f64 = 21.0;

/// Threshold shown until the device reports a target.
const INITIAL_THRESHOLD_TEMPERATURE: f64 = 24.0;

/// Rotation speed shown until the device reports a fan mode.
const INITIAL_ROTATION_SPEED: u8 = 100;

/// Outcome of one characteristic write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Commands the host accepted, in issue order.
    pub issued: Vec<ClimateCommand>,
    /// Commands the host rejected, with the reason.
    pub rejected: Vec<(ClimateCommand, CommandError)>,
}

impl DispatchReport {
    /// Returns `true` if the write resolved to no command.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty() && self.rejected.is_empty()
    }
}

/// A climate device exposed as a HeaterCooler accessory.
///
/// The accessory owns its [`MappingState`] and service values. The host
/// calls [`on_state_change`](Self::on_state_change) when the device changes
/// and [`on_characteristic_write`](Self::on_characteristic_write) when a
/// client writes; the two must never run concurrently for one accessory.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use heatercooler_bridge::accessory::HeaterCooler;
/// use heatercooler_bridge::characteristic::{Characteristic, WriteBatch};
/// use heatercooler_bridge::host::ClimateHost;
/// use heatercooler_bridge::types::EntityId;
///
/// fn turn_off<H: ClimateHost>(host: Arc<H>) -> heatercooler_bridge::Result<()> {
///     let entity = EntityId::new("climate.living_room")?;
///     let mut accessory = HeaterCooler::new(entity, host)?;
///
///     let report = accessory
///         .on_characteristic_write(&WriteBatch::new().with(Characteristic::Active, 0));
///     assert_eq!(report.issued.len(), 1);
///     Ok(())
/// }
/// ```
pub struct HeaterCooler<H: ClimateHost + ?Sized> {
    entity_id: EntityId,
    host: Arc<H>,
    mapping: MappingState,
    service: HeaterCoolerService,
}

impl<H: ClimateHost + ?Sized> HeaterCooler<H> {
    /// Creates the accessory from the device's current state.
    ///
    /// Profiles the device, registers its characteristics and projects the
    /// current state onto them.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the host has no state for the
    /// device.
    pub fn new(entity_id: EntityId, host: Arc<H>) -> Result<Self> {
        let snapshot = host
            .snapshot(&entity_id)
            .ok_or_else(|| Error::EntityNotFound(entity_id.to_string()))?;
        Ok(Self::from_snapshot(&snapshot, host))
    }

    /// Creates the accessory from a snapshot the caller already holds.
    #[must_use]
    pub fn from_snapshot(snapshot: &DeviceSnapshot, host: Arc<H>) -> Self {
        let mapping = MappingState::profile(snapshot);
        let service = initial_service(&mapping);
        let mut accessory = Self {
            entity_id: snapshot.entity_id.clone(),
            host,
            mapping,
            service,
        };
        accessory.on_state_change(snapshot);
        accessory
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Returns the registered characteristics, in registration order.
    #[must_use]
    pub fn characteristics(&self) -> Vec<Characteristic> {
        self.service.characteristics()
    }

    /// Returns the current value of a characteristic.
    #[must_use]
    pub fn value(&self, characteristic: Characteristic) -> Option<&CharValue> {
        self.service.value(characteristic)
    }

    /// Returns the service.
    #[must_use]
    pub fn service(&self) -> &HeaterCoolerService {
        &self.service
    }

    /// Returns the mapping state.
    #[must_use]
    pub fn mapping(&self) -> &MappingState {
        &self.mapping
    }

    /// Projects a new device state onto the characteristics.
    ///
    /// Returns the characteristics whose value changed.
    pub fn on_state_change(&mut self, snapshot: &DeviceSnapshot) -> Vec<Characteristic> {
        let changed = project(&mut self.mapping, snapshot).apply(&mut self.service);
        if !changed.is_empty() {
            tracing::debug!(
                entity_id = %self.entity_id,
                changed = ?changed,
                "Projected device state"
            );
        }
        changed
    }

    /// Resolves a client write and issues the resulting commands.
    ///
    /// Written values are stored as the characteristics' new values,
    /// converted to the type the projection uses; non-numeric values are
    /// not stored. A command the host rejects is logged and does not stop
    /// the remaining commands.
    pub fn on_characteristic_write(&mut self, batch: &WriteBatch) -> DispatchReport {
        for (characteristic, value) in batch.iter() {
            match characteristic.coerce(value) {
                Some(coerced) => {
                    self.service.set_value(characteristic, coerced);
                }
                None => tracing::debug!(
                    entity_id = %self.entity_id,
                    %characteristic,
                    %value,
                    "Not storing non-numeric write"
                ),
            }
        }

        let current = self.host.snapshot(&self.entity_id);
        let commands = resolve(&mut self.mapping, batch, current.as_ref());

        let mut report = DispatchReport::default();
        for command in commands {
            match self.host.invoke(&self.entity_id, &command) {
                Ok(()) => {
                    tracing::debug!(
                        entity_id = %self.entity_id,
                        service = command.service(),
                        data = %command.service_data(),
                        "Issued command"
                    );
                    report.issued.push(command);
                }
                Err(err) => {
                    tracing::error!(
                        entity_id = %self.entity_id,
                        service = command.service(),
                        error = %err,
                        "Failed to execute command"
                    );
                    report.rejected.push((command, err));
                }
            }
        }
        report
    }
}

impl<H: ClimateHost + ?Sized> std::fmt::Debug for HeaterCooler<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaterCooler")
            .field("entity_id", &self.entity_id)
            .field("mapping", &self.mapping)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Registers the profiled characteristics with their initial values.
fn initial_service(mapping: &MappingState) -> HeaterCoolerService {
    let thresholds = mapping.temperature().properties();
    let mut service = HeaterCoolerService::new();
    for characteristic in mapping.characteristics() {
        let (initial, properties) = match characteristic {
            Characteristic::Active | Characteristic::SwingMode => {
                (CharValue::Int(0), CharacteristicProperties::default())
            }
            Characteristic::CurrentHeaterCoolerState => (
                CurrentHeaterCoolerState::Inactive.into(),
                CharacteristicProperties::default(),
            ),
            Characteristic::TargetHeaterCoolerState => (
                TargetHeaterCoolerState::Auto.into(),
                CharacteristicProperties::default(),
            ),
            Characteristic::CurrentTemperature => (
                CharValue::Float(INITIAL_CURRENT_TEMPERATURE),
                CharacteristicProperties::default(),
            ),
            Characteristic::CoolingThresholdTemperature
            | Characteristic::HeatingThresholdTemperature => {
                (CharValue::Float(INITIAL_THRESHOLD_TEMPERATURE), thresholds)
            }
            Characteristic::RotationSpeed => {
                let step = mapping
                    .fan_speeds()
                    .map_or(100.0, crate::profile::FanSpeedTable::step);
                (
                    CharValue::from(INITIAL_ROTATION_SPEED),
                    CharacteristicProperties::step(step),
                )
            }
        };
        service.configure(characteristic, initial, properties);
    }
    service
}
