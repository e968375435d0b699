// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The registered characteristic slots of one accessory.

use std::collections::BTreeMap;

use super::{CharValue, Characteristic};

/// Numeric constraints advertised for a characteristic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacteristicProperties {
    /// Smallest accepted value.
    pub min_value: Option<f64>,
    /// Largest accepted value.
    pub max_value: Option<f64>,
    /// Increment between accepted values.
    pub min_step: Option<f64>,
}

impl CharacteristicProperties {
    /// Properties with bounds and a step.
    #[must_use]
    pub const fn new(min_value: f64, max_value: f64, min_step: f64) -> Self {
        Self {
            min_value: Some(min_value),
            max_value: Some(max_value),
            min_step: Some(min_step),
        }
    }

    /// Properties with only a step.
    #[must_use]
    pub const fn step(min_step: f64) -> Self {
        Self {
            min_value: None,
            max_value: None,
            min_step: Some(min_step),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    characteristic: Characteristic,
    value: CharValue,
    properties: CharacteristicProperties,
}

/// A HeaterCooler service: characteristics in registration order.
///
/// The set of characteristics is fixed once the accessory is built. Writes to
/// a characteristic that was never registered are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaterCoolerService {
    slots: Vec<Slot>,
}

impl HeaterCoolerService {
    /// Creates a service with no characteristics.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Registers a characteristic, or reconfigures it if already registered.
    pub fn configure(
        &mut self,
        characteristic: Characteristic,
        initial: impl Into<CharValue>,
        properties: CharacteristicProperties,
    ) {
        let value = initial.into();
        if let Some(slot) = self.slot_mut(characteristic) {
            slot.value = value;
            slot.properties = properties;
        } else {
            self.slots.push(Slot {
                characteristic,
                value,
                properties,
            });
        }
    }

    /// Returns the registered characteristics, in registration order.
    #[must_use]
    pub fn characteristics(&self) -> Vec<Characteristic> {
        self.slots.iter().map(|slot| slot.characteristic).collect()
    }

    /// Returns `true` if `characteristic` is registered.
    #[must_use]
    pub fn contains(&self, characteristic: Characteristic) -> bool {
        self.slot(characteristic).is_some()
    }

    /// Returns the value of a registered characteristic.
    #[must_use]
    pub fn value(&self, characteristic: Characteristic) -> Option<&CharValue> {
        self.slot(characteristic).map(|slot| &slot.value)
    }

    /// Returns the properties of a registered characteristic.
    #[must_use]
    pub fn properties(&self, characteristic: Characteristic) -> Option<CharacteristicProperties> {
        self.slot(characteristic).map(|slot| slot.properties)
    }

    /// Updates a registered characteristic.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_value(&mut self, characteristic: Characteristic, value: impl Into<CharValue>) -> bool {
        let value = value.into();
        match self.slot_mut(characteristic) {
            Some(slot) if slot.value != value => {
                slot.value = value;
                true
            }
            _ => false,
        }
    }

    /// Returns every registered value, keyed by characteristic.
    #[must_use]
    pub fn values(&self) -> BTreeMap<Characteristic, CharValue> {
        self.slots
            .iter()
            .map(|slot| (slot.characteristic, slot.value.clone()))
            .collect()
    }

    fn slot(&self, characteristic: Characteristic) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|slot| slot.characteristic == characteristic)
    }

    fn slot_mut(&mut self, characteristic: Characteristic) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|slot| slot.characteristic == characteristic)
    }
}
