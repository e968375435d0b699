// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability profiling.
//!
//! When an accessory is created, the device's declared capabilities are
//! inspected once and turned into a [`MappingState`]: the characteristics to
//! register and the tables that translate between device labels and protocol
//! values. The projector and the resolver both work from this state, and it
//! is never shared between accessories.
//!
//! # Examples
//!
//! ```
//! use heatercooler_bridge::ClimateFeatures;
//! use heatercooler_bridge::characteristic::Characteristic;
//! use heatercooler_bridge::profile::MappingState;
//! use heatercooler_bridge::snapshot::DeviceSnapshot;
//! use heatercooler_bridge::types::{EntityId, HvacMode};
//!
//! let snapshot = DeviceSnapshot::new(EntityId::new("climate.bedroom").unwrap(), HvacMode::Off)
//!     .with_hvac_modes([HvacMode::Off, HvacMode::Heat, HvacMode::Cool])
//!     .with_features(ClimateFeatures::FAN_MODE)
//!     .with_fan_modes(["Low", "High"], Some("Low"));
//!
//! let state = MappingState::profile(&snapshot);
//!
//! assert!(state.characteristics().contains(&Characteristic::RotationSpeed));
//! assert!(!state.characteristics().contains(&Characteristic::SwingMode));
//! // Nothing to restore yet: a bare "activate" turns on cooling
//! assert_eq!(state.last_known_active_mode(), HvacMode::Cool);
//! ```

mod fan_speeds;
mod mode_table;
mod swing;

pub use fan_speeds::{CANONICAL_FAN_SPEEDS, FanSpeedTable};
pub use mode_table::TargetModeTable;
pub use swing::{SWING_OFF_LABELS, SWING_ON_LABELS, SwingTable, is_swing_on};

use crate::characteristic::{Characteristic, CharacteristicProperties};
use crate::snapshot::DeviceSnapshot;
use crate::types::{EntityId, HvacMode, TemperatureUnit};

/// Mode restored by a bare "activate" when no active mode was ever seen.
pub const DEFAULT_ACTIVE_MODE: HvacMode = HvacMode::Cool;

/// How the device takes its target temperature, fixed at profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetpointKind {
    /// One target temperature.
    Single,
    /// A high/low pair.
    Dual,
}

/// Temperature bounds and step in protocol units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureProfile {
    unit: TemperatureUnit,
    min: f64,
    max: f64,
    step: f64,
}

impl TemperatureProfile {
    /// Converts a device's bounds and step to protocol units.
    #[must_use]
    pub fn for_snapshot(snapshot: &DeviceSnapshot) -> Self {
        let unit = snapshot.unit;
        Self {
            unit,
            min: unit.to_protocol(snapshot.min_temp),
            max: unit.to_protocol(snapshot.max_temp),
            step: unit.step_to_protocol(snapshot.temp_step),
        }
    }

    /// Returns the device's unit.
    #[must_use]
    pub const fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Returns the lower bound, °C.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound, °C.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns the step, °C.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Returns the threshold characteristic properties.
    #[must_use]
    pub const fn properties(&self) -> CharacteristicProperties {
        CharacteristicProperties::new(self.min, self.max, self.step)
    }
}

/// Per-accessory translation state.
///
/// Built once by [`MappingState::profile`]. After that, only
/// `last_known_active_mode` changes.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingState {
    entity_id: EntityId,
    target_modes: TargetModeTable,
    last_known_active_mode: HvacMode,
    fan_speeds: Option<FanSpeedTable>,
    swing: Option<SwingTable>,
    temperature: TemperatureProfile,
    setpoint: SetpointKind,
}

impl MappingState {
    /// Profiles a device.
    ///
    /// Fan speed is exposed when the device has the fan-mode feature and at
    /// least one fan label; swing likewise. Profiling never fails: ambiguous
    /// capabilities resolve to fixed defaults.
    #[must_use]
    pub fn profile(snapshot: &DeviceSnapshot) -> Self {
        let fan_speeds = if snapshot.features.supports_fan_mode() {
            FanSpeedTable::from_labels(&snapshot.fan_modes)
        } else {
            None
        };
        let swing = if snapshot.features.supports_swing_mode() {
            SwingTable::from_labels(&snapshot.swing_modes)
        } else {
            None
        };
        let setpoint = if snapshot.setpoint.is_dual() {
            SetpointKind::Dual
        } else {
            SetpointKind::Single
        };
        let state = Self {
            entity_id: snapshot.entity_id.clone(),
            target_modes: TargetModeTable::for_snapshot(snapshot),
            last_known_active_mode: snapshot.state.active_mode().unwrap_or(DEFAULT_ACTIVE_MODE),
            fan_speeds,
            swing,
            temperature: TemperatureProfile::for_snapshot(snapshot),
            setpoint,
        };

        tracing::debug!(
            entity_id = %state.entity_id,
            auto_mode = %state.target_modes.auto_mode(),
            fan_speeds = ?state.fan_speeds.as_ref().map(FanSpeedTable::keys),
            swing_on = ?state.swing.as_ref().map(SwingTable::on_label),
            setpoint = ?state.setpoint,
            "Profiled climate device"
        );
        state
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Returns the characteristics to register, in registration order.
    #[must_use]
    pub fn characteristics(&self) -> Vec<Characteristic> {
        let mut characteristics = Characteristic::REQUIRED.to_vec();
        if self.fan_speeds.is_some() {
            characteristics.push(Characteristic::RotationSpeed);
        }
        if self.swing.is_some() {
            characteristics.push(Characteristic::SwingMode);
        }
        characteristics
    }

    /// Returns the target mode table.
    #[must_use]
    pub const fn target_modes(&self) -> &TargetModeTable {
        &self.target_modes
    }

    /// Returns the mode a bare "activate" restores.
    #[must_use]
    pub const fn last_known_active_mode(&self) -> HvacMode {
        self.last_known_active_mode
    }

    /// Records a mode the device is running in. Off is ignored.
    pub fn remember_active_mode(&mut self, mode: HvacMode) {
        if mode != HvacMode::Off {
            self.last_known_active_mode = mode;
        }
    }

    /// Returns the fan speed table, if fan speed is exposed.
    #[must_use]
    pub const fn fan_speeds(&self) -> Option<&FanSpeedTable> {
        self.fan_speeds.as_ref()
    }

    /// Returns the swing table, if swing is exposed.
    #[must_use]
    pub const fn swing(&self) -> Option<&SwingTable> {
        self.swing.as_ref()
    }

    /// Returns the temperature bounds.
    #[must_use]
    pub const fn temperature(&self) -> &TemperatureProfile {
        &self.temperature
    }

    /// Returns the device's temperature unit.
    #[must_use]
    pub const fn unit(&self) -> TemperatureUnit {
        self.temperature.unit
    }

    /// Returns the setpoint representation.
    #[must_use]
    pub const fn setpoint(&self) -> SetpointKind {
        self.setpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::ClimateFeatures;
    use crate::types::EntityState;

    fn base(state: impl Into<EntityState>) -> DeviceSnapshot {
        DeviceSnapshot::new(EntityId::new("climate.hall").unwrap(), state)
    }

    #[test]
    fn required_characteristics_always_registered() {
        let state = MappingState::profile(&base(HvacMode::Cool));
        assert_eq!(state.characteristics(), Characteristic::REQUIRED.to_vec());
        assert!(state.fan_speeds().is_none());
        assert!(state.swing().is_none());
    }

    #[test]
    fn fan_requires_feature_and_labels() {
        let labels_only = base(HvacMode::Cool).with_fan_modes(["low", "high"], None);
        assert!(MappingState::profile(&labels_only).fan_speeds().is_none());

        let feature_only = base(HvacMode::Cool).with_features(ClimateFeatures::FAN_MODE);
        let state = MappingState::profile(&feature_only);
        assert!(state.fan_speeds().is_none());
        assert!(!state.characteristics().contains(&Characteristic::RotationSpeed));
    }

    #[test]
    fn fan_and_swing_registered_in_order() {
        let snapshot = base(HvacMode::Cool)
            .with_features(ClimateFeatures::FAN_MODE | ClimateFeatures::SWING_MODE)
            .with_fan_modes(["auto", "low"], None)
            .with_swing_modes(["off", "on"], Some("off"));
        let state = MappingState::profile(&snapshot);
        let characteristics = state.characteristics();

        assert_eq!(characteristics.len(), 8);
        assert_eq!(characteristics[6], Characteristic::RotationSpeed);
        assert_eq!(characteristics[7], Characteristic::SwingMode);
        assert_eq!(state.swing().map(SwingTable::on_label), Some("on"));
    }

    #[test]
    fn last_known_mode_from_current_state() {
        assert_eq!(
            MappingState::profile(&base(HvacMode::Heat)).last_known_active_mode(),
            HvacMode::Heat
        );
        assert_eq!(
            MappingState::profile(&base(HvacMode::Off)).last_known_active_mode(),
            HvacMode::Cool
        );
        assert_eq!(
            MappingState::profile(&base(EntityState::Unavailable)).last_known_active_mode(),
            HvacMode::Cool
        );
    }

    #[test]
    fn remember_ignores_off() {
        let mut state = MappingState::profile(&base(HvacMode::Heat));
        state.remember_active_mode(HvacMode::Off);
        assert_eq!(state.last_known_active_mode(), HvacMode::Heat);
        state.remember_active_mode(HvacMode::Dry);
        assert_eq!(state.last_known_active_mode(), HvacMode::Dry);
    }

    #[test]
    fn fahrenheit_bounds_convert_and_step_rescales() {
        let snapshot = base(HvacMode::Cool)
            .with_bounds(50.0, 86.0, 1.0)
            .with_unit(TemperatureUnit::Fahrenheit);
        let temperature = *MappingState::profile(&snapshot).temperature();

        assert!((temperature.min() - 10.0).abs() < 1e-9);
        assert!((temperature.max() - 30.0).abs() < 1e-9);
        assert!((temperature.step() - 5.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn setpoint_kind_fixed_from_snapshot() {
        let dual = base(HvacMode::HeatCool).with_range(None, None);
        assert_eq!(MappingState::profile(&dual).setpoint(), SetpointKind::Dual);
        assert_eq!(
            MappingState::profile(&base(HvacMode::Cool)).setpoint(),
            SetpointKind::Single
        );
    }
}
