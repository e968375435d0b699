// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state to characteristic values.
//!
//! [`project`] computes the characteristic values for a device snapshot.
//! Characteristics whose value cannot be determined from the snapshot are
//! left out of the [`Projection`] so the accessory keeps their last value.
//!
//! # Examples
//!
//! ```
//! use heatercooler_bridge::characteristic::{CharValue, Characteristic};
//! use heatercooler_bridge::profile::MappingState;
//! use heatercooler_bridge::projector::project;
//! use heatercooler_bridge::snapshot::DeviceSnapshot;
//! use heatercooler_bridge::types::{EntityId, HvacMode};
//!
//! let snapshot = DeviceSnapshot::new(EntityId::new("climate.office").unwrap(), HvacMode::Cool)
//!     .with_current_temperature(26.0)
//!     .with_target(24.0);
//! let mut state = MappingState::profile(&snapshot);
//!
//! let projection = project(&mut state, &snapshot);
//! // No reported action: 26 is well above 24, so the device is cooling
//! assert_eq!(
//!     projection.get(Characteristic::CurrentHeaterCoolerState),
//!     Some(&CharValue::Int(3))
//! );
//! assert_eq!(
//!     projection.get(Characteristic::HeatingThresholdTemperature),
//!     Some(&CharValue::Float(24.0))
//! );
//! ```

use std::collections::BTreeMap;

use crate::characteristic::{
    CharValue, Characteristic, CurrentHeaterCoolerState, HeaterCoolerService,
};
use crate::profile::{MappingState, TargetModeTable, is_swing_on};
use crate::snapshot::{DeviceSnapshot, Setpoint};
use crate::types::{HvacAction, HvacMode};

/// Distance from the target, in device units, before heating or cooling is
/// assumed.
pub const ACTION_MARGIN: f64 = 0.25;

/// Characteristic values computed from one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    values: BTreeMap<Characteristic, CharValue>,
}

impl Projection {
    fn set(&mut self, characteristic: Characteristic, value: impl Into<CharValue>) {
        self.values.insert(characteristic, value.into());
    }

    /// Returns the projected value of a characteristic.
    #[must_use]
    pub fn get(&self, characteristic: Characteristic) -> Option<&CharValue> {
        self.values.get(&characteristic)
    }

    /// Returns `true` if the characteristic is projected.
    #[must_use]
    pub fn contains(&self, characteristic: Characteristic) -> bool {
        self.values.contains_key(&characteristic)
    }

    /// Iterates over the projected values.
    pub fn iter(&self) -> impl Iterator<Item = (Characteristic, &CharValue)> {
        self.values.iter().map(|(c, v)| (*c, v))
    }

    /// Pushes the values into a service.
    ///
    /// Returns the characteristics whose value changed.
    pub fn apply(&self, service: &mut HeaterCoolerService) -> Vec<Characteristic> {
        self.values
            .iter()
            .filter_map(|(characteristic, value)| {
                service
                    .set_value(*characteristic, value.clone())
                    .then_some(*characteristic)
            })
            .collect()
    }
}

/// Computes characteristic values for a snapshot.
///
/// Also records the snapshot's mode as the last known active mode when the
/// device is running. Projecting an unchanged snapshot again yields the same
/// values.
pub fn project(state: &mut MappingState, snapshot: &DeviceSnapshot) -> Projection {
    let mut projection = Projection::default();

    if let Some(mode) = snapshot.state.active_mode() {
        state.remember_active_mode(mode);
    }

    match snapshot.state.mode().and_then(TargetModeTable::target_state) {
        Some(target) => projection.set(Characteristic::TargetHeaterCoolerState, target),
        None => tracing::debug!(
            entity_id = %snapshot.entity_id,
            state = %snapshot.state,
            "No target state for device state, keeping previous value"
        ),
    }

    let action = snapshot
        .hvac_action
        .unwrap_or_else(|| derive_action(snapshot));
    projection.set(
        Characteristic::CurrentHeaterCoolerState,
        current_state_for(action),
    );

    projection.set(
        Characteristic::Active,
        u8::from(snapshot.state.is_active()),
    );

    let unit = state.unit();
    if let Some(current) = snapshot.current_temperature {
        projection.set(Characteristic::CurrentTemperature, unit.to_protocol(current));
    }

    match snapshot.setpoint {
        Setpoint::Dual { high, low, .. } => {
            if let Some(high) = high {
                projection.set(
                    Characteristic::CoolingThresholdTemperature,
                    unit.to_protocol(high),
                );
            }
            if let Some(low) = low {
                projection.set(
                    Characteristic::HeatingThresholdTemperature,
                    unit.to_protocol(low),
                );
            }
        }
        Setpoint::Single(Some(target)) => {
            let target = unit.to_protocol(target);
            projection.set(Characteristic::CoolingThresholdTemperature, target);
            projection.set(Characteristic::HeatingThresholdTemperature, target);
        }
        Setpoint::Single(None) => {}
    }

    if let Some(fan_speeds) = state.fan_speeds() {
        let percentage = snapshot
            .fan_mode
            .as_deref()
            .and_then(|label| fan_speeds.percentage_for_label(label));
        match percentage {
            Some(percentage) => projection.set(Characteristic::RotationSpeed, percentage),
            None => tracing::debug!(
                entity_id = %snapshot.entity_id,
                fan_mode = ?snapshot.fan_mode,
                "Fan mode not in speed table, keeping previous speed"
            ),
        }
    }

    if state.swing().is_some() {
        let swinging = snapshot.swing_mode.as_deref().is_some_and(is_swing_on);
        projection.set(Characteristic::SwingMode, u8::from(swinging));
    }

    projection
}

/// Guesses what the device is doing from its temperatures.
///
/// Used when the device does not report an action. Needs the current
/// temperature, a target and a known mode; returns [`HvacAction::Idle`] when
/// any is missing.
#[must_use]
pub fn derive_action(snapshot: &DeviceSnapshot) -> HvacAction {
    let (Some(mode), Some(target), Some(current)) = (
        snapshot.state.mode(),
        snapshot.setpoint.reference(),
        snapshot.current_temperature,
    ) else {
        return HvacAction::Idle;
    };

    let too_warm = current > target + ACTION_MARGIN;
    let too_cold = current < target - ACTION_MARGIN;
    match mode {
        HvacMode::Cool if too_warm => HvacAction::Cooling,
        HvacMode::Heat if too_cold => HvacAction::Heating,
        HvacMode::HeatCool | HvacMode::Auto if too_warm => HvacAction::Cooling,
        HvacMode::HeatCool | HvacMode::Auto if too_cold => HvacAction::Heating,
        _ => HvacAction::Idle,
    }
}

/// Maps a device action to the protocol's current state.
#[must_use]
pub const fn current_state_for(action: HvacAction) -> CurrentHeaterCoolerState {
    match action {
        HvacAction::Idle => CurrentHeaterCoolerState::Idle,
        HvacAction::Heating | HvacAction::Preheating | HvacAction::Defrosting => {
            CurrentHeaterCoolerState::Heating
        }
        HvacAction::Cooling | HvacAction::Drying | HvacAction::Fan => {
            CurrentHeaterCoolerState::Cooling
        }
        HvacAction::Off | HvacAction::Unrecognized => CurrentHeaterCoolerState::Inactive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::ClimateFeatures;
    use crate::characteristic::TargetHeaterCoolerState;
    use crate::types::{EntityId, EntityState, TemperatureUnit};

    fn snapshot(state: impl Into<EntityState>) -> DeviceSnapshot {
        DeviceSnapshot::new(EntityId::new("climate.kitchen").unwrap(), state)
    }

    fn project_once(snapshot: &DeviceSnapshot) -> Projection {
        let mut state = MappingState::profile(snapshot);
        project(&mut state, snapshot)
    }

    #[test]
    fn cooling_derived_from_temperatures() {
        let device = snapshot(HvacMode::Cool)
            .with_current_temperature(26.0)
            .with_target(24.0);

        assert_eq!(derive_action(&device), HvacAction::Cooling);
        assert_eq!(
            project_once(&device).get(Characteristic::CurrentHeaterCoolerState),
            Some(&CharValue::from(CurrentHeaterCoolerState::Cooling))
        );
    }

    #[test]
    fn cooling_derived_from_target_beside_null_range() {
        let attributes = serde_json::json!({
            "hvac_modes": ["off", "cool", "heat", "heat_cool"],
            "current_temperature": 26.0,
            "temperature": 24.0,
            "target_temp_high": null,
            "target_temp_low": null,
        });
        let device = DeviceSnapshot::from_state(
            EntityId::new("climate.kitchen").unwrap(),
            "cool",
            &attributes,
            TemperatureUnit::Celsius,
        )
        .unwrap();

        assert_eq!(derive_action(&device), HvacAction::Cooling);
        assert_eq!(
            project_once(&device).get(Characteristic::CurrentHeaterCoolerState),
            Some(&CharValue::Int(3))
        );
    }

    #[test]
    fn derive_action_within_margin_is_idle() {
        let device = snapshot(HvacMode::Heat)
            .with_current_temperature(23.8)
            .with_target(24.0);
        assert_eq!(derive_action(&device), HvacAction::Idle);

        let colder = device.with_current_temperature(23.7);
        assert_eq!(derive_action(&colder), HvacAction::Heating);
    }

    #[test]
    fn derive_action_in_automatic_modes() {
        let warm = snapshot(HvacMode::Auto)
            .with_current_temperature(25.0)
            .with_range(Some(24.0), Some(20.0));
        assert_eq!(derive_action(&warm), HvacAction::Cooling);

        let cold = snapshot(HvacMode::HeatCool)
            .with_current_temperature(18.0)
            .with_target(21.0);
        assert_eq!(derive_action(&cold), HvacAction::Heating);
    }

    #[test]
    fn derive_action_needs_all_inputs() {
        assert_eq!(
            derive_action(&snapshot(HvacMode::Cool).with_target(24.0)),
            HvacAction::Idle
        );
        assert_eq!(
            derive_action(&snapshot(EntityState::Unknown).with_current_temperature(30.0).with_target(20.0)),
            HvacAction::Idle
        );
        assert_eq!(
            derive_action(&snapshot(HvacMode::Dry).with_current_temperature(30.0).with_target(20.0)),
            HvacAction::Idle
        );
    }

    #[test]
    fn reported_action_wins() {
        let device = snapshot(HvacMode::Cool)
            .with_current_temperature(30.0)
            .with_target(20.0)
            .with_action(HvacAction::Drying);
        assert_eq!(
            project_once(&device).get(Characteristic::CurrentHeaterCoolerState),
            Some(&CharValue::Int(3))
        );

        let unknown = device.with_action(HvacAction::Unrecognized);
        assert_eq!(
            project_once(&unknown).get(Characteristic::CurrentHeaterCoolerState),
            Some(&CharValue::Int(0))
        );
    }

    #[test]
    fn action_table() {
        assert_eq!(current_state_for(HvacAction::Off), CurrentHeaterCoolerState::Inactive);
        assert_eq!(current_state_for(HvacAction::Idle), CurrentHeaterCoolerState::Idle);
        assert_eq!(
            current_state_for(HvacAction::Defrosting),
            CurrentHeaterCoolerState::Heating
        );
        assert_eq!(current_state_for(HvacAction::Fan), CurrentHeaterCoolerState::Cooling);
    }

    #[test]
    fn active_and_target_follow_mode() {
        let heat = project_once(&snapshot(HvacMode::Heat));
        assert_eq!(heat.get(Characteristic::Active), Some(&CharValue::Int(1)));
        assert_eq!(
            heat.get(Characteristic::TargetHeaterCoolerState),
            Some(&CharValue::from(TargetHeaterCoolerState::Heat))
        );

        let off = project_once(&snapshot(HvacMode::Off));
        assert_eq!(off.get(Characteristic::Active), Some(&CharValue::Int(0)));
        assert_eq!(
            off.get(Characteristic::TargetHeaterCoolerState),
            Some(&CharValue::from(TargetHeaterCoolerState::Auto))
        );
    }

    #[test]
    fn indeterminate_state_leaves_target_unchanged() {
        for state in [EntityState::Unknown, EntityState::Unavailable] {
            let projection = project_once(&snapshot(state));
            assert!(!projection.contains(Characteristic::TargetHeaterCoolerState));
            assert_eq!(projection.get(Characteristic::Active), Some(&CharValue::Int(0)));
        }
        let dry = project_once(&snapshot(HvacMode::Dry));
        assert!(!dry.contains(Characteristic::TargetHeaterCoolerState));
        assert_eq!(dry.get(Characteristic::Active), Some(&CharValue::Int(1)));
    }

    #[test]
    fn single_setpoint_mirrored_to_both_thresholds() {
        let device = snapshot(HvacMode::Heat)
            .with_target(71.6)
            .with_unit(TemperatureUnit::Fahrenheit);
        let projection = project_once(&device);

        assert_eq!(
            projection.get(Characteristic::CoolingThresholdTemperature),
            Some(&CharValue::Float(22.0))
        );
        assert_eq!(
            projection.get(Characteristic::HeatingThresholdTemperature),
            Some(&CharValue::Float(22.0))
        );
    }

    #[test]
    fn dual_setpoint_projected_independently() {
        let device = snapshot(HvacMode::HeatCool).with_range(Some(26.0), None);
        let projection = project_once(&device);

        assert_eq!(
            projection.get(Characteristic::CoolingThresholdTemperature),
            Some(&CharValue::Float(26.0))
        );
        assert!(!projection.contains(Characteristic::HeatingThresholdTemperature));
    }

    #[test]
    fn rotation_speed_from_fan_label() {
        let device = snapshot(HvacMode::Cool)
            .with_features(ClimateFeatures::FAN_MODE)
            .with_fan_modes(["Auto", "Low", "Medium", "High"], Some("Medium"));
        assert_eq!(
            project_once(&device).get(Characteristic::RotationSpeed),
            Some(&CharValue::Int(75))
        );

        let unknown = device.with_fan_modes(["Auto", "Low", "Medium", "High"], Some("Turbo"));
        assert!(!project_once(&unknown).contains(Characteristic::RotationSpeed));
    }

    #[test]
    fn rotation_speed_only_when_profiled() {
        let device = snapshot(HvacMode::Cool).with_fan_modes(["Low"], Some("Low"));
        assert!(!project_once(&device).contains(Characteristic::RotationSpeed));
    }

    #[test]
    fn swing_from_label() {
        let device = snapshot(HvacMode::Cool)
            .with_features(ClimateFeatures::SWING_MODE)
            .with_swing_modes(["Off", "Vertical"], Some("Vertical"));
        assert_eq!(
            project_once(&device).get(Characteristic::SwingMode),
            Some(&CharValue::Int(1))
        );

        let stopped = device.with_swing_modes(["Off", "Vertical"], None);
        assert_eq!(
            project_once(&stopped).get(Characteristic::SwingMode),
            Some(&CharValue::Int(0))
        );
    }

    #[test]
    fn projection_updates_last_known_mode() {
        let device = snapshot(HvacMode::Off);
        let mut state = MappingState::profile(&device);
        let _ = project(&mut state, &snapshot(HvacMode::Heat));
        let _ = project(&mut state, &device);

        assert_eq!(state.last_known_active_mode(), HvacMode::Heat);
    }

    #[test]
    fn apply_reports_changes_and_is_idempotent() {
        let device = snapshot(HvacMode::Cool)
            .with_current_temperature(25.0)
            .with_target(23.0);
        let mut state = MappingState::profile(&device);
        let mut service = HeaterCoolerService::new();
        for characteristic in state.characteristics() {
            service.configure(characteristic, 0, Default::default());
        }

        let first = project(&mut state, &device).apply(&mut service);
        let values = service.values();
        let second = project(&mut state, &device).apply(&mut service);

        assert!(!first.is_empty());
        assert!(second.is_empty());
        assert_eq!(service.values(), values);
    }
}
