// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic writes to device commands.
//!
//! A client writes one or more characteristics in a single request. The
//! protocol's state space is coarser than the device's, so [`resolve`]
//! decides which device commands the batch stands for:
//!
//! 1. `Active` and `TargetHeaterCoolerState` become a mode change or a
//!    turn-off. Turning off wins over any target written with it.
//! 2. The two threshold temperatures become one `set_temperature`.
//! 3. `RotationSpeed` becomes a fan-mode label.
//! 4. `SwingMode` becomes a swing-mode label.
//!
//! Values that cannot be mapped resolve to nothing for that field only.
//!
//! # Examples
//!
//! ```
//! use heatercooler_bridge::characteristic::{Characteristic, WriteBatch};
//! use heatercooler_bridge::command::ClimateCommand;
//! use heatercooler_bridge::profile::MappingState;
//! use heatercooler_bridge::resolver::resolve;
//! use heatercooler_bridge::snapshot::DeviceSnapshot;
//! use heatercooler_bridge::types::{EntityId, HvacMode};
//!
//! let snapshot = DeviceSnapshot::new(EntityId::new("climate.loft").unwrap(), HvacMode::Cool);
//! let mut state = MappingState::profile(&snapshot);
//!
//! let batch = WriteBatch::new()
//!     .with(Characteristic::Active, 0)
//!     .with(Characteristic::TargetHeaterCoolerState, 1);
//!
//! assert_eq!(
//!     resolve(&mut state, &batch, Some(&snapshot)),
//!     vec![ClimateCommand::TurnOff]
//! );
//! ```

use crate::characteristic::{CharValue, Characteristic, WriteBatch};
use crate::command::ClimateCommand;
use crate::profile::{MappingState, SetpointKind};
use crate::snapshot::DeviceSnapshot;
use crate::types::HvacMode;

/// Resolves a write batch into device commands, in issue order.
///
/// `current` is the device's state when the write arrived; without it, the
/// writes that depend on the current mode or swing label resolve to nothing.
/// A mode selected through `TargetHeaterCoolerState` becomes the last known
/// active mode.
pub fn resolve(
    state: &mut MappingState,
    batch: &WriteBatch,
    current: Option<&DeviceSnapshot>,
) -> Vec<ClimateCommand> {
    let mut commands = Vec::new();
    commands.extend(resolve_mode(state, batch, current));
    commands.extend(resolve_temperature(state, batch, current));
    commands.extend(resolve_fan_speed(state, batch));
    commands.extend(resolve_swing(state, batch, current));
    commands
}

fn resolve_mode(
    state: &mut MappingState,
    batch: &WriteBatch,
    current: Option<&DeviceSnapshot>,
) -> Option<ClimateCommand> {
    let active = batch.get(Characteristic::Active);
    let target = batch.get(Characteristic::TargetHeaterCoolerState);

    if active.is_some_and(|value| equals(value, 0)) {
        return Some(ClimateCommand::TurnOff);
    }

    if let Some(value) = target {
        match value.as_i64() {
            Some(raw) => {
                if let Some(mode) = state.target_modes().lookup(raw) {
                    state.remember_active_mode(mode);
                    return Some(ClimateCommand::SetHvacMode(mode));
                }
                tracing::debug!(
                    entity_id = %state.entity_id(),
                    target = raw,
                    "Target state has no device mode"
                );
            }
            None => tracing::warn!(
                entity_id = %state.entity_id(),
                %value,
                "Ignoring unparseable target state"
            ),
        }
    }

    let currently_active = current.is_some_and(|snapshot| snapshot.state.is_active());
    if active.is_some_and(|value| equals(value, 1)) && !currently_active {
        return Some(ClimateCommand::SetHvacMode(state.last_known_active_mode()));
    }
    None
}

fn resolve_temperature(
    state: &MappingState,
    batch: &WriteBatch,
    current: Option<&DeviceSnapshot>,
) -> Option<ClimateCommand> {
    let cooling = temperature(state, batch, Characteristic::CoolingThresholdTemperature);
    let heating = temperature(state, batch, Characteristic::HeatingThresholdTemperature);
    if cooling.is_none() && heating.is_none() {
        return None;
    }

    let unit = state.unit();
    match state.setpoint() {
        SetpointKind::Dual => Some(ClimateCommand::set_range(
            cooling.map(|c| unit.to_device(c)),
            heating.map(|h| unit.to_device(h)),
        )),
        SetpointKind::Single => {
            let selected = select_single_target(state, current?, cooling, heating)?;
            Some(ClimateCommand::set_target(unit.to_device(selected)))
        }
    }
}

/// Picks the one target a single-setpoint device gets from two thresholds.
///
/// In an automatic mode with both thresholds written, the one farther from
/// the device's current target is taken as the one the user moved. Without
/// a current target the heating threshold is taken.
fn select_single_target(
    state: &MappingState,
    current: &DeviceSnapshot,
    cooling: Option<f64>,
    heating: Option<f64>,
) -> Option<f64> {
    match (current.state.mode(), cooling, heating) {
        (Some(HvacMode::Cool), Some(cooling), _) => Some(cooling),
        (Some(HvacMode::Heat), _, Some(heating)) => Some(heating),
        (Some(mode), Some(cooling), Some(heating)) if mode.is_automatic() => {
            let previous = current
                .setpoint
                .reference()
                .map(|target| state.unit().to_protocol(target));
            match previous {
                Some(previous) if (cooling - previous).abs() > (heating - previous).abs() => {
                    Some(cooling)
                }
                _ => Some(heating),
            }
        }
        (_, cooling, heating) => cooling.or(heating),
    }
}

fn resolve_fan_speed(state: &MappingState, batch: &WriteBatch) -> Option<ClimateCommand> {
    let value = batch.get(Characteristic::RotationSpeed)?;
    let Some(fan_speeds) = state.fan_speeds() else {
        tracing::debug!(
            entity_id = %state.entity_id(),
            "Ignoring rotation speed, fan speed not exposed"
        );
        return None;
    };
    let Some(percentage) = value.as_f64() else {
        tracing::warn!(
            entity_id = %state.entity_id(),
            %value,
            "Ignoring unparseable rotation speed"
        );
        return None;
    };
    match fan_speeds.label_for_percentage(percentage) {
        Some(label) => Some(ClimateCommand::SetFanMode(label.to_string())),
        None => {
            tracing::debug!(
                entity_id = %state.entity_id(),
                percentage,
                "Ignoring rotation speed outside (0, 100]"
            );
            None
        }
    }
}

fn resolve_swing(
    state: &MappingState,
    batch: &WriteBatch,
    current: Option<&DeviceSnapshot>,
) -> Option<ClimateCommand> {
    let value = batch.get(Characteristic::SwingMode)?;
    let Some(swing) = state.swing() else {
        tracing::debug!(
            entity_id = %state.entity_id(),
            "Ignoring swing mode, swing not exposed"
        );
        return None;
    };
    let current = current?;

    let label = swing.label_for(value.as_flag());
    if current.swing_mode.as_deref() == Some(label) {
        return None;
    }
    Some(ClimateCommand::SetSwingMode(label.to_string()))
}

/// Reads a threshold write as a temperature.
fn temperature(
    state: &MappingState,
    batch: &WriteBatch,
    characteristic: Characteristic,
) -> Option<f64> {
    let value = batch.get(characteristic)?;
    let parsed = value.as_f64();
    if parsed.is_none() {
        tracing::warn!(
            entity_id = %state.entity_id(),
            %characteristic,
            %value,
            "Ignoring unparseable temperature"
        );
    }
    parsed
}

/// Returns `true` if a write holds the number `expected`.
fn equals(value: &CharValue, expected: u8) -> bool {
    value
        .as_f64()
        .is_some_and(|v| (v - f64::from(expected)).abs() < f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::ClimateFeatures;
    use crate::types::{EntityId, EntityState, TemperatureUnit};

    fn snapshot(state: impl Into<EntityState>) -> DeviceSnapshot {
        DeviceSnapshot::new(EntityId::new("climate.study").unwrap(), state)
    }

    fn resolve_for(device: &DeviceSnapshot, batch: &WriteBatch) -> Vec<ClimateCommand> {
        let mut state = MappingState::profile(device);
        resolve(&mut state, batch, Some(device))
    }

    #[test]
    fn off_takes_precedence_over_target() {
        let batch = WriteBatch::new()
            .with(Characteristic::Active, 0)
            .with(Characteristic::TargetHeaterCoolerState, 1);
        assert_eq!(
            resolve_for(&snapshot(HvacMode::Cool), &batch),
            vec![ClimateCommand::TurnOff]
        );
    }

    #[test]
    fn off_accepts_boolean_false() {
        let batch = WriteBatch::new().with(Characteristic::Active, false);
        assert_eq!(
            resolve_for(&snapshot(HvacMode::Heat), &batch),
            vec![ClimateCommand::TurnOff]
        );
    }

    #[test]
    fn target_state_sets_mode_and_is_remembered() {
        let device = snapshot(HvacMode::Off).with_hvac_modes([HvacMode::Auto]);
        let mut state = MappingState::profile(&device);

        let batch = WriteBatch::new()
            .with(Characteristic::Active, 1)
            .with(Characteristic::TargetHeaterCoolerState, 0);
        assert_eq!(
            resolve(&mut state, &batch, Some(&device)),
            vec![ClimateCommand::SetHvacMode(HvacMode::Auto)]
        );
        assert_eq!(state.last_known_active_mode(), HvacMode::Auto);
    }

    #[test]
    fn target_state_accepts_text_and_float() {
        let device = snapshot(HvacMode::Cool);
        assert_eq!(
            resolve_for(
                &device,
                &WriteBatch::new().with(Characteristic::TargetHeaterCoolerState, "1")
            ),
            vec![ClimateCommand::SetHvacMode(HvacMode::Heat)]
        );
        assert_eq!(
            resolve_for(
                &device,
                &WriteBatch::new().with(Characteristic::TargetHeaterCoolerState, 2.0)
            ),
            vec![ClimateCommand::SetHvacMode(HvacMode::Cool)]
        );
    }

    #[test]
    fn activate_restores_last_known_mode() {
        let mut state = MappingState::profile(&snapshot(HvacMode::Heat));
        let off = snapshot(HvacMode::Off);
        let batch = WriteBatch::new().with(Characteristic::Active, 1);

        assert_eq!(
            resolve(&mut state, &batch, Some(&off)),
            vec![ClimateCommand::SetHvacMode(HvacMode::Heat)]
        );
    }

    #[test]
    fn activate_when_running_does_nothing() {
        let batch = WriteBatch::new().with(Characteristic::Active, 1);
        assert!(resolve_for(&snapshot(HvacMode::Cool), &batch).is_empty());
    }

    #[test]
    fn unmapped_target_falls_through_to_activate() {
        let mut state = MappingState::profile(&snapshot(HvacMode::Off));
        let batch = WriteBatch::new()
            .with(Characteristic::Active, 1)
            .with(Characteristic::TargetHeaterCoolerState, 5);

        assert_eq!(
            resolve(&mut state, &batch, Some(&snapshot(HvacMode::Off))),
            vec![ClimateCommand::SetHvacMode(HvacMode::Cool)]
        );
    }

    #[test]
    fn dual_setpoint_single_command() {
        let device = snapshot(HvacMode::HeatCool).with_range(Some(25.0), Some(21.0));
        let batch = WriteBatch::new()
            .with(Characteristic::CoolingThresholdTemperature, 26)
            .with(Characteristic::HeatingThresholdTemperature, 20);

        assert_eq!(
            resolve_for(&device, &batch),
            vec![ClimateCommand::set_range(Some(26.0), Some(20.0))]
        );
    }

    #[test]
    fn dual_setpoint_partial_write() {
        let device = snapshot(HvacMode::HeatCool)
            .with_range(Some(78.0), Some(68.0))
            .with_unit(TemperatureUnit::Fahrenheit);
        let batch = WriteBatch::new().with(Characteristic::HeatingThresholdTemperature, 20.0);

        assert_eq!(
            resolve_for(&device, &batch),
            vec![ClimateCommand::set_range(None, Some(68.0))]
        );
    }

    #[test]
    fn single_setpoint_follows_mode() {
        let batch = WriteBatch::new()
            .with(Characteristic::CoolingThresholdTemperature, 23.0)
            .with(Characteristic::HeatingThresholdTemperature, 19.0);

        assert_eq!(
            resolve_for(&snapshot(HvacMode::Cool).with_target(24.0), &batch),
            vec![ClimateCommand::set_target(23.0)]
        );
        assert_eq!(
            resolve_for(&snapshot(HvacMode::Heat).with_target(24.0), &batch),
            vec![ClimateCommand::set_target(19.0)]
        );
        assert_eq!(
            resolve_for(&snapshot(HvacMode::Dry).with_target(24.0), &batch),
            vec![ClimateCommand::set_target(23.0)]
        );
    }

    #[test]
    fn single_setpoint_automatic_picks_moved_threshold() {
        let device = snapshot(HvacMode::HeatCool).with_target(21.0);
        let moved_cooling = WriteBatch::new()
            .with(Characteristic::CoolingThresholdTemperature, 25.0)
            .with(Characteristic::HeatingThresholdTemperature, 21.5);
        assert_eq!(
            resolve_for(&device, &moved_cooling),
            vec![ClimateCommand::set_target(25.0)]
        );

        let moved_heating = WriteBatch::new()
            .with(Characteristic::CoolingThresholdTemperature, 21.5)
            .with(Characteristic::HeatingThresholdTemperature, 18.0);
        assert_eq!(
            resolve_for(&device, &moved_heating),
            vec![ClimateCommand::set_target(18.0)]
        );
    }

    #[test]
    fn single_setpoint_automatic_without_target_uses_heating() {
        let device = snapshot(HvacMode::Auto);
        let batch = WriteBatch::new()
            .with(Characteristic::CoolingThresholdTemperature, 25.0)
            .with(Characteristic::HeatingThresholdTemperature, 18.0);
        assert_eq!(
            resolve_for(&device, &batch),
            vec![ClimateCommand::set_target(18.0)]
        );
    }

    #[test]
    fn single_setpoint_with_only_other_threshold() {
        let batch = WriteBatch::new().with(Characteristic::HeatingThresholdTemperature, 20.0);
        assert_eq!(
            resolve_for(&snapshot(HvacMode::Cool), &batch),
            vec![ClimateCommand::set_target(20.0)]
        );
    }

    #[test]
    fn single_setpoint_without_current_state_does_nothing() {
        let device = snapshot(HvacMode::Cool);
        let mut state = MappingState::profile(&device);
        let batch = WriteBatch::new().with(Characteristic::CoolingThresholdTemperature, 22.0);

        assert!(resolve(&mut state, &batch, None).is_empty());
    }

    #[test]
    fn unparseable_temperature_ignored() {
        let batch = WriteBatch::new().with(Characteristic::CoolingThresholdTemperature, "warm");
        assert!(resolve_for(&snapshot(HvacMode::Cool), &batch).is_empty());
    }

    #[test]
    fn fan_speed_to_label() {
        let device = snapshot(HvacMode::Cool)
            .with_features(ClimateFeatures::FAN_MODE)
            .with_fan_modes(["Auto", "Low", "Medium", "High"], Some("Low"));

        assert_eq!(
            resolve_for(&device, &WriteBatch::new().with(Characteristic::RotationSpeed, 60)),
            vec![ClimateCommand::SetFanMode("Medium".to_string())]
        );
        assert!(resolve_for(&device, &WriteBatch::new().with(Characteristic::RotationSpeed, 0)).is_empty());
        assert!(
            resolve_for(&device, &WriteBatch::new().with(Characteristic::RotationSpeed, 101))
                .is_empty()
        );
    }

    #[test]
    fn fan_speed_without_table_ignored() {
        let device = snapshot(HvacMode::Cool).with_fan_modes(["Low"], None);
        let batch = WriteBatch::new().with(Characteristic::RotationSpeed, 50);
        assert!(resolve_for(&device, &batch).is_empty());
    }

    #[test]
    fn swing_enable_and_disable() {
        let device = snapshot(HvacMode::Cool)
            .with_features(ClimateFeatures::SWING_MODE)
            .with_swing_modes(["Off", "Both"], Some("Off"));

        assert_eq!(
            resolve_for(&device, &WriteBatch::new().with(Characteristic::SwingMode, 1)),
            vec![ClimateCommand::SetSwingMode("Both".to_string())]
        );
        // Already off
        assert!(resolve_for(&device, &WriteBatch::new().with(Characteristic::SwingMode, 0)).is_empty());
    }

    #[test]
    fn swing_fallback_label() {
        let device = snapshot(HvacMode::Cool)
            .with_features(ClimateFeatures::SWING_MODE)
            .with_swing_modes(["Stop", "Sweep"], Some("Sweep"));

        assert_eq!(
            resolve_for(&device, &WriteBatch::new().with(Characteristic::SwingMode, true)),
            vec![ClimateCommand::SetSwingMode("Stop".to_string())]
        );
    }

    #[test]
    fn swing_without_table_ignored() {
        let device = snapshot(HvacMode::Cool).with_swing_modes(["on", "off"], Some("off"));
        let batch = WriteBatch::new().with(Characteristic::SwingMode, 1);
        assert!(resolve_for(&device, &batch).is_empty());
    }

    #[test]
    fn batch_resolves_in_order() {
        let device = snapshot(HvacMode::Off)
            .with_features(ClimateFeatures::FAN_MODE | ClimateFeatures::SWING_MODE)
            .with_fan_modes(["low", "high"], Some("low"))
            .with_swing_modes(["off", "on"], Some("off"))
            .with_target(22.0);
        let batch = WriteBatch::new()
            .with(Characteristic::SwingMode, 1)
            .with(Characteristic::RotationSpeed, 100)
            .with(Characteristic::CoolingThresholdTemperature, 21.0)
            .with(Characteristic::TargetHeaterCoolerState, 2);

        assert_eq!(
            resolve_for(&device, &batch),
            vec![
                ClimateCommand::SetHvacMode(HvacMode::Cool),
                ClimateCommand::set_target(21.0),
                ClimateCommand::SetFanMode("high".to_string()),
                ClimateCommand::SetSwingMode("on".to_string()),
            ]
        );
    }
}
