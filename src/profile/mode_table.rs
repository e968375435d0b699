// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol target state to device mode mapping.

use crate::characteristic::TargetHeaterCoolerState;
use crate::snapshot::DeviceSnapshot;
use crate::types::HvacMode;

/// Maps `TargetHeaterCoolerState` values to device modes.
///
/// Heat and Cool map to themselves. The protocol's single Auto target stands
/// for whichever automatic mode the device offers: `auto` if it has one,
/// `heat_cool` otherwise. A device offering neither still gets `heat_cool`,
/// so every target state always resolves.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::characteristic::TargetHeaterCoolerState;
/// use heatercooler_bridge::profile::TargetModeTable;
/// use heatercooler_bridge::snapshot::DeviceSnapshot;
/// use heatercooler_bridge::types::{EntityId, HvacMode};
///
/// let snapshot = DeviceSnapshot::new(EntityId::new("climate.den").unwrap(), HvacMode::Cool)
///     .with_hvac_modes([HvacMode::Off, HvacMode::Cool, HvacMode::Auto]);
/// let table = TargetModeTable::for_snapshot(&snapshot);
///
/// assert_eq!(table.device_mode(TargetHeaterCoolerState::Auto), HvacMode::Auto);
/// assert_eq!(table.lookup(2), Some(HvacMode::Cool));
/// assert_eq!(table.lookup(7), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetModeTable {
    auto: HvacMode,
}

impl TargetModeTable {
    /// Builds the table for a device.
    #[must_use]
    pub fn for_snapshot(snapshot: &DeviceSnapshot) -> Self {
        let auto = if snapshot.offers_mode(HvacMode::Auto) {
            HvacMode::Auto
        } else {
            // Also the fallback when neither automatic mode is offered
            HvacMode::HeatCool
        };
        Self { auto }
    }

    /// Returns the device mode behind the Auto target.
    #[must_use]
    pub const fn auto_mode(&self) -> HvacMode {
        self.auto
    }

    /// Returns the device mode for a target state.
    #[must_use]
    pub const fn device_mode(&self, target: TargetHeaterCoolerState) -> HvacMode {
        match target {
            TargetHeaterCoolerState::Auto => self.auto,
            TargetHeaterCoolerState::Heat => HvacMode::Heat,
            TargetHeaterCoolerState::Cool => HvacMode::Cool,
        }
    }

    /// Returns the device mode for a raw target state value.
    #[must_use]
    pub fn lookup(&self, value: i64) -> Option<HvacMode> {
        TargetHeaterCoolerState::try_from(value)
            .ok()
            .map(|target| self.device_mode(target))
    }

    /// Returns the target state that represents a device mode.
    ///
    /// Off keeps the Auto target so the accessory shows the automatic mode
    /// it would resume in. Modes without a protocol equivalent return `None`.
    #[must_use]
    pub const fn target_state(mode: HvacMode) -> Option<TargetHeaterCoolerState> {
        match mode {
            HvacMode::Off | HvacMode::HeatCool | HvacMode::Auto => {
                Some(TargetHeaterCoolerState::Auto)
            }
            HvacMode::Heat => Some(TargetHeaterCoolerState::Heat),
            HvacMode::Cool => Some(TargetHeaterCoolerState::Cool),
            HvacMode::Dry | HvacMode::FanOnly => None,
        }
    }

    /// Returns every entry, ordered by target state.
    #[must_use]
    pub const fn entries(&self) -> [(TargetHeaterCoolerState, HvacMode); 3] {
        [
            (TargetHeaterCoolerState::Auto, self.auto),
            (TargetHeaterCoolerState::Heat, HvacMode::Heat),
            (TargetHeaterCoolerState::Cool, HvacMode::Cool),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, EntityState};

    fn snapshot(state: impl Into<EntityState>, modes: &[HvacMode]) -> DeviceSnapshot {
        DeviceSnapshot::new(EntityId::new("climate.test").unwrap(), state)
            .with_hvac_modes(modes.iter().copied())
    }

    #[test]
    fn auto_preferred_over_heat_cool() {
        let table = TargetModeTable::for_snapshot(&snapshot(
            HvacMode::Off,
            &[HvacMode::HeatCool, HvacMode::Auto],
        ));
        assert_eq!(table.auto_mode(), HvacMode::Auto);
    }

    #[test]
    fn heat_cool_when_declared() {
        let table = TargetModeTable::for_snapshot(&snapshot(
            HvacMode::Off,
            &[HvacMode::Heat, HvacMode::HeatCool],
        ));
        assert_eq!(table.auto_mode(), HvacMode::HeatCool);
    }

    #[test]
    fn current_mode_counts_as_offered() {
        let table = TargetModeTable::for_snapshot(&snapshot(HvacMode::Auto, &[HvacMode::Cool]));
        assert_eq!(table.auto_mode(), HvacMode::Auto);
    }

    #[test]
    fn auto_slot_present_without_capability() {
        for state in [
            EntityState::Mode(HvacMode::Cool),
            EntityState::Unknown,
            EntityState::Unavailable,
        ] {
            let table = TargetModeTable::for_snapshot(&snapshot(state, &[HvacMode::Cool]));
            let entries = table.entries();
            assert_eq!(entries.len(), 3);
            assert_eq!(entries[0], (TargetHeaterCoolerState::Auto, HvacMode::HeatCool));
            assert_eq!(entries[1], (TargetHeaterCoolerState::Heat, HvacMode::Heat));
            assert_eq!(entries[2], (TargetHeaterCoolerState::Cool, HvacMode::Cool));
        }
    }

    #[test]
    fn target_state_inverse() {
        assert_eq!(
            TargetModeTable::target_state(HvacMode::Off),
            Some(TargetHeaterCoolerState::Auto)
        );
        assert_eq!(
            TargetModeTable::target_state(HvacMode::HeatCool),
            Some(TargetHeaterCoolerState::Auto)
        );
        assert_eq!(
            TargetModeTable::target_state(HvacMode::Heat),
            Some(TargetHeaterCoolerState::Heat)
        );
        assert_eq!(TargetModeTable::target_state(HvacMode::Dry), None);
        assert_eq!(TargetModeTable::target_state(HvacMode::FanOnly), None);
    }
}
