// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The accessory protocol's HeaterCooler service model.
//!
//! A HeaterCooler service is a fixed set of named, typed value slots
//! ("characteristics"). This module defines the characteristic identifiers,
//! the protocol's enumerated values, the loosely-typed values clients write,
//! and [`HeaterCoolerService`], the registered slot list of one accessory.
//!
//! | Characteristic | Values |
//! |----------------|--------|
//! | `Active` | 0 inactive, 1 active |
//! | `CurrentHeaterCoolerState` | [`CurrentHeaterCoolerState`] |
//! | `TargetHeaterCoolerState` | [`TargetHeaterCoolerState`] |
//! | `CurrentTemperature` | °C |
//! | `CoolingThresholdTemperature` | °C |
//! | `HeatingThresholdTemperature` | °C |
//! | `RotationSpeed` | 0-100 % |
//! | `SwingMode` | 0 disabled, 1 enabled |

mod service;
mod value;
mod write_batch;

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

pub use service::{CharacteristicProperties, HeaterCoolerService};
pub use value::CharValue;
pub use write_batch::WriteBatch;

/// Name of the service type, as registered with the protocol runtime.
pub const SERVICE_HEATER_COOLER: &str = "HeaterCooler";

/// A characteristic of the HeaterCooler service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Characteristic {
    /// Whether the device is running.
    Active,
    /// What the device is doing.
    CurrentHeaterCoolerState,
    /// Which mode the user selected.
    TargetHeaterCoolerState,
    /// Measured temperature.
    CurrentTemperature,
    /// Upper threshold, cool above it.
    CoolingThresholdTemperature,
    /// Lower threshold, heat below it.
    HeatingThresholdTemperature,
    /// Fan speed in percent.
    RotationSpeed,
    /// Whether the louvres swing.
    SwingMode,
}

impl Characteristic {
    /// Characteristics every HeaterCooler accessory registers, in order.
    pub const REQUIRED: [Self; 6] = [
        Self::Active,
        Self::CurrentHeaterCoolerState,
        Self::TargetHeaterCoolerState,
        Self::CurrentTemperature,
        Self::CoolingThresholdTemperature,
        Self::HeatingThresholdTemperature,
    ];

    /// Returns the protocol name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::CurrentHeaterCoolerState => "CurrentHeaterCoolerState",
            Self::TargetHeaterCoolerState => "TargetHeaterCoolerState",
            Self::CurrentTemperature => "CurrentTemperature",
            Self::CoolingThresholdTemperature => "CoolingThresholdTemperature",
            Self::HeatingThresholdTemperature => "HeatingThresholdTemperature",
            Self::RotationSpeed => "RotationSpeed",
            Self::SwingMode => "SwingMode",
        }
    }

    /// Returns `true` for characteristics holding a temperature.
    #[must_use]
    pub const fn is_temperature(&self) -> bool {
        matches!(
            self,
            Self::CurrentTemperature
                | Self::CoolingThresholdTemperature
                | Self::HeatingThresholdTemperature
        )
    }

    /// Converts a client value to this characteristic's value type.
    ///
    /// Temperatures become floats and everything else an integer. Returns
    /// `None` if the value is not a number.
    #[must_use]
    pub fn coerce(&self, value: &CharValue) -> Option<CharValue> {
        if self.is_temperature() {
            value.as_f64().map(CharValue::Float)
        } else {
            value.as_i64().map(CharValue::Int)
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Characteristic {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "CurrentHeaterCoolerState" => Ok(Self::CurrentHeaterCoolerState),
            "TargetHeaterCoolerState" => Ok(Self::TargetHeaterCoolerState),
            "CurrentTemperature" => Ok(Self::CurrentTemperature),
            "CoolingThresholdTemperature" => Ok(Self::CoolingThresholdTemperature),
            "HeatingThresholdTemperature" => Ok(Self::HeatingThresholdTemperature),
            "RotationSpeed" => Ok(Self::RotationSpeed),
            "SwingMode" => Ok(Self::SwingMode),
            _ => Err(ValueError::UnknownCharacteristic(s.to_string())),
        }
    }
}

/// Values of the `CurrentHeaterCoolerState` characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentHeaterCoolerState {
    /// Not running.
    Inactive = 0,
    /// Running, not conditioning.
    Idle = 1,
    /// Heating.
    Heating = 2,
    /// Cooling.
    Cooling = 3,
}

impl CurrentHeaterCoolerState {
    /// Returns the protocol value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl From<CurrentHeaterCoolerState> for CharValue {
    fn from(state: CurrentHeaterCoolerState) -> Self {
        Self::Int(i64::from(state.value()))
    }
}

/// Values of the `TargetHeaterCoolerState` characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetHeaterCoolerState {
    /// Heat or cool as needed.
    Auto = 0,
    /// Heat only.
    Heat = 1,
    /// Cool only.
    Cool = 2,
}

impl TargetHeaterCoolerState {
    /// Returns the protocol value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for TargetHeaterCoolerState {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Auto),
            1 => Ok(Self::Heat),
            2 => Ok(Self::Cool),
            _ => Err(ValueError::OutOfRange {
                min: 0,
                max: 2,
                actual: value,
            }),
        }
    }
}

impl From<TargetHeaterCoolerState> for CharValue {
    fn from(state: TargetHeaterCoolerState) -> Self {
        Self::Int(i64::from(state.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characteristic_names_round_trip() {
        for characteristic in Characteristic::REQUIRED
            .into_iter()
            .chain([Characteristic::RotationSpeed, Characteristic::SwingMode])
        {
            let parsed: Characteristic = characteristic.as_str().parse().unwrap();
            assert_eq!(parsed, characteristic);
        }
        assert!("Brightness".parse::<Characteristic>().is_err());
    }

    #[test]
    fn coerce_matches_projected_types() {
        assert_eq!(
            Characteristic::CoolingThresholdTemperature.coerce(&CharValue::Int(26)),
            Some(CharValue::Float(26.0))
        );
        assert_eq!(
            Characteristic::RotationSpeed.coerce(&CharValue::Float(60.0)),
            Some(CharValue::Int(60))
        );
        assert_eq!(
            Characteristic::Active.coerce(&CharValue::Bool(true)),
            Some(CharValue::Int(1))
        );
        assert_eq!(
            Characteristic::SwingMode.coerce(&CharValue::Text("on".to_string())),
            None
        );
    }

    #[test]
    fn current_state_values() {
        assert_eq!(CurrentHeaterCoolerState::Inactive.value(), 0);
        assert_eq!(CurrentHeaterCoolerState::Idle.value(), 1);
        assert_eq!(CurrentHeaterCoolerState::Heating.value(), 2);
        assert_eq!(CurrentHeaterCoolerState::Cooling.value(), 3);
    }

    #[test]
    fn target_state_conversion() {
        assert_eq!(
            TargetHeaterCoolerState::try_from(1).unwrap(),
            TargetHeaterCoolerState::Heat
        );
        assert_eq!(
            TargetHeaterCoolerState::try_from(3),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 2,
                actual: 3
            })
        );
        assert_eq!(
            CharValue::from(TargetHeaterCoolerState::Cool),
            CharValue::Int(2)
        );
    }
}
