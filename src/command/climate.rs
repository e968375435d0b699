// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate service commands.

use std::fmt;

use serde_json::{Map, Value, json};

use crate::command::Command;
use crate::types::HvacMode;

/// Command to a climate device.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::command::{ClimateCommand, Command};
///
/// // Dual-setpoint write: both targets in one command
/// let cmd = ClimateCommand::set_range(Some(26.0), Some(20.0));
/// assert_eq!(cmd.service(), "set_temperature");
/// assert_eq!(
///     cmd.service_data(),
///     serde_json::json!({"target_temp_high": 26.0, "target_temp_low": 20.0})
/// );
///
/// let fan = ClimateCommand::SetFanMode("Medium".to_string());
/// assert_eq!(fan.service_data(), serde_json::json!({"fan_mode": "Medium"}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ClimateCommand {
    /// Turn the device off.
    TurnOff,
    /// Switch to a mode.
    SetHvacMode(HvacMode),
    /// Change the target temperature(s), in device units.
    ///
    /// Only present fields are sent.
    SetTemperature {
        /// Single target.
        temperature: Option<f64>,
        /// Upper target of a dual-setpoint device.
        target_temp_high: Option<f64>,
        /// Lower target of a dual-setpoint device.
        target_temp_low: Option<f64>,
    },
    /// Select a fan mode by its device label.
    SetFanMode(String),
    /// Select a swing mode by its device label.
    SetSwingMode(String),
}

impl ClimateCommand {
    /// Creates a single-setpoint temperature command.
    #[must_use]
    pub const fn set_target(temperature: f64) -> Self {
        Self::SetTemperature {
            temperature: Some(temperature),
            target_temp_high: None,
            target_temp_low: None,
        }
    }

    /// Creates a dual-setpoint temperature command.
    #[must_use]
    pub const fn set_range(high: Option<f64>, low: Option<f64>) -> Self {
        Self::SetTemperature {
            temperature: None,
            target_temp_high: high,
            target_temp_low: low,
        }
    }
}

impl Command for ClimateCommand {
    fn service(&self) -> &'static str {
        match self {
            Self::TurnOff => "turn_off",
            Self::SetHvacMode(_) => "set_hvac_mode",
            Self::SetTemperature { .. } => "set_temperature",
            Self::SetFanMode(_) => "set_fan_mode",
            Self::SetSwingMode(_) => "set_swing_mode",
        }
    }

    fn service_data(&self) -> Value {
        match self {
            Self::TurnOff => json!({}),
            Self::SetHvacMode(mode) => json!({ "hvac_mode": mode.as_str() }),
            Self::SetTemperature {
                temperature,
                target_temp_high,
                target_temp_low,
            } => {
                let mut data = Map::new();
                let fields = [
                    ("temperature", temperature),
                    ("target_temp_high", target_temp_high),
                    ("target_temp_low", target_temp_low),
                ];
                for (key, value) in fields {
                    if let Some(value) = value {
                        data.insert(key.to_string(), json!(value));
                    }
                }
                Value::Object(data)
            }
            Self::SetFanMode(label) => json!({ "fan_mode": label }),
            Self::SetSwingMode(label) => json!({ "swing_mode": label }),
        }
    }
}

impl fmt::Display for ClimateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.service(), self.service_data())
    }
}
