// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature units and conversion to and from protocol units.
//!
//! The accessory protocol always carries temperatures in Celsius, whatever
//! unit the device or the user interface displays. Values travelling to the
//! protocol are rounded to one decimal; values travelling back to the device
//! are rounded to the nearest half degree.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Temperature unit used by a device.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::types::TemperatureUnit;
///
/// let unit = TemperatureUnit::Fahrenheit;
/// assert_eq!(unit.to_protocol(77.0), 25.0);
/// assert_eq!(unit.to_device(25.0), 77.0);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    #[serde(rename = "°C")]
    Celsius,
    /// Degrees Fahrenheit.
    #[serde(rename = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Celsius to Fahrenheit slope applied to temperature differences.
    const CELSIUS_PER_FAHRENHEIT: f64 = 5.0 / 9.0;

    /// Returns the unit symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Converts a device temperature to protocol units (Celsius, 0.1 precision).
    #[must_use]
    pub fn to_protocol(&self, value: f64) -> f64 {
        let celsius = match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) / 1.8,
        };
        (celsius * 10.0).round() / 10.0
    }

    /// Converts a protocol temperature back to device units (0.5 precision).
    #[must_use]
    pub fn to_device(&self, celsius: f64) -> f64 {
        let value = match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 1.8 + 32.0,
        };
        (value * 2.0).round() / 2.0
    }

    /// Converts a temperature step (a difference, not a point) to protocol units.
    ///
    /// Only the slope applies: a 1°F step is 5/9 of a degree Celsius.
    #[must_use]
    pub fn step_to_protocol(&self, step: f64) -> f64 {
        match self {
            Self::Celsius => step,
            Self::Fahrenheit => step * Self::CELSIUS_PER_FAHRENHEIT,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "°C" | "C" | "celsius" => Ok(Self::Celsius),
            "°F" | "F" | "fahrenheit" => Ok(Self::Fahrenheit),
            _ => Err(ValueError::InvalidTemperatureUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_passes_through_with_rounding() {
        let unit = TemperatureUnit::Celsius;
        assert!((unit.to_protocol(21.37) - 21.4).abs() < f64::EPSILON);
        assert!((unit.to_device(21.3) - 21.5).abs() < f64::EPSILON);
        assert!((unit.to_device(26.0) - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fahrenheit_conversion() {
        let unit = TemperatureUnit::Fahrenheit;
        assert!((unit.to_protocol(212.0) - 100.0).abs() < f64::EPSILON);
        assert!((unit.to_protocol(70.0) - 21.1).abs() < 1e-9);
        assert!((unit.to_device(21.1) - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn step_only_rescaled_for_fahrenheit() {
        assert!((TemperatureUnit::Celsius.step_to_protocol(0.5) - 0.5).abs() < f64::EPSILON);
        let step = TemperatureUnit::Fahrenheit.step_to_protocol(1.0);
        assert!((step - 5.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn parse_unit_symbols() {
        assert_eq!("°C".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
        assert_eq!("°F".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert!("K".parse::<TemperatureUnit>().is_err());
    }
}
