// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC operating modes and the entity state that carries them.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode of a climate device.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::types::HvacMode;
///
/// let mode: HvacMode = "heat_cool".parse().unwrap();
/// assert_eq!(mode, HvacMode::HeatCool);
/// assert_eq!(mode.as_str(), "heat_cool");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// Device is switched off.
    Off,
    /// Heating only.
    Heat,
    /// Cooling only.
    Cool,
    /// Heat or cool to stay within a temperature range.
    HeatCool,
    /// Device decides on its own (schedule, learned behaviour).
    Auto,
    /// Dehumidification.
    Dry,
    /// Fan only, no heating or cooling.
    FanOnly,
}

impl HvacMode {
    /// Returns the host label for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::HeatCool => "heat_cool",
            Self::Auto => "auto",
            Self::Dry => "dry",
            Self::FanOnly => "fan_only",
        }
    }

    /// Returns `true` for the modes that heat or cool on demand.
    #[must_use]
    pub const fn is_automatic(&self) -> bool {
        matches!(self, Self::HeatCool | Self::Auto)
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            "heat_cool" => Ok(Self::HeatCool),
            "auto" => Ok(Self::Auto),
            "dry" => Ok(Self::Dry),
            "fan_only" => Ok(Self::FanOnly),
            _ => Err(ValueError::InvalidHvacMode(s.to_string())),
        }
    }
}

/// State of a climate entity as reported by the host registry.
///
/// A climate entity's state is its HVAC mode, unless the host cannot reach
/// the device or has not received a state yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityState {
    /// The device reports an operating mode.
    Mode(HvacMode),
    /// The state has not been determined.
    Unknown,
    /// The device cannot be reached.
    Unavailable,
}

impl EntityState {
    /// Parses a host state string.
    ///
    /// Strings that are neither a mode nor `unavailable` are treated as
    /// [`EntityState::Unknown`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "unavailable" => Self::Unavailable,
            other => other.parse().map_or(Self::Unknown, Self::Mode),
        }
    }

    /// Returns the operating mode, if known.
    #[must_use]
    pub const fn mode(&self) -> Option<HvacMode> {
        match self {
            Self::Mode(mode) => Some(*mode),
            Self::Unknown | Self::Unavailable => None,
        }
    }

    /// Returns the operating mode if it is known and not [`HvacMode::Off`].
    #[must_use]
    pub fn active_mode(&self) -> Option<HvacMode> {
        self.mode().filter(|mode| *mode != HvacMode::Off)
    }

    /// Returns `true` when the device is running in some mode.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_mode().is_some()
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(mode) => mode.fmt(f),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

impl From<HvacMode> for EntityState {
    fn from(mode: HvacMode) -> Self {
        Self::Mode(mode)
    }
}
