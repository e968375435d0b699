// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate device feature flags.
//!
//! Hosts declare what a climate device supports with an integer bitset.
//! [`ClimateFeatures`] wraps that bitset and names the bits this crate cares
//! about. Unknown bits are preserved so a snapshot can be re-serialized
//! without loss.

use std::fmt;
use std::ops::BitOr;

/// Supported-feature bitset of a climate device.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::ClimateFeatures;
///
/// let features = ClimateFeatures::from_bits(40);
/// assert!(features.supports_fan_mode());
/// assert!(features.supports_swing_mode());
/// assert!(!features.supports_target_temperature_range());
///
/// let built = ClimateFeatures::FAN_MODE | ClimateFeatures::SWING_MODE;
/// assert_eq!(built, features);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ClimateFeatures(u32);

impl ClimateFeatures {
    /// Single target temperature.
    pub const TARGET_TEMPERATURE: Self = Self(1);
    /// High/low target temperature range.
    pub const TARGET_TEMPERATURE_RANGE: Self = Self(2);
    /// Target humidity.
    pub const TARGET_HUMIDITY: Self = Self(4);
    /// Selectable fan modes.
    pub const FAN_MODE: Self = Self(8);
    /// Presets.
    pub const PRESET_MODE: Self = Self(16);
    /// Selectable swing modes.
    pub const SWING_MODE: Self = Self(32);
    /// Auxiliary heater.
    pub const AUX_HEAT: Self = Self(64);
    /// Explicit turn-off command.
    pub const TURN_OFF: Self = Self(128);
    /// Explicit turn-on command.
    pub const TURN_ON: Self = Self(256);

    /// An empty feature set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Wraps a raw bitset.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bitset.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if fan modes can be selected.
    #[must_use]
    pub const fn supports_fan_mode(&self) -> bool {
        self.contains(Self::FAN_MODE)
    }

    /// Returns `true` if swing modes can be selected.
    #[must_use]
    pub const fn supports_swing_mode(&self) -> bool {
        self.contains(Self::SWING_MODE)
    }

    /// Returns `true` if the device uses a high/low setpoint pair.
    #[must_use]
    pub const fn supports_target_temperature_range(&self) -> bool {
        self.contains(Self::TARGET_TEMPERATURE_RANGE)
    }
}

impl BitOr for ClimateFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl From<u32> for ClimateFeatures {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for ClimateFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
