// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! What a climate device is doing right now.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Current activity of a climate device.
///
/// Hosts may report labels this crate does not know; those deserialize to
/// [`HvacAction::Unrecognized`] rather than failing the whole snapshot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    /// Device is off.
    Off,
    /// Device is on but not conditioning.
    Idle,
    /// Heating.
    Heating,
    /// Cooling.
    Cooling,
    /// Dehumidifying.
    Drying,
    /// Only the fan is running.
    Fan,
    /// Warming up before heating.
    Preheating,
    /// Defrosting the outdoor unit.
    Defrosting,
    /// A label the host reported that has no known meaning.
    #[serde(other)]
    Unrecognized,
}

impl HvacAction {
    /// Returns the host label for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Idle => "idle",
            Self::Heating => "heating",
            Self::Cooling => "cooling",
            Self::Drying => "drying",
            Self::Fan => "fan",
            Self::Preheating => "preheating",
            Self::Defrosting => "defrosting",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for HvacAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacAction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "idle" => Ok(Self::Idle),
            "heating" => Ok(Self::Heating),
            "cooling" => Ok(Self::Cooling),
            "drying" => Ok(Self::Drying),
            "fan" => Ok(Self::Fan),
            "preheating" => Ok(Self::Preheating),
            "defrosting" => Ok(Self::Defrosting),
            _ => Err(ValueError::InvalidHvacAction(s.to_string())),
        }
    }
}
