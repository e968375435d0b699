// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate device command definitions.
//!
//! This module provides typed representations of the commands the bridge
//! issues to the host's climate services.
//!
//! # Available Commands
//!
//! | Command | Service | Data |
//! |---------|---------|------|
//! | [`ClimateCommand::TurnOff`] | `turn_off` | none |
//! | [`ClimateCommand::SetHvacMode`] | `set_hvac_mode` | `hvac_mode` |
//! | [`ClimateCommand::SetTemperature`] | `set_temperature` | `temperature`, `target_temp_high`, `target_temp_low` |
//! | [`ClimateCommand::SetFanMode`] | `set_fan_mode` | `fan_mode` |
//! | [`ClimateCommand::SetSwingMode`] | `set_swing_mode` | `swing_mode` |
//!
//! # Examples
//!
//! ```
//! use heatercooler_bridge::command::{ClimateCommand, Command};
//! use heatercooler_bridge::types::HvacMode;
//!
//! let cmd = ClimateCommand::SetHvacMode(HvacMode::Cool);
//! assert_eq!(cmd.service(), "set_hvac_mode");
//! assert_eq!(cmd.service_data(), serde_json::json!({"hvac_mode": "cool"}));
//! ```

mod climate;

pub use climate::ClimateCommand;

/// Service domain of every climate command.
pub const CLIMATE_DOMAIN: &str = "climate";

/// A command that can be issued to a host service.
///
/// Commands are serialized to a service name plus a JSON data payload, the
/// shape the host's service registry expects.
pub trait Command {
    /// Returns the service domain.
    fn domain(&self) -> &'static str {
        CLIMATE_DOMAIN
    }

    /// Returns the service name within the domain.
    ///
    /// For example, `"turn_off"` or `"set_fan_mode"`.
    fn service(&self) -> &'static str;

    /// Returns the service data payload.
    ///
    /// The payload never includes the target entity; the host adds it.
    fn service_data(&self) -> serde_json::Value;

    /// Returns the fully qualified service name, `<domain>.<service>`.
    fn qualified_service(&self) -> String {
        format!("{}.{}", self.domain(), self.service())
    }
}
