// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate device snapshots.
//!
//! The host registry publishes a climate device as a state string plus a
//! loosely-typed attribute map. This module parses both once, at the
//! boundary, into a [`DeviceSnapshot`]; the translation code only ever sees
//! the typed form.
//!
//! # Examples
//!
//! ```
//! use heatercooler_bridge::snapshot::DeviceSnapshot;
//! use heatercooler_bridge::types::{EntityId, EntityState, TemperatureUnit};
//!
//! let snapshot = DeviceSnapshot::from_state(
//!     EntityId::new("climate.attic").unwrap(),
//!     "unavailable",
//!     &serde_json::json!({}),
//!     TemperatureUnit::Celsius,
//! )
//! .unwrap();
//!
//! assert_eq!(snapshot.state, EntityState::Unavailable);
//! ```

mod attributes;
mod device_snapshot;

pub use attributes::ClimateAttributes;
pub use device_snapshot::{DeviceSnapshot, Setpoint};
