// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the device side and the protocol side.
//!
//! These types parse host labels once at the boundary so the translation
//! code never compares raw strings for modes, actions or units.

mod entity_id;
mod hvac_action;
mod hvac_mode;
pub mod percentage;
mod temperature;

pub use entity_id::EntityId;
pub use hvac_action::HvacAction;
pub use hvac_mode::{EntityState, HvacMode};
pub use temperature::TemperatureUnit;
