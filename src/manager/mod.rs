// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge manager for exposing selected climate entities as HeaterCoolers.
//!
//! # Overview
//!
//! The [`Bridge`] sits between the host's device registry and the accessory
//! protocol server. It:
//!
//! - selects entities through a [`BridgeConfig`] include/exclude list,
//! - creates one [`HeaterCooler`](crate::accessory::HeaterCooler) per
//!   selected device and keeps it subscribed to state changes,
//! - routes client writes to the accessory and reports rejected commands,
//! - publishes a [`BridgeStatus`] describing why each selected entity is or
//!   is not bridged.
//!
//! # Examples
//!
//! ```
//! use heatercooler_bridge::manager::BridgeConfig;
//!
//! let config = BridgeConfig::from_json(
//!     r#"{"include_entities": ["climate.lounge"], "exclude_entities": []}"#,
//! )
//! .unwrap();
//! assert_eq!(config.target_entities().len(), 1);
//! ```

mod bridge;
mod bridge_config;
mod bridge_status;

pub use bridge::{Bridge, SharedAccessory};
pub use bridge_config::BridgeConfig;
pub use bridge_status::BridgeStatus;
