// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `heatercooler_bridge` - Expose multi-mode climate devices as HeaterCooler
//! accessories.
//!
//! Accessory protocols such as HomeKit model a thermostat with only heat,
//! cool and auto modes and no fan or swing control. Air conditioners offer
//! more. This library presents such devices as a HeaterCooler service
//! instead, translating in both directions:
//!
//! - **Capability profiling**: Read a device's modes, fan speeds, swing
//!   labels, setpoint style and temperature bounds once, at creation
//! - **State projection**: Turn every device state change into
//!   characteristic values (`Active`, current/target state, temperatures,
//!   `RotationSpeed`, `SwingMode`)
//! - **Command resolution**: Turn a batch of client writes into the fewest
//!   climate service calls, in a fixed order
//! - **Bridge management**: Select entities by include/exclude list, keep
//!   accessories subscribed, report diagnostics
//!
//! The host platform is abstracted by [`ClimateHost`]: it supplies
//! [`DeviceSnapshot`]s, invokes [`ClimateCommand`]s and delivers state
//! changes.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use heatercooler_bridge::characteristic::{Characteristic, WriteBatch};
//! use heatercooler_bridge::{Bridge, BridgeConfig, ClimateHost, EntityId};
//!
//! fn run<H: ClimateHost + 'static>(host: Arc<H>) -> heatercooler_bridge::Result<()> {
//!     let office = EntityId::new("climate.office")?;
//!     let bridge = Bridge::new(host, BridgeConfig::new().with_include(office.clone()));
//!     bridge.refresh(bridge.config());
//!
//!     if bridge.create_accessory(&office)?.is_some() {
//!         // A client turned the unit on at 60% fan speed.
//!         let batch = WriteBatch::new()
//!             .with(Characteristic::Active, 1)
//!             .with(Characteristic::RotationSpeed, 60);
//!         let report = bridge.write(&office, &batch)?;
//!         println!("issued {:?}", report.issued);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Event Subscription
//!
//! ```no_run
//! use heatercooler_bridge::event::BridgeEvent;
//! use heatercooler_bridge::{Bridge, ClimateHost};
//!
//! # async fn example<H: ClimateHost + 'static>(bridge: Bridge<H>) {
//! let mut events = bridge.subscribe();
//! while let Ok(event) = events.recv().await {
//!     if let BridgeEvent::CommandRejected { entity_id, reason, .. } = event {
//!         eprintln!("{entity_id}: {reason}");
//!     }
//! }
//! # }
//! ```

pub mod accessory;
mod capabilities;
pub mod characteristic;
pub mod command;
pub mod error;
pub mod event;
pub mod host;
pub mod manager;
pub mod profile;
pub mod projector;
pub mod resolver;
pub mod snapshot;
pub mod subscription;
pub mod types;

pub use accessory::{DispatchReport, HeaterCooler};
pub use capabilities::ClimateFeatures;
pub use characteristic::{
    CharValue, Characteristic, CurrentHeaterCoolerState, TargetHeaterCoolerState, WriteBatch,
};
pub use command::{ClimateCommand, Command};
pub use error::{CommandError, Error, ParseError, Result, ValueError};
pub use event::{BridgeEvent, EventBus};
pub use host::ClimateHost;
pub use manager::{Bridge, BridgeConfig, BridgeStatus};
pub use profile::MappingState;
pub use snapshot::{DeviceSnapshot, Setpoint};
pub use subscription::{StateCallback, StateCallbackRegistry, SubscriptionId};
pub use types::{EntityId, EntityState, HvacAction, HvacMode, TemperatureUnit};
