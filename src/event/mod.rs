// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge events.
//!
//! The [`Bridge`](crate::manager::Bridge) publishes a [`BridgeEvent`] on an
//! [`EventBus`] whenever it creates or removes an accessory, refreshes its
//! status, or the host rejects a command. Diagnostic surfaces listen here
//! instead of polling.
//!
//! # Examples
//!
//! ```
//! use heatercooler_bridge::event::{BridgeEvent, EventBus};
//! use heatercooler_bridge::types::EntityId;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(BridgeEvent::accessory_created(
//!     EntityId::new("climate.study").unwrap(),
//!     Vec::new(),
//! ));
//! ```

mod bridge_event;
mod event_bus;

pub use bridge_event::BridgeEvent;
pub use event_bus::{DEFAULT_EVENT_CAPACITY, EventBus};
