// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for device state changes.
//!
//! The bridge subscribes every accessory it creates to its device's state
//! changes through [`ClimateHost::subscribe`](crate::host::ClimateHost::subscribe).
//!
//! # Overview
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`StateCallback`] - The callback type hosts store and invoke
//! - [`StateCallbackRegistry`] - An in-memory registry a host can embed

mod callback;

pub use callback::{StateCallback, StateCallbackRegistry, SubscriptionId};
