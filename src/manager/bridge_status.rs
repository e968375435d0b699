// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::host::ClimateHost;
use crate::types::EntityId;

use super::BridgeConfig;

/// Which selected entities are bridged, and why the others are not.
///
/// Every target entity lands in exactly one of `bridged_entities`,
/// `missing_entities`, `non_climate_entities` and `unsupported_entities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStatus {
    /// `true` when at least one entity is bridged.
    pub bridge_active: bool,
    /// Configured include list, sorted.
    pub include_entities: Vec<EntityId>,
    /// Configured exclude list, sorted.
    pub exclude_entities: Vec<EntityId>,
    /// Included and not excluded, sorted.
    pub target_entities: Vec<EntityId>,
    /// Targets exposed as HeaterCooler.
    pub bridged_entities: Vec<EntityId>,
    /// Number of bridged entities.
    pub bridged_count: usize,
    /// Targets the host has no state for.
    pub missing_entities: Vec<EntityId>,
    /// Targets outside the climate domain.
    pub non_climate_entities: Vec<EntityId>,
    /// Climate targets without fan or swing control.
    pub unsupported_entities: Vec<EntityId>,
    /// When this status was computed.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl BridgeStatus {
    /// Classifies the configuration's target entities against the host.
    #[must_use]
    pub fn compute<H: ClimateHost + ?Sized>(config: &BridgeConfig, host: &H) -> Self {
        let mut status = Self {
            include_entities: config.include_entities.iter().cloned().collect(),
            exclude_entities: config.exclude_entities.iter().cloned().collect(),
            target_entities: config.target_entities(),
            refreshed_at: Some(Utc::now()),
            ..Self::default()
        };

        for entity_id in &status.target_entities {
            let Some(snapshot) = host.snapshot(entity_id) else {
                status.missing_entities.push(entity_id.clone());
                continue;
            };
            if !entity_id.is_climate() {
                status.non_climate_entities.push(entity_id.clone());
            } else if snapshot.supports_heatercooler() {
                status.bridged_entities.push(entity_id.clone());
            } else {
                status.unsupported_entities.push(entity_id.clone());
            }
        }

        status.bridged_count = status.bridged_entities.len();
        status.bridge_active = status.bridged_count > 0;
        status
    }
}
