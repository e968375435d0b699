// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity selection for the bridge.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;
use crate::types::EntityId;

/// Which climate entities are exposed as HeaterCooler accessories.
///
/// Selection is opt-in: with an empty include list nothing is bridged. The
/// exclude list wins over the include list.
///
/// When parsed, list items that are not entity identifiers are skipped and a
/// list field that is not a list reads as empty, so one bad entry never
/// disables the whole configuration.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::manager::BridgeConfig;
/// use heatercooler_bridge::types::EntityId;
///
/// let yaml = BridgeConfig::from_json(r#"{"include_entities": ["climate.a", "climate.b"]}"#)
///     .unwrap();
/// let ui = BridgeConfig::new().with_exclude(EntityId::new("climate.b").unwrap());
///
/// let config = yaml.merge(ui);
/// assert!(config.should_bridge(&EntityId::new("climate.a").unwrap()));
/// assert!(!config.should_bridge(&EntityId::new("climate.b").unwrap()));
/// assert!(!config.should_bridge(&EntityId::new("climate.c").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Entities to bridge.
    #[serde(default, deserialize_with = "entity_set")]
    pub include_entities: BTreeSet<EntityId>,
    /// Entities never to bridge.
    #[serde(default, deserialize_with = "entity_set")]
    pub exclude_entities: BTreeSet<EntityId>,
}

impl BridgeConfig {
    /// Creates an empty configuration, which bridges nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the input is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds an entity to the include list.
    #[must_use]
    pub fn with_include(mut self, entity_id: EntityId) -> Self {
        self.include_entities.insert(entity_id);
        self
    }

    /// Adds an entity to the exclude list.
    #[must_use]
    pub fn with_exclude(mut self, entity_id: EntityId) -> Self {
        self.exclude_entities.insert(entity_id);
        self
    }

    /// Combines two configuration sources by set union.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.include_entities.extend(other.include_entities);
        self.exclude_entities.extend(other.exclude_entities);
        self
    }

    /// Returns `true` if an entity should be exposed as a HeaterCooler.
    #[must_use]
    pub fn should_bridge(&self, entity_id: &EntityId) -> bool {
        !self.exclude_entities.contains(entity_id) && self.include_entities.contains(entity_id)
    }

    /// Returns the included entities that are not excluded, sorted.
    #[must_use]
    pub fn target_entities(&self) -> Vec<EntityId> {
        self.include_entities
            .difference(&self.exclude_entities)
            .cloned()
            .collect()
    }
}

fn entity_set<'de, D>(deserializer: D) -> Result<BTreeSet<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(BTreeSet::new());
    };
    Ok(items
        .iter()
        .filter_map(serde_json::Value::as_str)
        .filter_map(|item| match EntityId::new(item) {
            Ok(entity_id) => Some(entity_id),
            Err(err) => {
                tracing::warn!(item, error = %err, "Skipping invalid entity in configuration");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> EntityId {
        EntityId::new(s).unwrap()
    }

    #[test]
    fn empty_include_bridges_nothing() {
        let config = BridgeConfig::new().with_exclude(id("climate.other"));
        assert!(!config.should_bridge(&id("climate.lounge")));
    }

    #[test]
    fn exclude_wins() {
        let config = BridgeConfig::new()
            .with_include(id("climate.lounge"))
            .with_exclude(id("climate.lounge"));
        assert!(!config.should_bridge(&id("climate.lounge")));
        assert!(config.target_entities().is_empty());
    }

    #[test]
    fn parse_skips_non_entity_items() {
        let config = BridgeConfig::from_json(
            r#"{"include_entities": ["climate.b", 42, null, "not an id", "climate.a", "climate.b"]}"#,
        )
        .unwrap();
        assert_eq!(config.target_entities(), vec![id("climate.a"), id("climate.b")]);
    }

    #[test]
    fn parse_non_list_reads_as_empty() {
        let config =
            BridgeConfig::from_json(r#"{"include_entities": "climate.a", "exclude_entities": {}}"#)
                .unwrap();
        assert!(config.include_entities.is_empty());
        assert!(config.exclude_entities.is_empty());
    }

    #[test]
    fn parse_missing_fields() {
        assert_eq!(BridgeConfig::from_json("{}").unwrap(), BridgeConfig::new());
        assert!(BridgeConfig::from_json("[]").is_err());
    }

    #[test]
    fn merge_is_union() {
        let merged = BridgeConfig::new()
            .with_include(id("climate.a"))
            .merge(
                BridgeConfig::new()
                    .with_include(id("climate.b"))
                    .with_exclude(id("climate.a")),
            );
        assert_eq!(merged.include_entities.len(), 2);
        assert_eq!(merged.target_entities(), vec![id("climate.b")]);
    }

    #[test]
    fn serializes_as_sorted_lists() {
        let config = BridgeConfig::new()
            .with_include(id("climate.z"))
            .with_include(id("climate.a"));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"include_entities": ["climate.a", "climate.z"], "exclude_entities": []})
        );
    }
}
