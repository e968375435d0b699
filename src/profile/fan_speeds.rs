// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-mode labels ordered as speeds.

use std::collections::HashMap;

use crate::types::percentage::{ordered_item_to_percentage, percentage_to_ordered_item};

/// Fan-mode keys from slowest to fastest.
pub const CANONICAL_FAN_SPEEDS: [&str; 9] = [
    "auto",
    "low",
    "low/auto",
    "mid",
    "middle",
    "mid/auto",
    "medium",
    "high",
    "high/auto",
];

/// A device's fan modes, ordered for percentage interpolation.
///
/// Labels are matched case-insensitively through lowercase keys, and
/// commands always use the device's original spelling.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::profile::FanSpeedTable;
///
/// let labels = ["High", "Low", "Auto", "Medium"].map(String::from);
/// let table = FanSpeedTable::from_labels(&labels).unwrap();
///
/// assert_eq!(table.keys(), ["auto", "low", "medium", "high"]);
/// assert_eq!(table.label_for_percentage(60.0), Some("Medium"));
/// assert_eq!(table.percentage_for_label("Low"), Some(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanSpeedTable {
    ordered: Vec<String>,
    labels: HashMap<String, String>,
}

impl FanSpeedTable {
    /// Builds the table from a device's fan-mode labels.
    ///
    /// Keys are ordered by [`CANONICAL_FAN_SPEEDS`]. When no label is a known
    /// speed, the device's own order is kept. Returns `None` for no labels.
    #[must_use]
    pub fn from_labels(labels: &[String]) -> Option<Self> {
        let mut device_order: Vec<String> = Vec::new();
        let mut by_key = HashMap::new();
        for label in labels {
            let key = label.to_lowercase();
            if !by_key.contains_key(&key) {
                device_order.push(key.clone());
            }
            // A later label with the same key replaces the earlier one
            by_key.insert(key, label.clone());
        }

        let canonical: Vec<String> = CANONICAL_FAN_SPEEDS
            .iter()
            .filter(|key| by_key.contains_key(**key))
            .map(|key| (*key).to_string())
            .collect();
        let ordered = if canonical.is_empty() {
            device_order
        } else {
            canonical
        };

        if ordered.is_empty() {
            return None;
        }
        Some(Self {
            ordered,
            labels: by_key,
        })
    }

    /// Returns the ordered keys.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.ordered
    }

    /// Returns the number of speeds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if the table has no speeds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns the percentage width of one speed.
    #[must_use]
    pub fn step(&self) -> f64 {
        // Tables hold a handful of labels
        #[allow(clippy::cast_precision_loss)]
        let len = self.ordered.len() as f64;
        100.0 / len
    }

    /// Returns the device label for a key.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Returns the percentage for the device's current fan-mode label.
    ///
    /// The label must match the device spelling exactly. Returns `None` for
    /// labels that are not in the ordered table.
    #[must_use]
    pub fn percentage_for_label(&self, label: &str) -> Option<u8> {
        let key = self
            .ordered
            .iter()
            .find(|key| self.label(key) == Some(label))?;
        ordered_item_to_percentage(&self.ordered, key)
    }

    /// Returns the device label for a percentage.
    ///
    /// Returns `None` unless the percentage is in `(0, 100]`.
    #[must_use]
    pub fn label_for_percentage(&self, percentage: f64) -> Option<&str> {
        if !(percentage > 0.0 && percentage <= 100.0) {
            return None;
        }
        let key = percentage_to_ordered_item(&self.ordered, percentage)?;
        self.label(key)
    }
}
