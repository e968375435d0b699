// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Swing-mode labels mapped to the protocol's on/off switch.

/// Lowercased labels that mean "swinging".
pub const SWING_ON_LABELS: [&str; 4] = ["on", "both", "horizontal", "vertical"];

/// Lowercased labels that mean "not swinging".
pub const SWING_OFF_LABELS: [&str; 3] = ["off", "false", "0"];

/// Returns `true` if a device swing label means the louvres move.
#[must_use]
pub fn is_swing_on(label: &str) -> bool {
    SWING_ON_LABELS.contains(&label.to_lowercase().as_str())
}

/// A device's swing modes and the labels chosen for on and off.
///
/// When the device has no recognizable label for a state, the first listed
/// label stands in for it, even if it means the opposite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwingTable {
    labels: Vec<String>,
    on_label: String,
    off_label: String,
}

impl SwingTable {
    /// Builds the table from a device's swing-mode labels.
    ///
    /// Returns `None` for no labels.
    #[must_use]
    pub fn from_labels(labels: &[String]) -> Option<Self> {
        let first = labels.first()?;
        let pick = |set: &[&str]| {
            labels
                .iter()
                .find(|label| set.contains(&label.to_lowercase().as_str()))
                .unwrap_or(first)
                .clone()
        };
        Some(Self {
            on_label: pick(&SWING_ON_LABELS),
            off_label: pick(&SWING_OFF_LABELS),
            labels: labels.to_vec(),
        })
    }

    /// Returns the device labels, in device order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the label that enables swing.
    #[must_use]
    pub fn on_label(&self) -> &str {
        &self.on_label
    }

    /// Returns the label that disables swing.
    #[must_use]
    pub fn off_label(&self) -> &str {
        &self.off_label
    }

    /// Returns the label to select for a switch position.
    #[must_use]
    pub fn label_for(&self, enabled: bool) -> &str {
        if enabled {
            &self.on_label
        } else {
            &self.off_label
        }
    }
}
