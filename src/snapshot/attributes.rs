// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for the host's climate attribute map.

use serde::{Deserialize, Deserializer};

use crate::capabilities::ClimateFeatures;
use crate::error::ParseError;
use crate::types::{HvacAction, HvacMode};

use super::Setpoint;

/// Default lower temperature bound when the device declares none.
pub(crate) const DEFAULT_MIN_TEMP: f64 = 7.0;

/// Default upper temperature bound when the device declares none.
pub(crate) const DEFAULT_MAX_TEMP: f64 = 35.0;

/// Default temperature step when the device declares none.
pub(crate) const DEFAULT_TEMP_STEP: f64 = 1.0;

/// Raw climate attributes as published by the host.
///
/// Every field is optional: hosts only publish what the integration behind
/// the device provides. `target_temp_high`/`target_temp_low` distinguish a
/// missing key from a key holding `null`, because the key alone marks a
/// dual-setpoint device.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::snapshot::ClimateAttributes;
///
/// let json = r#"{"hvac_modes":["off","cool"],"temperature":24,"fan_modes":["Low","High"]}"#;
/// let attrs: ClimateAttributes = serde_json::from_str(json).unwrap();
/// assert_eq!(attrs.fan_modes(), ["Low", "High"]);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClimateAttributes {
    #[serde(default)]
    hvac_modes: Vec<String>,

    #[serde(default)]
    hvac_action: Option<HvacAction>,

    #[serde(default)]
    current_temperature: Option<f64>,

    #[serde(default)]
    temperature: Option<f64>,

    #[serde(default, deserialize_with = "present")]
    target_temp_high: Option<Option<f64>>,

    #[serde(default, deserialize_with = "present")]
    target_temp_low: Option<Option<f64>>,

    #[serde(default)]
    fan_mode: Option<String>,

    #[serde(default)]
    fan_modes: Option<Vec<String>>,

    #[serde(default)]
    swing_mode: Option<String>,

    #[serde(default)]
    swing_modes: Option<Vec<String>>,

    #[serde(default)]
    min_temp: Option<f64>,

    #[serde(default)]
    max_temp: Option<f64>,

    #[serde(default)]
    target_temp_step: Option<f64>,

    #[serde(default)]
    temperature_step: Option<f64>,

    #[serde(default)]
    supported_features: ClimateFeatures,
}

/// Wraps a present key in `Some`, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ClimateAttributes {
    /// Parses attributes from a JSON attribute map.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if an attribute has the wrong JSON type.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ParseError> {
        Ok(Self::deserialize(value)?)
    }

    /// Returns the declared modes, skipping labels that are not HVAC modes.
    #[must_use]
    pub fn hvac_modes(&self) -> Vec<HvacMode> {
        self.hvac_modes
            .iter()
            .filter_map(|label| label.parse().ok())
            .collect()
    }

    /// Returns the reported action, if any.
    #[must_use]
    pub fn hvac_action(&self) -> Option<HvacAction> {
        self.hvac_action
    }

    /// Returns the measured temperature.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.current_temperature
    }

    /// Returns the setpoint representation implied by the attributes.
    #[must_use]
    pub fn setpoint(&self) -> Setpoint {
        let has_range_keys = self.target_temp_high.is_some() || self.target_temp_low.is_some();
        if has_range_keys || self.supported_features.supports_target_temperature_range() {
            Setpoint::Dual {
                high: self.target_temp_high.flatten(),
                low: self.target_temp_low.flatten(),
                target: self.temperature,
            }
        } else {
            Setpoint::Single(self.temperature)
        }
    }

    /// Returns the current fan-mode label.
    #[must_use]
    pub fn fan_mode(&self) -> Option<&str> {
        self.fan_mode.as_deref()
    }

    /// Returns the available fan-mode labels.
    #[must_use]
    pub fn fan_modes(&self) -> &[String] {
        self.fan_modes.as_deref().unwrap_or_default()
    }

    /// Returns the current swing-mode label.
    #[must_use]
    pub fn swing_mode(&self) -> Option<&str> {
        self.swing_mode.as_deref()
    }

    /// Returns the available swing-mode labels.
    #[must_use]
    pub fn swing_modes(&self) -> &[String] {
        self.swing_modes.as_deref().unwrap_or_default()
    }

    /// Returns the lower temperature bound, in device units.
    #[must_use]
    pub fn min_temp(&self) -> f64 {
        self.min_temp.unwrap_or(DEFAULT_MIN_TEMP)
    }

    /// Returns the upper temperature bound, in device units.
    #[must_use]
    pub fn max_temp(&self) -> f64 {
        self.max_temp.unwrap_or(DEFAULT_MAX_TEMP)
    }

    /// Returns the temperature step, in device units.
    ///
    /// `target_temp_step` wins over the older `temperature_step` key.
    #[must_use]
    pub fn temp_step(&self) -> f64 {
        [self.target_temp_step, self.temperature_step]
            .into_iter()
            .flatten()
            .find(|step| step.is_finite() && *step > 0.0)
            .unwrap_or(DEFAULT_TEMP_STEP)
    }

    /// Returns the supported-feature bitset.
    #[must_use]
    pub fn supported_features(&self) -> ClimateFeatures {
        self.supported_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_setpoint_device() {
        let json = r#"{
            "hvac_modes": ["off", "heat", "cool", "auto", "eco"],
            "current_temperature": 22.5,
            "temperature": 24,
            "min_temp": 16,
            "max_temp": 30,
            "target_temp_step": 0.5,
            "supported_features": 41
        }"#;
        let attrs: ClimateAttributes = serde_json::from_str(json).unwrap();

        assert_eq!(
            attrs.hvac_modes(),
            vec![HvacMode::Off, HvacMode::Heat, HvacMode::Cool, HvacMode::Auto]
        );
        assert_eq!(attrs.current_temperature(), Some(22.5));
        assert_eq!(attrs.setpoint(), Setpoint::Single(Some(24.0)));
        assert!((attrs.min_temp() - 16.0).abs() < f64::EPSILON);
        assert!((attrs.temp_step() - 0.5).abs() < f64::EPSILON);
        assert!(attrs.supported_features().supports_fan_mode());
    }

    #[test]
    fn range_key_with_null_marks_dual_setpoint() {
        let json = r#"{"target_temp_high": null, "target_temp_low": 19.5}"#;
        let attrs: ClimateAttributes = serde_json::from_str(json).unwrap();

        assert_eq!(
            attrs.setpoint(),
            Setpoint::Dual {
                high: None,
                low: Some(19.5),
                target: None,
            }
        );
    }

    #[test]
    fn range_feature_marks_dual_setpoint() {
        let json = r#"{"temperature": 21, "supported_features": 2}"#;
        let attrs: ClimateAttributes = serde_json::from_str(json).unwrap();

        assert!(attrs.setpoint().is_dual());
    }

    #[test]
    fn defaults_for_missing_bounds() {
        let attrs: ClimateAttributes = serde_json::from_str("{}").unwrap();

        assert!((attrs.min_temp() - DEFAULT_MIN_TEMP).abs() < f64::EPSILON);
        assert!((attrs.max_temp() - DEFAULT_MAX_TEMP).abs() < f64::EPSILON);
        assert!((attrs.temp_step() - DEFAULT_TEMP_STEP).abs() < f64::EPSILON);
        assert!(attrs.fan_modes().is_empty());
        assert_eq!(attrs.setpoint(), Setpoint::Single(None));
    }

    #[test]
    fn legacy_step_key_accepted() {
        let attrs: ClimateAttributes =
            serde_json::from_str(r#"{"temperature_step": 0.5}"#).unwrap();
        assert!((attrs.temp_step() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn both_step_keys_prefer_current_one() {
        let attrs: ClimateAttributes =
            serde_json::from_str(r#"{"target_temp_step": 0.5, "temperature_step": 1.0}"#)
                .unwrap();
        assert!((attrs.temp_step() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn non_positive_step_falls_back() {
        let attrs: ClimateAttributes =
            serde_json::from_str(r#"{"target_temp_step": 0}"#).unwrap();
        assert!((attrs.temp_step() - DEFAULT_TEMP_STEP).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_action_label_preserved_as_unrecognized() {
        let attrs: ClimateAttributes =
            serde_json::from_str(r#"{"hvac_action": "sleeping"}"#).unwrap();
        assert_eq!(attrs.hvac_action(), Some(HvacAction::Unrecognized));
    }
}
