// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strongly-typed climate device snapshot.

use crate::capabilities::ClimateFeatures;
use crate::error::ParseError;
use crate::types::{EntityId, EntityState, HvacAction, HvacMode, TemperatureUnit};

use super::ClimateAttributes;
use super::attributes::{DEFAULT_MAX_TEMP, DEFAULT_MIN_TEMP, DEFAULT_TEMP_STEP};

/// How a device expresses its target temperature.
///
/// A device uses exactly one representation for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setpoint {
    /// One target temperature.
    Single(Option<f64>),
    /// Independent upper and lower targets.
    Dual {
        /// Upper target (cool above it).
        high: Option<f64>,
        /// Lower target (heat below it).
        low: Option<f64>,
        /// Single target some range devices also report outside their
        /// automatic modes.
        target: Option<f64>,
    },
}

impl Setpoint {
    /// Returns `true` for a high/low setpoint pair.
    #[must_use]
    pub const fn is_dual(&self) -> bool {
        matches!(self, Self::Dual { .. })
    }

    /// Returns the first present of the single target, high and low.
    #[must_use]
    pub fn reference(&self) -> Option<f64> {
        match *self {
            Self::Single(target) => target,
            Self::Dual { high, low, target } => target.or(high).or(low),
        }
    }
}

impl Default for Setpoint {
    fn default() -> Self {
        Self::Single(None)
    }
}

/// Point-in-time view of a climate device's state and capabilities.
///
/// Snapshots are produced once at the host boundary, either with
/// [`DeviceSnapshot::from_state`] from the host's state string and attribute
/// map, or directly with the builder methods.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::snapshot::{DeviceSnapshot, Setpoint};
/// use heatercooler_bridge::types::{EntityId, HvacMode, TemperatureUnit};
///
/// let attributes = serde_json::json!({
///     "hvac_modes": ["off", "cool", "heat"],
///     "current_temperature": 26.0,
///     "temperature": 24.0,
/// });
/// let snapshot = DeviceSnapshot::from_state(
///     EntityId::new("climate.office").unwrap(),
///     "cool",
///     &attributes,
///     TemperatureUnit::Celsius,
/// )
/// .unwrap();
///
/// assert_eq!(snapshot.state.mode(), Some(HvacMode::Cool));
/// assert_eq!(snapshot.setpoint, Setpoint::Single(Some(24.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    /// Identifier in the host registry.
    pub entity_id: EntityId,
    /// Current mode, or why it is not known.
    pub state: EntityState,
    /// Modes the device declares.
    pub hvac_modes: Vec<HvacMode>,
    /// Reported activity, if the device reports one.
    pub hvac_action: Option<HvacAction>,
    /// Measured temperature, in device units.
    pub current_temperature: Option<f64>,
    /// Target temperature(s), in device units.
    pub setpoint: Setpoint,
    /// Supported-feature bitset.
    pub features: ClimateFeatures,
    /// Current fan-mode label.
    pub fan_mode: Option<String>,
    /// Available fan-mode labels.
    pub fan_modes: Vec<String>,
    /// Current swing-mode label.
    pub swing_mode: Option<String>,
    /// Available swing-mode labels, in device order.
    pub swing_modes: Vec<String>,
    /// Lower temperature bound, in device units.
    pub min_temp: f64,
    /// Upper temperature bound, in device units.
    pub max_temp: f64,
    /// Temperature step, in device units.
    pub temp_step: f64,
    /// Unit of every temperature in this snapshot.
    pub unit: TemperatureUnit,
}

impl DeviceSnapshot {
    /// Creates a snapshot with no attributes.
    #[must_use]
    pub fn new(entity_id: EntityId, state: impl Into<EntityState>) -> Self {
        Self {
            entity_id,
            state: state.into(),
            hvac_modes: Vec::new(),
            hvac_action: None,
            current_temperature: None,
            setpoint: Setpoint::default(),
            features: ClimateFeatures::empty(),
            fan_mode: None,
            fan_modes: Vec::new(),
            swing_mode: None,
            swing_modes: Vec::new(),
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            temp_step: DEFAULT_TEMP_STEP,
            unit: TemperatureUnit::Celsius,
        }
    }

    /// Parses a snapshot from the host's state string and attribute map.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if an attribute has the wrong JSON type.
    pub fn from_state(
        entity_id: EntityId,
        state: &str,
        attributes: &serde_json::Value,
        unit: TemperatureUnit,
    ) -> Result<Self, ParseError> {
        let attrs = ClimateAttributes::from_value(attributes)?;
        Ok(Self::from_attributes(entity_id, EntityState::parse(state), &attrs, unit))
    }

    /// Builds a snapshot from already-parsed attributes.
    #[must_use]
    pub fn from_attributes(
        entity_id: EntityId,
        state: EntityState,
        attrs: &ClimateAttributes,
        unit: TemperatureUnit,
    ) -> Self {
        Self {
            entity_id,
            state,
            hvac_modes: attrs.hvac_modes(),
            hvac_action: attrs.hvac_action(),
            current_temperature: attrs.current_temperature(),
            setpoint: attrs.setpoint(),
            features: attrs.supported_features(),
            fan_mode: attrs.fan_mode().map(str::to_string),
            fan_modes: attrs.fan_modes().to_vec(),
            swing_mode: attrs.swing_mode().map(str::to_string),
            swing_modes: attrs.swing_modes().to_vec(),
            min_temp: attrs.min_temp(),
            max_temp: attrs.max_temp(),
            temp_step: attrs.temp_step(),
            unit,
        }
    }

    /// Sets the declared modes.
    #[must_use]
    pub fn with_hvac_modes(mut self, modes: impl IntoIterator<Item = HvacMode>) -> Self {
        self.hvac_modes = modes.into_iter().collect();
        self
    }

    /// Sets the reported action.
    #[must_use]
    pub fn with_action(mut self, action: HvacAction) -> Self {
        self.hvac_action = Some(action);
        self
    }

    /// Sets the measured temperature.
    #[must_use]
    pub fn with_current_temperature(mut self, value: f64) -> Self {
        self.current_temperature = Some(value);
        self
    }

    /// Uses a single setpoint.
    #[must_use]
    pub fn with_target(mut self, value: f64) -> Self {
        self.setpoint = Setpoint::Single(Some(value));
        self
    }

    /// Uses a high/low setpoint pair.
    #[must_use]
    pub fn with_range(mut self, high: Option<f64>, low: Option<f64>) -> Self {
        self.setpoint = Setpoint::Dual {
            high,
            low,
            target: None,
        };
        self
    }

    /// Sets the feature bitset.
    #[must_use]
    pub fn with_features(mut self, features: ClimateFeatures) -> Self {
        self.features = features;
        self
    }

    /// Sets the available fan modes and the current one.
    #[must_use]
    pub fn with_fan_modes<S: Into<String>>(
        mut self,
        modes: impl IntoIterator<Item = S>,
        current: Option<&str>,
    ) -> Self {
        self.fan_modes = modes.into_iter().map(Into::into).collect();
        self.fan_mode = current.map(str::to_string);
        self
    }

    /// Sets the available swing modes and the current one.
    #[must_use]
    pub fn with_swing_modes<S: Into<String>>(
        mut self,
        modes: impl IntoIterator<Item = S>,
        current: Option<&str>,
    ) -> Self {
        self.swing_modes = modes.into_iter().map(Into::into).collect();
        self.swing_mode = current.map(str::to_string);
        self
    }

    /// Sets the temperature bounds and step.
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min_temp = min;
        self.max_temp = max;
        self.temp_step = step;
        self
    }

    /// Sets the temperature unit.
    #[must_use]
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Returns `true` if the device declares `mode` or is currently in it.
    #[must_use]
    pub fn offers_mode(&self, mode: HvacMode) -> bool {
        self.hvac_modes.contains(&mode) || self.state.mode() == Some(mode)
    }

    /// Returns `true` if this device can be exposed as a HeaterCooler.
    ///
    /// The device must support fan or swing control and declare at least
    /// one fan or swing label.
    #[must_use]
    pub fn supports_heatercooler(&self) -> bool {
        let fan_or_swing =
            self.features.supports_fan_mode() || self.features.supports_swing_mode();
        let has_labels = !self.fan_modes.is_empty() || !self.swing_modes.is_empty();
        fan_or_swing && has_labels
    }
}
