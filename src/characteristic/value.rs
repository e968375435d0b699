// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic values.

use std::fmt;

/// A characteristic value, as held by the service or written by a client.
///
/// Clients are not strict about value types: a boolean may arrive for an
/// integer characteristic, or a number as text. The numeric accessors
/// interpret all of these.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::characteristic::CharValue;
///
/// let value: CharValue = serde_json::from_str("\"60\"").unwrap();
/// assert_eq!(value.as_f64(), Some(60.0));
///
/// assert_eq!(CharValue::Float(1.9).as_i64(), Some(1));
/// assert_eq!(CharValue::Bool(true).as_i64(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CharValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Text.
    Text(String),
}

impl CharValue {
    /// Interprets the value as a number.
    ///
    /// Returns `None` for text that is not a finite number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            // Characteristic integers are small; precision loss is not a concern
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f).filter(|f| f.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }

    /// Interprets the value as an integer, truncating fractions.
    ///
    /// Text must spell an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(i) => Some(*i),
            // Truncation toward zero is the intended conversion
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) => f.is_finite().then(|| f.trunc() as i64),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Interprets the value as a flag: any non-zero number is `true`.
    ///
    /// Values that are not numbers are `false`.
    #[must_use]
    pub fn as_flag(&self) -> bool {
        self.as_f64().is_some_and(|f| f.trunc() != 0.0)
    }
}

impl fmt::Display for CharValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for CharValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CharValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CharValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u8> for CharValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for CharValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CharValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
