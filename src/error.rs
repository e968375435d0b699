// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the HeaterCooler bridge.
//!
//! Translation itself never fails: indeterminate state and unmapped values
//! degrade to no-ops. Errors only surface at the collaborator boundary, when
//! loosely-typed host state is parsed into a [`DeviceSnapshot`], and as the
//! result of issuing a command to the host.
//!
//! [`DeviceSnapshot`]: crate::snapshot::DeviceSnapshot

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while parsing host state.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The host rejected a command.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// The entity has no state in the host registry.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// The entity is not eligible for a HeaterCooler accessory.
    #[error("entity {0} is not bridged as a HeaterCooler")]
    NotBridged(String),
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An unrecognized HVAC mode label.
    #[error("invalid hvac mode: {0}")]
    InvalidHvacMode(String),

    /// An unrecognized HVAC action label.
    #[error("invalid hvac action: {0}")]
    InvalidHvacAction(String),

    /// An unrecognized characteristic name.
    #[error("unknown characteristic: {0}")]
    UnknownCharacteristic(String),

    /// An unrecognized temperature unit.
    #[error("invalid temperature unit: {0}")]
    InvalidTemperatureUnit(String),

    /// An entity identifier without a `domain.object` shape.
    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),

    /// A protocol enumeration value outside its defined range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },
}

/// Errors related to parsing host state.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result kinds reported by the host when a command is not carried out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The device does not offer the requested command.
    #[error("command not found")]
    NotFound,

    /// The device rejected the command parameters.
    #[error("validation rejected: {0}")]
    ValidationRejected(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
