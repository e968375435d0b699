// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity identifier type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Identifier of an entity in the host registry, such as `climate.bedroom`.
///
/// This is a distinct type so entity identifiers are not confused with
/// labels, service names or other strings.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::types::EntityId;
///
/// let id: EntityId = "climate.bedroom".parse().unwrap();
/// assert_eq!(id.domain(), "climate");
/// assert_eq!(id.object_id(), "bedroom");
/// ```
#[derive(
    Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Domain of the climate entities this bridge exposes.
    pub const CLIMATE_DOMAIN: &'static str = "climate";

    /// Creates an entity identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidEntityId` unless the identifier has the
    /// shape `domain.object_id` with both parts non-empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        match id.split_once('.') {
            Some((domain, object)) if !domain.is_empty() && !object.is_empty() => Ok(Self(id)),
            _ => Err(ValueError::InvalidEntityId(id)),
        }
    }

    /// Returns the domain part (before the first dot).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('.').map_or("", |(domain, _)| domain)
    }

    /// Returns the object part (after the first dot).
    #[must_use]
    pub fn object_id(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, object)| object)
    }

    /// Returns `true` for entities of the climate domain.
    #[must_use]
    pub fn is_climate(&self) -> bool {
        self.domain() == Self::CLIMATE_DOMAIN
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
