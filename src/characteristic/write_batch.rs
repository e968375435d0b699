// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batched characteristic writes.

use std::collections::BTreeMap;

use super::{CharValue, Characteristic};

/// The characteristic values one client request writes together.
///
/// A later write to the same characteristic replaces the earlier one.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::characteristic::{Characteristic, WriteBatch};
///
/// let batch = WriteBatch::new()
///     .with(Characteristic::Active, 1)
///     .with(Characteristic::TargetHeaterCoolerState, 2);
///
/// assert_eq!(batch.len(), 2);
/// assert!(batch.contains(Characteristic::Active));
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct WriteBatch {
    writes: BTreeMap<Characteristic, CharValue>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            writes: BTreeMap::new(),
        }
    }

    /// Adds a write.
    #[must_use]
    pub fn with(mut self, characteristic: Characteristic, value: impl Into<CharValue>) -> Self {
        self.insert(characteristic, value);
        self
    }

    /// Adds a write in place.
    pub fn insert(&mut self, characteristic: Characteristic, value: impl Into<CharValue>) {
        self.writes.insert(characteristic, value.into());
    }

    /// Returns the value written to `characteristic`.
    #[must_use]
    pub fn get(&self, characteristic: Characteristic) -> Option<&CharValue> {
        self.writes.get(&characteristic)
    }

    /// Returns `true` if the batch writes `characteristic`.
    #[must_use]
    pub fn contains(&self, characteristic: Characteristic) -> bool {
        self.writes.contains_key(&characteristic)
    }

    /// Returns the number of writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns `true` if the batch writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Iterates over the writes.
    pub fn iter(&self) -> impl Iterator<Item = (Characteristic, &CharValue)> {
        self.writes.iter().map(|(c, v)| (*c, v))
    }
}

impl FromIterator<(Characteristic, CharValue)> for WriteBatch {
    fn from_iter<I: IntoIterator<Item = (Characteristic, CharValue)>>(iter: I) -> Self {
        Self {
            writes: iter.into_iter().collect(),
        }
    }
}
