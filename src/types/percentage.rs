// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordinal interpolation between ordered lists and 0-100 percentages.
//!
//! A list of `n` items splits the percentage range into `n` equal buckets.
//! Item `i` (zero-based) owns the bucket whose upper bound is
//! `(i + 1) * 100 / n`, and projects to exactly that upper bound.

/// Returns the percentage of the bucket owned by `item`.
///
/// Returns `None` if `item` is not in the list.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::types::percentage::ordered_item_to_percentage;
///
/// let speeds = ["low", "medium", "high"];
/// assert_eq!(ordered_item_to_percentage(&speeds, &"low"), Some(33));
/// assert_eq!(ordered_item_to_percentage(&speeds, &"high"), Some(100));
/// ```
#[must_use]
pub fn ordered_item_to_percentage<T: PartialEq>(items: &[T], item: &T) -> Option<u8> {
    let position = items.iter().position(|candidate| candidate == item)?;
    Some(bucket_upper_bound(position, items.len()))
}

/// Returns the item whose bucket contains `percentage`.
///
/// Percentages above 100 select the last item. Returns `None` for an empty
/// list.
///
/// # Examples
///
/// ```
/// use heatercooler_bridge::types::percentage::percentage_to_ordered_item;
///
/// let speeds = ["auto", "low", "medium", "high"];
/// assert_eq!(percentage_to_ordered_item(&speeds, 60.0), Some(&"medium"));
/// assert_eq!(percentage_to_ordered_item(&speeds, 25.0), Some(&"auto"));
/// ```
#[must_use]
pub fn percentage_to_ordered_item<T>(items: &[T], percentage: f64) -> Option<&T> {
    let len = items.len();
    items
        .iter()
        .enumerate()
        .find(|(position, _)| percentage <= f64::from(bucket_upper_bound(*position, len)))
        .map(|(_, item)| item)
        .or_else(|| items.last())
}

/// Upper bound of the bucket at `position` in a list of `len` items.
fn bucket_upper_bound(position: usize, len: usize) -> u8 {
    // position < len, so the quotient never exceeds 100
    #[allow(clippy::cast_possible_truncation)]
    let bound = ((position + 1) * 100 / len) as u8;
    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEEDS: [&str; 4] = ["auto", "low", "medium", "high"];

    #[test]
    fn item_to_percentage_uses_bucket_upper_bound() {
        assert_eq!(ordered_item_to_percentage(&SPEEDS, &"auto"), Some(25));
        assert_eq!(ordered_item_to_percentage(&SPEEDS, &"low"), Some(50));
        assert_eq!(ordered_item_to_percentage(&SPEEDS, &"medium"), Some(75));
        assert_eq!(ordered_item_to_percentage(&SPEEDS, &"high"), Some(100));
        assert_eq!(ordered_item_to_percentage(&SPEEDS, &"turbo"), None);
    }

    #[test]
    fn percentage_to_item_selects_containing_bucket() {
        assert_eq!(percentage_to_ordered_item(&SPEEDS, 1.0), Some(&"auto"));
        assert_eq!(percentage_to_ordered_item(&SPEEDS, 50.0), Some(&"low"));
        assert_eq!(percentage_to_ordered_item(&SPEEDS, 50.5), Some(&"medium"));
        assert_eq!(percentage_to_ordered_item(&SPEEDS, 60.0), Some(&"medium"));
        assert_eq!(percentage_to_ordered_item(&SPEEDS, 100.0), Some(&"high"));
        assert_eq!(percentage_to_ordered_item(&SPEEDS, 150.0), Some(&"high"));
    }

    #[test]
    fn empty_list_has_no_item() {
        let empty: [&str; 0] = [];
        assert_eq!(percentage_to_ordered_item(&empty, 50.0), None);
    }

    #[test]
    fn round_trip_stays_within_one_step() {
        for len in 1..=9 {
            let items: Vec<usize> = (0..len).collect();
            let step = 100.0 / f64::from(u32::try_from(len).unwrap());
            for p in 1..=100_u8 {
                let item = percentage_to_ordered_item(&items, f64::from(p)).unwrap();
                let back = ordered_item_to_percentage(&items, item).unwrap();
                let diff = (f64::from(back) - f64::from(p)).abs();
                assert!(diff <= step, "len={len} p={p} back={back}");
            }
        }
    }
}
