#![forbid(unsafe_code)]

//! Merging unit lists from several properties into one canonical set.
//!
//! # Merge policy
//!
//! Inputs are visited in concatenation order. When an id repeats, the later
//! record replaces the earlier one **in place**: the unit keeps the position
//! of its first appearance but carries the fields of its last appearance.
//!
//! # Invariants
//!
//! 1. Every id appears exactly once in the output.
//! 2. `dedupe_units([dedupe_units(L)]) == dedupe_units(L)`.
//! 3. The output never contains a record absent from the input.

use ahash::AHashMap;
use tracing::debug;

use crate::unit::{Unit, UnitId};

/// Merge any number of unit lists, last occurrence wins.
#[must_use]
pub fn dedupe_units<I, L>(lists: I) -> Vec<Unit>
where
    I: IntoIterator<Item = L>,
    L: IntoIterator<Item = Unit>,
{
    let mut slots: AHashMap<UnitId, usize> = AHashMap::new();
    let mut merged: Vec<Unit> = Vec::new();
    let mut replaced = 0usize;

    for unit in lists.into_iter().flatten() {
        match slots.get(&unit.id) {
            Some(&idx) => {
                merged[idx] = unit;
                replaced += 1;
            }
            None => {
                slots.insert(unit.id.clone(), merged.len());
                merged.push(unit);
            }
        }
    }

    if replaced > 0 {
        debug!(
            units = merged.len(),
            replaced, "merged duplicate unit ids across lists"
        );
    }
    merged
}

/// Distinct unit types in first-seen order.
///
/// Feeds the "by unit type" bulk scope selector.
#[must_use]
pub fn unit_types(units: &[Unit]) -> Vec<String> {
    let mut seen = ahash::AHashSet::new();
    units
        .iter()
        .filter(|u| seen.insert(u.unit_type.as_str()))
        .map(|u| u.unit_type.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(units: &[Unit]) -> Vec<&str> {
        units.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn single_list_without_duplicates_is_unchanged() {
        let list = vec![
            Unit::new("a", "1", "1BR", 900.0),
            Unit::new("b", "2", "2BR", 1200.0),
        ];
        let merged = dedupe_units([list.clone()]);
        assert_eq!(merged, list);
    }

    #[test]
    fn later_record_wins_and_keeps_first_position() {
        let first = vec![
            Unit::new("a", "1", "1BR", 900.0),
            Unit::new("b", "2", "2BR", 1200.0),
        ];
        let second = vec![
            Unit::new("c", "3", "1BR", 950.0),
            Unit::new("a", "1", "1BR", 910.0).with_property("Oak"),
        ];
        let merged = dedupe_units([first, second]);

        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
        assert_eq!(merged[0].current_rent_value(), 910.0);
        assert_eq!(merged[0].property_name.as_deref(), Some("Oak"));
    }

    #[test]
    fn duplicates_within_one_list_collapse() {
        let list = vec![
            Unit::new("a", "1", "1BR", 1.0),
            Unit::new("a", "1", "1BR", 2.0),
            Unit::new("a", "1", "1BR", 3.0),
        ];
        let merged = dedupe_units([list]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].current_rent_value(), 3.0);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let merged = dedupe_units(Vec::<Vec<Unit>>::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn unit_types_first_seen_order() {
        let units = vec![
            Unit::new("a", "1", "2BR", 1.0),
            Unit::new("b", "2", "Studio", 1.0),
            Unit::new("c", "3", "2BR", 1.0),
            Unit::new("d", "4", "1BR", 1.0),
        ];
        assert_eq!(unit_types(&units), vec!["2BR", "Studio", "1BR"]);
    }
}
