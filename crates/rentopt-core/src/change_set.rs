#![forbid(unsafe_code)]

//! Changed units, ready for the apply and export collaborators.
//!
//! A [`ChangeSet`] lists every unit whose proposed price differs from its
//! current rent, in unit order. The persistence collaborator submits
//! [`ChangeSet::updates`] as one batch; the spreadsheet export renders the
//! rows directly.

use serde::Serialize;

use crate::price_map::PriceMap;
use crate::unit::{Unit, UnitId};

/// One changed unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub unit_id: UnitId,
    pub unit_number: String,
    pub unit_type: String,
    pub property_name: Option<String>,
    pub current_rent: f64,
    pub proposed_rent: f64,
    pub monthly_delta: f64,
    /// Change relative to current rent; `None` when current rent is `0`.
    pub percent_change: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    changes: Vec<PriceChange>,
}

impl ChangeSet {
    /// Collect the units whose proposed price differs from current rent.
    #[must_use]
    pub fn between(units: &[Unit], prices: &PriceMap) -> Self {
        let changes = units
            .iter()
            .filter_map(|unit| {
                let current = unit.current_rent_value();
                let proposed = prices.get(&unit.id)?;
                let delta = proposed - current;
                (delta != 0.0).then(|| PriceChange {
                    unit_id: unit.id.clone(),
                    unit_number: unit.unit_number.clone(),
                    unit_type: unit.unit_type.clone(),
                    property_name: unit.property_name.clone(),
                    current_rent: current,
                    proposed_rent: proposed,
                    monthly_delta: delta,
                    percent_change: (current != 0.0).then(|| delta / current * 100.0),
                })
            })
            .collect();
        Self { changes }
    }

    #[must_use]
    pub fn changes(&self) -> &[PriceChange] {
        &self.changes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// `(unit id, new rent)` pairs for a batch update.
    pub fn updates(&self) -> impl Iterator<Item = (&UnitId, f64)> {
        self.changes.iter().map(|c| (&c.unit_id, c.proposed_rent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_changed_units_are_listed() {
        let units = vec![
            Unit::new("a", "101", "1BR", 1000.0).with_recommended(1050.0),
            Unit::new("b", "102", "1BR", 800.0),
            Unit::new("c", "103", "2BR", 0.0).with_recommended(700.0),
        ];
        let prices = PriceMap::initialize(&units);
        let set = ChangeSet::between(&units, &prices);

        assert_eq!(set.len(), 2);
        let first = &set.changes()[0];
        assert_eq!(first.unit_number, "101");
        assert_eq!(first.monthly_delta, 50.0);
        assert_eq!(first.percent_change, Some(5.0));
        assert_eq!(set.changes()[1].percent_change, None);

        let updates: Vec<(&str, f64)> = set.updates().map(|(id, p)| (id.as_str(), p)).collect();
        assert_eq!(updates, vec![("a", 1050.0), ("c", 700.0)]);
    }

    #[test]
    fn no_changes_is_empty() {
        let units = vec![Unit::new("a", "101", "1BR", 1000.0)];
        let set = ChangeSet::between(&units, &PriceMap::initialize(&units));
        assert!(set.is_empty());
    }

    #[test]
    fn serializes_camel_case_rows() {
        let units = vec![Unit::new("a", "101", "1BR", 1000.0).with_recommended(1100.0)];
        let set = ChangeSet::between(&units, &PriceMap::initialize(&units));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["changes"][0]["proposedRent"], 1100.0);
        assert_eq!(json["changes"][0]["unitId"], "a");
    }
}
