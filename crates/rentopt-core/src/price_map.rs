#![forbid(unsafe_code)]

//! Proposed price per unit.
//!
//! A [`PriceMap`] is one complete snapshot of proposed prices. It is backed
//! by [`im::OrdMap`], so cloning a map to derive the next snapshot shares
//! structure with the previous one and iteration order is deterministic
//! (sorted by [`UnitId`]).
//!
//! # Invariants
//!
//! After [`PriceMap::initialize`], the key set equals the id set of the
//! units it was built from. [`PriceMap::set`] only overwrites existing keys,
//! so the key set never drifts afterwards.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::unit::{Unit, UnitId};

/// Mapping from unit id to proposed rent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceMap {
    prices: OrdMap<UnitId, f64>,
}

impl PriceMap {
    /// Seed one entry per unit from its baseline price
    /// (recommendation, else current rent, else `0`).
    #[must_use]
    pub fn initialize(units: &[Unit]) -> Self {
        let prices = units
            .iter()
            .map(|u| (u.id.clone(), u.baseline_price()))
            .collect();
        Self { prices }
    }

    /// Proposed price for a unit.
    #[must_use]
    pub fn get(&self, id: &UnitId) -> Option<f64> {
        self.prices.get(id).copied()
    }

    /// Overwrite the proposed price of a known unit.
    ///
    /// Returns `false` (and leaves the map untouched) for unknown ids.
    pub fn set(&mut self, id: &UnitId, price: f64) -> bool {
        match self.prices.get_mut(id) {
            Some(slot) => {
                *slot = price;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, id: &UnitId) -> bool {
        self.prices.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, f64)> {
        self.prices.iter().map(|(id, price)| (id, *price))
    }
}
