#![forbid(unsafe_code)]

//! Portfolio impact of a price snapshot.
//!
//! [`ImpactSummary::compute`] is a single O(n) pass comparing each unit's
//! proposed price with its current rent. Units absent from the map count as
//! unchanged.

use serde::Serialize;

use crate::price_map::PriceMap;
use crate::unit::Unit;

/// Derived delta statistics. Never stored, recomputed per snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    pub total_monthly_delta: f64,
    pub total_annual_delta: f64,
    /// Units whose proposed price differs from current rent.
    pub affected_unit_count: usize,
    pub increased_count: usize,
    pub decreased_count: usize,
    /// `total_monthly_delta / Σ current_rent × 100`, or `0` with no rent.
    pub avg_percent_change: f64,
    /// Σ current rent over all units.
    pub current_monthly_total: f64,
}

impl ImpactSummary {
    #[must_use]
    pub fn compute(units: &[Unit], prices: &PriceMap) -> Self {
        let mut summary = Self::default();
        for unit in units {
            let current = unit.current_rent_value();
            let proposed = prices.get(&unit.id).unwrap_or(current);
            let delta = proposed - current;

            summary.current_monthly_total += current;
            summary.total_monthly_delta += delta;
            if delta > 0.0 {
                summary.increased_count += 1;
            } else if delta < 0.0 {
                summary.decreased_count += 1;
            }
        }
        summary.affected_unit_count = summary.increased_count + summary.decreased_count;
        summary.total_annual_delta = summary.total_monthly_delta * 12.0;
        summary.avg_percent_change = if summary.current_monthly_total == 0.0 {
            0.0
        } else {
            summary.total_monthly_delta / summary.current_monthly_total * 100.0
        };
        summary
    }

    /// Units left at their current rent.
    #[must_use]
    pub fn unaffected_count(&self, total_units: usize) -> usize {
        total_units.saturating_sub(self.affected_unit_count)
    }
}
