#![forbid(unsafe_code)]

//! Bulk price transformations over a scoped subset of units.
//!
//! [`apply_bulk`] derives a new [`PriceMap`] from the current one. Units
//! outside the [`BulkScope`] keep their proposed price untouched.
//!
//! | op                  | new price                                        |
//! |---------------------|--------------------------------------------------|
//! | `Percentage(p)`     | `round(x * (1 + p/100))`, no floor               |
//! | `FixedAdd(a)`       | `max(0, x + a)`                                  |
//! | `FixedSubtract(a)`  | `max(0, x - a)`                                  |
//! | `SetToMarket(m)`    | `round(market * m)`, else current rent           |
//!
//! Percentage and fixed operations compound when reapplied to their own
//! output. Resetting to the recommendation is handled by
//! [`reset_to_recommendation`], which always targets every unit.

use std::fmt;

use crate::amount::round_half_up;
use crate::price_map::PriceMap;
use crate::unit::Unit;

/// Which units a bulk operation touches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BulkScope {
    #[default]
    AllUnits,
    /// Units whose `unit_type` equals the given value exactly.
    ByUnitType(String),
}

impl BulkScope {
    #[must_use]
    pub fn by_unit_type(unit_type: impl Into<String>) -> Self {
        Self::ByUnitType(unit_type.into())
    }

    #[must_use]
    pub fn contains(&self, unit: &Unit) -> bool {
        match self {
            Self::AllUnits => true,
            Self::ByUnitType(t) => unit.unit_type == *t,
        }
    }
}

impl fmt::Display for BulkScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllUnits => f.write_str("all units"),
            Self::ByUnitType(t) => write!(f, "unit type {t}"),
        }
    }
}

/// A price transformation applied to every in-scope unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BulkOp {
    /// Scale by a percentage; `10.0` means +10%.
    Percentage(f64),
    FixedAdd(f64),
    FixedSubtract(f64),
    /// Market average times a multiplier, e.g. `1.05` for 5% above market.
    SetToMarket(f64),
}

impl BulkOp {
    /// Compute the new proposed price for one unit.
    #[must_use]
    pub fn price_for(&self, unit: &Unit, proposed: f64) -> f64 {
        match *self {
            Self::Percentage(p) => round_half_up(proposed * (1.0 + p / 100.0)),
            Self::FixedAdd(amount) => (proposed + amount).max(0.0),
            Self::FixedSubtract(amount) => (proposed - amount).max(0.0),
            Self::SetToMarket(multiplier) => match unit.market_average_value() {
                Some(market) => round_half_up(market * multiplier),
                None => unit.current_rent_value(),
            },
        }
    }

    /// Short label for logs and history descriptions.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Percentage(_) => "percentage",
            Self::FixedAdd(_) => "fixed_add",
            Self::FixedSubtract(_) => "fixed_subtract",
            Self::SetToMarket(_) => "set_to_market",
        }
    }
}

/// Outcome of a bulk application.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    pub prices: PriceMap,
    /// Number of units inside the scope.
    pub touched: usize,
}

/// Apply `op` to every unit in `scope`.
///
/// Units missing from `current` are skipped. `touched == 0` means the scope
/// matched nothing and `prices` equals `current`.
#[must_use]
pub fn apply_bulk(
    units: &[Unit],
    current: &PriceMap,
    scope: &BulkScope,
    op: BulkOp,
) -> BulkOutcome {
    let mut prices = current.clone();
    let mut touched = 0;
    for unit in units.iter().filter(|u| scope.contains(u)) {
        let Some(proposed) = current.get(&unit.id) else {
            continue;
        };
        prices.set(&unit.id, op.price_for(unit, proposed));
        touched += 1;
    }
    BulkOutcome { prices, touched }
}

/// Restore every unit to its recommendation (or current rent).
///
/// Idempotent: the result depends only on `units`.
#[must_use]
pub fn reset_to_recommendation(units: &[Unit]) -> PriceMap {
    PriceMap::initialize(units)
}
