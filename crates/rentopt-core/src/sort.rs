#![forbid(unsafe_code)]

//! Display ordering for the unit table.
//!
//! One column is active at a time. Clicking the active column cycles
//! ascending → descending → unsorted; clicking another column starts it at
//! ascending (see [`SortSpec::toggle`]).
//!
//! # Comparison rules
//!
//! - Text columns use [`natural_cmp`]: case-insensitive, with digit runs
//!   compared by numeric value, so `"Unit 9" < "Unit 10"`.
//! - Numeric and derived columns compare as numbers.
//! - Missing values sort after every present value, in both directions.
//! - Ties keep input order (the sort is stable).

use std::cmp::Ordering;

use crate::price_map::PriceMap;
use crate::unit::Unit;

/// Sortable columns of the pricing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    UnitNumber,
    Tag,
    Property,
    UnitType,
    CurrentRent,
    RecommendedRent,
    MarketAverage,
    ProposedRent,
    PowerScore,
    /// Proposed minus current rent.
    Change,
    /// Monthly change times twelve.
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort column and direction; `None` keeps input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    active: Option<(SortColumn, SortDirection)>,
}

impl SortSpec {
    /// No sorting.
    #[must_use]
    pub const fn none() -> Self {
        Self { active: None }
    }

    #[must_use]
    pub const fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            active: Some((column, direction)),
        }
    }

    #[must_use]
    pub fn column(&self) -> Option<SortColumn> {
        self.active.map(|(c, _)| c)
    }

    #[must_use]
    pub fn direction(&self) -> Option<SortDirection> {
        self.active.map(|(_, d)| d)
    }

    /// Header click on `column`.
    pub fn toggle(&mut self, column: SortColumn) {
        self.active = match self.active {
            Some((current, SortDirection::Asc)) if current == column => {
                Some((column, SortDirection::Desc))
            }
            Some((current, SortDirection::Desc)) if current == column => None,
            _ => Some((column, SortDirection::Asc)),
        };
    }
}

/// Per-row value a column sorts by.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

fn sort_key<'a>(unit: &'a Unit, prices: &PriceMap, column: SortColumn) -> SortKey<'a> {
    let current = unit.current_rent_value();
    let change = || prices.get(&unit.id).map(|p| p - current);
    match column {
        SortColumn::UnitNumber => SortKey::Text(Some(&unit.unit_number)),
        SortColumn::Tag => SortKey::Text(unit.tag.as_deref()),
        SortColumn::Property => SortKey::Text(unit.property_name.as_deref()),
        SortColumn::UnitType => SortKey::Text(Some(&unit.unit_type)),
        SortColumn::CurrentRent => SortKey::Number(unit.parsed_current_rent()),
        SortColumn::RecommendedRent => SortKey::Number(unit.recommended_rent_value()),
        SortColumn::MarketAverage => SortKey::Number(unit.market_average_value()),
        SortColumn::ProposedRent => SortKey::Number(prices.get(&unit.id)),
        SortColumn::PowerScore => SortKey::Number(unit.pricing_power_score),
        SortColumn::Change => SortKey::Number(change()),
        SortColumn::Annual => SortKey::Number(change().map(|c| c * 12.0)),
    }
}

/// Compare two keys; absent values are `Greater` regardless of direction.
fn compare_keys(a: SortKey<'_>, b: SortKey<'_>, direction: SortDirection) -> Ordering {
    let present = match (a, b) {
        (SortKey::Text(Some(x)), SortKey::Text(Some(y))) => natural_cmp(x, y),
        (SortKey::Number(Some(x)), SortKey::Number(Some(y))) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (SortKey::Text(None), SortKey::Text(None))
        | (SortKey::Number(None), SortKey::Number(None)) => return Ordering::Equal,
        (SortKey::Text(None), _) | (SortKey::Number(None), _) => return Ordering::Greater,
        (_, SortKey::Text(None)) | (_, SortKey::Number(None)) => return Ordering::Less,
        // Keys of one column always share a variant.
        _ => return Ordering::Equal,
    };
    match direction {
        SortDirection::Asc => present,
        SortDirection::Desc => present.reverse(),
    }
}

/// Order units for display.
#[must_use]
pub fn sort_units<'a>(units: &'a [Unit], prices: &PriceMap, spec: &SortSpec) -> Vec<&'a Unit> {
    let Some((column, direction)) = spec.active else {
        return units.iter().collect();
    };
    let mut keyed: Vec<(SortKey<'a>, &'a Unit)> = units
        .iter()
        .map(|u| (sort_key(u, prices, column), u))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(*a, *b, direction));
    keyed.into_iter().map(|(_, u)| u).collect()
}

/// Case-insensitive comparison that orders digit runs by numeric value.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let lhs = take_digits(&mut left);
                let rhs = take_digits(&mut right);
                let ord = compare_digit_runs(&lhs, &rhs);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by(column: SortColumn, direction: SortDirection) -> SortSpec {
        SortSpec::new(column, direction)
    }

    fn numbers<'a>(rows: &[&'a Unit]) -> Vec<&'a str> {
        rows.iter().map(|u| u.unit_number.as_str()).collect()
    }

    #[test]
    fn toggle_cycles_asc_desc_none() {
        let mut spec = SortSpec::none();
        spec.toggle(SortColumn::CurrentRent);
        assert_eq!(spec, SortSpec::new(SortColumn::CurrentRent, SortDirection::Asc));
        spec.toggle(SortColumn::CurrentRent);
        assert_eq!(spec.direction(), Some(SortDirection::Desc));
        spec.toggle(SortColumn::CurrentRent);
        assert_eq!(spec, SortSpec::none());
    }

    #[test]
    fn toggle_other_column_resets_to_asc() {
        let mut spec = SortSpec::new(SortColumn::Tag, SortDirection::Desc);
        spec.toggle(SortColumn::UnitType);
        assert_eq!(spec.column(), Some(SortColumn::UnitType));
        assert_eq!(spec.direction(), Some(SortDirection::Asc));
    }

    #[test]
    fn natural_ordering_of_numbers() {
        assert_eq!(natural_cmp("Unit 9", "Unit 10"), Ordering::Less);
        assert_eq!(natural_cmp("unit 10", "Unit 9"), Ordering::Greater);
        assert_eq!(natural_cmp("A-007", "a-7"), Ordering::Equal);
        assert_eq!(natural_cmp("B2", "a10"), Ordering::Greater);
        assert_eq!(natural_cmp("10", "10a"), Ordering::Less);
    }

    #[test]
    fn sorts_text_naturally() {
        let units = vec![
            Unit::new("a", "Unit 10", "1BR", 1.0),
            Unit::new("b", "Unit 9", "1BR", 1.0),
            Unit::new("c", "Unit 100", "1BR", 1.0),
        ];
        let prices = PriceMap::initialize(&units);
        let asc = sort_units(&units, &prices, &by(SortColumn::UnitNumber, SortDirection::Asc));
        assert_eq!(numbers(&asc), vec!["Unit 9", "Unit 10", "Unit 100"]);
        let desc = sort_units(&units, &prices, &by(SortColumn::UnitNumber, SortDirection::Desc));
        assert_eq!(numbers(&desc), vec!["Unit 100", "Unit 10", "Unit 9"]);
    }

    #[test]
    fn missing_values_sort_last_both_directions() {
        let units = vec![
            Unit::new("a", "1", "1BR", 1.0),
            Unit::new("b", "2", "1BR", 1.0).with_market_average(900.0),
            Unit::new("c", "3", "1BR", 1.0).with_market_average(1100.0),
        ];
        let prices = PriceMap::initialize(&units);
        let asc = sort_units(&units, &prices, &by(SortColumn::MarketAverage, SortDirection::Asc));
        assert_eq!(numbers(&asc), vec!["2", "3", "1"]);
        let desc = sort_units(&units, &prices, &by(SortColumn::MarketAverage, SortDirection::Desc));
        assert_eq!(numbers(&desc), vec!["3", "2", "1"]);
    }

    #[test]
    fn missing_tags_sort_last() {
        let units = vec![
            Unit::new("a", "1", "1BR", 1.0),
            Unit::new("b", "2", "1BR", 1.0).with_tag("renovated"),
            Unit::new("c", "3", "1BR", 1.0).with_tag("corner"),
        ];
        let prices = PriceMap::initialize(&units);
        let desc = sort_units(&units, &prices, &by(SortColumn::Tag, SortDirection::Desc));
        assert_eq!(numbers(&desc), vec!["2", "3", "1"]);
    }

    #[test]
    fn derived_change_and_annual() {
        let units = vec![
            Unit::new("a", "1", "1BR", 1000.0).with_recommended(1100.0),
            Unit::new("b", "2", "1BR", 1000.0).with_recommended(950.0),
            Unit::new("c", "3", "1BR", 1000.0).with_recommended(1010.0),
        ];
        let prices = PriceMap::initialize(&units);
        let change = sort_units(&units, &prices, &by(SortColumn::Change, SortDirection::Asc));
        assert_eq!(numbers(&change), vec!["2", "3", "1"]);
        let annual = sort_units(&units, &prices, &by(SortColumn::Annual, SortDirection::Desc));
        assert_eq!(numbers(&annual), vec!["1", "3", "2"]);
    }

    #[test]
    fn equal_values_keep_input_order() {
        let units: Vec<Unit> = (0..6)
            .map(|i| Unit::new(format!("u{i}"), format!("{i}"), "1BR", 800.0))
            .collect();
        let prices = PriceMap::initialize(&units);
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let rows = sort_units(&units, &prices, &by(SortColumn::CurrentRent, direction));
            assert_eq!(numbers(&rows), vec!["0", "1", "2", "3", "4", "5"]);
        }
    }

    #[test]
    fn unsorted_returns_input_order() {
        let units = vec![
            Unit::new("b", "2", "1BR", 2.0),
            Unit::new("a", "1", "1BR", 1.0),
        ];
        let prices = PriceMap::initialize(&units);
        let rows = sort_units(&units, &prices, &SortSpec::none());
        assert_eq!(numbers(&rows), vec!["2", "1"]);
    }
}
