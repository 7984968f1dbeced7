#![forbid(unsafe_code)]

//! Rental unit records supplied by the data layer.
//!
//! Units are immutable for the lifetime of a pricing session. The engine
//! never edits a [`Unit`]; proposed prices live in a separate
//! [`PriceMap`](crate::price_map::PriceMap).

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amount::{Amount, amount_value};

/// Stable identity of a unit.
///
/// The same id may show up in several property lists when a portfolio view
/// aggregates properties; see [`dedupe_units`](crate::dedupe::dedupe_units).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    /// Create an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UnitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for UnitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Occupancy state of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Vacant,
    #[default]
    Occupied,
    NoticeGiven,
    Available,
}

/// A rental unit as delivered by the data layer.
///
/// Field names follow the data layer's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: UnitId,
    pub unit_number: String,
    pub unit_type: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub square_footage: Option<u32>,
    /// `None` when the data layer sent `null` or omitted the field.
    #[serde(default)]
    pub current_rent: Option<Amount>,
    #[serde(default)]
    pub recommended_rent: Option<Amount>,
    #[serde(default)]
    pub market_average: Option<Amount>,
    #[serde(default)]
    pub status: UnitStatus,
    #[serde(default)]
    pub availability_date: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub property_name: Option<String>,
    /// Pre-computed pricing power score in `0..=100`.
    #[serde(default)]
    pub pricing_power_score: Option<f64>,
}

impl Unit {
    /// Create a unit with the required fields; everything optional is unset.
    #[must_use]
    pub fn new(
        id: impl Into<UnitId>,
        unit_number: impl Into<String>,
        unit_type: impl Into<String>,
        current_rent: impl Into<Amount>,
    ) -> Self {
        Self {
            id: id.into(),
            unit_number: unit_number.into(),
            unit_type: unit_type.into(),
            bedrooms: 0,
            bathrooms: None,
            square_footage: None,
            current_rent: Some(current_rent.into()),
            recommended_rent: None,
            market_average: None,
            status: UnitStatus::default(),
            availability_date: None,
            tag: None,
            property_name: None,
            pricing_power_score: None,
        }
    }

    #[must_use]
    pub fn with_recommended(mut self, rent: impl Into<Amount>) -> Self {
        self.recommended_rent = Some(rent.into());
        self
    }

    #[must_use]
    pub fn with_market_average(mut self, rent: impl Into<Amount>) -> Self {
        self.market_average = Some(rent.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_power_score(mut self, score: f64) -> Self {
        self.pricing_power_score = Some(score);
        self
    }

    /// Current rent, or `0` when it is missing or does not parse.
    #[must_use]
    pub fn current_rent_value(&self) -> f64 {
        self.parsed_current_rent().unwrap_or(0.0)
    }

    /// Current rent when present and parsable.
    #[must_use]
    pub fn parsed_current_rent(&self) -> Option<f64> {
        amount_value(self.current_rent.as_ref())
    }

    #[must_use]
    pub fn recommended_rent_value(&self) -> Option<f64> {
        amount_value(self.recommended_rent.as_ref())
    }

    #[must_use]
    pub fn market_average_value(&self) -> Option<f64> {
        amount_value(self.market_average.as_ref())
    }

    /// Starting proposed price: recommendation, else current rent, else `0`.
    #[must_use]
    pub fn baseline_price(&self) -> f64 {
        self.recommended_rent_value()
            .or_else(|| self.parsed_current_rent())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_prefers_recommendation() {
        let unit = Unit::new("u1", "101", "1BR", 900.0).with_recommended(950.0);
        assert_eq!(unit.baseline_price(), 950.0);
    }

    #[test]
    fn baseline_falls_back_to_current() {
        let unit = Unit::new("u1", "101", "1BR", "900");
        assert_eq!(unit.baseline_price(), 900.0);

        let unit = Unit::new("u1", "101", "1BR", 900.0).with_recommended("n/a");
        assert_eq!(unit.baseline_price(), 900.0);
    }

    #[test]
    fn baseline_zero_when_nothing_parses() {
        let unit = Unit::new("u1", "101", "1BR", "tbd").with_recommended("");
        assert_eq!(unit.baseline_price(), 0.0);
        assert_eq!(unit.current_rent_value(), 0.0);
    }

    #[test]
    fn deserializes_data_layer_json() {
        let json = r#"{
            "id": "u-7",
            "unitNumber": "Unit 7",
            "unitType": "2BR",
            "bedrooms": 2,
            "bathrooms": 1.5,
            "squareFootage": 880,
            "currentRent": "1450.00",
            "recommendedRent": 1495,
            "marketAverage": null,
            "status": "notice_given",
            "availabilityDate": "2026-11-01",
            "tag": null,
            "propertyName": "Elm Court",
            "pricingPowerScore": 72
        }"#;
        let unit: Unit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.id, UnitId::new("u-7"));
        assert_eq!(unit.status, UnitStatus::NoticeGiven);
        assert_eq!(unit.current_rent_value(), 1450.0);
        assert_eq!(unit.recommended_rent_value(), Some(1495.0));
        assert_eq!(unit.market_average_value(), None);
        assert_eq!(unit.pricing_power_score, Some(72.0));
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let json = r#"{"id":"a","unitNumber":"1","unitType":"Studio","currentRent":700}"#;
        let unit: Unit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.bedrooms, 0);
        assert_eq!(unit.status, UnitStatus::Occupied);
        assert!(unit.tag.is_none());
    }

    #[test]
    fn null_or_absent_current_rent_is_missing() {
        let null = r#"{"id":"a","unitNumber":"1","unitType":"1BR","currentRent":null,"recommendedRent":900}"#;
        let unit: Unit = serde_json::from_str(null).unwrap();
        assert!(unit.current_rent.is_none());
        assert_eq!(unit.parsed_current_rent(), None);
        assert_eq!(unit.current_rent_value(), 0.0);
        assert_eq!(unit.baseline_price(), 900.0);

        let absent = r#"{"id":"b","unitNumber":"2","unitType":"1BR"}"#;
        let unit: Unit = serde_json::from_str(absent).unwrap();
        assert!(unit.current_rent.is_none());
        assert_eq!(unit.baseline_price(), 0.0);
    }
}
