#![forbid(unsafe_code)]

//! Monetary amounts as they arrive from the data layer.
//!
//! Rent fields are delivered either as JSON numbers or as decimal strings
//! (`"1250.00"`, `"$1,250"`). [`Amount`] accepts both shapes and
//! [`parse_amount`] turns them into an `f64` when possible.
//!
//! Parsing never fails loudly: anything that is not a finite number yields
//! `None`, and callers resolve that through their own fallback chain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rent value in either of the shapes the data layer emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Numeric JSON value.
    Number(f64),
    /// Decimal string, possibly formatted for display.
    Text(String),
}

impl Amount {
    /// Parse into a finite number, if possible.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.is_finite().then_some(*n),
            Self::Text(s) => parse_amount(s),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Parse a decimal string into a finite `f64`.
///
/// Leading/trailing whitespace, a leading `$`, and `,` thousands separators
/// are ignored. Empty input, non-numeric text, `NaN`, and infinities all
/// return `None`.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Value of an optional amount, `None` if absent or unparsable.
#[must_use]
pub fn amount_value(amount: Option<&Amount>) -> Option<f64> {
    amount.and_then(Amount::value)
}

/// Round half-up to the nearest whole currency unit.
///
/// Half-way values round toward positive infinity (`2.5 → 3`, `-2.5 → -2`).
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
