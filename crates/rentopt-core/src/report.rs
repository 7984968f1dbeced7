#![forbid(unsafe_code)]

//! Baseline portfolio report and projected revenue.
//!
//! The [`BaselineReport`] comes from the data layer once per session and is
//! read-only. [`Projection`] combines it with an [`ImpactSummary`] to show
//! what the current snapshot would do to portfolio revenue.

use serde::{Deserialize, Serialize};

use crate::impact::ImpactSummary;

/// Organization-wide totals used for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaselineReport {
    pub total_units: u32,
    pub occupied_units: u32,
    pub total_monthly_revenue: f64,
}

impl BaselineReport {
    /// Occupied share in percent, `0` for an empty portfolio.
    #[must_use]
    pub fn occupancy_percent(&self) -> f64 {
        if self.total_units == 0 {
            0.0
        } else {
            f64::from(self.occupied_units) / f64::from(self.total_units) * 100.0
        }
    }
}

/// Current versus projected revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub current_monthly_revenue: f64,
    pub projected_monthly_revenue: f64,
    pub current_annual_revenue: f64,
    pub projected_annual_revenue: f64,
}

impl Projection {
    #[must_use]
    pub fn from_report(report: &BaselineReport, impact: &ImpactSummary) -> Self {
        let current = report.total_monthly_revenue;
        let projected = current + impact.total_monthly_delta;
        Self {
            current_monthly_revenue: current,
            projected_monthly_revenue: projected,
            current_annual_revenue: current * 12.0,
            projected_annual_revenue: projected * 12.0,
        }
    }
}
