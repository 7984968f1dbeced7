#![forbid(unsafe_code)]

//! rentopt public facade crate.
//!
//! Re-exports the unit model and pricing transforms from `rentopt-core`,
//! the session engine from `rentopt-runtime`, and adds the edge concerns a
//! host needs: one [`Error`] type, unit-list loading, and tracing setup.
//!
//! ```no_run
//! use rentopt::prelude::*;
//!
//! let east = r#"[{"id":"a","unitNumber":"101","unitType":"1BR","currentRent":950}]"#;
//! let mut engine = rentopt::open_session([east], EngineConfig::default())?;
//! engine.apply_bulk(&BulkScope::AllUnits, BulkOp::Percentage(3.0));
//! println!("{:?}", engine.impact());
//! # Ok::<(), rentopt::Error>(())
//! ```

pub mod error;
pub mod logging;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use rentopt_core::{
    Amount, BaselineReport, BulkOp, BulkScope, ChangeSet, ImpactSummary, PriceChange, PriceMap,
    Projection, SortColumn, SortDirection, SortSpec, Unit, UnitId, UnitStatus,
};

// --- Runtime re-exports ----------------------------------------------------

pub use rentopt_runtime::{
    CommitEvent, CommitReason, ConfigError, EngineConfig, HistoryPolicyConfig, PricingEngine,
    Subscription,
};

// --- Loading ---------------------------------------------------------------

/// Parse one camelCase JSON array of units.
pub fn load_units_json(json: &str) -> Result<Vec<Unit>> {
    Ok(serde_json::from_str(json)?)
}

/// Open a session over several JSON unit lists, merged in order.
pub fn open_session<'a>(
    unit_lists: impl IntoIterator<Item = &'a str>,
    config: EngineConfig,
) -> Result<PricingEngine> {
    let lists = unit_lists
        .into_iter()
        .map(load_units_json)
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(lists = lists.len(), "unit lists loaded");
    Ok(PricingEngine::new(lists, config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BulkOp, BulkScope, CommitEvent, CommitReason, EngineConfig, Error, ImpactSummary,
        PriceMap, PricingEngine, Result, SortColumn, SortDirection, SortSpec, Unit, UnitId,
    };

    pub use crate::{core, runtime};
}

pub use rentopt_core as core;
pub use rentopt_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::*;

    const EAST: &str = r#"[
        {"id": "a", "unitNumber": "101", "unitType": "1BR", "currentRent": "$950",
         "recommendedRent": 1000, "status": "vacant"},
        {"id": "b", "unitNumber": "102", "unitType": "2BR", "currentRent": 1150}
    ]"#;
    const WEST: &str = r#"[
        {"id": "a", "unitNumber": "101", "unitType": "1BR", "currentRent": 975,
         "recommendedRent": "1,010", "propertyName": "West"}
    ]"#;

    #[test]
    fn loads_camel_case_units() {
        let units = load_units_json(EAST).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].current_rent_value(), 950.0);
        assert_eq!(units[0].status, UnitStatus::Vacant);
        assert_eq!(units[1].recommended_rent_value(), None);
    }

    #[test]
    fn rejects_units_missing_required_fields() {
        let err = load_units_json(r#"[{"id": "a"}]"#).unwrap_err();
        assert!(matches!(err, Error::Units(_)));
    }

    #[test]
    fn open_session_merges_lists() {
        let engine = open_session([EAST, WEST], EngineConfig::default()).unwrap();
        assert_eq!(engine.units().len(), 2);
        assert_eq!(engine.units()[0].property_name.as_deref(), Some("West"));
        assert_eq!(engine.proposed(&UnitId::new("a")), Some(1010.0));
        assert_eq!(engine.proposed(&UnitId::new("b")), Some(1150.0));
    }

    #[test]
    fn missing_current_rent_seeds_recommendation() {
        let json = r#"[
            {"id": "n", "unitNumber": "1", "unitType": "1BR", "currentRent": null,
             "recommendedRent": 900},
            {"id": "o", "unitNumber": "2", "unitType": "1BR", "recommendedRent": "$875"}
        ]"#;
        let engine = open_session([json], EngineConfig::default()).unwrap();
        assert_eq!(engine.proposed(&UnitId::new("n")), Some(900.0));
        assert_eq!(engine.proposed(&UnitId::new("o")), Some(875.0));
        assert_eq!(engine.units()[0].current_rent_value(), 0.0);
    }

    #[test]
    fn missing_current_and_recommended_seed_zero() {
        let json = r#"[
            {"id": "n", "unitNumber": "1", "unitType": "1BR", "currentRent": null,
             "recommendedRent": null},
            {"id": "o", "unitNumber": "2", "unitType": "1BR"}
        ]"#;
        let engine = open_session([json], EngineConfig::default()).unwrap();
        assert_eq!(engine.proposed(&UnitId::new("n")), Some(0.0));
        assert_eq!(engine.proposed(&UnitId::new("o")), Some(0.0));
        assert_eq!(engine.impact().affected_unit_count, 0);
    }

    #[test]
    fn open_session_reports_bad_list() {
        let err = open_session([EAST, "not json"], EngineConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("unit list:"));
    }
}
