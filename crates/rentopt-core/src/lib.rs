#![forbid(unsafe_code)]

//! Core: unit records, price maps, and the pure pricing transforms.
//!
//! # Role in rentopt
//! `rentopt-core` holds everything that is a plain function of its inputs:
//! merging unit lists, seeding proposed prices, bulk transformations, the
//! impact summary, and table ordering. Nothing here keeps state between
//! calls or knows about time.
//!
//! # How it fits in the system
//! `rentopt-runtime` owns the mutable session state (history, debounce,
//! subscribers) and calls into this crate to derive every new snapshot.

pub mod amount;
pub mod bulk;
pub mod change_set;
pub mod dedupe;
pub mod impact;
pub mod price_map;
pub mod report;
pub mod sort;
pub mod unit;

pub use amount::{Amount, parse_amount, round_half_up};
pub use bulk::{BulkOp, BulkOutcome, BulkScope, apply_bulk, reset_to_recommendation};
pub use change_set::{ChangeSet, PriceChange};
pub use dedupe::{dedupe_units, unit_types};
pub use impact::ImpactSummary;
pub use price_map::PriceMap;
pub use report::{BaselineReport, Projection};
pub use sort::{SortColumn, SortDirection, SortSpec, natural_cmp, sort_units};
pub use unit::{Unit, UnitId, UnitStatus};
