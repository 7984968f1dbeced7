#![forbid(unsafe_code)]

//! Runtime: the stateful side of a pricing session.
//!
//! # Role in rentopt
//! `rentopt-runtime` owns everything that changes over time: the snapshot
//! history with its undo/redo cursor, the quiescence tracker that batches
//! keystroke edits, commit listeners, and [`PricingEngine`], which ties
//! them together around the pure transforms in `rentopt-core`.
//!
//! # How it fits in the system
//! Hosts construct one [`PricingEngine`] per session, forward operator
//! input to it, and call [`PricingEngine::poll`] from their tick source.
//! Views read the working copy through the engine or react to
//! [`CommitEvent`]s delivered to subscribers.

pub mod config;
pub mod debounce;
pub mod engine;
pub mod history;
pub mod subscribers;

pub use config::{ConfigError, EngineConfig, HistoryPolicyConfig};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use engine::{CommitEvent, CommitReason, PricingEngine};
pub use history::{History, HistoryConfig};
pub use subscribers::{Subscribers, Subscription};
