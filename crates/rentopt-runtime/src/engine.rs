#![forbid(unsafe_code)]

//! The pricing session state machine.
//!
//! [`PricingEngine`] owns the deduplicated units, the snapshot
//! [`History`], a working copy of the current snapshot, and the
//! [`Debouncer`] that batches keystroke edits.
//!
//! # Edit paths
//!
//! | operation                    | working copy | history entry          |
//! |------------------------------|--------------|------------------------|
//! | `set_price`                  | immediately  | after quiescence       |
//! | `adjust`                     | immediately  | immediately, one entry |
//! | `apply_bulk`                 | immediately  | immediately, one entry |
//! | `reset_to_recommendation`    | immediately  | immediately, one entry |
//! | `undo` / `redo`              | replaced     | cursor moves only      |
//!
//! A pending debounced edit is committed first whenever a discrete
//! operation (`adjust`, `apply_bulk`, `reset_to_recommendation`, `undo`,
//! `redo`) runs, so the typed value becomes its own history entry and is
//! never lost or merged into the discrete change.
//!
//! # Time
//!
//! The engine never reads a clock. `set_price` and `poll` take the current
//! [`Instant`] from the host, which keeps every transition deterministic.
//!
//! # Failure Modes
//!
//! None surface to callers. Unparsable input becomes `0`, unknown unit ids
//! are ignored, and boundary undo/redo or empty-scope bulk operations leave
//! the state unchanged. Each of these is logged at `debug`.

use std::sync::Arc;

use rentopt_core::{
    BaselineReport, BulkOp, BulkScope, ChangeSet, ImpactSummary, PriceMap, Projection, SortSpec,
    Unit, UnitId, apply_bulk, dedupe_units, parse_amount, reset_to_recommendation, sort_units,
    unit_types,
};
use tracing::{debug, info, info_span};
use web_time::Instant;

use crate::config::EngineConfig;
use crate::debounce::Debouncer;
use crate::history::History;
use crate::subscribers::{Subscribers, Subscription};

/// What produced a published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitReason {
    /// A debounced single-field edit.
    Edit,
    QuickAdjust,
    Bulk,
    Reset,
    Undo,
    Redo,
}

impl CommitReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::QuickAdjust => "quick_adjust",
            Self::Bulk => "bulk",
            Self::Reset => "reset",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Whether this event appended a history entry (as opposed to moving
    /// the cursor).
    #[must_use]
    pub const fn is_new_entry(self) -> bool {
        !matches!(self, Self::Undo | Self::Redo)
    }
}

/// Published to subscribers on every commit and cursor move.
#[derive(Debug, Clone)]
pub struct CommitEvent {
    pub reason: CommitReason,
    pub snapshot: Arc<PriceMap>,
    pub cursor: usize,
    pub history_len: usize,
}

/// Single-editor pricing session.
#[derive(Debug)]
pub struct PricingEngine {
    units: Vec<Unit>,
    seed: PriceMap,
    history: History<PriceMap>,
    working: PriceMap,
    debounce: Debouncer,
    subscribers: Subscribers<CommitEvent>,
    config: EngineConfig,
    closed: bool,
}

impl PricingEngine {
    /// Open a session over one or more unit lists.
    ///
    /// Lists are merged with [`dedupe_units`] and the merged set seeds
    /// snapshot 0.
    #[must_use]
    pub fn new<I, L>(unit_lists: I, config: EngineConfig) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = Unit>,
    {
        let units = dedupe_units(unit_lists);
        let seed = PriceMap::initialize(&units);
        let history = History::new(seed.clone(), config.to_history_config());
        info!(
            units = units.len(),
            debounce_ms = config.debounce_ms,
            "pricing session opened"
        );
        Self {
            working: seed.clone(),
            debounce: Debouncer::new(config.debounce_window()),
            subscribers: Subscribers::new(),
            units,
            seed,
            history,
            config,
            closed: false,
        }
    }

    // ====================================================================
    // Reads
    // ====================================================================

    /// Deduplicated units in display input order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Distinct unit types, for the bulk scope selector.
    #[must_use]
    pub fn unit_types(&self) -> Vec<String> {
        unit_types(&self.units)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Quick-adjust deltas offered to the operator.
    #[must_use]
    pub fn quick_adjust_steps(&self) -> &[f64] {
        &self.config.quick_adjust_steps
    }

    /// The committed snapshot at the history cursor.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PriceMap> {
        Arc::clone(self.history.current())
    }

    /// The live prices, including any edit still waiting on the debounce.
    #[must_use]
    pub fn working(&self) -> &PriceMap {
        &self.working
    }

    #[must_use]
    pub fn proposed(&self, id: &UnitId) -> Option<f64> {
        self.working.get(id)
    }

    #[must_use]
    pub fn impact(&self) -> ImpactSummary {
        ImpactSummary::compute(&self.units, &self.working)
    }

    #[must_use]
    pub fn projection(&self, report: &BaselineReport) -> Projection {
        Projection::from_report(report, &self.impact())
    }

    #[must_use]
    pub fn sorted(&self, spec: &SortSpec) -> Vec<&Unit> {
        sort_units(&self.units, &self.working, spec)
    }

    /// Units whose proposed price differs from current rent.
    #[must_use]
    pub fn change_set(&self) -> ChangeSet {
        ChangeSet::between(&self.units, &self.working)
    }

    /// Whether the live prices differ from the initial seed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.working != self.seed
    }

    /// Whether a debounced edit is waiting to be committed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// A pending edit counts as undoable: it is committed, then undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.debounce.is_pending()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.debounce.is_pending() && self.history.can_redo()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ====================================================================
    // Edits
    // ====================================================================

    /// Keystroke-level edit of one unit's price.
    ///
    /// The working copy changes at once; the history entry is deferred until
    /// [`poll`](Self::poll) observes a quiet window. Unparsable input is
    /// stored as `0`.
    pub fn set_price(&mut self, id: &UnitId, raw: &str, now: Instant) {
        if self.reject_if_closed("set_price") {
            return;
        }
        let price = parse_amount(raw).unwrap_or_else(|| {
            debug!(unit = %id, raw, "unparsable price entry coerced to 0");
            0.0
        });
        if !self.working.set(id, price) {
            debug!(unit = %id, "edit for unknown unit ignored");
            return;
        }
        self.debounce.touch(now);
    }

    /// Commit the pending edit if its quiet window has elapsed.
    ///
    /// Returns `true` when a history entry was added.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.debounce.poll(now) {
            self.commit(CommitReason::Edit);
            true
        } else {
            false
        }
    }

    /// Commit the pending edit now, ignoring the window.
    pub fn flush(&mut self) -> bool {
        if self.debounce.cancel() {
            self.commit(CommitReason::Edit);
            true
        } else {
            false
        }
    }

    /// Nudge one unit by `delta`, floored at `0`, and commit immediately.
    pub fn adjust(&mut self, id: &UnitId, delta: f64) -> bool {
        if self.reject_if_closed("adjust") {
            return false;
        }
        self.flush();
        let Some(current) = self.working.get(id) else {
            debug!(unit = %id, "quick-adjust for unknown unit ignored");
            return false;
        };
        self.working.set(id, (current + delta).max(0.0));
        self.commit(CommitReason::QuickAdjust);
        true
    }

    /// Apply a bulk operation to the units in `scope`.
    ///
    /// An empty scope changes nothing and adds no history entry.
    pub fn apply_bulk(&mut self, scope: &BulkScope, op: BulkOp) -> bool {
        if self.reject_if_closed("apply_bulk") {
            return false;
        }
        self.flush();
        let outcome = apply_bulk(&self.units, &self.working, scope, op);
        if outcome.touched == 0 {
            debug!(%scope, op = op.label(), "bulk operation matched no units");
            return false;
        }
        debug!(%scope, op = op.label(), touched = outcome.touched, "bulk operation applied");
        self.working = outcome.prices;
        self.commit(CommitReason::Bulk);
        true
    }

    /// Restore every unit to its recommendation (or current rent).
    pub fn reset_to_recommendation(&mut self) {
        if self.reject_if_closed("reset_to_recommendation") {
            return;
        }
        self.flush();
        self.working = reset_to_recommendation(&self.units);
        self.commit(CommitReason::Reset);
    }

    // ====================================================================
    // History navigation
    // ====================================================================

    /// Step back one snapshot. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        if self.reject_if_closed("undo") {
            return false;
        }
        self.flush();
        match self.history.undo() {
            Some(snapshot) => {
                self.working = (*snapshot).clone();
                self.publish(CommitReason::Undo);
                true
            }
            None => {
                debug!("undo at start of history ignored");
                false
            }
        }
    }

    /// Step forward one snapshot. Returns `false` at the end of history.
    pub fn redo(&mut self) -> bool {
        if self.reject_if_closed("redo") {
            return false;
        }
        self.flush();
        match self.history.redo() {
            Some(snapshot) => {
                self.working = (*snapshot).clone();
                self.publish(CommitReason::Redo);
                true
            }
            None => {
                debug!("redo at end of history ignored");
                false
            }
        }
    }

    // ====================================================================
    // Subscribers and teardown
    // ====================================================================

    /// Listen for commits and cursor moves. Dropping the guard unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&CommitEvent) + 'static) -> Subscription {
        self.subscribers.subscribe(callback)
    }

    /// Tear the session down: a pending edit is discarded, not committed,
    /// and every subscriber is dropped. Later edits are ignored.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.debounce.cancel() {
            debug!("pending edit discarded on close");
        }
        self.subscribers.clear();
        self.closed = true;
        info!(
            history_len = self.history.len(),
            changed = self.has_changes(),
            "pricing session closed"
        );
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn reject_if_closed(&self, op: &'static str) -> bool {
        if self.closed {
            debug!(op, "operation on closed session ignored");
        }
        self.closed
    }

    fn commit(&mut self, reason: CommitReason) {
        self.history.push(self.working.clone());
        self.publish(reason);
    }

    fn publish(&self, reason: CommitReason) {
        let event = CommitEvent {
            reason,
            snapshot: self.snapshot(),
            cursor: self.history.cursor(),
            history_len: self.history.len(),
        };
        let started = Instant::now();
        let _span = info_span!(
            "rentopt.commit",
            reason = reason.as_str(),
            history_len = event.history_len,
            cursor = event.cursor,
            subscribers = self.subscribers.len(),
            duration_us = tracing::field::Empty
        )
        .entered();

        let notified = self.subscribers.notify(&event);

        let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::Span::current().record("duration_us", duration_us);
        debug!(notified, "snapshot published");
    }
}
