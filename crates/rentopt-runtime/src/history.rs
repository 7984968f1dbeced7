#![forbid(unsafe_code)]

//! Linear undo/redo history of price snapshots.
//!
//! [`History`] keeps an ordered sequence of snapshots and a cursor into it.
//! Snapshots are stored as [`Arc`]s, and the price maps they wrap use
//! persistent collections, so keeping a long history costs little more than
//! the entries that actually changed.
//!
//! # Architecture
//!
//! ```text
//! push(s3)
//! ┌──────────────────────────────────────────────┐
//! │ Snapshots: [s0, s1, s2, s3]                  │
//! │ Cursor:                  ^                   │
//! └──────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌──────────────────────────────────────────────┐
//! │ Snapshots: [s0, s1, s2, s3]                  │
//! │ Cursor:         ^                            │
//! └──────────────────────────────────────────────┘
//!
//! push(s4): truncates after the cursor, then appends
//! ┌──────────────────────────────────────────────┐
//! │ Snapshots: [s0, s1, s4]                      │
//! │ Cursor:             ^                        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. The sequence is never empty; it is seeded with an initial snapshot.
//! 2. `0 <= cursor < len` after every operation.
//! 3. `undo` at cursor 0 and `redo` at the last index change nothing.
//! 4. `push` discards every snapshot after the cursor.
//! 5. `len <= config.max_depth` when a limit is set (oldest snapshots are
//!    evicted first). The default keeps every snapshot, so snapshot 0 stays
//!    reachable by undo.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Configuration for the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of snapshots retained, including the current one.
    /// `0` means unlimited, matching
    /// [`HistoryPolicyConfig::max_depth`](crate::config::HistoryPolicyConfig::max_depth).
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl HistoryConfig {
    /// Create a new configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration.
    #[must_use]
    pub fn unlimited() -> Self {
        Self { max_depth: 0 }
    }

    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.max_depth == 0
    }
}

/// A cursor-based snapshot history.
pub struct History<T> {
    snapshots: VecDeque<Arc<T>>,
    cursor: usize,
    config: HistoryConfig,
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("len", &self.snapshots.len())
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

impl<T> History<T> {
    /// Create a history whose snapshot 0 is `initial`.
    #[must_use]
    pub fn new(initial: T, config: HistoryConfig) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(Arc::new(initial));
        Self {
            snapshots,
            cursor: 0,
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Commit a new snapshot, discarding any redo branch.
    pub fn push(&mut self, state: T) {
        self.push_arc(Arc::new(state));
    }

    /// Commit a pre-wrapped snapshot.
    pub fn push_arc(&mut self, state: Arc<T>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(state);
        self.cursor = self.snapshots.len() - 1;
        self.enforce_depth();
    }

    /// Step back one snapshot. Returns `None` at the start of history.
    pub fn undo(&mut self) -> Option<Arc<T>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(Arc::clone(&self.snapshots[self.cursor]))
    }

    /// Step forward one snapshot. Returns `None` at the end of history.
    pub fn redo(&mut self) -> Option<Arc<T>> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(Arc::clone(&self.snapshots[self.cursor]))
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &Arc<T> {
        &self.snapshots[self.cursor]
    }

    /// The oldest retained snapshot.
    #[must_use]
    pub fn first(&self) -> &Arc<T> {
        &self.snapshots[0]
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Position of the current snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    fn enforce_depth(&mut self) {
        if self.config.is_unlimited() {
            return;
        }
        let limit = self.config.max_depth;
        while self.snapshots.len() > limit {
            self.snapshots.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
