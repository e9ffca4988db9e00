//! Structural statistics for a B-tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the structural work a tree has done.
///
/// All fields are atomic so that read-only operations (`search` takes
/// `&self`) can still count themselves. Every update uses
/// `Ordering::Relaxed`: the counters are independent and only need to be
/// exact, not ordered with respect to each other.
///
/// # Example
/// ```
/// use mwtree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for k in [1, 2, 3] {
///     tree.insert(k, ()).unwrap();
/// }
/// let snapshot = tree.stats().snapshot();
/// assert_eq!(snapshot.splits, 1);
/// assert_eq!(snapshot.root_splits, 1);
/// ```
#[derive(Debug, Default)]
pub struct TreeStats {
    /// Number of key lookups (`search`, `get`, `contains_key`).
    pub lookups: AtomicU64,

    /// Number of node splits, including root splits.
    pub splits: AtomicU64,

    /// Number of splits that grew the tree by one level.
    pub root_splits: AtomicU64,

    /// Number of sibling rotations during delete.
    pub rotations: AtomicU64,

    /// Number of node merges during delete.
    pub merges: AtomicU64,

    /// Number of merges that emptied the root and shrank the tree.
    pub root_collapses: AtomicU64,
}

impl TreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            root_collapses: self.root_collapses.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
        self.rotations.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.root_collapses.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub(super) fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(super) fn record_split(&self, grew_root: bool) {
        self.splits.fetch_add(1, Ordering::Relaxed);
        if grew_root {
            self.root_splits.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(super) fn record_rotation(&self) {
        self.rotations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(super) fn record_merge(&self, collapsed_root: bool) {
        self.merges.fetch_add(1, Ordering::Relaxed);
        if collapsed_root {
            self.root_collapses.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// A point-in-time copy of [`TreeStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub lookups: u64,
    pub splits: u64,
    pub root_splits: u64,
    pub rotations: u64,
    pub merges: u64,
    pub root_collapses: u64,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ lookups: {}, splits: {} ({} root), rotations: {}, merges: {} ({} root) }}",
            self.lookups,
            self.splits,
            self.root_splits,
            self.rotations,
            self.merges,
            self.root_collapses
        )
    }
}
