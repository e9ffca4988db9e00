//! mwtree - An in-memory multi-way balanced search tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             mwtree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Engine (index/btree/)                    │   │
//! │  │   BTree: search │ insert + split │ delete + rotate/merge │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Storage (index/btree/)                   │   │
//! │  │     NodeArena: Vec of slots + free list, NodeId links    │   │
//! │  │     Node: sorted entries, child ids, parent id           │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Primitives (common/)                     │   │
//! │  │           Order, NodeId, Error, config constants         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Order, NodeId, Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Logging
//! Structural changes (splits, rotations, merges, root changes) are emitted
//! as `tracing` events at `debug` level. Install any subscriber to see them.
//!
//! # Quick Start
//! ```
//! use mwtree::BTree;
//!
//! // A 2-3 tree
//! let mut tree = BTree::new(3).unwrap();
//! for key in [50, 10, 100, 200, 20, 300, 30] {
//!     tree.insert(key, key * 2).unwrap();
//! }
//!
//! assert_eq!(tree.search(&200), Ok(&400));
//! assert_eq!(tree.node_count(), 7);
//!
//! assert!(tree.delete(&50));
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![10, 20, 30, 100, 200, 300]);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, NodeId, Order, Result};

pub use index::btree::{BTree, Iter, Node, StatsSnapshot, TreeStats};
