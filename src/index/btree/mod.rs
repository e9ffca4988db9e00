//! B-tree index implementation.
//!
//! # Components
//! - [`Node`] - One multi-way node: sorted entries plus child ids
//! - [`NodeArena`] - Owns every node; parent, child and sibling navigation
//! - [`BTree`] - The engine: search, insert with split, delete with
//!   rotate/merge
//! - [`Iter`] - In-order traversal
//! - [`TreeStats`] / [`StatsSnapshot`] - Structural counters
//!
//! # Layout
//! Splitting the engine by operation keeps each cascade readable on its own:
//! - `tree.rs` - construction, lookup, accessors
//! - `insert.rs` - insert and the split cascade
//! - `delete.rs` - delete and the rotate/merge cascade
//! - `validate.rs` - invariant checker used by the tests

mod arena;
mod delete;
mod insert;
mod iter;
mod node;
mod stats;
mod tree;
mod validate;

pub use arena::NodeArena;
pub use iter::Iter;
pub use node::Node;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::BTree;
