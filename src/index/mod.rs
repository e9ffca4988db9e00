//! Index structures.
//!
//! - [`btree`] - In-memory multi-way balanced search tree

pub mod btree;
