//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers and parameters (NodeId, Order)

pub mod config;
pub mod error;
mod node_id;
mod order;

pub use error::{Error, Result};
pub use node_id::NodeId;
pub use order::Order;
