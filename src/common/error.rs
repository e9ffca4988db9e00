//! Error types for mwtree.

use thiserror::Error;

use crate::common::config::MIN_ORDER;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in mwtree.
///
/// The variants fall into three groups:
/// - **Not found**: a normal negative answer to a lookup.
/// - **Invalid argument**: the caller asked for something the tree
///   refuses (duplicate key, bad index, bad order).
/// - **Precondition violation**: a node-level helper was called in a state
///   it does not support. Seeing one of these means a bug in the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Requested key is not in the tree.
    #[error("key not found")]
    KeyNotFound,

    /// Key is already present in the tree.
    ///
    /// Use `BTree::update` to overwrite an existing value.
    #[error("duplicate key")]
    DuplicateKey,

    /// A node index was outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A child covering the same key range is already attached.
    #[error("a child with the same key range is already attached")]
    DuplicateChild,

    /// The requested order is too small to keep the tree balanced.
    #[error("invalid order {0}: must be at least {}", MIN_ORDER)]
    InvalidOrder(usize),

    /// `Node::split` was called on a node that is not overflown.
    #[error("node with {len} keys is not overflown (max {max})")]
    NotOverflown { len: usize, max: usize },

    /// `Node::key_value_to_move_up` was called outside of a split.
    #[error("node with {len} keys is not at a split point (expected {expected})")]
    NotSplitPoint { len: usize, expected: usize },

    /// The tree failed an invariant check.
    ///
    /// Only produced by `BTree::validate`.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(format!("{}", err), "index 4 out of range for length 2");

        let err = Error::InvalidOrder(2);
        assert_eq!(format!("{}", err), "invalid order 2: must be at least 3");

        let err = Error::KeyNotFound;
        assert_eq!(format!("{}", err), "key not found");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
