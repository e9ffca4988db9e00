//! Configuration constants for mwtree.
//!
//! A tree has exactly one tunable, its [`Order`](crate::common::Order).
//! Everything else is fixed at compile time.

/// Smallest order a tree accepts.
///
/// Order 2 would give `min_keys == 0`, which admits keyless non-root
/// nodes and leaves a deleted internal key without an in-order successor.
/// Order 3 (a 2-3 tree) is the smallest order where every invariant holds.
pub const MIN_ORDER: usize = 3;

/// Order used by `BTree::default()`.
///
/// A 2-3-4 tree: small enough that splits and merges show up quickly in
/// tests, large enough to exercise the even-order split.
pub const DEFAULT_ORDER: usize = 4;

/// Number of node slots reserved up front by a fresh arena.
pub const DEFAULT_ARENA_CAPACITY: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_is_valid() {
        assert!(DEFAULT_ORDER >= MIN_ORDER);
    }

    #[test]
    fn test_min_order_has_nonzero_min_keys() {
        // ceil(M/2) - 1 must be at least one key
        assert!(MIN_ORDER.div_ceil(2) - 1 >= 1);
    }
}
