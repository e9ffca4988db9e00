//! Tree order (maximum branching degree).

use std::fmt;

use crate::common::config::{DEFAULT_ORDER, MIN_ORDER};
use crate::common::{Error, Result};

/// The order `M` of a tree: the maximum number of children of a node.
///
/// Every other capacity bound is derived from it:
///
/// | Bound           | Formula            | M = 3 | M = 4 | M = 5 |
/// |-----------------|--------------------|-------|-------|-------|
/// | `min_branching` | `ceil(M / 2)`      | 2     | 2     | 3     |
/// | `max_keys`      | `M - 1`            | 2     | 3     | 4     |
/// | `min_keys`      | `min_branching - 1`| 1     | 1     | 2     |
///
/// The root is exempt from `min_keys`.
///
/// # Example
/// ```
/// use mwtree::Order;
///
/// let order = Order::new(5).unwrap();
/// assert_eq!(order.max_keys(), 4);
/// assert_eq!(order.min_keys(), 2);
/// assert!(Order::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Order(usize);

impl Order {
    /// Validate and wrap an order.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `m < MIN_ORDER`
    pub fn new(m: usize) -> Result<Self> {
        if m < MIN_ORDER {
            return Err(Error::InvalidOrder(m));
        }
        Ok(Order(m))
    }

    /// The raw order `M`.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Minimum number of children of a non-root internal node.
    #[inline]
    pub fn min_branching(self) -> usize {
        self.0.div_ceil(2)
    }

    /// Maximum number of keys in any node.
    #[inline]
    pub fn max_keys(self) -> usize {
        self.0 - 1
    }

    /// Minimum number of keys in a non-root node.
    #[inline]
    pub fn min_keys(self) -> usize {
        self.min_branching() - 1
    }
}

impl Default for Order {
    fn default() -> Self {
        Order(DEFAULT_ORDER)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({})", self.0)
    }
}
