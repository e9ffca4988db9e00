//! Node - a single multi-way node of the B-tree.
//!
//! A [`Node`] holds an ordered run of key-value entries plus the ids of its
//! children. It only knows about itself: anything that needs to look at a
//! second node (sibling lookup, ranking a child by its minimum key) lives
//! on [`NodeArena`](super::NodeArena).

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::common::{Error, NodeId, Order, Result};

/// A node of the B-tree.
///
/// # Layout
/// ```text
///            entries:   [ k0 | k1 | k2 ]
///            children: [c0 | c1 | c2 | c3]
///
///   keys(c0) < k0 < keys(c1) < k1 < keys(c2) < k2 < keys(c3)
/// ```
///
/// A leaf has no children. An internal node always has exactly
/// `entries.len() + 1` children once an operation has completed.
#[derive(Debug)]
pub struct Node<K, V> {
    /// Key-value pairs, strictly ascending by key.
    pub(super) entries: Vec<(K, V)>,

    /// Child node ids, ordered by the key ranges they cover.
    pub(super) children: Vec<NodeId>,

    /// Back-link to the parent. `None` for the root.
    ///
    /// This is a plain id, never an owner: the arena owns every node.
    pub(super) parent: Option<NodeId>,

    /// Order of the tree this node belongs to.
    order: Order,
}

impl<K, V> Node<K, V> {
    /// Create a new empty node (a leaf with no parent).
    pub fn new(order: Order) -> Self {
        Self {
            entries: Vec::with_capacity(order.get()),
            children: Vec::new(),
            parent: None,
            order,
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Number of keys stored in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this node stores no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The parent of this node, if any.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The order this node was created with.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// The entries of this node in key order.
    #[inline]
    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    /// The child ids of this node in key-range order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Iterate the keys of this node in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// The smallest key stored directly in this node.
    #[inline]
    pub fn min_key(&self) -> Option<&K> {
        self.entries.first().map(|(k, _)| k)
    }

    // ========================================================================
    // Capacity checks
    // ========================================================================

    /// More keys than the order allows. Only seen mid-insert, before split.
    #[inline]
    pub fn is_overflown(&self) -> bool {
        self.len() > self.order.max_keys()
    }

    /// Fewer keys than a non-root node may hold. Only seen mid-delete.
    #[inline]
    pub fn is_underflown(&self) -> bool {
        self.len() < self.order.min_keys()
    }

    /// Exactly `max_keys` keys: one more insert overflows.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.order.max_keys()
    }

    /// Exactly `min_keys` keys: one more removal underflows.
    #[inline]
    pub fn is_min_full(&self) -> bool {
        self.len() == self.order.min_keys()
    }

    /// Exactly `min_keys + 1` keys: the smallest node that can lend a key.
    #[inline]
    pub fn is_min_one_full(&self) -> bool {
        self.len() == self.order.min_keys() + 1
    }

    /// Can give one key to a sibling without underflowing itself.
    #[inline]
    pub fn can_lend(&self) -> bool {
        self.len() > self.order.min_keys()
    }

    // ========================================================================
    // Key mutation
    // ========================================================================

    /// Remove the entry at `index`.
    ///
    /// # Errors
    /// - `Error::IndexOutOfRange` if `index >= len()`
    pub fn remove_key_by_index(&mut self, index: usize) -> Result<(K, V)> {
        if index >= self.entries.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Detach the child at `index`.
    ///
    /// The detached child keeps its stale parent link; the caller re-parents
    /// or frees it.
    ///
    /// # Errors
    /// - `Error::IndexOutOfRange` if `index >= children().len()`
    pub fn remove_child_by_index(&mut self, index: usize) -> Result<NodeId> {
        if index >= self.children.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.children.len(),
            });
        }
        Ok(self.children.remove(index))
    }

    // ========================================================================
    // Split
    // ========================================================================

    /// Split an overflown node.
    ///
    /// Everything after the promotion index `min_keys` moves into a new
    /// right sibling, along with the trailing children. `self` is left with
    /// `min_keys + 1` entries, the last of which is the key to move up
    /// (see [`key_value_to_move_up`](Self::key_value_to_move_up)).
    ///
    /// ```text
    /// order 5, before:  [a b c d e]          children [0 1 2 3 4 5]
    /// after:     self:  [a b c]              children [0 1 2]
    ///         sibling:        [d e]          children       [3 4 5]
    ///                      c moves up
    /// ```
    ///
    /// The parent is not touched. The returned sibling has no parent and
    /// its children still point at `self`; the caller fixes both.
    ///
    /// # Errors
    /// - `Error::NotOverflown` if the node is not overflown
    pub fn split(&mut self) -> Result<Node<K, V>> {
        if !self.is_overflown() {
            return Err(Error::NotOverflown {
                len: self.len(),
                max: self.order.max_keys(),
            });
        }

        let mut sibling = Node::new(self.order);
        sibling.entries = self.entries.split_off(self.order.min_keys() + 1);
        if !self.is_leaf() {
            sibling.children = self.children.split_off(self.order.min_branching());
        }

        Ok(sibling)
    }

    /// The entry to promote into the parent after [`split`](Self::split).
    ///
    /// # Errors
    /// - `Error::NotSplitPoint` unless the node holds exactly `min_keys + 1`
    ///   entries
    pub fn key_value_to_move_up(&self) -> Result<(&K, &V)> {
        self.check_split_point()?;
        let (k, v) = &self.entries[self.order.min_keys()];
        Ok((k, v))
    }

    /// Remove and return the entry to promote after [`split`](Self::split).
    ///
    /// # Errors
    /// - `Error::NotSplitPoint` unless the node holds exactly `min_keys + 1`
    ///   entries
    pub fn take_key_value_to_move_up(&mut self) -> Result<(K, V)> {
        self.check_split_point()?;
        self.remove_key_by_index(self.order.min_keys())
    }

    fn check_split_point(&self) -> Result<()> {
        let expected = self.order.min_keys() + 1;
        if self.len() != expected {
            return Err(Error::NotSplitPoint {
                len: self.len(),
                expected,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Crate-internal mutation (indices already validated by the caller)
    // ========================================================================

    pub(super) fn take_entry(&mut self, index: usize) -> (K, V) {
        self.entries.remove(index)
    }

    pub(super) fn replace_entry(&mut self, index: usize, entry: (K, V)) -> (K, V) {
        std::mem::replace(&mut self.entries[index], entry)
    }
}

impl<K: Ord, V> Node<K, V> {
    /// Binary-search this node's keys.
    ///
    /// Returns `Ok(i)` when `entries[i]` holds `key`, otherwise `Err(i)`
    /// where `i` is both the insertion point and the index of the child
    /// whose range contains `key`.
    pub fn search<Q>(&self, key: &Q) -> std::result::Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries
            .binary_search_by(|(k, _)| k.borrow().cmp(key))
    }

    /// Insert an entry in key order.
    ///
    /// Returns `false` and leaves the node untouched if `key` is already
    /// present. Duplicate rejection with an error happens at the tree level.
    pub fn insert_key_value(&mut self, key: K, value: V) -> bool {
        match self.search(&key) {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(pos, (key, value));
                true
            }
        }
    }

    /// Position a child whose smallest key is `min_key` would occupy.
    pub(super) fn child_rank(&self, min_key: &K) -> usize {
        self.entries
            .partition_point(|(k, _)| k.cmp(min_key) == Ordering::Less)
    }
}
