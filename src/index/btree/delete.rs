//! Deletion with rotation and merge.
//!
//! Keys are physically removed from leaves only. Deleting an internal key
//! swaps in its in-order successor (the smallest key of the right subtree)
//! and removes that successor from its leaf instead.
//!
//! Removing a key can leave a non-root node underflown. The fixup runs as a
//! small state machine that climbs parent links:
//!
//! ```text
//!   Underflown(node) ──rotate from a sibling that can lend──▶ Balanced
//!          │
//!          └──merge with a sibling──▶ Underflown(parent)   (repeat)
//!                                       │
//!                                       └─ parent is an empty root
//!                                          ─▶ merged node becomes root
//! ```
//!
//! The left sibling wins whenever both siblings qualify.

use std::borrow::Borrow;

use crate::common::NodeId;
use crate::index::btree::BTree;

impl<K: Ord, V> BTree<K, V> {
    /// Remove `key` and return its value, or `None` if it was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (node, index) = self.find_node(key).ok()?;

        let (leaf, removed) = if self.arena[node].is_leaf() {
            (node, self.arena[node].take_entry(index))
        } else {
            let successor_leaf = self.leftmost_leaf(self.arena[node].children[index + 1]);
            let successor = self.arena[successor_leaf].take_entry(0);
            (successor_leaf, self.arena[node].replace_entry(index, successor))
        };
        self.len -= 1;

        self.rebalance_upward(leaf);
        Some(removed.1)
    }

    /// Remove `key`. Returns `false` if it was absent.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Resolve underflow starting at `current` and climbing toward the root.
    fn rebalance_upward(&mut self, mut current: NodeId) {
        loop {
            let Some(parent) = self.arena[current].parent else {
                // An empty root leaf means the tree is empty. An internal
                // root never gets here empty: merge collapses it first.
                if self.arena[current].is_empty() && self.arena[current].is_leaf() {
                    self.arena.free(current);
                    self.root = None;
                }
                return;
            };

            if !self.arena[current].is_underflown() {
                return;
            }

            let Some(index) = self.arena.child_index(current) else {
                panic!("{} is missing from its parent's children", current);
            };
            let left = self.arena.left_sibling(current);
            let right = self.arena.right_sibling(current);

            if let Some(left) = left.filter(|&l| self.arena[l].can_lend()) {
                self.rotate_from_left(current, left, parent, index - 1);
                return;
            }
            if let Some(right) = right.filter(|&r| self.arena[r].can_lend()) {
                self.rotate_from_right(current, right, parent, index);
                return;
            }

            let survivor = match (left, right) {
                (Some(left), _) => self.merge(left, current, parent, index - 1),
                (None, Some(right)) => self.merge(current, right, parent, index),
                (None, None) => panic!("{} has a parent but no siblings", current),
            };

            if self.root == Some(parent) && self.arena[parent].is_empty() {
                self.collapse_root(parent, survivor);
                return;
            }
            current = parent;
        }
    }

    /// Borrow the last key of `left` through the parent separator.
    ///
    /// ```text
    ///        (  s  )                (  b  )
    ///       /       \      ──▶     /       \
    ///   (a b)       ( )         (a)        (s)
    ///    .. x                    ..        x
    /// ```
    fn rotate_from_left(&mut self, node: NodeId, left: NodeId, parent: NodeId, separator: usize) {
        debug_assert_eq!(self.arena[node].is_leaf(), self.arena[left].is_leaf());

        let last = self.arena[left].len() - 1;
        let borrowed = self.arena[left].take_entry(last);
        let separator = self.arena[parent].replace_entry(separator, borrowed);
        self.arena[node].entries.insert(0, separator);

        if let Some(child) = self.arena[left].children.pop() {
            self.arena[node].children.insert(0, child);
            self.arena[child].parent = Some(node);
        }

        tracing::debug!(node = %node, from = %left, "rotated key from left sibling");
        self.stats.record_rotation();
    }

    /// Borrow the first key of `right` through the parent separator.
    fn rotate_from_right(
        &mut self,
        node: NodeId,
        right: NodeId,
        parent: NodeId,
        separator: usize,
    ) {
        debug_assert_eq!(self.arena[node].is_leaf(), self.arena[right].is_leaf());

        let borrowed = self.arena[right].take_entry(0);
        let separator = self.arena[parent].replace_entry(separator, borrowed);
        self.arena[node].entries.push(separator);

        if !self.arena[right].is_leaf() {
            let child = self.arena[right].children.remove(0);
            self.arena[node].children.push(child);
            self.arena[child].parent = Some(node);
        }

        tracing::debug!(node = %node, from = %right, "rotated key from right sibling");
        self.stats.record_rotation();
    }

    /// Fold `right` and the separator between them into `left`.
    ///
    /// Frees `right` and returns `left`. The parent loses one key and one
    /// child, so it may underflow next.
    fn merge(&mut self, left: NodeId, right: NodeId, parent: NodeId, separator: usize) -> NodeId {
        let separator = self.arena[parent].take_entry(separator);
        self.arena[parent].children.retain(|&c| c != right);

        let Some(absorbed) = self.arena.free(right) else {
            panic!("{} is not allocated", right);
        };

        let survivor = &mut self.arena[left];
        survivor.entries.push(separator);
        survivor.entries.extend(absorbed.entries);
        survivor.children.extend(absorbed.children);
        self.arena.adopt_children(left);

        let collapsed_root = self.root == Some(parent) && self.arena[parent].is_empty();
        tracing::debug!(node = %left, absorbed = %right, "merged siblings");
        self.stats.record_merge(collapsed_root);
        left
    }

    /// Replace an emptied root with its only remaining child.
    fn collapse_root(&mut self, old_root: NodeId, new_root: NodeId) {
        self.arena.free(old_root);
        self.arena[new_root].parent = None;
        self.root = Some(new_root);

        tracing::debug!(root = %new_root, height = self.height(), "collapsed root");
    }
}
