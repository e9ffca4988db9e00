//! In-order traversal.

use std::iter::FusedIterator;

use crate::common::NodeId;
use crate::index::btree::{BTree, NodeArena};

/// Iterator over the entries of a [`BTree`] in ascending key order.
///
/// Walks the tree with an explicit stack of `(node, next entry)` frames, so
/// memory use is one frame per level. Every call to [`BTree::iter`] starts
/// a fresh walk.
pub struct Iter<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a BTree<K, V>) -> Self {
        let mut iter = Self {
            arena: &tree.arena,
            stack: Vec::with_capacity(tree.height()),
            remaining: tree.len(),
        };
        if let Some(root) = tree.root {
            iter.push_left_spine(root);
        }
        iter
    }

    /// Push `id` and every first-child below it.
    fn push_left_spine(&mut self, mut id: NodeId) {
        let arena = self.arena;
        loop {
            self.stack.push((id, 0));
            match arena[id].children.first() {
                Some(&child) => id = child,
                None => break,
            }
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena: &'a NodeArena<K, V> = self.arena;
        loop {
            let (id, index) = *self.stack.last()?;
            let node = &arena[id];

            if index >= node.len() {
                self.stack.pop();
                continue;
            }

            if let Some(top) = self.stack.last_mut() {
                top.1 += 1;
            }
            if let Some(&right) = node.children.get(index + 1) {
                self.push_left_spine(right);
            }

            self.remaining -= 1;
            let (k, v) = &node.entries[index];
            return Some((k, v));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> BTree<K, V> {
    /// Iterate all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Iterate all keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate all values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Collect every entry in ascending key order.
    pub fn in_order_traversal(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a BTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
