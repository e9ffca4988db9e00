//! BTree - the balanced search tree engine.
//!
//! This file holds construction, lookups and accessors. Mutation lives next
//! door: [`insert`](super::insert) grows the tree through splits and
//! [`delete`](super::delete) shrinks it through rotations and merges.

use std::borrow::Borrow;
use std::fmt;

use crate::common::config::DEFAULT_ARENA_CAPACITY;
use crate::common::{Error, NodeId, Order, Result};
use crate::index::btree::{Node, NodeArena, TreeStats};

/// An in-memory B-tree of order `M`.
///
/// # Architecture
/// ```text
/// ┌────────────────────────────────────────────────────────────┐
/// │                          BTree                             │
/// │  root: Option<NodeId> ───┐                                 │
/// │                          ▼                                 │
/// │  ┌──────────────────────────────────────────────────────┐  │
/// │  │ arena: NodeArena      [ 20 | 50 ]                     │  │
/// │  │                      /     |     \                    │  │
/// │  │                 [10]    [30 40]   [60]                │  │
/// │  │   child links: NodeId, parent links: NodeId (no owner)│  │
/// │  └──────────────────────────────────────────────────────┘  │
/// │  order: Order     len: usize     stats: TreeStats          │
/// └────────────────────────────────────────────────────────────┘
/// ```
///
/// # Invariants (after every completed operation)
/// - every non-root node holds between `min_keys` and `max_keys` keys
/// - an internal node has exactly one more child than it has keys
/// - keys are strictly ascending and child `i` only holds keys between
///   separators `i - 1` and `i`
/// - all leaves sit at the same depth
///
/// [`validate`](BTree::validate) checks all of them.
///
/// # Thread Safety
/// None of its own. A multithreaded host serializes access with one lock
/// around the whole tree.
///
/// # Usage
/// ```
/// use mwtree::BTree;
///
/// let mut tree = BTree::new(3)?;
/// tree.insert(50, "fifty")?;
/// tree.insert(10, "ten")?;
///
/// assert_eq!(tree.search(&50)?, &"fifty");
/// assert!(tree.search(&5).is_err());
/// assert!(tree.delete(&10));
/// # Ok::<(), mwtree::Error>(())
/// ```
#[derive(Debug)]
pub struct BTree<K, V> {
    /// Owner of every node.
    pub(super) arena: NodeArena<K, V>,

    /// The root node, or `None` for an empty tree.
    pub(super) root: Option<NodeId>,

    /// Maximum branching degree, fixed for the lifetime of the tree.
    pub(super) order: Order,

    /// Number of key-value pairs stored.
    pub(super) len: usize,

    /// Structural counters.
    pub(super) stats: TreeStats,
}

impl<K, V> BTree<K, V> {
    /// Create an empty tree of the given order.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order` is below
    ///   [`MIN_ORDER`](crate::common::config::MIN_ORDER)
    pub fn new(order: usize) -> Result<Self> {
        let order = Order::new(order)?;
        Ok(Self::with_order(order))
    }

    /// Create an empty tree from an already validated order.
    pub fn with_order(order: Order) -> Self {
        Self {
            arena: NodeArena::with_capacity(DEFAULT_ARENA_CAPACITY),
            root: None,
            order,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Shape and info
    // ========================================================================

    /// The order this tree was created with.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of key-value pairs stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Id of the root node.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look at a node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.arena.get(id)
    }

    /// The root node itself.
    pub fn root_node(&self) -> Option<&Node<K, V>> {
        self.root.and_then(|id| self.arena.get(id))
    }

    /// Number of levels. An empty tree has height 0, a lone leaf height 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(id) = current {
            height += 1;
            current = self.arena[id].children.first().copied();
        }
        height
    }

    /// Structural statistics.
    #[inline]
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Remove everything. The order and statistics are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// The smallest entry.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let leaf = self.leftmost_leaf(self.root?);
        self.arena[leaf].entries.first().map(|(k, v)| (k, v))
    }

    /// The largest entry.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut current = self.root?;
        while let Some(&last) = self.arena[current].children.last() {
            current = last;
        }
        self.arena[current].entries.last().map(|(k, v)| (k, v))
    }

    /// Descend along first children to a leaf.
    pub(super) fn leftmost_leaf(&self, mut current: NodeId) -> NodeId {
        while let Some(&first) = self.arena[current].children.first() {
            current = first;
        }
        current
    }
}

impl<K: Ord, V> BTree<K, V> {
    /// Build a tree by inserting `entries` in order.
    ///
    /// Insertion order decides the final shape, never the invariants.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order` is too small
    /// - `Error::DuplicateKey` on the first repeated key
    pub fn build<I>(order: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::new(order)?;
        for (key, value) in entries {
            tree.insert(key, value)?;
        }
        Ok(tree)
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Locate the node and slot holding `key`.
    ///
    /// Binary-searches each node on the way down and descends into the child
    /// whose range contains `key`.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the search ends at a leaf without a match
    pub fn find_node<Q>(&self, key: &Q) -> Result<(NodeId, usize)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.ok_or(Error::KeyNotFound)?;
        loop {
            let node = &self.arena[current];
            match node.search(key) {
                Ok(index) => return Ok((current, index)),
                Err(_) if node.is_leaf() => return Err(Error::KeyNotFound),
                Err(index) => current = node.children[index],
            }
        }
    }

    /// Look up the value stored under `key`.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if `key` is absent
    pub fn search<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.stats.record_lookup();
        let (id, index) = self.find_node(key)?;
        Ok(&self.arena[id].entries[index].1)
    }

    /// Like [`search`](Self::search), returning `None` when absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).ok()
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.stats.record_lookup();
        let (id, index) = self.find_node(key).ok()?;
        Some(&mut self.arena[id].entries[index].1)
    }

    /// Whether `key` is stored in the tree.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_ok()
    }

    /// Find the leaf a new `key` belongs in.
    ///
    /// Unlike [`find_node`](Self::find_node) this keeps descending past
    /// internal nodes, and a match anywhere on the path is an error.
    /// Returns `Ok(None)` for an empty tree.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already stored
    pub fn find_leaf_to_insert_key(&self, key: &K) -> Result<Option<NodeId>> {
        let Some(mut current) = self.root else {
            return Ok(None);
        };
        loop {
            let node = &self.arena[current];
            match node.search(key) {
                Ok(_) => return Err(Error::DuplicateKey),
                Err(_) if node.is_leaf() => {
                    tracing::trace!(leaf = %current, "selected leaf for insert");
                    return Ok(Some(current));
                }
                Err(index) => current = node.children[index],
            }
        }
    }

    // ========================================================================
    // Public API: Overwrite
    // ========================================================================

    /// Replace the value of an existing key, returning the old value.
    ///
    /// This is the only way to overwrite: [`insert`](Self::insert) rejects
    /// keys that are already present.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if `key` is absent
    pub fn update(&mut self, key: &K, value: V) -> Result<V> {
        let (id, index) = self.find_node(key)?;
        Ok(std::mem::replace(&mut self.arena[id].entries[index].1, value))
    }
}

impl<K, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::with_order(Order::default())
    }
}

/// Renders the tree shape as nested parentheses.
///
/// ```
/// use mwtree::BTree;
///
/// let tree = BTree::build(3, [50, 10, 100].map(|k| (k, ()))).unwrap();
/// assert_eq!(tree.to_string(), "(50 | (10) (100))");
/// ```
impl<K: fmt::Display, V> fmt::Display for BTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            None => write!(f, "()"),
            Some(root) => self.fmt_node(f, root),
        }
    }
}

impl<K: fmt::Display, V> BTree<K, V> {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = &self.arena[id];
        write!(f, "(")?;
        for (i, key) in node.keys().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", key)?;
        }
        if !node.is_leaf() {
            write!(f, " |")?;
            for &child in &node.children {
                write!(f, " ")?;
                self.fmt_node(f, child)?;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(order: usize, keys: &[i32]) -> BTree<i32, String> {
        BTree::build(order, keys.iter().map(|&k| (k, format!("v{}", k)))).unwrap()
    }

    #[test]
    fn test_new_rejects_small_order() {
        assert_eq!(
            BTree::<i32, i32>::new(2).unwrap_err(),
            Error::InvalidOrder(2)
        );
        assert!(BTree::<i32, i32>::new(1).is_err());
        assert!(BTree::<i32, i32>::new(3).is_ok());
    }

    #[test]
    fn test_empty_tree() {
        let tree: BTree<i32, i32> = BTree::new(3).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.search(&1).unwrap_err(), Error::KeyNotFound);
        assert_eq!(tree.find_leaf_to_insert_key(&1).unwrap(), None);
        assert_eq!(tree.first_key_value(), None);
        assert_eq!(tree.to_string(), "()");
    }

    #[test]
    fn test_default_uses_default_order() {
        let tree: BTree<i32, i32> = BTree::default();
        assert_eq!(tree.order().get(), crate::common::config::DEFAULT_ORDER);
    }

    #[test]
    fn test_search_descends() {
        let tree = tree(3, &[50, 10, 100, 200, 20, 300, 30]);
        assert_eq!(tree.search(&30).unwrap(), "v30");
        assert_eq!(tree.search(&50).unwrap(), "v50");
        assert_eq!(tree.get(&300).map(String::as_str), Some("v300"));
        assert_eq!(tree.search(&5).unwrap_err(), Error::KeyNotFound);
        assert!(!tree.contains_key(&250));
    }

    #[test]
    fn test_find_node_reports_slot() {
        let tree = tree(3, &[50, 10, 100]);
        let root = tree.root().unwrap();
        assert_eq!(tree.find_node(&50).unwrap(), (root, 0));

        let (leaf, index) = tree.find_node(&100).unwrap();
        assert_ne!(leaf, root);
        assert_eq!(index, 0);
        assert!(tree.node(leaf).unwrap().is_leaf());
    }

    #[test]
    fn test_find_leaf_rejects_internal_duplicate() {
        let tree = tree(3, &[50, 10, 100]);
        assert_eq!(
            tree.find_leaf_to_insert_key(&50).unwrap_err(),
            Error::DuplicateKey
        );
        assert_eq!(
            tree.find_leaf_to_insert_key(&10).unwrap_err(),
            Error::DuplicateKey
        );

        let leaf = tree.find_leaf_to_insert_key(&70).unwrap().unwrap();
        assert_eq!(tree.node(leaf).unwrap().min_key(), Some(&100));
    }

    #[test]
    fn test_update_overwrites() {
        let mut tree = tree(3, &[1, 2, 3]);
        assert_eq!(tree.update(&2, "two".into()).unwrap(), "v2");
        assert_eq!(tree.search(&2).unwrap(), "two");
        assert_eq!(
            tree.update(&9, "nine".into()).unwrap_err(),
            Error::KeyNotFound
        );
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_get_mut() {
        let mut tree = tree(3, &[1, 2, 3]);
        if let Some(v) = tree.get_mut(&3) {
            v.push('!');
        }
        assert_eq!(tree.search(&3).unwrap(), "v3!");
        assert!(tree.get_mut(&4).is_none());
    }

    #[test]
    fn test_first_and_last() {
        let tree = tree(3, &[50, 10, 100, 200, 20, 300, 30]);
        assert_eq!(tree.first_key_value().map(|(k, _)| *k), Some(10));
        assert_eq!(tree.last_key_value().map(|(k, _)| *k), Some(300));
    }

    #[test]
    fn test_height_and_clear() {
        let mut tree = tree(3, &[50, 10, 100, 200, 20, 300, 30]);
        assert_eq!(tree.height(), 3);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_display_shape() {
        let tree = tree(3, &[50, 10, 100, 200, 20, 300, 30]);
        assert_eq!(
            tree.to_string(),
            "(50 | (20 | (10) (30)) (200 | (100) (300)))"
        );
    }

    #[test]
    fn test_lookups_are_counted() {
        let tree = tree(3, &[1, 2]);
        let _ = tree.get(&1);
        let _ = tree.contains_key(&9);
        assert_eq!(tree.stats().snapshot().lookups, 2);
    }
}
