//! Node arena - owns every node of a tree.
//!
//! Nodes are addressed by [`NodeId`]. Parent and child links are ids into
//! this arena, so each node has exactly one owner (the arena) no matter how
//! many links point at it.

use std::ops::{Index, IndexMut};

use crate::common::{Error, NodeId, Result};
use crate::index::btree::Node;

/// Slot storage for the nodes of one tree.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │                      NodeArena                       │
/// │  ┌────────────────────────────────────────────────┐  │
/// │  │    slots: Vec<Option<Node>>                    │  │
/// │  │  [Some(root)] [Some(leaf)] [None] [Some(..)]   │  │
/// │  └────────────────────────────────────────────────┘  │
/// │  ┌──────────────┐                                    │
/// │  │  free_list   │  ids of `None` slots, LIFO          │
/// │  │ Vec<NodeId>  │                                    │
/// │  └──────────────┘                                    │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// Indexing with a freed id panics: it means a stale link survived a merge.
#[derive(Debug)]
pub struct NodeArena<K, V> {
    /// Node storage. `None` marks a freed slot.
    slots: Vec<Option<Node<K, V>>>,

    /// Stack of free slot ids (LIFO, so the hottest slot is reused first).
    free_list: Vec<NodeId>,

    /// Number of occupied slots.
    live: usize,
}

impl<K, V> NodeArena<K, V> {
    /// Create an arena with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.live += 1;
        match self.free_list.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Remove a node from the arena and hand it back.
    ///
    /// Returns `None` if the slot is already free.
    pub fn free(&mut self, id: NodeId) -> Option<Node<K, V>> {
        let node = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        self.free_list.push(id);
        Some(node)
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.live = 0;
    }

    /// Get a node by id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Get a node by id for mutation.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the arena holds no live nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of freed slots waiting for reuse.
    #[inline]
    pub fn free_slot_count(&self) -> usize {
        self.free_list.len()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Parent of `id`, or `None` for a root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Position of `id` in its parent's child list.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self[parent].children.iter().position(|&c| c == id)
    }

    /// The sibling immediately to the left of `id`.
    pub fn left_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        index.checked_sub(1).map(|i| self[parent].children[i])
    }

    /// The sibling immediately to the right of `id`.
    pub fn right_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        self[parent].children.get(index + 1).copied()
    }

    #[inline]
    pub fn has_left_sibling(&self, id: NodeId) -> bool {
        self.left_sibling(id).is_some()
    }

    #[inline]
    pub fn has_right_sibling(&self, id: NodeId) -> bool {
        self.right_sibling(id).is_some()
    }

    /// Point every child of `parent` back at `parent`.
    ///
    /// Called after children changed hands in a split or merge.
    pub fn adopt_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self[parent].children);
        for &child in &children {
            self[child].parent = Some(parent);
        }
        self[parent].children = children;
    }
}

impl<K: Ord, V> NodeArena<K, V> {
    /// Attach `child` under `parent`, ranked by the child's smallest key.
    ///
    /// Sets the child's parent link. Returns the index the child landed at.
    ///
    /// When attaching several children to a fresh node, attach them left to
    /// right.
    ///
    /// # Errors
    /// - `Error::IndexOutOfRange` if `child` holds no keys to rank it by, or
    ///   its rank leaves a gap in `parent`'s child list
    /// - `Error::DuplicateChild` if `child` is already attached, or another
    ///   child with the same smallest key occupies its slot
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId) -> Result<usize> {
        let index = {
            let min_key = self[child]
                .min_key()
                .ok_or(Error::IndexOutOfRange { index: 0, len: 0 })?;
            let parent_node = &self[parent];

            if parent_node.children.contains(&child) {
                return Err(Error::DuplicateChild);
            }

            let index = parent_node.child_rank(min_key);
            if index > parent_node.children.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    len: parent_node.children.len(),
                });
            }
            if let Some(&occupant) = parent_node.children.get(index) {
                if self[occupant].min_key() == Some(min_key) {
                    return Err(Error::DuplicateChild);
                }
            }
            index
        };

        self[parent].children.insert(index, child);
        self[child].parent = Some(parent);
        Ok(index)
    }
}

impl<K, V> Index<NodeId> for NodeArena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Node<K, V> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{} is not allocated", id),
        }
    }
}

impl<K, V> IndexMut<NodeId> for NodeArena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("{} is not allocated", id),
        }
    }
}
