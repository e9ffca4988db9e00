//! Insertion with cascading splits.
//!
//! A new key always lands in a leaf. If that overflows the leaf, the leaf
//! splits and pushes its middle key into the parent, which may overflow in
//! turn. The cascade climbs parent links in a loop and stops at the first
//! node that still fits, or grows a new root.
//!
//! ```text
//! order 3, insert 30:
//!
//!          (20 50 200)  <- overflown after the leaf split
//!     (10) (30) (100) (300)
//!
//!                  (50)
//!           (20)          (200)
//!        (10) (30)     (100) (300)
//! ```

use crate::common::{Error, NodeId, Result};
use crate::index::btree::{BTree, Node};

impl<K: Ord, V> BTree<K, V> {
    /// Insert a new key-value pair.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already stored (the tree is left
    ///   unchanged; use [`update`](Self::update) to overwrite)
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let Some(leaf) = self.find_leaf_to_insert_key(&key)? else {
            let mut root = Node::new(self.order);
            root.insert_key_value(key, value);
            self.root = Some(self.arena.alloc(root));
            self.len = 1;
            return Ok(());
        };

        if !self.arena[leaf].insert_key_value(key, value) {
            return Err(Error::DuplicateKey);
        }
        self.len += 1;

        self.split_upward(leaf)
    }

    /// Split `current` and its ancestors until nothing is overflown.
    fn split_upward(&mut self, mut current: NodeId) -> Result<()> {
        while self.arena[current].is_overflown() {
            let sibling = self.arena[current].split()?;
            let (key, value) = self.arena[current].take_key_value_to_move_up()?;

            let sibling = self.arena.alloc(sibling);
            self.arena.adopt_children(sibling);

            let parent = self.arena[current].parent;
            match parent {
                Some(parent) => {
                    tracing::debug!(node = %current, sibling = %sibling, "split node");
                    self.stats.record_split(false);

                    self.arena[parent].insert_key_value(key, value);
                    self.arena.insert_child(parent, sibling)?;
                    current = parent;
                }
                None => {
                    let mut root = Node::new(self.order);
                    root.insert_key_value(key, value);
                    let root = self.arena.alloc(root);

                    self.arena.insert_child(root, current)?;
                    self.arena.insert_child(root, sibling)?;
                    self.root = Some(root);

                    tracing::debug!(
                        root = %root,
                        order = %self.order,
                        height = self.height(),
                        "split root"
                    );
                    self.stats.record_split(true);
                    break;
                }
            }
        }
        Ok(())
    }
}
