//! Invariant checking.
//!
//! Walks the whole tree and reports every broken rule at once. Meant for
//! tests and debugging: it is O(n) and allocates.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::BTree;

/// One node waiting to be checked, with the open key range it must respect.
struct Frame<'a, K> {
    id: NodeId,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
    depth: usize,
    expected_parent: Option<NodeId>,
}

impl<K: Ord, V> BTree<K, V> {
    /// Check every structural invariant of the tree.
    ///
    /// - non-root nodes hold `min_keys..=max_keys` keys, the root at most
    ///   `max_keys` and at least one
    /// - internal nodes have `len() + 1` children
    /// - keys ascend strictly and stay inside their separators' range
    /// - every child links back to its parent
    /// - all leaves share one depth
    /// - `len()` and `node_count()` match what the walk finds
    ///
    /// # Errors
    /// - `Error::InvariantViolation` listing every problem found
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        let Some(root) = self.root else {
            if self.len != 0 {
                errors.push(format!("empty tree reports len {}", self.len));
            }
            if !self.arena.is_empty() {
                errors.push(format!("empty tree holds {} nodes", self.arena.len()));
            }
            return Self::report(errors);
        };

        let order = self.order;
        let mut leaf_depth: Option<usize> = None;
        let mut keys_seen = 0;
        let mut nodes_seen = 0;
        let mut stack = vec![Frame {
            id: root,
            lower: None,
            upper: None,
            depth: 0,
            expected_parent: None,
        }];

        while let Some(frame) = stack.pop() {
            let Some(node) = self.arena.get(frame.id) else {
                errors.push(format!("{} is linked but not allocated", frame.id));
                continue;
            };
            nodes_seen += 1;
            keys_seen += node.len();

            if node.parent != frame.expected_parent {
                errors.push(format!(
                    "{} has parent {:?}, expected {:?}",
                    frame.id, node.parent, frame.expected_parent
                ));
            }

            if node.len() > order.max_keys() {
                errors.push(format!("{} is overflown with {} keys", frame.id, node.len()));
            }
            let is_root = frame.id == root;
            if is_root && node.is_empty() {
                errors.push(format!("root {} holds no keys", frame.id));
            }
            if !is_root && node.len() < order.min_keys() {
                errors.push(format!("{} is underflown with {} keys", frame.id, node.len()));
            }

            let keys: Vec<&K> = node.keys().collect();
            if keys.windows(2).any(|w| w[0] >= w[1]) {
                errors.push(format!("{} keys are not strictly ascending", frame.id));
            }
            let below_lower = frame.lower.is_some_and(|lo| keys.first().is_some_and(|k| *k <= lo));
            let above_upper = frame.upper.is_some_and(|hi| keys.last().is_some_and(|k| *k >= hi));
            if below_lower || above_upper {
                errors.push(format!("{} keys escape their separator range", frame.id));
            }

            if node.is_leaf() {
                match leaf_depth {
                    None => leaf_depth = Some(frame.depth),
                    Some(depth) if depth != frame.depth => errors.push(format!(
                        "{} is a leaf at depth {}, expected {}",
                        frame.id, frame.depth, depth
                    )),
                    Some(_) => {}
                }
                continue;
            }

            if node.children.len() != node.len() + 1 {
                errors.push(format!(
                    "{} has {} keys but {} children",
                    frame.id,
                    node.len(),
                    node.children.len()
                ));
                continue;
            }

            for (i, &child) in node.children.iter().enumerate() {
                stack.push(Frame {
                    id: child,
                    lower: if i == 0 { frame.lower } else { Some(keys[i - 1]) },
                    upper: keys.get(i).copied().or(frame.upper),
                    depth: frame.depth + 1,
                    expected_parent: Some(frame.id),
                });
            }
        }

        if keys_seen != self.len {
            errors.push(format!("tree reports len {} but holds {} keys", self.len, keys_seen));
        }
        if nodes_seen != self.arena.len() {
            errors.push(format!(
                "arena holds {} nodes but {} are reachable",
                self.arena.len(),
                nodes_seen
            ));
        }

        Self::report(errors)
    }

    fn report(errors: Vec<String>) -> Result<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvariantViolation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Error;
    use crate::index::btree::BTree;

    #[test]
    fn test_valid_trees_pass() {
        let empty: BTree<i32, ()> = BTree::new(3).unwrap();
        empty.validate().unwrap();

        let tree = BTree::build(3, (0..100).map(|k| (k, ()))).unwrap();
        tree.validate().unwrap();
    }

    #[test]
    fn test_detects_out_of_order_keys() {
        let mut tree = BTree::build(3, [10, 20, 30].map(|k| (k, ()))).unwrap();
        let root = tree.root().unwrap();
        let right = tree.arena[root].children[1];
        tree.arena[right].entries[0].0 = 5;

        let err = tree.validate().unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(ref msg) if msg.contains("separator range")));
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = BTree::build(3, [10, 20, 30].map(|k| (k, ()))).unwrap();
        let root = tree.root().unwrap();
        let left = tree.arena[root].children[0];
        tree.arena[left].parent = None;

        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_detects_underflow_and_len_mismatch() {
        let mut tree = BTree::build(3, [10, 20, 30].map(|k| (k, ()))).unwrap();
        let root = tree.root().unwrap();
        let left = tree.arena[root].children[0];
        tree.arena[left].entries.clear();

        let Err(Error::InvariantViolation(msg)) = tree.validate() else {
            panic!("expected an invariant violation");
        };
        assert!(msg.contains("underflown"));
        assert!(msg.contains("reports len 3 but holds 2 keys"));
    }
}
