//! B-tree Scenario Tests
//!
//! End-to-end shape checks for a 2-3 tree (order 3). Every expected count
//! below was worked out by hand from the split/rotate/merge rules.

use mwtree::{BTree, Error};

/// Keys for the fully built tree: 100 ends up alone in the root.
const SIXTEEN_KEYS: [i32; 16] = [
    100, 50, 150, 25, 75, 125, 175, 10, 30, 60, 80, 110, 130, 160, 180, 200,
];

fn build(order: usize, keys: &[i32]) -> BTree<i32, String> {
    BTree::build(order, keys.iter().map(|&k| (k, format!("value-{}", k)))).unwrap()
}

fn keys_of(tree: &BTree<i32, String>) -> Vec<i32> {
    tree.keys().copied().collect()
}

// ============================================================================
// Scenario A: incremental inserts
// ============================================================================

/// Insert one key at a time and track (key count, node count).
#[test]
fn test_incremental_insert_counts() {
    let mut tree = BTree::new(3).unwrap();
    let keys = [50, 10, 100, 200, 20, 300, 30];
    let expected = [(1, 1), (2, 1), (3, 3), (4, 3), (5, 3), (6, 4), (7, 7)];

    for (&key, &(len, nodes)) in keys.iter().zip(expected.iter()) {
        tree.insert(key, key.to_string()).unwrap();
        assert_eq!((tree.len(), tree.node_count()), (len, nodes), "after inserting {}", key);
        tree.validate().unwrap();
    }

    assert_eq!(tree.to_string(), "(50 | (20 | (10) (30)) (200 | (100) (300)))");
}

// ============================================================================
// Scenario B: deleting the root key
// ============================================================================

/// Delete the only key of the root of a four-level tree.
#[test]
fn test_delete_root_key_collapses_one_level() {
    let mut tree = build(3, &SIXTEEN_KEYS);
    assert_eq!(tree.len(), 16);
    assert_eq!(tree.node_count(), 15);
    assert_eq!(tree.height(), 4);

    let root = tree.root_node().unwrap();
    assert_eq!(root.keys().copied().collect::<Vec<_>>(), vec![100]);

    assert!(tree.delete(&100));

    let root = tree.root_node().unwrap();
    assert_eq!(root.len(), 2);
    assert_eq!(root.keys().copied().collect::<Vec<_>>(), vec![50, 110]);
    assert_eq!(tree.len(), 15);
    assert_eq!(tree.node_count(), 11);
    assert_eq!(tree.height(), 3);
    assert_eq!(
        tree.to_string(),
        "(50 110 | (25 | (10) (30)) (75 | (60) (80)) (150 175 | (125 130) (160) (180 200)))"
    );

    let stats = tree.stats().snapshot();
    assert_eq!(stats.root_collapses, 1);
    assert_eq!(stats.rotations, 0);
    tree.validate().unwrap();
}

// ============================================================================
// Scenario C: missing key
// ============================================================================

#[test]
fn test_search_missing_key() {
    let tree = build(3, &SIXTEEN_KEYS);

    assert_eq!(tree.search(&5), Err(Error::KeyNotFound));
    assert_eq!(tree.get(&5), None);
    assert_eq!(tree.search(&75).map(String::as_str), Ok("value-75"));
}

#[test]
fn test_delete_missing_key_changes_nothing() {
    let mut tree = build(3, &SIXTEEN_KEYS);
    let before = tree.to_string();

    assert!(!tree.delete(&5));
    assert_eq!(tree.to_string(), before);
    assert_eq!(tree.len(), 16);
}

// ============================================================================
// Scenario D: delete everything
// ============================================================================

/// Delete all 16 keys in a fixed order, checking counts after every step.
#[test]
fn test_delete_all_keys_empties_tree() {
    let mut tree = build(3, &SIXTEEN_KEYS);
    let order = [30, 180, 100, 10, 160, 75, 200, 50, 130, 25, 110, 60, 150, 80, 125, 175];
    let expected_nodes = [11, 11, 10, 10, 8, 8, 8, 7, 4, 4, 4, 3, 3, 1, 1, 0];

    for (step, (&key, &nodes)) in order.iter().zip(expected_nodes.iter()).enumerate() {
        assert_eq!(tree.remove(&key), Some(format!("value-{}", key)));
        assert_eq!(tree.len(), 15 - step);
        assert_eq!(tree.node_count(), nodes, "after deleting {}", key);
        assert!(!tree.contains_key(&key));
        tree.validate().unwrap();
    }

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.node_count(), 0);
    assert_eq!(tree.height(), 0);
    assert!(tree.in_order_traversal().is_empty());
}

// ============================================================================
// Round trip and traversal
// ============================================================================

/// Inserting then deleting a fresh key restores the traversal.
#[test]
fn test_insert_then_delete_restores_traversal() {
    let mut tree = build(3, &SIXTEEN_KEYS);
    let before = keys_of(&tree);

    for probe in [1, 55, 111, 999] {
        tree.insert(probe, "probe".to_string()).unwrap();
        assert!(tree.delete(&probe));
        assert_eq!(keys_of(&tree), before);
        assert_eq!(tree.search(&150).map(String::as_str), Ok("value-150"));
    }
}

#[test]
fn test_traversal_is_sorted_and_complete() {
    let tree = build(3, &SIXTEEN_KEYS);
    let traversal = tree.in_order_traversal();

    assert_eq!(traversal.len(), SIXTEEN_KEYS.len());
    assert!(traversal.windows(2).all(|w| w[0].0 < w[1].0));

    let mut sorted = SIXTEEN_KEYS.to_vec();
    sorted.sort_unstable();
    assert_eq!(keys_of(&tree), sorted);
}

#[test]
fn test_duplicate_build_fails() {
    let err = BTree::build(3, [(1, ()), (2, ()), (1, ())]).unwrap_err();
    assert_eq!(err, Error::DuplicateKey);
}

#[test]
fn test_update_is_the_only_overwrite() {
    let mut tree = build(3, &SIXTEEN_KEYS);

    assert_eq!(tree.insert(100, "again".into()), Err(Error::DuplicateKey));
    assert_eq!(tree.update(&100, "again".into()), Ok("value-100".to_string()));
    assert_eq!(tree.search(&100).map(String::as_str), Ok("again"));
}

// ============================================================================
// Larger orders
// ============================================================================

#[test]
fn test_many_orders_full_cycle() {
    for order in 3..=9 {
        let mut tree = BTree::new(order).unwrap();
        // interleave low and high keys so both ends split
        let keys: Vec<i32> = (0..200).map(|i| if i % 2 == 0 { i } else { 1000 - i }).collect();
        for &k in &keys {
            tree.insert(k, ()).unwrap();
        }
        tree.validate().unwrap();
        assert_eq!(tree.len(), keys.len());

        for &k in keys.iter().rev() {
            assert!(tree.delete(&k), "order {} key {}", order, k);
        }
        tree.validate().unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
    }
}
