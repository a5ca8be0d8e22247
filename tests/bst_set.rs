use std::collections::BTreeSet;

use bst_calc::BstSet;
use bst_calc::bst_set;
use proptest::prelude::*;

/// The number of values fed to each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -3_000i64..3_000i64
}

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(value_strategy(), 0..TEST_SIZE)
}

fn items(set: &BstSet<i64>) -> Vec<i64> {
    set.iter().copied().collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Contains(i64),
    Clear,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        10 => value_strategy().prop_map(SetOp::Insert),
        5 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::Clear),
    ]
}

// ─── Construction, insert, contains ──────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random insert/contains/clear operations on both BstSet and
    /// BTreeSet and asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut bst: BstSet<i64> = BstSet::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(bst.insert(*v), model.insert(*v), "insert({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(bst.contains(v), model.contains(v), "contains({})", v);
                }
                SetOp::Clear => {
                    bst.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(bst.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(bst.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }
    }

    /// In-order traversal is strictly ascending whatever the insertion order.
    #[test]
    fn iter_is_strictly_ascending(values in values_strategy()) {
        let bst: BstSet<i64> = values.iter().copied().collect();
        let model: BTreeSet<i64> = values.iter().copied().collect();

        let walked = items(&bst);
        prop_assert!(walked.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(walked, model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(bst.iter().len(), model.len());
        prop_assert_eq!(bst.first(), model.first());
        prop_assert_eq!(bst.last(), model.last());
    }

    /// Inserting a value a second time changes nothing.
    #[test]
    fn insert_is_idempotent(values in values_strategy(), v in value_strategy()) {
        let mut once: BstSet<i64> = values.iter().copied().collect();
        once.insert(v);
        let mut twice = once.deep_copy();
        prop_assert!(!twice.insert(v));
        prop_assert_eq!(items(&once), items(&twice));
        prop_assert_eq!(once.height(), twice.height());
    }

    /// Every traversal starts over from the smallest element.
    #[test]
    fn iter_is_restartable(values in values_strategy()) {
        let bst: BstSet<i64> = values.into_iter().collect();
        let mut partial = bst.iter();
        partial.next();
        prop_assert_eq!(bst.iter().copied().collect::<Vec<_>>(), items(&bst));
        prop_assert_eq!(partial.len(), bst.len().saturating_sub(1));
    }
}

// ─── Derived sets ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Union leaves `other` alone and matches BTreeSet's union.
    #[test]
    fn union_matches_btreeset(a in values_strategy(), b in values_strategy()) {
        let mut x: BstSet<i64> = a.iter().copied().collect();
        let y: BstSet<i64> = b.iter().copied().collect();
        let y_before = items(&y);

        x.union_with(&y);

        let a: BTreeSet<i64> = a.into_iter().collect();
        let b: BTreeSet<i64> = b.into_iter().collect();
        prop_assert_eq!(items(&x), a.union(&b).copied().collect::<Vec<_>>());
        prop_assert_eq!(items(&y), y_before);
    }

    /// A ∪ B and B ∪ A hold the same elements.
    #[test]
    fn union_is_commutative(a in values_strategy(), b in values_strategy()) {
        let a: BstSet<i64> = a.into_iter().collect();
        let b: BstSet<i64> = b.into_iter().collect();

        let mut ab = a.deep_copy();
        ab.union_with(&b);
        let mut ba = b.deep_copy();
        ba.union_with(&a);

        prop_assert_eq!(items(&ab), items(&ba));
        prop_assert_eq!(ab, ba);
    }

    /// Union with an empty set or with a copy of itself is a no-op.
    #[test]
    fn union_is_idempotent(a in values_strategy()) {
        let mut x: BstSet<i64> = a.into_iter().collect();
        let before = items(&x);
        let height = x.height();

        x.union_with(&BstSet::new());
        let itself = x.deep_copy();
        x.union_with(&itself);

        prop_assert_eq!(items(&x), before);
        prop_assert_eq!(x.height(), height);
    }

    /// e ∈ A ∩ B iff e was in A and e is in B.
    #[test]
    fn intersection_matches_btreeset(a in values_strategy(), b in values_strategy()) {
        let mut x: BstSet<i64> = a.iter().copied().collect();
        let y: BstSet<i64> = b.iter().copied().collect();
        let y_before = items(&y);

        x.intersect_with(&y);

        let a: BTreeSet<i64> = a.into_iter().collect();
        let b: BTreeSet<i64> = b.into_iter().collect();
        prop_assert_eq!(items(&x), a.intersection(&b).copied().collect::<Vec<_>>());
        prop_assert_eq!(items(&y), y_before);
    }

    /// Mutating a copy does not touch the original, and vice versa.
    #[test]
    fn deep_copy_is_independent(values in values_strategy(), extra in value_strategy()) {
        let mut original: BstSet<i64> = values.into_iter().collect();
        let before = items(&original);

        let mut copy = original.deep_copy();
        prop_assert_eq!(copy.height(), original.height());
        prop_assert_eq!(&copy, &original);

        copy.insert(extra);
        prop_assert_eq!(items(&original), before.clone());

        original.clear();
        prop_assert!(copy.contains(&extra));
        prop_assert!(before.iter().all(|v| copy.contains(v)));
    }

    /// `apply` visits elements in ascending order and never mutates the set.
    #[test]
    fn apply_maps_in_order(values in values_strategy()) {
        let bst: BstSet<i64> = values.into_iter().collect();
        let before = items(&bst);

        let squared = bst.apply(|v| Ok::<_, ()>(v * v)).unwrap();
        prop_assert_eq!(squared, before.iter().map(|v| v * v).collect::<Vec<_>>());
        prop_assert_eq!(items(&bst), before);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn duplicate_insert_is_ignored() {
    let mut x = BstSet::new();
    for v in [5, 3, 8, 3] {
        x.insert(v);
    }
    assert_eq!(items(&x), [3, 5, 8]);
}

#[test]
fn intersection_scenario() {
    let mut x = BstSet::from([1, 2, 3]);
    let y = BstSet::from([2, 3, 4]);
    x.intersect_with(&y);
    assert_eq!(items(&x), [2, 3]);
    assert_eq!(items(&y), [2, 3, 4]);
}

#[test]
fn union_scenario() {
    let mut x = BstSet::from([1, 2]);
    let y = BstSet::from([2, 3]);
    x.union_with(&y);
    assert_eq!(items(&x), [1, 2, 3]);
    assert_eq!(items(&y), [2, 3]);
}

#[test]
fn apply_scenario() {
    let x = BstSet::from([5, 1, 9]);
    assert_eq!(x.apply(|v| Ok::<_, ()>(v * 2)), Ok(vec![2, 10, 18]));
}

#[test]
fn intersect_with_empty_empties() {
    let mut x = BstSet::from([1, 2, 3]);
    x.intersect_with(&BstSet::new());
    assert!(x.is_empty());
    assert_eq!(x.render(), "null\n");

    let mut empty: BstSet<i64> = BstSet::new();
    empty.intersect_with(&BstSet::from([1]));
    assert!(empty.is_empty());
}

#[test]
fn empty_set_queries() {
    let empty: BstSet<i64> = BstSet::new();
    assert_eq!(empty.render(), "null\n");
    assert!(!empty.contains(&0));
    assert_eq!(empty.iter().next(), None);
    assert_eq!(empty.height(), 0);
    assert_eq!(empty.apply(|v| Ok::<_, ()>(*v)), Ok(vec![]));
    assert!(empty.deep_copy().is_empty());
}

#[test]
fn render_is_space_separated() {
    assert_eq!(BstSet::from([3, -1, 2]).render(), "-1 2 3\n");
    assert_eq!(BstSet::from([42]).render(), "42\n");
    assert_eq!(BstSet::from(["pear", "apple"]).render(), "apple pear\n");
}

// ─── Degenerate trees ────────────────────────────────────────────────────────

/// The number of values inserted in sorted order.
const CHAIN_LEN: usize = 5_000;

#[test]
fn sorted_inserts_build_a_chain() {
    let ascending: BstSet<i64> = (0..CHAIN_LEN as i64).collect();
    assert_eq!(ascending.height(), CHAIN_LEN);
    assert!(ascending.iter().copied().eq(0..CHAIN_LEN as i64));

    let descending: BstSet<i64> = (0..CHAIN_LEN as i64).rev().collect();
    assert_eq!(descending.height(), CHAIN_LEN);
    assert_eq!(descending.first(), Some(&0));
}

#[test]
fn chain_survives_copy_and_drop() {
    let chain: BstSet<i64> = (0..CHAIN_LEN as i64).collect();
    let copy = chain.deep_copy();
    assert_eq!(copy.height(), CHAIN_LEN);
    assert_eq!(copy.len(), CHAIN_LEN);
    drop(chain);
    assert!(copy.contains(&(CHAIN_LEN as i64 - 1)));
}

#[test]
fn chain_iter_reports_exact_len() {
    let chain: BstSet<i64> = (0..CHAIN_LEN as i64).rev().collect();
    let mut iter: bst_set::Iter<'_, i64> = chain.iter();
    assert_eq!(iter.len(), CHAIN_LEN);
    assert_eq!(iter.nth(CHAIN_LEN - 1), Some(&(CHAIN_LEN as i64 - 1)));
    assert_eq!(iter.len(), 0);
    assert_eq!(iter.next(), None);
}
