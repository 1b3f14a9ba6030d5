use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use crate::alloc::{Allocator, MallocPool, PoolConfig};
use crate::collections::binary_tree::{RBTree, TreeMap, TreeSet};
use crate::collections::hash::{HashMap, HashTable};

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    PopFirst,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A narrow key range so that removals and replacements actually hit.
    let key = 0u16..256;
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        20 => key.prop_map(Op::Get),
        5 => Just(Op::PopFirst),
    ];
    prop::collection::vec(op, 0..400)
}

fn set_strategy() -> impl Strategy<Value = BTreeSet<u8>> {
    prop::collection::btree_set(any::<u8>(), 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_tree_map_equivalence(ops in ops_strategy()) {
        let mut t: TreeMap<u16, u32> = TreeMap::new();
        let mut m: BTreeMap<u16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(t.insert(key, value), m.insert(key, value));
                },
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), m.remove(&key));
                },
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                },
                Op::PopFirst => {
                    prop_assert_eq!(t.pop_first(), m.pop_first());
                },
            }
            prop_assert_eq!(t.len(), m.len());
        }

        t.tree.validate();
        let got: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, u32)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_hash_map_equivalence(ops in ops_strategy()) {
        let pool = MallocPool::new(PoolConfig::for_layout(32, HashTable::<(u16, u32)>::node_layout()));
        let mut h = HashMap::new_in(&pool);
        let mut m: BTreeMap<u16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(h.insert(key, value), m.insert(key, value));
                },
                Op::Remove(key) => {
                    prop_assert_eq!(h.remove(&key), m.remove(&key));
                },
                Op::Get(key) => {
                    prop_assert_eq!(h.get(&key), m.get(&key));
                },
                Op::PopFirst => {
                    if let Some((key, value)) = m.pop_first() {
                        prop_assert_eq!(h.remove(&key), Some(value));
                    }
                },
            }
            prop_assert_eq!(h.len(), m.len());
        }

        h.table.validate();
        let mut got: Vec<(u16, u32)> = h.iter().copied().collect();
        got.sort();
        prop_assert_eq!(got, m.into_iter().collect::<Vec<_>>());

        h.clear();
        prop_assert_eq!(pool.num_pools(), 0);
        prop_assert_eq!(pool.used_bytes(), 0);
    }

    #[test]
    fn prop_tree_duplicates_stay_sorted(values in prop::collection::vec(0u8..16, 0..200)) {
        let mut tree = RBTree::new();
        for value in &values {
            tree.insert(*value);
        }
        tree.validate();

        let mut expected = values.clone();
        expected.sort();
        prop_assert!(tree.iter().copied().eq(expected.iter().copied()));

        for value in &values {
            prop_assert_eq!(tree.remove(value), Some(*value));
            tree.validate();
        }
        prop_assert!(tree.is_empty());
    }

    #[test]
    fn prop_tree_set_operators(a in set_strategy(), b in set_strategy()) {
        let ta: TreeSet<u8> = a.iter().copied().collect();
        let tb: TreeSet<u8> = b.iter().copied().collect();

        prop_assert!((&ta | &tb).iter().eq(a.union(&b)));
        prop_assert!((&ta & &tb).iter().eq(a.intersection(&b)));
        prop_assert!((&ta - &tb).iter().eq(a.difference(&b)));
        prop_assert!((&ta ^ &tb).iter().eq(a.symmetric_difference(&b)));

        let mut in_place = ta.clone();
        in_place ^= tb.clone();
        in_place.tree.validate();
        prop_assert!(in_place.iter().eq(a.symmetric_difference(&b)));
    }
}
