#![cfg(test)]

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;
use crate::collections::Emplaced;
use crate::util::alloc::{CountedDrop, PanicOnDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_iterates_in_order() {
    let tree: RBTree<i32> = [10, 1, 3].into_iter().collect();
    tree.validate();
    assert!(
        tree.iter().eq(&[1, 3, 10]),
        "Values should be yielded in ascending order, regardless of insertion order."
    );
    assert!(
        tree.iter().rev().eq(&[10, 3, 1]),
        "Reverse iteration should walk the chain backwards."
    );
    assert_eq!(tree.first(), Some(&1));
    assert_eq!(tree.last(), Some(&10));
}

#[test]
fn test_random_insert_remove() {
    let mut rng = StdRng::seed_from_u64(0x6b6f_7269_6e);
    let mut values: Vec<u32> = (0..1000).map(|_| rng.gen_range(0..10_000)).collect();

    let mut tree = RBTree::new();
    for value in values.iter().copied() {
        tree.insert(value);
        tree.validate();
    }
    assert_eq!(tree.len(), 1000);

    values.shuffle(&mut rng);
    for (index, value) in values.iter().enumerate() {
        assert!(tree.contains(value), "Every inserted value should be found before removal.");
        assert_eq!(tree.remove(value), Some(*value));
        tree.validate();

        if let Some(other) = values.get(index + 1) {
            assert!(tree.contains(other), "Removing one value shouldn't lose another.");
        }
    }

    assert!(tree.is_empty(), "Tree should be empty after removing every value.");
    assert_eq!(tree.first(), None);
}

#[test]
fn test_duplicates_keep_insertion_order() {
    let mut tree = RBTree::with_compare(|a: &(u8, &str), b: &(u8, &str)| a.0.cmp(&b.0));
    tree.insert((2, "a"));
    tree.insert((1, "b"));
    tree.insert((2, "c"));
    tree.insert((2, "d"));
    tree.validate();

    assert_eq!(
        tree.iter().map(|pair| pair.1).collect::<Vec<_>>(),
        ["b", "a", "c", "d"],
        "Equal values should be placed after existing ones."
    );
}

#[test]
fn test_insert_unique() {
    let mut tree = RBTree::with_compare(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    assert_eq!(tree.insert_unique((1, 'a')), None);
    assert_eq!(tree.insert_unique((2, 'b')), None);
    assert_eq!(
        tree.insert_unique((1, 'c')),
        Some((1, 'a')),
        "The value being replaced should be returned."
    );

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.find(&(1, '_')), Some(&(1, 'c')));
    tree.validate();
}

#[test]
fn test_find_or_insert() {
    let mut tree = RBTree::new();

    match tree.find_or_insert(5) {
        Emplaced::Inserted(cursor) => assert_eq!(cursor.current(), Some(&5)),
        Emplaced::Existing { .. } => panic!("Empty tree shouldn't contain 5."),
    }

    let existing = tree.find_or_insert(5);
    assert!(existing.is_existing(), "Second insert should find the first.");
    assert_eq!(existing.into_rejected(), Some(5));
    assert_eq!(tree.len(), 1);

    let (cursor, inserted) = tree.find_or_insert_with(&7, || 7);
    assert!(inserted);
    assert_eq!(cursor.peek_prev(), Some(&5));
    let (_, inserted) = tree.find_or_insert_with(&7, || unreachable!());
    assert!(!inserted, "Existing value shouldn't be recreated.");
}

#[test]
fn test_cursor_wraps_through_ghost() {
    let tree: RBTree<u8> = (1..=3).collect();
    let mut cursor = tree.cursor_front();

    assert_eq!(cursor.current(), Some(&1));
    cursor.move_prev();
    assert!(cursor.is_ghost(), "Moving before the first value should reach the ghost.");
    assert_eq!(cursor.peek_next(), Some(&1));
    assert_eq!(cursor.peek_prev(), Some(&3));

    cursor.move_prev();
    assert_eq!(cursor.current(), Some(&3), "Moving back from the ghost should reach the end.");
    cursor.move_next();
    assert!(cursor.is_ghost(), "Moving past the last value should reach the ghost.");
    cursor.move_next();
    assert_eq!(cursor.current(), Some(&1));

    let mut cursor = tree.cursor_at(&2);
    cursor.move_next();
    cursor.move_prev();
    assert_eq!(cursor.current(), Some(&2), "Next then prev should return to the same value.");
    assert!(tree.cursor_at(&4).is_ghost(), "Missing values should give the ghost position.");
}

#[test]
fn test_remove_current_moves_to_successor() {
    let mut tree: RBTree<u32> = (0..32).collect();

    // Removing values with two children swaps in the successor's value.
    let mut cursor = tree.cursor_at_mut(&15);
    assert_eq!(cursor.remove_current(), Some(15));
    assert_eq!(cursor.current(), Some(&16));
    assert_eq!(cursor.remove_current(), Some(16));
    assert_eq!(cursor.current(), Some(&17));
    assert_eq!(cursor.peek_prev(), Some(&14));

    let mut cursor = tree.cursor_back_mut();
    assert_eq!(cursor.remove_current(), Some(31));
    assert!(cursor.is_ghost(), "Removing the last value should leave the cursor at the ghost.");
    assert_eq!(cursor.remove_current(), None);

    tree.validate();
    assert_eq!(tree.len(), 29);

    let mut cursor = tree.cursor_front_mut();
    while cursor.remove_current().is_some() {}
    assert!(tree.is_empty());
}

#[test]
fn test_find_by_projection() {
    let tree: RBTree<(u32, &str)> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    assert_eq!(tree.find_by(|pair| 2.cmp(&pair.0)), Some(&(2, "b")));
    assert_eq!(tree.find_by(|pair| 4.cmp(&pair.0)), None);
}

#[test]
fn test_pop_ends() {
    let mut tree: RBTree<i8> = (-5..5).collect();
    assert_eq!(tree.pop_first(), Some(-5));
    assert_eq!(tree.pop_last(), Some(4));
    tree.validate();
    assert_eq!(tree.len(), 8);
}

#[test]
fn test_drops() {
    let drops = CountedDrop::counter();
    let mut tree = RBTree::new();
    for key in 0..20 {
        tree.insert(CountedDrop::new(key, &drops));
    }

    drop(tree.remove(&CountedDrop::new(3, &drops)));
    assert_eq!(*drops.borrow(), 2, "Removed value and search key should both be dropped.");

    drop(tree.insert_unique(CountedDrop::new(4, &drops)));
    assert_eq!(*drops.borrow(), 3, "Replaced value should be dropped.");

    let mut iter = tree.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(*drops.borrow(), 5);

    drop(iter);
    assert_eq!(*drops.borrow(), 22, "Unconsumed values should be dropped with the iterator.");

    let tree: RBTree<_> = (0..10).map(|key| CountedDrop::new(key, &drops)).collect();
    drop(tree);
    assert_eq!(*drops.borrow(), 32, "Dropping the tree should drop every value.");
}

#[test]
fn test_zst_support() {
    let mut tree = RBTree::new();
    tree.insert(ZeroSizedType);
    tree.insert(ZeroSizedType);
    assert_eq!(tree.insert_unique(ZeroSizedType), Some(ZeroSizedType));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.iter().count(), 2);
    tree.validate();
}

#[test]
fn test_clone_and_clear() {
    let mut tree: RBTree<String> = ["b", "a", "c"].into_iter().map(String::from).collect();
    let copy = tree.clone();
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(copy.len(), 3);
    assert!(copy.contains("a"), "Lookups should accept borrowed keys.");
    assert_eq!(format!("{copy:?}"), r#"["a", "b", "c"]"#);
    copy.validate();
}

#[test]
fn test_reverse_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tree = RBTree::with_compare(|a: &u16, b: &u16| b.cmp(a));
    for _ in 0..200 {
        tree.insert(rng.gen_range(0..u16::MAX));
    }
    tree.validate();
    assert!(
        tree.iter().is_sorted_by(|a, b| b.cmp(a) != Ordering::Greater),
        "Custom comparators should define the iteration order."
    );
}

#[test]
fn test_clear_survives_panicking_drop() {
    let mut tree: RBTree<PanicOnDrop> = (0..8).map(|key| PanicOnDrop { key, fuse: 4 }).collect();
    tree.validate();

    assert_panics!({
        tree.clear();
    });
    assert_eq!(tree.len(), 0, "A panicking drop should still leave the tree empty.");
    assert!(tree.iter().next().is_none());
    tree.validate();

    tree.insert(PanicOnDrop { key: 1, fuse: 99 });
    tree.validate();
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_iterators_cross_threads() {
    fn is_send_sync<I: Send + Sync>(_: &I) {}

    let mut tree: RBTree<u64> = (0..100).collect();
    is_send_sync(&tree.iter());
    is_send_sync(&tree.iter_mut());

    let sum = std::thread::scope(|s| {
        let (mut front, back) = (tree.iter(), tree.iter().rev());
        let half = s.spawn(move || back.take(50).sum::<u64>());
        front.by_ref().take(50).sum::<u64>() + half.join().unwrap()
    });
    assert_eq!(sum, (0..100).sum::<u64>());

    let owned = tree.clone().into_iter();
    is_send_sync(&owned);
    assert_eq!(std::thread::spawn(move || owned.count()).join().unwrap(), 100);
}
