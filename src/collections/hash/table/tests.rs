#![cfg(test)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::collections::Emplaced;
use crate::util::alloc::{CountedDrop, PanicOnDrop};
use crate::util::hash::{ManualHash, PassThroughBuilder};
use crate::util::panic::assert_panics;

fn table_of(values: &[u32]) -> HashTable<u32, PassThroughBuilder> {
    let mut table = HashTable::with_hasher(PassThroughBuilder);
    table.extend(values.iter().copied());
    table
}

#[test]
fn test_membership() {
    let mut table: HashTable<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
    table.validate();

    assert!(table.contains("a"), "Lookups should accept borrowed keys.");
    assert_eq!(table.find("b").map(String::as_str), Some("b"));
    assert!(!table.contains("d"));

    assert_eq!(table.remove("b").as_deref(), Some("b"));
    assert_eq!(table.remove("b"), None, "Removing twice should find nothing.");
    assert_eq!(table.len(), 2);
    table.validate();
}

#[test]
fn test_bucket_slots_follow_chain() {
    // With a pass-through hasher, 1, 17 and 33 all land in bucket 1 of 16.
    let mut table = table_of(&[1, 17, 2, 18, 33]);
    table.validate();
    assert_eq!(table.bucket_len(1), 3);
    assert_eq!(table.bucket_len(2), 2);

    assert_eq!(table.remove(&17), Some(17), "Removing from the middle of a bucket should work.");
    table.validate();
    assert_eq!(table.remove(&2), Some(2));
    assert_eq!(table.remove(&18), Some(18));
    table.validate();
    assert!(table.buckets[2].is_none(), "An emptied bucket should have no slot.");

    assert!(table.contains(&1) && table.contains(&33));
    table.insert(2);
    table.validate();
}

#[test]
fn test_equal_hashes_are_told_apart() {
    let mut table = HashTable::with_hasher(PassThroughBuilder);
    table.insert(ManualHash::new(5, "zero"));
    table.insert(ManualHash::new(5, "one"));
    table.insert(ManualHash::new(21, "two"));
    table.insert(ManualHash::new(5, "three"));
    table.validate();

    assert_eq!(table.len(), 4, "Values with equal hashes shouldn't replace each other.");
    assert_eq!(
        table.find(&ManualHash::new(5, "one")).map(ManualHash::value),
        Some(&"one")
    );

    assert!(table.remove(&ManualHash::new(5, "zero")).is_some());
    assert!(table.remove(&ManualHash::new(5, "zero")).is_none());
    table.validate();

    let mut values: Vec<_> = table.into_iter().map(|item| *item.value()).collect();
    values.sort();
    assert_eq!(values, ["one", "three", "two"], "No values should be lost around collisions.");
}

#[test]
fn test_growth_keeps_nodes() {
    let mut table = table_of(&(0..11).collect::<Vec<_>>());
    assert_eq!(table.num_buckets(), HASH_BUCKET_INITIAL_COUNT);

    let before = table.find(&3).map(|value| value as *const u32);
    table.insert(11);
    assert_eq!(table.num_buckets(), 32, "Reaching 3/4 load should double the bucket count.");
    let after = table.find(&3).map(|value| value as *const u32);
    assert!(before.is_some());
    assert_eq!(before, after, "Growing shouldn't move values.");
    table.validate();

    assert!(!table.reserve(0));
    assert!(table.reserve(100));
    assert_eq!(table.num_buckets(), 256);
    table.validate();
    assert!((0..12).all(|value| table.contains(&value)));
}

#[test]
fn test_random_membership() {
    let mut rng = StdRng::seed_from_u64(0x6861_7368);
    let mut table = HashTable::new();
    let mut expected = std::collections::HashSet::new();

    for _ in 0..2000 {
        let value: u16 = rng.gen_range(0..512);
        if rng.gen_bool(0.6) {
            assert_eq!(table.insert(value).is_none(), expected.insert(value));
        } else {
            assert_eq!(table.remove(&value).is_some(), expected.remove(&value));
        }
    }

    table.validate();
    assert_eq!(table.len(), expected.len());
    assert!(expected.iter().all(|value| table.contains(value)));
}

#[test]
fn test_find_or_insert() {
    let mut table = HashTable::new();

    match table.find_or_insert((1, 'a')) {
        Emplaced::Inserted(cursor) => assert_eq!(cursor.current(), Some(&(1, 'a'))),
        Emplaced::Existing { .. } => panic!("Empty table shouldn't contain anything."),
    }

    let existing = table.find_or_insert((1, 'a'));
    assert!(existing.is_existing(), "Second insert should find the first.");
    assert_eq!(existing.into_rejected(), Some((1, 'a')));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_cursor_remove() {
    let mut table = table_of(&[1, 17, 2, 18, 33, 4]);

    let mut cursor = table.cursor_at_mut(&17);
    let next = cursor.peek_next().copied();
    assert_eq!(cursor.remove_current(), Some(17));
    assert_eq!(cursor.current().copied(), next, "The cursor should move to the next value.");
    table.validate();

    let mut cursor = table.cursor_front_mut();
    while cursor.remove_current().is_some() {
        cursor.as_cursor().table.validate();
    }
    assert!(cursor.is_ghost());
    assert!(table.is_empty());
    table.validate();
}

#[test]
fn test_cursor_wraps_through_ghost() {
    let table = table_of(&[3, 5, 7]);
    let mut cursor = table.cursor_front();
    let mut seen = Vec::new();
    while let Some(value) = cursor.current() {
        seen.push(*value);
        cursor.move_next();
    }
    seen.sort();
    assert_eq!(seen, [3, 5, 7]);

    assert!(cursor.is_ghost());
    cursor.move_next();
    assert_eq!(cursor.current(), table.iter().next(), "The ghost should wrap to the front.");
    assert!(table.cursor_at(&4).is_ghost());
}

#[test]
fn test_drops() {
    let drops = CountedDrop::counter();
    let mut table = HashTable::new();
    for key in 0..20 {
        table.insert(CountedDrop::new(key, &drops));
    }

    drop(table.insert(CountedDrop::new(4, &drops)));
    assert_eq!(*drops.borrow(), 1, "Replaced value should be dropped.");

    drop(table.remove(&CountedDrop::new(5, &drops)));
    assert_eq!(*drops.borrow(), 3, "Removed value and search key should both be dropped.");

    let mut iter = table.clone().into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(*drops.borrow(), 22, "Unconsumed values should be dropped with the iterator.");

    drop(table);
    assert_eq!(*drops.borrow(), 41, "Dropping the table should drop every value.");
}

#[test]
fn test_clone_and_debug() {
    let table = table_of(&[1, 17, 2]);
    let copy = table.clone();
    copy.validate();
    assert_eq!(copy.len(), 3);
    assert!([1, 17, 2].iter().all(|value| copy.contains(value)));

    // 17 was pushed to the front of bucket 1, and bucket 2 was started in front of both.
    assert_eq!(
        format!("{table:?}"),
        format!("HashTable {{ buckets: [-, [17, 1], [2]{}], len: 3 }}", ", -".repeat(13))
    );

    let mut table = table;
    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.num_buckets(), HASH_BUCKET_INITIAL_COUNT);
    table.validate();
}

#[test]
fn test_clear_survives_panicking_drop() {
    let mut table = HashTable::with_hasher(PassThroughBuilder);
    table.extend((0..8).map(|key| PanicOnDrop { key, fuse: 4 }));
    table.validate();

    assert_panics!({
        table.clear();
    });
    assert_eq!(table.len(), 0, "A panicking drop should still leave the table empty.");
    assert_eq!(table.num_buckets(), HASH_BUCKET_INITIAL_COUNT);
    table.validate();

    table.insert(PanicOnDrop { key: 3, fuse: 99 });
    assert!(table.contains(&PanicOnDrop { key: 3, fuse: 99 }));
    table.validate();
}

#[test]
fn test_iterators_cross_threads() {
    fn is_send_sync<I: Send + Sync>(_: &I) {}

    let mut table: HashTable<u64> = (0..100).collect();
    is_send_sync(&table.iter());
    is_send_sync(&table.iter_mut());

    let sum = std::thread::scope(|s| s.spawn(|| table.iter().sum::<u64>()).join().unwrap());
    assert_eq!(sum, (0..100).sum::<u64>());

    let owned = table.clone().into_iter();
    is_send_sync(&owned);
    assert_eq!(std::thread::spawn(move || owned.count()).join().unwrap(), 100);
}
