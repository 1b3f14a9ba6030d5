#![cfg(test)]

use super::*;
use crate::collections::Emplaced;
use crate::util::alloc::CountedDrop;
use crate::util::hash::{ManualHash, PassThroughBuilder};

#[test]
fn test_double_emplace_finds_same_entry() {
    let mut map = HashMap::new();

    let first = match map.emplace("key", 1) {
        Emplaced::Inserted(value) => value as *const i32,
        Emplaced::Existing { .. } => panic!("Empty map shouldn't contain the key."),
    };

    match map.emplace("key", 2) {
        Emplaced::Existing { found, rejected } => {
            assert_eq!(*found, 1, "The existing value should be kept.");
            assert_eq!(found as *const i32, first, "Both calls should refer to the same entry.");
            assert_eq!(rejected, ("key", 2));
        },
        Emplaced::Inserted(_) => panic!("Second emplace should find the first."),
    }

    assert_eq!(map.len(), 1, "Emplacing a present key shouldn't change the length.");
}

#[test]
fn test_insert_and_remove() {
    let mut map = HashMap::new();
    assert_eq!(map.insert(1, "one"), None);
    assert_eq!(map.insert(2, "two"), None);
    assert_eq!(map.insert(1, "uno"), Some("one"), "Inserting a present key should replace it.");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&"uno"));
    assert_eq!(map.remove(&1), Some("uno"));
    assert_eq!(map.remove(&1), None, "Removing an absent key should return None.");
    assert_eq!(map.remove_entry(&2), Some((2, "two")));
    assert!(map.is_empty());
}

#[test]
fn test_borrowed_lookup() {
    let mut map = HashMap::new();
    map.insert(String::from("alpha"), 1);
    map.insert(String::from("beta"), 2);

    assert!(map.contains_key("alpha"));
    assert_eq!(map.get_key_value("beta"), Some((&String::from("beta"), &2)));
    if let Some(value) = map.get_mut("beta") {
        *value *= 10;
    }
    assert_eq!(map.remove("beta"), Some(20));
    assert!(!map.contains_key("gamma"));
}

#[test]
fn test_get_or_default() {
    let mut map: HashMap<&str, u32> = HashMap::new();
    for word in "a rose is a rose is a rose".split(' ') {
        *map.get_or_default(word) += 1;
    }

    assert_eq!(map.get("rose"), Some(&3));
    assert_eq!(map.get("a"), Some(&3));
    assert_eq!(map.get("is"), Some(&2));
    assert_eq!(map.len(), 3);
}

#[test]
fn test_colliding_keys() {
    let mut map = HashMap::with_hasher(PassThroughBuilder);
    for (index, name) in ["zero", "one", "two", "three"].into_iter().enumerate() {
        map.insert(ManualHash::new(7, name), index);
    }
    map.table.validate();

    assert_eq!(map.len(), 4, "Keys with equal hashes should stay separate.");
    assert_eq!(map.remove(&ManualHash::new(7, "one")), Some(1));
    assert_eq!(map.get(&ManualHash::new(7, "three")), Some(&3));
    map.table.validate();
}

#[test]
fn test_views() {
    let mut map: HashMap<u32, u32> = (0..50).map(|i| (i, i * 2)).collect();
    for value in map.values_mut() {
        *value += 1;
    }

    let mut keys: Vec<_> = map.keys().copied().collect();
    keys.sort();
    assert_eq!(keys, (0..50).collect::<Vec<_>>());

    assert_eq!(map.values().map(|v| *v as usize).sum::<usize>(), 2500);
    assert!(map.iter().all(|(k, v)| *v == k * 2 + 1));

    let mut values: Vec<_> = map.clone().into_values().collect();
    values.sort();
    assert_eq!(values.first(), Some(&1));
    assert_eq!(map.into_keys().len(), 50);
}

#[test]
fn test_drops() {
    let drops = CountedDrop::counter();
    let mut map = HashMap::new();
    for key in 0..5 {
        map.insert(key, CountedDrop::new(key, &drops));
    }

    drop(map.insert(0, CountedDrop::new(10, &drops)));
    assert_eq!(*drops.borrow(), 1, "Replaced value should be dropped.");

    let mut calls = 0;
    map.get_or_insert_with(1, || {
        calls += 1;
        CountedDrop::new(11, &drops)
    });
    assert_eq!(calls, 0, "Existing entries shouldn't create a new value.");

    map.clear();
    assert_eq!(*drops.borrow(), 6, "Clearing should drop every value.");
}

#[test]
fn test_eq_and_debug() {
    let a = HashMap::from([(1, 'a'), (2, 'b')]);
    let b = HashMap::from([(2, 'b'), (1, 'a')]);
    assert_eq!(a, b, "Maps with the same entries should be equal, regardless of order.");

    let c = HashMap::from([(1, 'a')]);
    assert_eq!(format!("{c:?}"), "{1: 'a'}");
    assert_ne!(a, c);
}
