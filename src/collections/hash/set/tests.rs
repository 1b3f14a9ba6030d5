#![cfg(test)]

use super::*;
use crate::collections::traits::Set;
use crate::util::alloc::CountedDrop;
use crate::util::hash::{ManualHash, PassThroughBuilder};

fn sorted<'a>(items: impl IntoIterator<Item = &'a u32>) -> Vec<u32> {
    let mut items: Vec<_> = items.into_iter().copied().collect();
    items.sort();
    items
}

#[test]
fn test_hash_collisions() {
    let mut set = HashSet::with_hasher(PassThroughBuilder);
    set.insert(ManualHash::new(0, "zero"));
    set.insert(ManualHash::new(0, "one"));
    set.insert(ManualHash::new(2, "two"));
    set.insert(ManualHash::new(0, "three"));
    set.insert(ManualHash::new(16, "four"));
    set.insert(ManualHash::new(1, "five"));

    assert!(set.remove(&ManualHash::new(0, "zero")));
    assert!(set.remove(&ManualHash::new(2, "two")));
    set.table.validate();

    let mut values: Vec<_> = set.into_iter().map(|i| *i.value()).collect();
    values.sort();
    assert_eq!(
        values,
        ["five", "four", "one", "three"],
        "HashSet should handle hash collisions so that no elements are lost during removal."
    );
}

#[test]
fn test_insert_and_take() {
    let drops = CountedDrop::counter();
    let mut set = HashSet::new();
    assert!(set.insert(CountedDrop::new(1, &drops)));
    assert!(!set.insert(CountedDrop::new(1, &drops)), "Inserting twice should report false.");
    assert_eq!(*drops.borrow(), 1, "Rejected item should be dropped.");

    drop(set.replace(CountedDrop::new(1, &drops)));
    assert_eq!(*drops.borrow(), 2, "Replaced item should be dropped.");

    assert_eq!(set.take(&CountedDrop::new(1, &drops)).map(|item| item.key), Some(1));
    assert!(set.is_empty());
}

#[test]
fn test_in_place_operators() {
    let mut a = HashSet::from([1, 2, 3, 5, 8]);
    a |= HashSet::from([0, 2, 4, 9]);
    assert_eq!(sorted(&a), [0, 1, 2, 3, 4, 5, 8, 9]);

    let mut b = HashSet::from([1, 2, 3, 5, 8]);
    b &= HashSet::from([0, 2, 4, 5, 9]);
    assert_eq!(sorted(&b), [2, 5]);
    b.table.validate();

    let mut c = HashSet::from([1, 2, 3, 5, 8]);
    c -= HashSet::from([0, 2, 8, 9]);
    assert_eq!(sorted(&c), [1, 3, 5]);

    let mut d = HashSet::from([1, 2, 3, 5, 8]);
    d ^= HashSet::from([0, 2, 8, 9]);
    assert_eq!(sorted(&d), [0, 1, 3, 5, 9]);
}

#[test]
fn test_algebra_laws() {
    let a: HashSet<u32> = (0..40).filter(|i| i % 3 == 0).collect();
    let b: HashSet<u32> = (0..40).filter(|i| i % 4 == 0).collect();

    let union = &a | &b;
    let intersection = &a & &b;
    assert_eq!(union.len(), a.len() + b.len() - intersection.len());
    assert_eq!(&a ^ &b, &union - &intersection);
    assert_eq!(&a - &b, &(&a ^ &b) & &a);
    assert_eq!(sorted(&intersection), [0, 12, 24, 36]);

    assert!(intersection.is_subset(&a));
    assert!(union.is_superset(&b));
    assert!((&a - &b).is_disjoint(&b));
    assert_eq!(sorted(a.difference(&b)).len(), a.len() - intersection.len());
}

#[test]
fn test_equality_ignores_order() {
    let a: HashSet<&str> = ["x", "y", "z"].into_iter().collect();
    let mut b = HashSet::new();
    b.extend(["z", "y", "x", "y"]);
    assert_eq!(a, b, "Sets with the same items should be equal.");

    b.remove("x");
    assert_ne!(a, b);
    assert_eq!(format!("{}", HashSet::from([7])), "#{7}");
    assert_eq!(format!("{:?}", HashSet::from(["q"])), r#"{"q"}"#);
}
