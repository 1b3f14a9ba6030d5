#![cfg(test)]

use super::*;
use crate::collections::traits::Set;
use crate::util::alloc::CountedDrop;

fn set_of(items: &[u32]) -> TreeSet<u32> {
    items.iter().copied().collect()
}

#[test]
fn test_insert_orders_items() {
    let mut set = TreeSet::new();
    assert!(set.insert(10));
    assert!(set.insert(1));
    assert!(set.insert(3));
    assert!(!set.insert(3), "Inserting a present item should report false.");

    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 10]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&10));
}

#[test]
fn test_replace_and_take() {
    let drops = CountedDrop::counter();
    let mut set = TreeSet::new();
    set.insert(CountedDrop::new(1, &drops));

    assert!(!set.insert(CountedDrop::new(1, &drops)));
    assert_eq!(*drops.borrow(), 1, "Rejected item should be dropped.");

    let replaced = set.replace(CountedDrop::new(1, &drops));
    assert!(replaced.is_some(), "Replacing should return the previous item.");
    drop(replaced);
    assert_eq!(*drops.borrow(), 2);

    let taken = set.take(&CountedDrop::new(1, &drops));
    assert_eq!(taken.map(|item| item.key), Some(1));
    assert!(set.is_empty());
}

#[test]
fn test_in_place_operators() {
    let mut a = set_of(&[1, 2, 3, 5, 8]);
    a |= set_of(&[0, 2, 4, 9]);
    assert_eq!(a, set_of(&[0, 1, 2, 3, 4, 5, 8, 9]), "Union should merge both sets.");

    let mut b = set_of(&[1, 2, 3, 5, 8]);
    b &= set_of(&[0, 2, 4, 5, 9]);
    assert_eq!(b, set_of(&[2, 5]), "Intersection should keep common items.");

    let mut c = set_of(&[1, 2, 3, 5, 8]);
    c -= set_of(&[0, 2, 8, 9]);
    assert_eq!(c, set_of(&[1, 3, 5]), "Difference should drop items in the other set.");

    let mut d = set_of(&[1, 2, 3, 5, 8]);
    d ^= set_of(&[0, 2, 8, 9]);
    assert_eq!(d, set_of(&[0, 1, 3, 5, 9]), "Symmetric difference should keep unshared items.");

    let mut e = set_of(&[4, 5, 6]);
    e &= TreeSet::new();
    assert!(e.is_empty());
}

#[test]
fn test_algebra_laws() {
    let a = set_of(&[1, 3, 4, 7, 9, 12, 15]);
    let b = set_of(&[2, 3, 4, 8, 12, 20]);
    let empty = TreeSet::new();

    let union = &a | &b;
    let intersection = &a & &b;
    assert_eq!(union.len(), a.len() + b.len() - intersection.len());
    assert_eq!(&a ^ &b, &union - &intersection);
    assert_eq!(&a - &b, &(&a ^ &b) & &a);
    assert_eq!(&a & &a, a);
    assert_eq!(&a | &empty, a);

    assert!(intersection.is_subset(&a));
    assert!(union.is_superset(&b));
    assert!((&a - &b).is_disjoint(&b));
}

#[test]
fn test_lazy_set_iterators() {
    let a = set_of(&[1, 2, 3, 4]);
    let b = set_of(&[3, 4, 5]);

    assert_eq!(a.difference(&b).copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(a.intersection(&b).copied().collect::<Vec<_>>(), [3, 4]);
    assert_eq!(a.symmetric_difference(&b).copied().collect::<Vec<_>>(), [1, 2, 5]);
    assert_eq!(a.union(&b).copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    assert_eq!(a.into_intersection(b).collect::<Vec<_>>(), [3, 4]);
}

#[test]
fn test_borrowed_lookup() {
    let set: TreeSet<String> = ["pear", "apple", "fig"].into_iter().map(String::from).collect();
    assert!(set.contains("fig"));
    assert_eq!(set.get("apple").map(String::as_str), Some("apple"));
    assert_eq!(set.cursor_at("fig").peek_next().map(String::as_str), Some("pear"));
    assert_eq!(format!("{set:?}"), r#"{"apple", "fig", "pear"}"#);
}
