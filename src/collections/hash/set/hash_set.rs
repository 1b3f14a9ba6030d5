use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use super::Iter;
use crate::alloc::{Allocator, Global};
use crate::collections::hash::table::HashTable;
use crate::collections::traits::Set;

/// A set of unique items which relies on them implementing [`Hash`] and [`Eq`].
///
/// The set operators work through membership tests: the in-place forms (`|=`, `&=`, `-=` and
/// `^=`) consume the other set, while the binary forms work on references and clone the items
/// they keep.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the HashSet.
/// - `m`: The number of items in the other HashSet.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `\|=`, `-=`, `^=` | `O(m)`* |
/// | `&=` | `O(n)`* |
///
/// \* Assuming few collisions, as for [`HashTable`].
pub struct HashSet<T, B = RandomState, A: Allocator = Global> {
    pub(crate) table: HashTable<T, B, A>,
}

impl<T> HashSet<T> {
    /// Creates a new, empty HashSet with a random hasher.
    pub fn new() -> HashSet<T> {
        HashSet {
            table: HashTable::new(),
        }
    }
}

impl<T, B> HashSet<T, B> {
    pub fn with_hasher(hasher: B) -> HashSet<T, B> {
        HashSet {
            table: HashTable::with_hasher(hasher),
        }
    }
}

impl<T, A: Allocator> HashSet<T, RandomState, A> {
    pub fn new_in(alloc: A) -> HashSet<T, RandomState, A> {
        HashSet {
            table: HashTable::new_in(alloc),
        }
    }
}

impl<T, B, A: Allocator> HashSet<T, B, A> {
    pub fn with_hasher_in(hasher: B, alloc: A) -> HashSet<T, B, A> {
        HashSet {
            table: HashTable::with_hasher_in(hasher, alloc),
        }
    }

    pub const fn len(&self) -> usize {
        self.table.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn num_buckets(&self) -> usize {
        self.table.num_buckets()
    }

    pub const fn hasher(&self) -> &B {
        self.table.hasher()
    }

    /// Grows the HashSet so that `extra` more items fit without exceeding the load factor,
    /// returning true if it had to grow.
    pub fn reserve(&mut self, extra: usize) -> bool {
        self.table.reserve(extra)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.table.iter()
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> HashSet<T, B, A> {
    /// Inserts `item` into the HashSet, returning true if it wasn't already present. An existing
    /// equal item is kept and `item` is dropped.
    pub fn insert(&mut self, item: T) -> bool {
        self.table.find_or_insert(item).is_inserted()
    }

    /// Inserts `item` into the HashSet, replacing and returning an existing equal item.
    pub fn replace(&mut self, item: T) -> Option<T> {
        self.table.insert(item)
    }

    /// Removes an item equal to `item`, returning true if there was one.
    pub fn remove<Q>(&mut self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(item).is_some()
    }

    /// Removes and returns an item equal to `item`.
    pub fn take<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(item)
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains(item)
    }

    /// Returns a reference to the stored item equal to `item`.
    pub fn get<Q>(&self, item: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.find(item)
    }
}

impl<T, B: Clone, A: Allocator + Clone> HashSet<T, B, A> {
    /// Creates an empty set with the same hasher and allocator as `self`.
    fn empty_like(&self) -> Self {
        HashSet::with_hasher_in(self.table.hasher.clone(), self.table.alloc.clone())
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> Set<T> for HashSet<T, B, A> {
    type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;

    fn contains(&self, item: &T) -> bool {
        self.table.contains(item)
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        self.table.iter()
    }
}

impl<T> Default for HashSet<T> {
    fn default() -> Self {
        HashSet::new()
    }
}

impl<T: Clone, B: Clone, A: Allocator + Clone> Clone for HashSet<T, B, A> {
    fn clone(&self) -> Self {
        HashSet {
            table: self.table.clone(),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> PartialEq for HashSet<T, B, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> Eq for HashSet<T, B, A> {}

impl<T: Debug, B, A: Allocator> Debug for HashSet<T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Display, B, A: Allocator> Display for HashSet<T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{{{}}}",
            self.iter().map(|i| format!("{i}")).collect::<Vec<String>>().join(", ")
        )
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> Extend<T> for HashSet<T, B, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for HashSet<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> BitOrAssign for HashSet<T, B, A> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.extend(rhs);
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> BitAndAssign for HashSet<T, B, A> {
    fn bitand_assign(&mut self, rhs: Self) {
        let mut cursor = self.table.cursor_front_mut();
        while let Some(item) = cursor.current() {
            if rhs.contains(item) {
                cursor.move_next();
            } else {
                cursor.remove_current();
            }
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> SubAssign for HashSet<T, B, A> {
    fn sub_assign(&mut self, rhs: Self) {
        for item in rhs {
            self.remove(&item);
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> BitXorAssign for HashSet<T, B, A> {
    fn bitxor_assign(&mut self, rhs: Self) {
        for item in rhs {
            if !self.remove(&item) {
                self.insert(item);
            }
        }
    }
}

impl<T, B, A> BitOr for &HashSet<T, B, A>
where
    T: Hash + Eq + Clone,
    B: BuildHasher + Clone,
    A: Allocator + Clone,
{
    type Output = HashSet<T, B, A>;

    fn bitor(self, rhs: Self) -> Self::Output {
        let mut out = self.empty_like();
        out.extend(self.union(rhs).cloned());
        out
    }
}

impl<T, B, A> BitAnd for &HashSet<T, B, A>
where
    T: Hash + Eq + Clone,
    B: BuildHasher + Clone,
    A: Allocator + Clone,
{
    type Output = HashSet<T, B, A>;

    fn bitand(self, rhs: Self) -> Self::Output {
        let mut out = self.empty_like();
        out.extend(self.intersection(rhs).cloned());
        out
    }
}

impl<T, B, A> Sub for &HashSet<T, B, A>
where
    T: Hash + Eq + Clone,
    B: BuildHasher + Clone,
    A: Allocator + Clone,
{
    type Output = HashSet<T, B, A>;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = self.empty_like();
        out.extend(self.difference(rhs).cloned());
        out
    }
}

impl<T, B, A> BitXor for &HashSet<T, B, A>
where
    T: Hash + Eq + Clone,
    B: BuildHasher + Clone,
    A: Allocator + Clone,
{
    type Output = HashSet<T, B, A>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut out = self.empty_like();
        out.extend(self.symmetric_difference(rhs).cloned());
        out
    }
}
