use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use super::Iter;
use crate::alloc::{Allocator, Global};
use crate::collections::binary_tree::tree::{Cursor, CursorMut, RBTree};
use crate::collections::traits::{Compare, Natural, Set};

/// A set of unique items, ordered by the comparator `C`.
///
/// The in-place set operators (`|=`, `&=`, `-=` and `^=`) walk both sets side by side in order,
/// like merging two sorted lists, so each one visits every item of both sets once. The binary
/// operators work on references and clone the items they keep.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the TreeSet.
/// - `m`: The number of items in the other TreeSet.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `contains` | `O(log n)` |
/// | `&=`, `-=` | `O(n + m)`* |
/// | `\|=`, `^=` | `O(n + m log n)`** |
///
/// \* Plus `O(log n)` for each removed item.
///
/// \** Only items missing from `self` pay for an insertion.
pub struct TreeSet<T, C = Natural, A: Allocator = Global> {
    pub(crate) tree: RBTree<T, C, A>,
}

impl<T> TreeSet<T> {
    /// Creates a new, empty TreeSet ordered by [`Ord`].
    pub const fn new() -> TreeSet<T> {
        TreeSet {
            tree: RBTree::new(),
        }
    }
}

impl<T, C> TreeSet<T, C> {
    /// Creates a new, empty TreeSet ordered by the provided comparator.
    pub const fn with_compare(cmp: C) -> TreeSet<T, C> {
        TreeSet {
            tree: RBTree::with_compare(cmp),
        }
    }
}

impl<T, A: Allocator> TreeSet<T, Natural, A> {
    pub const fn new_in(alloc: A) -> TreeSet<T, Natural, A> {
        TreeSet {
            tree: RBTree::new_in(alloc),
        }
    }
}

impl<T, C, A: Allocator> TreeSet<T, C, A> {
    pub const fn with_compare_in(cmp: C, alloc: A) -> TreeSet<T, C, A> {
        TreeSet {
            tree: RBTree::with_compare_in(cmp, alloc),
        }
    }

    /// Returns the number of items in the TreeSet.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the TreeSet contains no items.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts `item` into the TreeSet, returning true if it wasn't already present. An existing
    /// equal item is kept and `item` is dropped.
    pub fn insert(&mut self, item: T) -> bool
    where
        C: Compare<T>,
    {
        self.tree.find_or_insert(item).is_inserted()
    }

    /// Inserts `item` into the TreeSet, replacing and returning an existing equal item.
    pub fn replace(&mut self, item: T) -> Option<T>
    where
        C: Compare<T>,
    {
        self.tree.insert_unique(item)
    }

    /// Removes an item equal to `item`, returning true if there was one.
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool
    where
        C: Compare<Q, T>,
    {
        self.tree.remove(item).is_some()
    }

    /// Removes and returns an item equal to `item`.
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T>
    where
        C: Compare<Q, T>,
    {
        self.tree.remove(item)
    }

    /// Returns true if the TreeSet contains an item equal to `item`.
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool
    where
        C: Compare<Q, T>,
    {
        self.tree.contains(item)
    }

    /// Returns a reference to the stored item equal to `item`.
    pub fn get<Q: ?Sized>(&self, item: &Q) -> Option<&T>
    where
        C: Compare<Q, T>,
    {
        self.tree.find(item)
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    /// Returns a cursor starting at the smallest item.
    pub fn cursor_front(&self) -> Cursor<'_, T, C, A> {
        self.tree.cursor_front()
    }

    /// Returns a cursor at the item equal to `item`, or at the ghost position if there is none.
    pub fn cursor_at<Q: ?Sized>(&self, item: &Q) -> Cursor<'_, T, C, A>
    where
        C: Compare<Q, T>,
    {
        self.tree.cursor_at(item)
    }

    /// Returns an iterator over all items in the TreeSet, in order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Removes all items from the TreeSet.
    pub fn clear(&mut self) {
        self.tree.clear()
    }
}

/// Moves `cursor` forward to the first item which isn't less than `item`, returning true if that
/// item is equal to `item`.
fn seek<T, C: Compare<T>, A: Allocator>(cursor: &mut CursorMut<'_, T, C, A>, item: &T) -> bool {
    while let Some(mine) = cursor.current() {
        match cursor.tree.cmp.compare(mine, item) {
            Ordering::Less => cursor.move_next(),
            Ordering::Equal => return true,
            Ordering::Greater => return false,
        }
    }
    false
}

impl<T, C: Compare<T>, A: Allocator> Set<T> for TreeSet<T, C, A> {
    type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;

    fn contains(&self, item: &T) -> bool {
        self.tree.contains(item)
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        self.tree.iter()
    }
}

impl<T, C: Default, A: Allocator + Default> Default for TreeSet<T, C, A> {
    fn default() -> Self {
        TreeSet {
            tree: RBTree::default(),
        }
    }
}

impl<T: Clone, C: Compare<T> + Clone, A: Allocator + Clone> Clone for TreeSet<T, C, A> {
    fn clone(&self) -> Self {
        TreeSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T: PartialEq, C, A: Allocator> PartialEq for TreeSet<T, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C, A: Allocator> Eq for TreeSet<T, C, A> {}

impl<T: Debug, C, A: Allocator> Debug for TreeSet<T, C, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Compare<T>, A: Allocator> Extend<T> for TreeSet<T, C, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, C: Compare<T> + Default, A: Allocator + Default> FromIterator<T> for TreeSet<T, C, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::default();
        set.extend(iter);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for TreeSet<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T, C: Compare<T>, A: Allocator> BitOrAssign for TreeSet<T, C, A> {
    fn bitor_assign(&mut self, rhs: Self) {
        let mut cursor = self.tree.cursor_front_mut();
        for item in rhs {
            if !seek(&mut cursor, &item) {
                // Insertion never moves values between nodes, so the cursor stays put.
                cursor.tree.insert(item);
            }
        }
    }
}

impl<T, C: Compare<T>, A: Allocator> BitAndAssign for TreeSet<T, C, A> {
    fn bitand_assign(&mut self, rhs: Self) {
        let mut theirs = rhs.into_iter().peekable();
        let mut cursor = self.tree.cursor_front_mut();

        while let Some(mine) = cursor.current() {
            let cmp = &cursor.tree.cmp;
            while theirs.next_if(|item| cmp.compare(item, mine) == Ordering::Less).is_some() {}

            if theirs.peek().is_some_and(|item| cmp.compare(item, mine) == Ordering::Equal) {
                cursor.move_next();
            } else {
                cursor.remove_current();
            }
        }
    }
}

impl<T, C: Compare<T>, A: Allocator> SubAssign for TreeSet<T, C, A> {
    fn sub_assign(&mut self, rhs: Self) {
        let mut cursor = self.tree.cursor_front_mut();
        for item in rhs {
            if seek(&mut cursor, &item) {
                cursor.remove_current();
            }
        }
    }
}

impl<T, C: Compare<T>, A: Allocator> BitXorAssign for TreeSet<T, C, A> {
    fn bitxor_assign(&mut self, rhs: Self) {
        let mut cursor = self.tree.cursor_front_mut();
        for item in rhs {
            if seek(&mut cursor, &item) {
                cursor.remove_current();
            } else {
                cursor.tree.insert(item);
            }
        }
    }
}

impl<T: Clone, C: Compare<T> + Clone, A: Allocator + Clone> BitOr for &TreeSet<T, C, A> {
    type Output = TreeSet<T, C, A>;

    fn bitor(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out |= rhs.clone();
        out
    }
}

impl<T: Clone, C: Compare<T> + Clone, A: Allocator + Clone> BitAnd for &TreeSet<T, C, A> {
    type Output = TreeSet<T, C, A>;

    fn bitand(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out &= rhs.clone();
        out
    }
}

impl<T: Clone, C: Compare<T> + Clone, A: Allocator + Clone> Sub for &TreeSet<T, C, A> {
    type Output = TreeSet<T, C, A>;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out -= rhs.clone();
        out
    }
}

impl<T: Clone, C: Compare<T> + Clone, A: Allocator + Clone> BitXor for &TreeSet<T, C, A> {
    type Output = TreeSet<T, C, A>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out ^= rhs.clone();
        out
    }
}
