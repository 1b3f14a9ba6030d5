use super::HashSet;
use crate::alloc::Allocator;
use crate::collections::hash::table;

/// An owned iterator over the items of a [`HashSet`].
pub type IntoIter<T, B, A> = table::IntoIter<T, B, A>;

/// A borrowed iterator over the items of a [`HashSet`].
pub type Iter<'a, T> = table::Iter<'a, T>;

impl<T, B, A: Allocator> IntoIterator for HashSet<T, B, A> {
    type Item = T;

    type IntoIter = IntoIter<T, B, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, T, B, A: Allocator> IntoIterator for &'a HashSet<T, B, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}
