use super::TreeSet;
use crate::alloc::Allocator;
use crate::collections::binary_tree::tree;

/// An owned iterator over the items of a [`TreeSet`], in order.
pub type IntoIter<T, C, A> = tree::IntoIter<T, C, A>;

/// A borrowed iterator over the items of a [`TreeSet`], in order.
pub type Iter<'a, T> = tree::Iter<'a, T>;

impl<T, C, A: Allocator> IntoIterator for TreeSet<T, C, A> {
    type Item = T;

    type IntoIter = IntoIter<T, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, C, A: Allocator> IntoIterator for &'a TreeSet<T, C, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}
