use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{HashTable, Link};
use crate::alloc::Allocator;
use crate::util::option::OptionExtension;

impl<T, B, A: Allocator> IntoIterator for HashTable<T, B, A> {
    type Item = T;

    type IntoIter = IntoIter<T, B, A>;

    fn into_iter(mut self) -> Self::IntoIter {
        let next = self.head.take();
        let len = self.len;

        // Detaching the chain leaves nothing for the table to free when it's dropped.
        self.buckets.fill(None);
        self.len = 0;

        IntoIter {
            table: self,
            next,
            len,
        }
    }
}

/// An owned iterator over the values of a [`HashTable`], in chain order.
pub struct IntoIter<T, B, A: Allocator> {
    pub(crate) table: HashTable<T, B, A>,
    pub(crate) next: Link<T>,
    pub(crate) len: usize,
}

impl<T, B, A: Allocator> Iterator for IntoIter<T, B, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: len counts the nodes left in the detached chain.
        let node = unsafe { self.next.unreachable() };
        self.next = *node.next();
        // SAFETY: The node is no longer reachable and came from the table's allocator.
        Some(unsafe { node.take_node_in(&self.table.alloc) }.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T, B, A: Allocator> FusedIterator for IntoIter<T, B, A> {}

impl<T, B, A: Allocator> ExactSizeIterator for IntoIter<T, B, A> {}

impl<T, B, A: Allocator> Drop for IntoIter<T, B, A> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<'a, T, B, A: Allocator> IntoIterator for &'a HashTable<T, B, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A borrowed iterator over the values of a [`HashTable`], in chain order.
pub struct Iter<'a, T> {
    pub(crate) next: Link<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<T> Iter<'_, T> {
    pub(crate) const fn new(next: Link<T>, len: usize) -> Self {
        Iter {
            next,
            len,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: len counts the nodes left in the chain.
        let node = unsafe { self.next.unreachable() };
        self.next = *node.next();
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter::new(self.next, self.len)
    }
}

pub(crate) struct IterMut<'a, T> {
    pub(crate) next: Link<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<T> IterMut<'_, T> {
    pub(crate) const fn new(next: Link<T>, len: usize) -> Self {
        IterMut {
            next,
            len,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: len counts the nodes left in the chain.
        let node = unsafe { self.next.unreachable() };
        self.next = *node.next();
        Some(node.value_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

// SAFETY: The iterator owns the remaining nodes through its container.
unsafe impl<T: Send, B: Send, A: Allocator + Send> Send for IntoIter<T, B, A> {}

// SAFETY: Shared access to the iterator gives no access to values.
unsafe impl<T: Sync, B: Sync, A: Allocator + Sync> Sync for IntoIter<T, B, A> {}

// SAFETY: Iter only hands out shared references, like &T.
unsafe impl<T: Sync> Send for Iter<'_, T> {}

// SAFETY: As above.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

// SAFETY: IterMut hands out unique references to distinct values, like &mut T.
unsafe impl<T: Send> Send for IterMut<'_, T> {}

// SAFETY: Shared access to IterMut gives no access to values.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
