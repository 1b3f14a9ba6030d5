use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Link, RBTree};
use crate::alloc::Allocator;
use crate::util::option::OptionExtension;

impl<T, C, A: Allocator> IntoIterator for RBTree<T, C, A> {
    type Item = T;

    type IntoIter = IntoIter<T, C, A>;

    fn into_iter(mut self) -> Self::IntoIter {
        let front = self.first_node();
        let back = self.last_node();
        let len = self.len;

        // The iterator takes over the nodes through the chain, leaving the tree empty so that
        // dropping it frees nothing.
        self.root = None;
        self.len = 0;

        IntoIter {
            tree: self,
            front,
            back,
            len,
        }
    }
}

/// An owned iterator over the values of an [`RBTree`], in order. Nodes are deallocated as their
/// values are yielded, following the chain rather than the tree.
pub struct IntoIter<T, C, A: Allocator> {
    pub(crate) tree: RBTree<T, C, A>,
    pub(crate) front: Link<T>,
    pub(crate) back: Link<T>,
    pub(crate) len: usize,
}

impl<T, C, A: Allocator> Iterator for IntoIter<T, C, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: There is at least one node left between front and back.
        let node = unsafe { self.front.unreachable() };
        self.front = *node.next();
        // SAFETY: The node is no longer reachable from front or back and came from the tree's
        // allocator.
        Some(unsafe { node.take_node_in(&self.tree.alloc) }.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T, C, A: Allocator> DoubleEndedIterator for IntoIter<T, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: There is at least one node left between front and back.
        let node = unsafe { self.back.unreachable() };
        self.back = *node.prev();
        // SAFETY: As above.
        Some(unsafe { node.take_node_in(&self.tree.alloc) }.value)
    }
}

impl<T, C, A: Allocator> FusedIterator for IntoIter<T, C, A> {}

impl<T, C, A: Allocator> ExactSizeIterator for IntoIter<T, C, A> {}

impl<T, C, A: Allocator> Drop for IntoIter<T, C, A> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<'a, T, C, A: Allocator> IntoIterator for &'a RBTree<T, C, A> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A borrowed iterator over the values of an [`RBTree`], in order.
pub struct Iter<'a, T> {
    // The len field tracks how many values remain, so the iterator never has to compare front
    // and back.
    pub(crate) front: Link<T>,
    pub(crate) back: Link<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: There is at least one node left between front and back.
        let node = unsafe { self.front.unreachable() };
        self.front = *node.next();
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: There is at least one node left between front and back.
        let node = unsafe { self.back.unreachable() };
        self.back = *node.prev();
        Some(node.value())
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

pub(crate) struct IterMut<'a, T> {
    pub(crate) front: Link<T>,
    pub(crate) back: Link<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: There is at least one node left between front and back.
        let node = unsafe { self.front.unreachable() };
        self.front = *node.next();
        Some(node.value_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY: There is at least one node left between front and back.
        let node = unsafe { self.back.unreachable() };
        self.back = *node.prev();
        Some(node.value_mut())
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

// SAFETY: The iterator owns the remaining nodes through its container.
unsafe impl<T: Send, C: Send, A: Allocator + Send> Send for IntoIter<T, C, A> {}

// SAFETY: Shared access to the iterator gives no access to values.
unsafe impl<T: Sync, C: Sync, A: Allocator + Sync> Sync for IntoIter<T, C, A> {}

// SAFETY: Iter only hands out shared references, like &T.
unsafe impl<T: Sync> Send for Iter<'_, T> {}

// SAFETY: As above.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

// SAFETY: IterMut hands out unique references to distinct values, like &mut T.
unsafe impl<T: Send> Send for IterMut<'_, T> {}

// SAFETY: Shared access to IterMut gives no access to values.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
