use std::iter::FusedIterator;

use super::TreeMap;
use crate::alloc::Allocator;
use crate::collections::binary_tree::tree::{self, IterMut};
use crate::collections::traits::FindPair;

/// An owned iterator over the entries of a [`TreeMap`], in key order.
pub type IntoIter<K, V, C, A> = tree::IntoIter<(K, V), FindPair<C>, A>;

/// A borrowed iterator over the entries of a [`TreeMap`], in key order.
pub type Iter<'a, K, V> = tree::Iter<'a, (K, V)>;

impl<K, V, C, A: Allocator> IntoIterator for TreeMap<K, V, C, A> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V, C, A: Allocator> IntoIterator for &'a TreeMap<K, V, C, A> {
    type Item = &'a (K, V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

pub struct IntoKeys<K, V, C, A: Allocator>(pub(crate) IntoIter<K, V, C, A>);

impl<K, V, C, A: Allocator> Iterator for IntoKeys<K, V, C, A> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, C, A: Allocator> ExactSizeIterator for IntoKeys<K, V, C, A> {}

impl<K, V, C, A: Allocator> FusedIterator for IntoKeys<K, V, C, A> {}

pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| &e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| &e.0)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct IntoValues<K, V, C, A: Allocator>(pub(crate) IntoIter<K, V, C, A>);

impl<K, V, C, A: Allocator> Iterator for IntoValues<K, V, C, A> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, C, A: Allocator> ExactSizeIterator for IntoValues<K, V, C, A> {}

pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| &e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| &e.1)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K, V>(pub(crate) IterMut<'a, (K, V)>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| &mut e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|e| &mut e.1)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
