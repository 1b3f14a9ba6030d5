use std::iter::FusedIterator;

use super::HashMap;
use crate::alloc::Allocator;
use crate::collections::hash::table::{self, IterMut};

/// An owned iterator over the entries of a [`HashMap`].
pub type IntoIter<K, V, B, A> = table::IntoIter<(K, V), B, A>;

/// A borrowed iterator over the entries of a [`HashMap`].
pub type Iter<'a, K, V> = table::Iter<'a, (K, V)>;

impl<K, V, B, A: Allocator> IntoIterator for HashMap<K, V, B, A> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, B, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

impl<'a, K, V, B, A: Allocator> IntoIterator for &'a HashMap<K, V, B, A> {
    type Item = &'a (K, V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

pub struct IntoKeys<K, V, B, A: Allocator>(pub(crate) IntoIter<K, V, B, A>);

impl<K, V, B, A: Allocator> Iterator for IntoKeys<K, V, B, A> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, B, A: Allocator> ExactSizeIterator for IntoKeys<K, V, B, A> {}

impl<K, V, B, A: Allocator> FusedIterator for IntoKeys<K, V, B, A> {}

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

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys(self.0.clone())
    }
}

pub struct IntoValues<K, V, B, A: Allocator>(pub(crate) IntoIter<K, V, B, A>);

impl<K, V, B, A: Allocator> Iterator for IntoValues<K, V, B, A> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V, B, A: Allocator> ExactSizeIterator for IntoValues<K, V, B, A> {}

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

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
