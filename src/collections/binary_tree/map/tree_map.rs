use std::fmt::{self, Debug, Formatter};
use std::mem;

use super::{IntoKeys, IntoValues, Iter, Keys, Values, ValuesMut};
use crate::alloc::{Allocator, Global};
use crate::collections::Emplaced;
use crate::collections::binary_tree::tree::{Cursor, Link, RBTree};
use crate::collections::traits::{Compare, FindPair, Natural};

/// A map of keys to values, ordered by the comparator `C` applied to the keys.
///
/// Entries are stored as `(K, V)` pairs in an [`RBTree`], which only compares the keys. Each key
/// is present at most once.
///
/// Lookups are generic over a borrowed form `Q` of the key, so long as the comparator can compare
/// a `Q` with a `K`. With the default [`Natural`] ordering this means any `Q: Ord` which `K`
/// borrows as.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the TreeMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `get` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `contains_key` | `O(log n)` |
/// | `first_key_value`, `last_key_value` | `O(log n)` |
pub struct TreeMap<K, V, C = Natural, A: Allocator = Global> {
    pub(crate) tree: RBTree<(K, V), FindPair<C>, A>,
}

impl<K, V> TreeMap<K, V> {
    /// Creates a new, empty TreeMap ordered by [`Ord`].
    pub const fn new() -> TreeMap<K, V> {
        TreeMap::with_compare_in(Natural, Global)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates a new, empty TreeMap with keys ordered by the provided comparator.
    pub const fn with_compare(cmp: C) -> TreeMap<K, V, C> {
        TreeMap::with_compare_in(cmp, Global)
    }
}

impl<K, V, A: Allocator> TreeMap<K, V, Natural, A> {
    /// Creates a new, empty TreeMap which allocates its entries from `alloc`.
    pub const fn new_in(alloc: A) -> TreeMap<K, V, Natural, A> {
        TreeMap::with_compare_in(Natural, alloc)
    }
}

impl<K, V, C, A: Allocator> TreeMap<K, V, C, A> {
    pub const fn with_compare_in(cmp: C, alloc: A) -> TreeMap<K, V, C, A> {
        TreeMap {
            tree: RBTree::with_compare_in(FindPair(cmp), alloc),
        }
    }

    /// Returns the number of entries in the TreeMap.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the TreeMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts the provided `key`-`value` pair into the TreeMap. If the key was already associated
    /// with a value, the previous value is returned.
    ///
    /// As with the standard library, the key isn't changed if it already exists.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Compare<K>,
    {
        let (node, rejected) = self.tree.find_or_insert_node((key, value));
        rejected.map(|(_, value)| mem::replace(&mut node.value_mut().1, value))
    }

    /// Inserts the provided `key`-`value` pair, unless the key is already present. Either way, a
    /// mutable reference to the value in the map is returned. If the pair wasn't inserted, it is
    /// handed back unchanged.
    pub fn find_or_insert(&mut self, key: K, value: V) -> Emplaced<&mut V, (K, V)>
    where
        C: Compare<K>,
    {
        let (node, rejected) = self.tree.find_or_insert_node((key, value));
        let found = &mut node.value_mut().1;
        match rejected {
            None => Emplaced::Inserted(found),
            Some(rejected) => Emplaced::Existing {
                found,
                rejected,
            },
        }
    }

    /// Returns a mutable reference to the value associated with `key`, inserting the result of `f`
    /// first if there is none.
    pub fn get_or_insert_with(&mut self, key: K, f: impl FnOnce() -> V) -> &mut V
    where
        C: Compare<K>,
    {
        let (node, _) = self.tree.find_or_insert_node_with(key, |key| (key, f()));
        &mut node.value_mut().1
    }

    /// Returns a mutable reference to the value associated with `key`, inserting the default
    /// value first if there is none.
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        C: Compare<K>,
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no entry.
    pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
    where
        C: Compare<Q, K>,
    {
        self.find_entry(key).map(|node| {
            let entry = node.value();
            (&entry.0, &entry.1)
        })
    }

    /// Returns a reference to the value associated with the provided `key` or None if the map
    /// contains no values for `key`.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        C: Compare<Q, K>,
    {
        self.find_entry(key).map(|node| &node.value().1)
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if
    /// the map contains no values for `key`.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        C: Compare<Q, K>,
    {
        self.find_entry(key).map(|node| &mut node.value_mut().1)
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
    {
        self.find_entry(key).is_some()
    }

    /// Removes the entry associated with `key`, returning it if it exists.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
    where
        C: Compare<Q, K>,
    {
        let node = self.find_entry(key)?;
        Some(self.tree.remove_node(node).0)
    }

    /// Removes the entry associated with `key`, returning the value if it exists. If it doesn't,
    /// the map is left untouched.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        C: Compare<Q, K>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(k, v)| (k, v))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Returns a cursor over the entries of the map, starting at the smallest key.
    pub fn cursor_front(&self) -> Cursor<'_, (K, V), FindPair<C>, A> {
        self.tree.cursor_front()
    }

    /// Returns an iterator over all key-value pairs in the TreeMap, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V, C, A> {
        IntoKeys(self.into_iter())
    }

    /// Returns an iterator over all keys in the TreeMap, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V, C, A> {
        IntoValues(self.into_iter())
    }

    /// Returns an iterator over all values in the TreeMap, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values in the TreeMap, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.tree.iter_mut())
    }

    /// Removes all entries from the TreeMap.
    pub fn clear(&mut self) {
        self.tree.clear()
    }

    fn find_entry<Q: ?Sized>(&self, key: &Q) -> Link<(K, V)>
    where
        C: Compare<Q, K>,
    {
        let cmp = self.tree.comparator().keys();
        self.tree.find_node_by(|(k, _)| cmp.compare(key, k))
    }
}

impl<K, V, C: Default, A: Allocator + Default> Default for TreeMap<K, V, C, A> {
    fn default() -> Self {
        TreeMap::with_compare_in(C::default(), A::default())
    }
}

impl<K: Clone, V: Clone, C: Compare<K> + Clone, A: Allocator + Clone> Clone
    for TreeMap<K, V, C, A>
{
    fn clone(&self) -> Self {
        TreeMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C, A: Allocator> PartialEq for TreeMap<K, V, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C, A: Allocator> Eq for TreeMap<K, V, C, A> {}

impl<K: Debug, V: Debug, C, A: Allocator> Debug for TreeMap<K, V, C, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl<K, V, C: Compare<K>, A: Allocator> Extend<(K, V)> for TreeMap<K, V, C, A> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C: Compare<K> + Default, A: Allocator + Default> FromIterator<(K, V)>
    for TreeMap<K, V, C, A>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::default();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for TreeMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
