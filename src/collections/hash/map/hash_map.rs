use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::mem;

use super::{IntoKeys, IntoValues, Iter, Keys, Values, ValuesMut};
use crate::alloc::{Allocator, Global};
use crate::collections::Emplaced;
use crate::collections::hash::table::{HashTable, Link};

/// A map of keys to values which relies on the keys implementing [`Hash`] and [`Eq`].
///
/// Entries are stored as `(K, V)` pairs in a [`HashTable`], with only the key being hashed or
/// compared. Each key is present at most once.
///
/// It is a logic error for keys in a HashMap to be manipulated in a way that changes their hash.
/// Because of this, HashMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the HashMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert`, `emplace` | `O(1)`*, `O(n)`** |
/// | `get` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains_key` | `O(1)`* |
/// | `reserve` | `O(n)`**, `O(1)` |
///
/// \* Keys which share a bucket are compared one after another, so heavy collisions make these
/// slower.
///
/// \** Only when the bucket array has to grow.
pub struct HashMap<K, V, B = RandomState, A: Allocator = Global> {
    pub(crate) table: HashTable<(K, V), B, A>,
}

impl<K, V> HashMap<K, V> {
    /// Creates a new, empty HashMap with a random hasher.
    pub fn new() -> HashMap<K, V> {
        HashMap {
            table: HashTable::new(),
        }
    }
}

impl<K, V, B> HashMap<K, V, B> {
    /// Creates a new, empty HashMap which hashes keys with `hasher`.
    pub fn with_hasher(hasher: B) -> HashMap<K, V, B> {
        HashMap {
            table: HashTable::with_hasher(hasher),
        }
    }
}

impl<K, V, A: Allocator> HashMap<K, V, RandomState, A> {
    /// Creates a new, empty HashMap which allocates its entries from `alloc`.
    pub fn new_in(alloc: A) -> HashMap<K, V, RandomState, A> {
        HashMap {
            table: HashTable::new_in(alloc),
        }
    }
}

impl<K, V, B, A: Allocator> HashMap<K, V, B, A> {
    pub fn with_hasher_in(hasher: B, alloc: A) -> HashMap<K, V, B, A> {
        HashMap {
            table: HashTable::with_hasher_in(hasher, alloc),
        }
    }

    /// Returns the length of the HashMap.
    pub const fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the HashMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.table.num_buckets()
    }

    pub const fn hasher(&self) -> &B {
        self.table.hasher()
    }

    /// Grows the HashMap so that `extra` more entries fit without exceeding the load factor,
    /// returning true if it had to grow.
    pub fn reserve(&mut self, extra: usize) -> bool {
        self.table.reserve(extra)
    }

    /// Returns an iterator over all key-value pairs in the HashMap, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V, B, A> {
        IntoKeys(self.into_iter())
    }

    /// Returns an iterator over all keys in the HashMap, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V, B, A> {
        IntoValues(self.into_iter())
    }

    /// Returns an iterator over all values in the HashMap, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values in the HashMap, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.table.iter_mut())
    }

    /// Removes all entries from the HashMap, keeping its buckets.
    pub fn clear(&mut self) {
        self.table.clear()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Allocator> HashMap<K, V, B, A> {
    /// Inserts the provided `key`-`value` pair into the HashMap. If the key was already associated
    /// with a value, the previous value is returned.
    ///
    /// As with the standard library, the key isn't changed if it already exists.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hkey = self.table.make_hash(&key);
        match self.table.find_raw(hkey, |(existing, _)| *existing == key) {
            Some(node) => Some(mem::replace(&mut node.value_mut().1, value)),
            None => {
                self.table.insert_new_raw(hkey, (key, value));
                None
            },
        }
    }

    /// Inserts the provided `key`-`value` pair, unless the key is already present. Either way, a
    /// mutable reference to the value in the map is returned. If the pair wasn't inserted, it is
    /// handed back unchanged and the length stays the same.
    pub fn emplace(&mut self, key: K, value: V) -> Emplaced<&mut V, (K, V)> {
        let hkey = self.table.make_hash(&key);
        let (node, rejected) = self.table.find_or_insert_raw(hkey, (key, value), |a, b| a.0 == b.0);
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
    pub fn get_or_insert_with(&mut self, key: K, f: impl FnOnce() -> V) -> &mut V {
        let hkey = self.table.make_hash(&key);
        let node = match self.table.find_raw(hkey, |(existing, _)| *existing == key) {
            Some(node) => node,
            None => self.table.insert_new_raw(hkey, (key, f())),
        };
        &mut node.value_mut().1
    }

    /// Returns a mutable reference to the value associated with `key`, inserting the default
    /// value first if there is none.
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no entry.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        // As with the standard library, Q is a borrowed form of K which hashes and compares the
        // same way.
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).map(|node| {
            let entry = node.value();
            (&entry.0, &entry.1)
        })
    }

    /// Returns a reference to the value associated with the provided `key` or None if the map
    /// contains no values for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).map(|node| &node.value().1)
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if the
    /// map contains no values for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).map(|node| &mut node.value_mut().1)
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).is_some()
    }

    /// Removes the entry associated with `key`, returning it if it exists.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hkey = self.table.make_hash(key);
        self.table.remove_raw(hkey, |(existing, _)| existing.borrow() == key)
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    fn find_entry<Q>(&self, key: &Q) -> Link<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hkey = self.table.make_hash(key);
        self.table.find_raw(hkey, |(existing, _)| existing.borrow() == key)
    }
}

impl<K, V> Default for HashMap<K, V> {
    fn default() -> Self {
        HashMap::new()
    }
}

impl<K: Clone, V: Clone, B: Clone, A: Allocator + Clone> Clone for HashMap<K, V, B, A> {
    fn clone(&self) -> Self {
        HashMap {
            table: self.table.clone(),
        }
    }
}

impl<K: Hash + Eq, V: PartialEq, B: BuildHasher, A: Allocator> PartialEq for HashMap<K, V, B, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Hash + Eq, V: Eq, B: BuildHasher, A: Allocator> Eq for HashMap<K, V, B, A> {}

impl<K: Debug, V: Debug, B, A: Allocator> Debug for HashMap<K, V, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher, A: Allocator> Extend<(K, V)> for HashMap<K, V, B, A> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for HashMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
