use std::alloc::Layout;
use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::mem;

use super::{Cursor, CursorMut, Iter, IterMut, Link, Node, NodeRef, Prev};
use crate::alloc::{Allocator, Global};
use crate::collections::Emplaced;
use crate::util::fmt::DebugRaw;
use crate::util::option::OptionExtension;

/// The number of buckets a new HashTable starts with.
pub const HASH_BUCKET_INITIAL_COUNT: usize = 16;

const GROWTH_FACTOR: usize = 2;

const LOAD_FACTOR_NUMERATOR: usize = 3;
const LOAD_FACTOR_DENOMINATOR: usize = 4;

/// An unordered collection of values which relies on them implementing [`Hash`] and [`Eq`],
/// hashing with `B` and allocating its nodes through `A`.
///
/// All values live in a single singly linked chain. The values of one bucket are always adjacent
/// in the chain, and a bucket stores the link just before its first value rather than the value
/// itself. This makes walking every value `O(n)` regardless of the number of buckets, and lets a
/// removal unlink a node without searching the whole chain for its predecessor.
///
/// Each node caches the mixed hash of its value, so growing the table relinks the existing nodes
/// without hashing or moving any values.
///
/// A custom load factor is not supported, with the table doubling its buckets whenever it would
/// become 3/4 full.
///
/// It is a logic error for a value in a HashTable to be modified in a way that changes its hash
/// or equality, which is why the table only hands out shared references to its values.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of values in the HashTable.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`*, `O(n)`** |
/// | `find` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `reserve` | `O(n)`**, `O(1)` |
///
/// \* Values which land in the same bucket are compared one after another, so heavy collisions
/// make these slower.
///
/// \** Only when the bucket array has to grow.
pub struct HashTable<T, B = RandomState, A: Allocator = Global> {
    pub(crate) buckets: Box<[Option<Prev<T>>]>,
    /// The first node of the chain, which follows the placeholder.
    pub(crate) head: Link<T>,
    pub(crate) len: usize,
    pub(crate) hasher: B,
    pub(crate) alloc: A,
}

impl<T> HashTable<T> {
    /// Creates a new, empty HashTable with a random hasher, allocating from [`Global`].
    pub fn new() -> HashTable<T> {
        HashTable::with_hasher_in(RandomState::new(), Global)
    }

    /// Returns the layout of a single node of a HashTable holding `T`, which is the only layout
    /// the table allocates through its allocator.
    pub const fn node_layout() -> Layout {
        Layout::new::<Node<T>>()
    }
}

impl<T, B> HashTable<T, B> {
    /// Creates a new, empty HashTable which hashes with `hasher`.
    pub fn with_hasher(hasher: B) -> HashTable<T, B> {
        HashTable::with_hasher_in(hasher, Global)
    }
}

impl<T, A: Allocator> HashTable<T, RandomState, A> {
    /// Creates a new, empty HashTable with a random hasher, allocating from `alloc`.
    pub fn new_in(alloc: A) -> HashTable<T, RandomState, A> {
        HashTable::with_hasher_in(RandomState::new(), alloc)
    }
}

impl<T, B, A: Allocator> HashTable<T, B, A> {
    pub fn with_hasher_in(hasher: B, alloc: A) -> HashTable<T, B, A> {
        HashTable {
            buckets: empty_buckets(HASH_BUCKET_INITIAL_COUNT),
            head: None,
            len: 0,
            hasher,
            alloc,
        }
    }

    /// Returns the number of values in the HashTable.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashTable contains no values.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets, which is always a power of two.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Grows the bucket array so that `extra` more values fit without exceeding the load factor,
    /// returning true if it had to grow. Existing nodes are relinked, never reallocated.
    ///
    /// # Panics
    /// Panics if the required number of buckets overflows a `usize`.
    pub fn reserve(&mut self, extra: usize) -> bool {
        let needed = self.len.checked_add(extra).expect("Capacity overflow!");

        let mut num_buckets = self.num_buckets();
        while needed.saturating_mul(LOAD_FACTOR_DENOMINATOR)
            >= num_buckets.saturating_mul(LOAD_FACTOR_NUMERATOR)
        {
            num_buckets = num_buckets.checked_mul(GROWTH_FACTOR).expect("Capacity overflow!");
        }

        if num_buckets == self.num_buckets() {
            return false;
        }

        log::debug!(
            "growing hash table from {} to {num_buckets} buckets for {needed} values",
            self.num_buckets()
        );
        self.rehash(num_buckets);
        true
    }

    /// Returns a cursor at the first value of the chain.
    pub fn cursor_front(&self) -> Cursor<'_, T, B, A> {
        Cursor::new(self, self.head)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, B, A> {
        let head = self.head;
        CursorMut::new(self, head)
    }

    /// Returns an iterator over all values in the HashTable, in chain order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.len)
    }

    /// Returns an iterator over mutable references to all values. The caller must not change the
    /// hash or equality of any value.
    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head, self.len)
    }

    /// Removes and drops all values, keeping the current number of buckets. If dropping a value
    /// panics, the values not yet dropped are leaked and the table is left empty.
    pub fn clear(&mut self) {
        let mut chain = self.head.take();
        self.buckets.fill(None);
        self.len = 0;
        while let Some(node) = chain {
            chain = *node.next();
            // SAFETY: The node was unlinked with the rest of the chain and came from our
            // allocator.
            drop(unsafe { node.take_node_in(&self.alloc) });
        }
    }
}

impl<T, B: BuildHasher, A: Allocator> HashTable<T, B, A> {
    /// Returns a reference to the value equal to `key`, if there is one.
    pub fn find<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_node(key).map(|node| node.value())
    }

    /// Returns true if the HashTable contains a value equal to `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Returns a cursor at the value equal to `key`, or at the ghost position if there is none.
    pub fn cursor_at<Q>(&self, key: &Q) -> Cursor<'_, T, B, A>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Cursor::new(self, self.find_node(key))
    }

    pub fn cursor_at_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, T, B, A>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_node(key);
        CursorMut::new(self, node)
    }

    /// Inserts `value`, replacing and returning an equal value if there was one. The replaced
    /// value's node is reused.
    pub fn insert(&mut self, value: T) -> Option<T>
    where
        T: Hash + Eq,
    {
        let hkey = self.make_hash(&value);
        match self.find_raw(hkey, |existing| *existing == value) {
            Some(node) => Some(mem::replace(node.value_mut(), value)),
            None => {
                self.insert_new_raw(hkey, value);
                None
            },
        }
    }

    /// Inserts `value` unless an equal value is already present. Either way, a cursor at the
    /// value in the table is returned. If `value` wasn't inserted, it is handed back unchanged.
    pub fn find_or_insert(&mut self, value: T) -> Emplaced<CursorMut<'_, T, B, A>, T>
    where
        T: Hash + Eq,
    {
        let hkey = self.make_hash(&value);
        let (node, rejected) = self.find_or_insert_raw(hkey, value, T::eq);
        let cursor = CursorMut::new(self, Some(node));
        match rejected {
            None => Emplaced::Inserted(cursor),
            Some(rejected) => Emplaced::Existing {
                found: cursor,
                rejected,
            },
        }
    }

    /// Removes and returns the value equal to `key`, if there is one.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_raw(self.make_hash(key), |existing| existing.borrow() == key)
    }
}

impl<T, B: BuildHasher, A: Allocator> HashTable<T, B, A> {
    /// Hashes `key` with the table's hasher and folds the upper half of the hash into the lower
    /// half, so that masking off the bucket index still depends on every bit.
    pub(crate) fn make_hash<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        let hash = self.hasher.hash_one(key);
        hash ^ (hash >> 32)
    }

    fn find_node<Q>(&self, key: &Q) -> Link<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_raw(self.make_hash(key), |existing| existing.borrow() == key)
    }
}

impl<T, B, A: Allocator> HashTable<T, B, A> {
    /// Finds the node with the mixed hash `hkey` whose value satisfies `eq`.
    pub(crate) fn find_raw(&self, hkey: u64, eq: impl FnMut(&T) -> bool) -> Link<T> {
        self.locate(hkey, eq).map(|(_, node)| node)
    }

    /// Finds the node with the mixed hash `hkey` whose value `eq` considers equal to `value`, or
    /// inserts `value` with that hash. Returns the node and, if nothing was inserted, `value`
    /// itself.
    pub(crate) fn find_or_insert_raw(
        &mut self,
        hkey: u64,
        value: T,
        mut eq: impl FnMut(&T, &T) -> bool,
    ) -> (NodeRef<T>, Option<T>) {
        match self.find_raw(hkey, |existing| eq(existing, &value)) {
            Some(node) => (node, Some(value)),
            None => (self.insert_new_raw(hkey, value), None),
        }
    }

    /// Inserts `value` with the mixed hash `hkey`, which must not be equal to any value already
    /// in the table. Grows the bucket array first if needed.
    pub(crate) fn insert_new_raw(&mut self, hkey: u64, value: T) -> NodeRef<T> {
        self.reserve(1);

        let node = NodeRef::alloc_in(
            &self.alloc,
            Node {
                value,
                hkey,
                next: None,
            },
        );
        self.push_to_bucket(node);
        self.len += 1;
        node
    }

    /// Removes the value with the mixed hash `hkey` which satisfies `eq`, if there is one.
    pub(crate) fn remove_raw(&mut self, hkey: u64, eq: impl FnMut(&T) -> bool) -> Option<T> {
        let (prev, node) = self.locate(hkey, eq)?;
        Some(self.unlink(prev, node))
    }

    /// Unlinks and deallocates `node`, returning its value and the node that followed it in the
    /// chain. `node` must belong to this table.
    pub(crate) fn remove_node(&mut self, node: NodeRef<T>) -> (T, Link<T>) {
        let next = *node.next();
        let prev = self.prev_of(node);
        (self.unlink(prev, node), next)
    }

    /// Finds a node along with the link before it.
    fn locate(&self, hkey: u64, mut eq: impl FnMut(&T) -> bool) -> Option<(Prev<T>, NodeRef<T>)> {
        let index = self.bucket_index(hkey);
        let mut prev = self.buckets[index]?;

        while let Some(node) = self.next_of(prev)
            && self.bucket_index(node.hkey()) == index
        {
            if node.hkey() == hkey && eq(node.value()) {
                return Some((prev, node));
            }
            prev = Prev::Node(node);
        }

        None
    }

    /// Finds the link before `node` by walking its bucket.
    fn prev_of(&self, node: NodeRef<T>) -> Prev<T> {
        let index = self.bucket_index(node.hkey());
        // SAFETY: The node is in the table, so its bucket isn't empty.
        let mut prev = unsafe { self.buckets[index].unreachable() };

        while let Some(next) = self.next_of(prev)
            && next != node
        {
            debug_assert!(
                self.bucket_index(next.hkey()) == index,
                "Node isn't part of this table!"
            );
            prev = Prev::Node(next);
        }

        prev
    }

    /// Links `node` in as the first entry of its bucket. The length isn't changed.
    fn push_to_bucket(&mut self, node: NodeRef<T>) {
        let index = self.bucket_index(node.hkey());

        match self.buckets[index] {
            Some(prev) => {
                *node.next_mut() = self.next_of(prev);
                self.set_next(prev, Some(node));
            },
            None => {
                // An empty bucket starts a new run at the front of the chain, which means the
                // run that used to start it now follows the new node.
                *node.next_mut() = self.head;
                if let Some(old_head) = self.head {
                    let old_index = self.bucket_index(old_head.hkey());
                    self.buckets[old_index] = Some(Prev::Node(node));
                }
                self.head = Some(node);
                self.buckets[index] = Some(Prev::Placeholder);
            },
        }
    }

    /// Unlinks `node`, which follows `prev`, and returns its value.
    fn unlink(&mut self, prev: Prev<T>, node: NodeRef<T>) -> T {
        let index = self.bucket_index(node.hkey());
        let next = *node.next();
        self.set_next(prev, next);

        let next_index = next.map(|next| self.bucket_index(next.hkey()));
        if let Some(next_index) = next_index
            && next_index != index
        {
            self.buckets[next_index] = Some(prev);
        }

        if self.buckets[index] == Some(prev) && next_index != Some(index) {
            self.buckets[index] = None;
        }

        self.len -= 1;
        // SAFETY: The node is no longer linked anywhere and came from our allocator.
        unsafe { node.take_node_in(&self.alloc) }.value
    }

    fn rehash(&mut self, num_buckets: usize) {
        let mut chain = self.head.take();
        self.buckets = empty_buckets(num_buckets);

        while let Some(node) = chain {
            chain = *node.next();
            self.push_to_bucket(node);
        }
    }

    fn bucket_index(&self, hkey: u64) -> usize {
        // The bucket count is a power of two, so masking is the same as taking the remainder.
        (hkey & (self.buckets.len() as u64 - 1)) as usize
    }

    fn next_of(&self, prev: Prev<T>) -> Link<T> {
        match prev {
            Prev::Placeholder => self.head,
            Prev::Node(node) => *node.next(),
        }
    }

    fn set_next(&mut self, prev: Prev<T>, link: Link<T>) {
        match prev {
            Prev::Placeholder => self.head = link,
            Prev::Node(node) => *node.next_mut() = link,
        }
    }

    /// Returns an iterator over the values of the bucket at `index`.
    fn bucket_values(&self, index: usize) -> impl Iterator<Item = &T> {
        let mut link = self.buckets[index].and_then(|prev| self.next_of(prev));
        std::iter::from_fn(move || {
            let node = link.filter(|node| self.bucket_index(node.hkey()) == index)?;
            link = *node.next();
            Some(node.value())
        })
    }
}

#[cfg(test)]
impl<T, B, A: Allocator> HashTable<T, B, A> {
    /// Walks the chain, panicking if any bucket is split, any slot is stale or the length is
    /// wrong.
    pub(crate) fn validate(&self) {
        let mut seen = vec![false; self.num_buckets()];
        let mut prev = Prev::Placeholder;
        let mut last_index = None;
        let mut count = 0;

        while let Some(node) = self.next_of(prev) {
            let index = self.bucket_index(node.hkey());
            if last_index != Some(index) {
                assert!(!seen[index], "Bucket {index} is split across the chain.");
                seen[index] = true;
                assert!(
                    self.buckets[index] == Some(prev),
                    "Bucket {index} doesn't store the link before its first node."
                );
            }

            last_index = Some(index);
            count += 1;
            prev = Prev::Node(node);
        }

        for (index, slot) in self.buckets.iter().enumerate() {
            assert_eq!(slot.is_some(), seen[index], "Bucket {index} slot doesn't match the chain.");
        }
        assert_eq!(count, self.len, "Length doesn't match the number of nodes.");
    }

    /// Returns the number of values in the bucket at `index`.
    pub(crate) fn bucket_len(&self, index: usize) -> usize {
        self.bucket_values(index).count()
    }
}

fn empty_buckets<T>(num_buckets: usize) -> Box<[Option<Prev<T>>]> {
    vec![None; num_buckets].into_boxed_slice()
}

impl<T, B, A: Allocator> Drop for HashTable<T, B, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, B: Default, A: Allocator + Default> Default for HashTable<T, B, A> {
    fn default() -> Self {
        HashTable::with_hasher_in(B::default(), A::default())
    }
}

impl<T: Clone, B: Clone, A: Allocator + Clone> Clone for HashTable<T, B, A> {
    fn clone(&self) -> Self {
        let mut table = HashTable {
            buckets: empty_buckets(self.num_buckets()),
            head: None,
            len: 0,
            hasher: self.hasher.clone(),
            alloc: self.alloc.clone(),
        };

        // The cached hashes are reused, so nothing is hashed again and the bucket count can't
        // change.
        let mut link = self.head;
        while let Some(node) = link {
            let copy = NodeRef::alloc_in(
                &table.alloc,
                Node {
                    value: node.value().clone(),
                    hkey: node.hkey(),
                    next: None,
                },
            );
            table.push_to_bucket(copy);
            table.len += 1;
            link = *node.next();
        }

        table
    }
}

impl<T: Debug, B, A: Allocator> Debug for HashTable<T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let buckets = (0..self.num_buckets()).map(|index| {
            DebugRaw(match self.buckets[index] {
                Some(_) => format!("{:?}", self.bucket_values(index).collect::<Vec<_>>()),
                None => "-".into(),
            })
        });

        f.debug_struct("HashTable")
            .field("buckets", &buckets.collect::<Vec<_>>())
            .field("len", &self.len)
            .finish()
    }
}

impl<T: Hash + Eq, B: BuildHasher, A: Allocator> Extend<T> for HashTable<T, B, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default, A: Allocator + Default> FromIterator<T>
    for HashTable<T, B, A>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = HashTable::default();
        table.extend(iter);
        table
    }
}

// SAFETY: The table owns its nodes exclusively, as if they were boxed.
unsafe impl<T: Send, B: Send, A: Allocator + Send> Send for HashTable<T, B, A> {}

// SAFETY: Shared access to the table only gives out shared access to its values.
unsafe impl<T: Sync, B: Sync, A: Allocator + Sync> Sync for HashTable<T, B, A> {}
