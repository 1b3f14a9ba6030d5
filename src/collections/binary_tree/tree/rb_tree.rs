use std::alloc::Layout;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;

use super::{Color, Cursor, CursorMut, Iter, IterMut, Link, Node, NodeRef, Side, is_red};
use crate::alloc::{Allocator, Global};
use crate::collections::Emplaced;
use crate::collections::traits::{Compare, Natural};
use crate::util::option::OptionExtension;

/// A self-balancing binary search tree, ordered by the comparator `C` and allocating its nodes
/// through `A`.
///
/// Besides the usual parent and child links, every node is part of a doubly linked chain in
/// sorted order. Rotations never change the sorted order, so they never touch the chain, and
/// stepping a cursor or iterator to a neighbour is always `O(1)`.
///
/// Equal values are allowed: [`insert`](RBTree::insert) places a new value after any values it
/// compares equal to. [`insert_unique`](RBTree::insert_unique) and
/// [`find_or_insert`](RBTree::find_or_insert) keep at most one of each.
///
/// It is a logic error for a value to be modified in a way that changes its order relative to the
/// other values in the tree, which is why the tree only hands out shared references to its values.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of values in the tree.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `first`, `last` | `O(log n)` |
/// | `find`, `contains` | `O(log n)` |
/// | `insert`, `insert_unique` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `CursorMut::remove_current` | `O(log n)`* |
/// | `Cursor::move_next`, `Cursor::move_prev` | `O(1)` |
///
/// \* Rebalancing after a removal performs at most three rotations, but recoloring may walk up
/// the tree.
pub struct RBTree<T, C = Natural, A: Allocator = Global> {
    pub(crate) root: Link<T>,
    pub(crate) len: usize,
    pub(crate) cmp: C,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RBTree<T> {
    /// Creates a new, empty RBTree ordered by [`Ord`] and allocating from [`Global`].
    pub const fn new() -> RBTree<T> {
        RBTree::with_compare_in(Natural, Global)
    }

    /// Returns the layout of a single node of an RBTree holding `T`, which is the only layout the
    /// tree ever allocates. Useful for configuring a [`MallocPool`](crate::alloc::MallocPool).
    pub const fn node_layout() -> Layout {
        Layout::new::<Node<T>>()
    }
}

impl<T, C> RBTree<T, C> {
    /// Creates a new, empty RBTree ordered by the provided comparator.
    pub const fn with_compare(cmp: C) -> RBTree<T, C> {
        RBTree::with_compare_in(cmp, Global)
    }
}

impl<T, A: Allocator> RBTree<T, Natural, A> {
    /// Creates a new, empty RBTree ordered by [`Ord`] and allocating from `alloc`.
    pub const fn new_in(alloc: A) -> RBTree<T, Natural, A> {
        RBTree::with_compare_in(Natural, alloc)
    }
}

impl<T, C, A: Allocator> RBTree<T, C, A> {
    /// Creates a new, empty RBTree with the provided comparator and allocator.
    pub const fn with_compare_in(cmp: C, alloc: A) -> RBTree<T, C, A> {
        RBTree {
            root: None,
            len: 0,
            cmp,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of values in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no values.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a reference to the smallest value in the tree.
    pub fn first(&self) -> Option<&T> {
        self.first_node().map(|node| node.value())
    }

    /// Returns a reference to the largest value in the tree.
    pub fn last(&self) -> Option<&T> {
        self.last_node().map(|node| node.value())
    }

    /// Returns a reference to a value comparing equal to `key`, or None if there is no such
    /// value. If several values compare equal, the first one encountered from the root is
    /// returned.
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Option<&T>
    where
        C: Compare<Q, T>,
    {
        self.find_node(key).map(|node| node.value())
    }

    /// Searches the tree using `f`, which should return how the value being searched for
    /// compares to the value it is given. Returns a reference to the value for which `f` returned
    /// [`Ordering::Equal`].
    ///
    /// `f` must be consistent with the order of the tree.
    pub fn find_by(&self, f: impl FnMut(&T) -> Ordering) -> Option<&T> {
        self.find_node_by(f).map(|node| node.value())
    }

    /// Returns true if the tree contains a value comparing equal to `key`.
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
    where
        C: Compare<Q, T>,
    {
        self.find_node(key).is_some()
    }

    /// Inserts `value` into the tree, even if an equal value is already present, and returns a
    /// cursor pointing at it. The new value is placed after any values equal to it.
    pub fn insert(&mut self, value: T) -> CursorMut<'_, T, C, A>
    where
        C: Compare<T>,
    {
        // Treating equal values as greater sends duplicates to the right.
        let Err((parent, side)) =
            self.search(|other| self.cmp.compare(&value, other).then(Ordering::Greater))
        else {
            unreachable!("Search never matches when ties are broken!")
        };
        let node = self.attach(parent, side, value);
        CursorMut::new(self, Some(node))
    }

    /// Inserts `value` into the tree, unless an equal value is already present. In that case,
    /// `value` takes the place of the existing value, which is returned.
    pub fn insert_unique(&mut self, value: T) -> Option<T>
    where
        C: Compare<T>,
    {
        let (node, rejected) = self.find_or_insert_node(value);
        rejected.map(|value| mem::replace(node.value_mut(), value))
    }

    /// Inserts `value` into the tree, unless an equal value is already present. Either way, a
    /// cursor pointing to the value in the tree is returned. If `value` wasn't inserted, it is
    /// handed back as [`Emplaced::Existing::rejected`](Emplaced::Existing).
    pub fn find_or_insert(&mut self, value: T) -> Emplaced<CursorMut<'_, T, C, A>, T>
    where
        C: Compare<T>,
    {
        match self.find_or_insert_node(value) {
            (node, None) => Emplaced::Inserted(CursorMut::new(self, Some(node))),
            (node, Some(rejected)) => Emplaced::Existing {
                found: CursorMut::new(self, Some(node)),
                rejected,
            },
        }
    }

    /// Looks for a value comparing equal to `key`. If there is none, `f` is called to create one,
    /// which is inserted. Returns a cursor pointing to the value and whether it was inserted.
    ///
    /// The value returned by `f` must compare equal to `key`.
    pub fn find_or_insert_with<Q: ?Sized>(
        &mut self,
        key: &Q,
        f: impl FnOnce() -> T,
    ) -> (CursorMut<'_, T, C, A>, bool)
    where
        C: Compare<Q, T>,
    {
        match self.search(|other| self.cmp.compare(key, other)) {
            Ok(node) => (CursorMut::new(self, Some(node)), false),
            Err((parent, side)) => {
                let value = f();
                debug_assert_eq!(
                    self.cmp.compare(key, &value),
                    Ordering::Equal,
                    "Created value doesn't match its key!"
                );
                let node = self.attach(parent, side, value);
                (CursorMut::new(self, Some(node)), true)
            },
        }
    }

    /// Removes a value comparing equal to `key` from the tree and returns it, or None if there is
    /// no such value.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<T>
    where
        C: Compare<Q, T>,
    {
        let node = self.find_node(key)?;
        Some(self.remove_node(node).0)
    }

    /// Removes and returns the smallest value in the tree.
    pub fn pop_first(&mut self) -> Option<T> {
        let node = self.first_node()?;
        Some(self.remove_node(node).0)
    }

    /// Removes and returns the largest value in the tree.
    pub fn pop_last(&mut self) -> Option<T> {
        let node = self.last_node()?;
        Some(self.remove_node(node).0)
    }

    /// Returns a cursor pointing at the smallest value, or the ghost position if the tree is
    /// empty.
    pub fn cursor_front(&self) -> Cursor<'_, T, C, A> {
        Cursor::new(self, self.first_node())
    }

    /// Returns a cursor pointing at the largest value, or the ghost position if the tree is
    /// empty.
    pub fn cursor_back(&self) -> Cursor<'_, T, C, A> {
        Cursor::new(self, self.last_node())
    }

    /// Returns a cursor pointing at a value comparing equal to `key`, or the ghost position if
    /// there is no such value.
    pub fn cursor_at<Q: ?Sized>(&self, key: &Q) -> Cursor<'_, T, C, A>
    where
        C: Compare<Q, T>,
    {
        Cursor::new(self, self.find_node(key))
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, C, A> {
        let node = self.first_node();
        CursorMut::new(self, node)
    }

    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, C, A> {
        let node = self.last_node();
        CursorMut::new(self, node)
    }

    pub fn cursor_at_mut<Q: ?Sized>(&mut self, key: &Q) -> CursorMut<'_, T, C, A>
    where
        C: Compare<Q, T>,
    {
        let node = self.find_node(key);
        CursorMut::new(self, node)
    }

    /// Returns an iterator over all values in the tree, in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.first_node(),
            back: self.last_node(),
            len: self.len,
            _phantom: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to all values in the tree. The caller must
    /// not change the order of any value.
    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.first_node(),
            back: self.last_node(),
            len: self.len,
            _phantom: PhantomData,
        }
    }

    /// Removes and drops all values in the tree. If dropping a value panics, the values not yet
    /// dropped are leaked and the tree is left empty.
    pub fn clear(&mut self) {
        let root = self.root.take();
        self.len = 0;
        self.destroy(root);
    }
}

impl<T, C, A: Allocator> RBTree<T, C, A> {
    pub(crate) fn first_node(&self) -> Link<T> {
        self.extreme_node(Side::Left)
    }

    pub(crate) fn last_node(&self) -> Link<T> {
        self.extreme_node(Side::Right)
    }

    fn extreme_node(&self, side: Side) -> Link<T> {
        let mut node = self.root?;
        while let Some(child) = *node.child(side) {
            node = child;
        }
        Some(node)
    }

    pub(crate) fn find_node<Q: ?Sized>(&self, key: &Q) -> Link<T>
    where
        C: Compare<Q, T>,
    {
        self.search(|other| self.cmp.compare(key, other)).ok()
    }

    pub(crate) fn find_node_by(&self, f: impl FnMut(&T) -> Ordering) -> Link<T> {
        self.search(f).ok()
    }

    /// Descends from the root, following `ordering` which compares the target to each visited
    /// value. Returns the matching node, or the parent and side a node for the target would be
    /// attached to.
    fn search(
        &self,
        mut ordering: impl FnMut(&T) -> Ordering,
    ) -> Result<NodeRef<T>, (Link<T>, Side)> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;

        while let Some(node) = curr {
            side = match ordering(node.value()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Ok(node),
            };
            parent = curr;
            curr = *node.child(side);
        }

        Err((parent, side))
    }

    /// Returns the node holding a value equal to `value`, inserting it if there is none. When the
    /// value wasn't inserted, it is returned alongside the existing node.
    pub(crate) fn find_or_insert_node(&mut self, value: T) -> (NodeRef<T>, Option<T>)
    where
        C: Compare<T>,
    {
        match self.search(|other| self.cmp.compare(&value, other)) {
            Ok(node) => (node, Some(value)),
            Err((parent, side)) => (self.attach(parent, side, value), None),
        }
    }

    /// Returns the node holding a value equal to `key`, building one from the key with `make`
    /// if there is none. The flag is true if a node was inserted.
    pub(crate) fn find_or_insert_node_with<K>(
        &mut self,
        key: K,
        make: impl FnOnce(K) -> T,
    ) -> (NodeRef<T>, bool)
    where
        C: Compare<K, T>,
    {
        match self.search(|other| self.cmp.compare(&key, other)) {
            Ok(node) => (node, false),
            Err((parent, side)) => (self.attach(parent, side, make(key)), true),
        }
    }

    /// Allocates a node for `value` and attaches it as a leaf at the provided position, then
    /// rebalances.
    fn attach(&mut self, parent: Link<T>, side: Side, value: T) -> NodeRef<T> {
        let node = NodeRef::alloc_in(&self.alloc, Node {
            value,
            parent,
            left: None,
            right: None,
            prev: None,
            next: None,
            color: Color::Red,
        });

        match parent {
            None => self.root = Some(node),
            Some(parent) => {
                *parent.child_mut(side) = Some(node);

                // A new leaf sits between its parent and the parent's neighbour on the same side.
                let (prev, next) = match side {
                    Side::Left => (*parent.prev(), Some(parent)),
                    Side::Right => (Some(parent), *parent.next()),
                };
                *node.prev_mut() = prev;
                *node.next_mut() = next;
                if let Some(prev) = prev {
                    *prev.next_mut() = Some(node);
                }
                if let Some(next) = next {
                    *next.prev_mut() = Some(node);
                }
            },
        }

        self.len += 1;
        self.insert_fixup(node);
        node
    }

    fn insert_fixup(&mut self, mut node: NodeRef<T>) {
        while let Some(mut parent) = *node.parent()
            && parent.is_red()
        {
            // SAFETY: The root is always black, so a red node has a parent.
            let grandparent = unsafe { parent.parent().unreachable() };
            let side = grandparent.side_of(Some(parent));

            match *grandparent.child(side.opposite()) {
                Some(uncle) if uncle.is_red() => {
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    grandparent.set_color(Color::Red);
                    node = grandparent;
                },
                _ => {
                    if *parent.child(side.opposite()) == Some(node) {
                        // Straighten the zig-zag, so that node and parent swap roles.
                        self.rotate(parent, side);
                        (node, parent) = (parent, node);
                    }
                    parent.set_color(Color::Black);
                    grandparent.set_color(Color::Red);
                    self.rotate(grandparent, side.opposite());
                },
            }
        }

        if let Some(root) = self.root {
            root.set_color(Color::Black);
        }
    }

    /// Unlinks `node` from the tree and its chain, rebalances and deallocates it. Returns the
    /// removed value and the node holding the value which followed it.
    pub(crate) fn remove_node(&mut self, node: NodeRef<T>) -> (T, Link<T>) {
        debug_assert!(self.contains_node(node), "Node does not belong to this tree!");

        let (target, successor) = match (*node.left(), *node.right()) {
            (Some(_), Some(_)) => {
                // SAFETY: A node with a right child has an in-order successor.
                let next = unsafe { node.next().unreachable() };
                // The successor's node is removed in place of this one, which takes its value.
                mem::swap(node.value_mut(), next.value_mut());
                (next, Some(node))
            },
            _ => (node, *node.next()),
        };

        let (prev, next) = (*target.prev(), *target.next());
        if let Some(prev) = prev {
            *prev.next_mut() = next;
        }
        if let Some(next) = next {
            *next.prev_mut() = prev;
        }

        // The target has at most one child.
        let child = (*target.left()).or(*target.right());
        let parent = *target.parent();
        if let Some(child) = child {
            *child.parent_mut() = parent;
        }
        self.replace_child(parent, target, child);

        if target.color() == Color::Black {
            self.remove_fixup(child, parent);
        }

        self.len -= 1;
        // SAFETY: The target is unlinked from the tree and was allocated with self.alloc.
        let removed = unsafe { target.take_node_in(&self.alloc) };
        (removed.value, successor)
    }

    /// Restores the black height after a black node was removed from above `node`, which may be
    /// missing, so its parent is tracked separately.
    fn remove_fixup(&mut self, mut node: Link<T>, mut parent: Link<T>) {
        while node != self.root && !is_red(node) {
            let Some(above) = parent else {
                break;
            };
            let side = above.side_of(node);
            let other = side.opposite();

            // SAFETY: The path through node is one black node short, so its sibling can't be
            // missing.
            let mut sibling = unsafe { above.child(other).unreachable() };

            if sibling.is_red() {
                sibling.set_color(Color::Black);
                above.set_color(Color::Red);
                self.rotate(above, side);
                // SAFETY: The red sibling's inner child is black and non-empty.
                sibling = unsafe { above.child(other).unreachable() };
            }

            if !is_red(*sibling.child(side)) && !is_red(*sibling.child(other)) {
                sibling.set_color(Color::Red);
                node = Some(above);
                parent = *above.parent();
            } else {
                if !is_red(*sibling.child(other)) {
                    // SAFETY: One of the sibling's children is red, and it isn't this one.
                    let near = unsafe { sibling.child(side).unreachable() };
                    near.set_color(Color::Black);
                    sibling.set_color(Color::Red);
                    self.rotate(sibling, other);
                    // SAFETY: The rotation lifted near into the sibling's place.
                    sibling = unsafe { above.child(other).unreachable() };
                }

                sibling.set_color(above.color());
                above.set_color(Color::Black);
                if let Some(far) = *sibling.child(other) {
                    far.set_color(Color::Black);
                }
                self.rotate(above, side);
                node = self.root;
                break;
            }
        }

        if let Some(node) = node {
            node.set_color(Color::Black);
        }
    }

    /// Rotates `node` down towards `side`, lifting its child on the opposite side into its place.
    fn rotate(&mut self, node: NodeRef<T>, side: Side) {
        let other = side.opposite();
        // SAFETY: Rotations are only performed towards the side opposite an existing child.
        let pivot = unsafe { node.child(other).unreachable() };

        let inner = *pivot.child(side);
        *node.child_mut(other) = inner;
        if let Some(inner) = inner {
            *inner.parent_mut() = Some(node);
        }

        let parent = *node.parent();
        *pivot.parent_mut() = parent;
        self.replace_child(parent, node, Some(pivot));

        *pivot.child_mut(side) = Some(node);
        *node.parent_mut() = Some(pivot);
    }

    fn replace_child(&mut self, parent: Link<T>, old: NodeRef<T>, new: Link<T>) {
        match parent {
            None => self.root = new,
            Some(parent) => *parent.child_mut(parent.side_of(Some(old))) = new,
        }
    }

    /// Returns true if `node` is part of this tree. `node` must be a live node of some tree.
    pub(crate) fn contains_node(&self, node: NodeRef<T>) -> bool {
        let mut curr = node;
        while let Some(parent) = *curr.parent() {
            curr = parent;
        }
        self.root == Some(curr)
    }

    /// Deallocates the subtree under `link`, children first. The chain is ignored.
    fn destroy(&mut self, link: Link<T>) {
        if let Some(node) = link {
            self.destroy(*node.left());
            self.destroy(*node.right());
            // SAFETY: Both children are gone and the parent is destroyed after this node, so
            // nothing reaches it anymore.
            drop(unsafe { node.take_node_in(&self.alloc) });
        }
    }
}

#[cfg(test)]
impl<T, C: Compare<T>, A: Allocator> RBTree<T, C, A> {
    /// Walks the whole tree, panicking if any red-black, ordering, parent or chain invariant
    /// doesn't hold.
    pub(crate) fn validate(&self) {
        fn walk<T, C: Compare<T>>(
            cmp: &C,
            link: Link<T>,
            parent: Link<T>,
            in_order: &mut Vec<NodeRef<T>>,
        ) -> usize {
            let Some(node) = link else {
                return 1;
            };

            assert!(*node.parent() == parent, "Parent link is inconsistent.");
            if node.is_red() {
                assert!(
                    !is_red(*node.left()) && !is_red(*node.right()),
                    "Red node has a red child."
                );
            }

            let left = walk(cmp, *node.left(), link, in_order);
            in_order.push(node);
            let right = walk(cmp, *node.right(), link, in_order);
            assert_eq!(left, right, "Black height differs between subtrees.");

            left + usize::from(!node.is_red())
        }

        assert!(!is_red(self.root), "Root is red.");

        let mut in_order = Vec::with_capacity(self.len);
        walk(&self.cmp, self.root, None, &mut in_order);
        assert_eq!(in_order.len(), self.len, "Length doesn't match the number of nodes.");

        for pair in in_order.windows(2) {
            assert_ne!(
                self.cmp.compare(pair[0].value(), pair[1].value()),
                Ordering::Greater,
                "In-order traversal is out of order."
            );
            assert!(
                *pair[0].next() == Some(pair[1]) && *pair[1].prev() == Some(pair[0]),
                "Chain doesn't match the in-order traversal."
            );
        }

        if let (Some(first), Some(last)) = (in_order.first(), in_order.last()) {
            assert!(first.prev().is_none(), "First node has a predecessor.");
            assert!(last.next().is_none(), "Last node has a successor.");
        }
    }
}

impl<T, C, A: Allocator> Drop for RBTree<T, C, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, C: Default, A: Allocator + Default> Default for RBTree<T, C, A> {
    fn default() -> Self {
        RBTree::with_compare_in(C::default(), A::default())
    }
}

impl<T: Clone, C: Compare<T> + Clone, A: Allocator + Clone> Clone for RBTree<T, C, A> {
    fn clone(&self) -> Self {
        let mut tree = RBTree::with_compare_in(self.cmp.clone(), self.alloc.clone());
        tree.extend(self.iter().cloned());
        tree
    }
}

impl<T: Debug, C, A: Allocator> Debug for RBTree<T, C, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C: Compare<T>, A: Allocator> Extend<T> for RBTree<T, C, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C: Compare<T> + Default, A: Allocator + Default> FromIterator<T> for RBTree<T, C, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RBTree::default();
        tree.extend(iter);
        tree
    }
}

// SAFETY: The tree owns its nodes exclusively, as if they were boxed.
unsafe impl<T: Send, C: Send, A: Allocator + Send> Send for RBTree<T, C, A> {}

// SAFETY: Shared access to the tree only gives out shared access to its values.
unsafe impl<T: Sync, C: Sync, A: Allocator + Sync> Sync for RBTree<T, C, A> {}
