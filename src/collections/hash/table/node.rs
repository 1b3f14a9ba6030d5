use std::ptr::NonNull;

use crate::alloc::{self, Allocator};

pub(crate) type Link<T> = Option<NodeRef<T>>;

pub(crate) struct Node<T> {
    pub value: T,
    pub hkey: u64,
    pub next: Link<T>,
}

// As with the tree, a NodeRef inside a table always points to a live node owned by that table.
#[derive(Debug)]
pub(crate) struct NodeRef<T>(pub NonNull<Node<T>>);

impl<T> NodeRef<T> {
    pub fn alloc_in<A: Allocator + ?Sized>(alloc: &A, node: Node<T>) -> NodeRef<T> {
        NodeRef(alloc::alloc_value(alloc, node))
    }

    /// # Safety
    /// The node must have been allocated by `alloc` and be unlinked from any table.
    pub unsafe fn take_node_in<A: Allocator + ?Sized>(self, alloc: &A) -> Node<T> {
        // SAFETY: Upheld by the caller.
        unsafe { alloc::take_value(alloc, self.0) }
    }

    pub const fn value<'a>(&self) -> &'a T {
        // SAFETY: The node is live.
        unsafe { &(*self.0.as_ptr()).value }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn value_mut<'a>(&self) -> &'a mut T {
        // SAFETY: The node is live and the table is borrowed mutably by the caller.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub const fn hkey(&self) -> u64 {
        // SAFETY: The node is live.
        unsafe { (*self.0.as_ptr()).hkey }
    }

    pub const fn next<'a>(&self) -> &'a Link<T> {
        // SAFETY: The node is live.
        unsafe { &(*self.0.as_ptr()).next }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn next_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: The node is live.
        unsafe { &mut (*self.0.as_ptr()).next }
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<T> {}

impl<T> PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for NodeRef<T> {}

/// The link just before the first entry of a bucket: either the placeholder in front of the whole
/// chain, or the last entry of some other bucket.
#[derive(Debug)]
pub(crate) enum Prev<T> {
    Placeholder,
    Node(NodeRef<T>),
}

impl<T> Clone for Prev<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Prev<T> {}

impl<T> PartialEq for Prev<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Prev::Placeholder, Prev::Placeholder) => true,
            (Prev::Node(a), Prev::Node(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> Eq for Prev<T> {}
