use std::ptr::NonNull;

use crate::alloc::{self, Allocator};

pub(crate) type Link<T> = Option<NodeRef<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child of a node, used so that every mirrored case of the balancing algorithms is only
/// written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub(crate) struct Node<T> {
    pub value: T,
    pub parent: Link<T>,
    pub left: Link<T>,
    pub right: Link<T>,
    pub prev: Link<T>,
    pub next: Link<T>,
    pub color: Color,
}

// Every NodeRef handed around inside a tree points to a live node owned by that tree, which is
// what makes the accessors below sound. The tree's API never lets a NodeRef escape.
#[derive(Debug)]
pub(crate) struct NodeRef<T>(pub NonNull<Node<T>>);

impl<T> NodeRef<T> {
    pub fn alloc_in<A: Allocator + ?Sized>(alloc: &A, node: Node<T>) -> NodeRef<T> {
        NodeRef(alloc::alloc_value(alloc, node))
    }

    /// # Safety
    /// The node must have been allocated by `alloc` and be unlinked from any tree.
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
        // SAFETY: The node is live and the tree is borrowed mutably by the caller.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub const fn parent<'a>(&self) -> &'a Link<T> {
        // SAFETY: The node is live.
        unsafe { &(*self.0.as_ptr()).parent }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn parent_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: The node is live.
        unsafe { &mut (*self.0.as_ptr()).parent }
    }

    pub const fn child<'a>(&self, side: Side) -> &'a Link<T> {
        // SAFETY: The node is live.
        unsafe {
            match side {
                Side::Left => &(*self.0.as_ptr()).left,
                Side::Right => &(*self.0.as_ptr()).right,
            }
        }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn child_mut<'a>(&self, side: Side) -> &'a mut Link<T> {
        // SAFETY: The node is live.
        unsafe {
            match side {
                Side::Left => &mut (*self.0.as_ptr()).left,
                Side::Right => &mut (*self.0.as_ptr()).right,
            }
        }
    }

    pub const fn left<'a>(&self) -> &'a Link<T> {
        self.child(Side::Left)
    }

    pub const fn right<'a>(&self) -> &'a Link<T> {
        self.child(Side::Right)
    }

    pub const fn prev<'a>(&self) -> &'a Link<T> {
        // SAFETY: The node is live.
        unsafe { &(*self.0.as_ptr()).prev }
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn prev_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: The node is live.
        unsafe { &mut (*self.0.as_ptr()).prev }
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

    pub const fn color(&self) -> Color {
        // SAFETY: The node is live.
        unsafe { (*self.0.as_ptr()).color }
    }

    pub const fn set_color(&self, color: Color) {
        // SAFETY: The node is live.
        unsafe { (*self.0.as_ptr()).color = color }
    }

    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    /// Returns the side of this node that `child` hangs from.
    pub fn side_of(&self, child: Link<T>) -> Side {
        if *self.left() == child {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Missing children count as black.
pub(crate) fn is_red<T>(link: Link<T>) -> bool {
    link.is_some_and(|node| node.is_red())
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
