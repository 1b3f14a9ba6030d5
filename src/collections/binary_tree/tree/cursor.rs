use std::fmt::{self, Debug, Formatter};

use super::{Link, RBTree};
use crate::alloc::{Allocator, Global};
use crate::collections::traits::Natural;

/// A position in an [`RBTree`], which can be moved in either direction.
///
/// Besides pointing at a value, a cursor can sit at the "ghost" position, which lies between the
/// last and the first value. Moving forward from the last value reaches the ghost, and moving
/// forward again wraps around to the first value (and likewise backwards).
///
/// A cursor borrows its tree, so it can't outlive it or be used with another tree.
pub struct Cursor<'a, T, C = Natural, A: Allocator = Global> {
    pub(crate) tree: &'a RBTree<T, C, A>,
    pub(crate) curr: Link<T>,
}

impl<'a, T, C, A: Allocator> Cursor<'a, T, C, A> {
    pub(crate) const fn new(tree: &'a RBTree<T, C, A>, curr: Link<T>) -> Cursor<'a, T, C, A> {
        Cursor {
            tree,
            curr,
        }
    }

    /// Returns the value the cursor points at, or None at the ghost position.
    pub fn current(&self) -> Option<&'a T> {
        self.curr.map(|node| node.value())
    }

    /// Returns true if the cursor is at the ghost position.
    pub const fn is_ghost(&self) -> bool {
        self.curr.is_none()
    }

    /// Moves the cursor to the next value, in order.
    pub fn move_next(&mut self) {
        self.curr = step_next(self.tree, self.curr);
    }

    /// Moves the cursor to the previous value, in order.
    pub fn move_prev(&mut self) {
        self.curr = step_prev(self.tree, self.curr);
    }

    /// Returns the value after the cursor without moving it.
    pub fn peek_next(&self) -> Option<&'a T> {
        step_next(self.tree, self.curr).map(|node| node.value())
    }

    /// Returns the value before the cursor without moving it.
    pub fn peek_prev(&self) -> Option<&'a T> {
        step_prev(self.tree, self.curr).map(|node| node.value())
    }
}

impl<T, C, A: Allocator> Clone for Cursor<'_, T, C, A> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree,
            curr: self.curr,
        }
    }
}

impl<T: Debug, C, A: Allocator> Debug for Cursor<'_, T, C, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

/// A position in an [`RBTree`] which can also remove the value it points at. Behaves like a
/// [`Cursor`] otherwise, ghost position included.
pub struct CursorMut<'a, T, C = Natural, A: Allocator = Global> {
    pub(crate) tree: &'a mut RBTree<T, C, A>,
    pub(crate) curr: Link<T>,
}

impl<'a, T, C, A: Allocator> CursorMut<'a, T, C, A> {
    pub(crate) const fn new(
        tree: &'a mut RBTree<T, C, A>,
        curr: Link<T>,
    ) -> CursorMut<'a, T, C, A> {
        CursorMut {
            tree,
            curr,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.curr.map(|node| node.value())
    }

    /// Consumes the cursor, returning a reference to the value it pointed at which lives as long
    /// as the original borrow of the tree.
    pub fn into_current(self) -> Option<&'a T> {
        self.curr.map(|node| node.value())
    }

    pub const fn is_ghost(&self) -> bool {
        self.curr.is_none()
    }

    pub fn move_next(&mut self) {
        self.curr = step_next(self.tree, self.curr);
    }

    pub fn move_prev(&mut self) {
        self.curr = step_prev(self.tree, self.curr);
    }

    pub fn peek_next(&self) -> Option<&T> {
        step_next(self.tree, self.curr).map(|node| node.value())
    }

    pub fn peek_prev(&self) -> Option<&T> {
        step_prev(self.tree, self.curr).map(|node| node.value())
    }

    /// Returns a read-only cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T, C, A> {
        Cursor::new(self.tree, self.curr)
    }

    /// Removes the value the cursor points at and returns it, moving the cursor to the value that
    /// followed it. Does nothing and returns None at the ghost position.
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.curr?;
        let (value, successor) = self.tree.remove_node(node);
        self.curr = successor;
        Some(value)
    }
}

impl<T: Debug, C, A: Allocator> Debug for CursorMut<'_, T, C, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.current()).finish()
    }
}

fn step_next<T, C, A: Allocator>(tree: &RBTree<T, C, A>, curr: Link<T>) -> Link<T> {
    match curr {
        Some(node) => *node.next(),
        None => tree.first_node(),
    }
}

fn step_prev<T, C, A: Allocator>(tree: &RBTree<T, C, A>, curr: Link<T>) -> Link<T> {
    match curr {
        Some(node) => *node.prev(),
        None => tree.last_node(),
    }
}

