use std::fmt::{self, Debug, Formatter};
use std::hash::RandomState;

use super::{HashTable, Link};
use crate::alloc::{Allocator, Global};

/// A position in a [`HashTable`], which moves forward through the chain.
///
/// The chain has no meaningful order, but it is stable between modifications. As with the tree
/// cursors, there is a ghost position after the last value, and moving forward from it wraps
/// around to the first value.
pub struct Cursor<'a, T, B = RandomState, A: Allocator = Global> {
    pub(crate) table: &'a HashTable<T, B, A>,
    pub(crate) curr: Link<T>,
}

impl<'a, T, B, A: Allocator> Cursor<'a, T, B, A> {
    pub(crate) const fn new(table: &'a HashTable<T, B, A>, curr: Link<T>) -> Cursor<'a, T, B, A> {
        Cursor {
            table,
            curr,
        }
    }

    /// Returns the value the cursor points at, or None at the ghost position.
    pub fn current(&self) -> Option<&'a T> {
        self.curr.map(|node| node.value())
    }

    pub const fn is_ghost(&self) -> bool {
        self.curr.is_none()
    }

    /// Moves the cursor to the next value in the chain.
    pub fn move_next(&mut self) {
        self.curr = step_next(self.table, self.curr);
    }

    pub fn peek_next(&self) -> Option<&'a T> {
        step_next(self.table, self.curr).map(|node| node.value())
    }
}

impl<T, B, A: Allocator> Clone for Cursor<'_, T, B, A> {
    fn clone(&self) -> Self {
        Cursor {
            table: self.table,
            curr: self.curr,
        }
    }
}

impl<T: Debug, B, A: Allocator> Debug for Cursor<'_, T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

/// A position in a [`HashTable`] which can also remove the value it points at.
pub struct CursorMut<'a, T, B = RandomState, A: Allocator = Global> {
    pub(crate) table: &'a mut HashTable<T, B, A>,
    pub(crate) curr: Link<T>,
}

impl<'a, T, B, A: Allocator> CursorMut<'a, T, B, A> {
    pub(crate) const fn new(
        table: &'a mut HashTable<T, B, A>,
        curr: Link<T>,
    ) -> CursorMut<'a, T, B, A> {
        CursorMut {
            table,
            curr,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.curr.map(|node| node.value())
    }

    /// Consumes the cursor, returning a reference to the value it pointed at which lives as long
    /// as the original borrow of the table.
    pub fn into_current(self) -> Option<&'a T> {
        self.curr.map(|node| node.value())
    }

    pub const fn is_ghost(&self) -> bool {
        self.curr.is_none()
    }

    pub fn move_next(&mut self) {
        self.curr = step_next(self.table, self.curr);
    }

    pub fn peek_next(&self) -> Option<&T> {
        step_next(self.table, self.curr).map(|node| node.value())
    }

    pub fn as_cursor(&self) -> Cursor<'_, T, B, A> {
        Cursor::new(self.table, self.curr)
    }

    /// Removes the value the cursor points at and returns it, moving the cursor to the value that
    /// followed it in the chain. Does nothing and returns None at the ghost position.
    ///
    /// The node before the removed one is found by walking its bucket, so this costs as much as a
    /// lookup.
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.curr?;
        let (value, next) = self.table.remove_node(node);
        self.curr = next;
        Some(value)
    }
}

impl<T: Debug, B, A: Allocator> Debug for CursorMut<'_, T, B, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.current()).finish()
    }
}

fn step_next<T, B, A: Allocator>(table: &HashTable<T, B, A>, curr: Link<T>) -> Link<T> {
    match curr {
        Some(node) => *node.next(),
        None => table.head,
    }
}
