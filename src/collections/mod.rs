//! Associative collection types, built on two node-based cores.
//!
//! # Purpose
//! [`RBTree`](binary_tree::RBTree) and [`HashTable`](hash::HashTable) do all of the real work
//! here. The maps and sets are thin adapters that decide what part of a stored value is its key
//! and add set algebra on top.
//!
//! # Method
//! Both cores allocate one node per value through an [`Allocator`](crate::alloc::Allocator) and
//! never move a node once it is linked, so a node allocator such as
//! [`MallocPool`](crate::alloc::MallocPool) can back them. Positions inside a container are
//! exposed as cursors, which borrow the container for as long as they live.

#[cfg(feature = "binary-tree")]
pub mod binary_tree;
mod emplace;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "traits")]
pub mod traits;

pub use emplace::*;
