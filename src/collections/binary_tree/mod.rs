//! Ordered collections built on an intrusive red-black tree.
//!
//! [`RBTree`] is the core, a balanced binary search tree whose nodes are also threaded into a
//! doubly linked list in sorted order, so stepping to the next or previous element never needs to
//! climb the tree. [`TreeMap`] and [`TreeSet`] are built on top of it.

pub mod map;
pub mod set;
pub mod tree;

pub use map::TreeMap;
pub use set::TreeSet;
pub use tree::RBTree;
