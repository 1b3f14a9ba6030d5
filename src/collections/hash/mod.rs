//! Unordered collections built on a chained hash table.
//!
//! [`HashTable`] is the core: every entry lives in one singly linked chain, grouped by bucket,
//! and each bucket remembers the link just before its first entry. [`HashMap`] and [`HashSet`]
//! are built on top of it.

pub mod map;
pub mod set;
pub mod table;

pub use map::HashMap;
pub use set::HashSet;
pub use table::HashTable;
