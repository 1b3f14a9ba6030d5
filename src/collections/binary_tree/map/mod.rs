//! A module containing [`TreeMap`] and associated types.
//!
//! The other included types are for iteration, providing owned and borrowed iteration over
//! entries, keys or values in a map. There is no mutable iterator over entries or keys, because
//! mutating a key in place could break the order of the map.
//!
//! [`TreeMap`] is also re-exported under the parent module.

mod iter;
mod tree_map;

pub use iter::*;
pub use tree_map::*;
