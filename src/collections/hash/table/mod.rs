//! A module containing [`HashTable`] and its cursors and iterators.
//!
//! [`HashTable`] is also re-exported under the parent module.

mod cursor;
mod hash_table;
mod iter;
mod node;
mod tests;

pub use cursor::*;
pub use hash_table::*;
pub use iter::*;
pub(crate) use node::*;
