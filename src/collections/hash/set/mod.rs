//! A module containing [`HashSet`] and its iterators.
//!
//! [`HashSet`] is also re-exported under the parent module.

mod hash_set;
mod iter;
mod tests;

pub use hash_set::*;
pub use iter::*;
