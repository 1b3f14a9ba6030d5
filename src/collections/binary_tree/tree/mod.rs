//! A module containing [`RBTree`] and its cursors and iterators.
//!
//! [`RBTree`] is also re-exported under the parent module.

mod cursor;
mod iter;
mod node;
mod rb_tree;
mod tests;

pub use cursor::*;
pub use iter::*;
pub(crate) use node::*;
pub use rb_tree::*;
