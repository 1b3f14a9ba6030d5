//! Traits shared by the collections in this crate.

mod compare;
mod set;

pub use compare::*;
pub use set::*;
