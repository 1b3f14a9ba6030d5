#![warn(missing_docs)]

#[cfg(test)]
pub mod alloc;
pub mod fmt;
#[cfg(test)]
pub mod hash;
pub mod option;
pub mod panic;
pub mod result;
