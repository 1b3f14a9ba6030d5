//! This crate is a from-scratch take on the associative containers of a standard library, along
//! with the allocators that back them.
//!
//! # Purpose
//! The containers here are written to understand the data structures properly rather than to
//! replace [`std`]'s. Two of them carry most of the weight: an intrusive red-black tree whose nodes
//! are also threaded into an in-order linked chain, and a hash table that keeps every entry in one
//! singly linked chain while each bucket remembers the node *before* its first entry.
//!
//! # Method
//! Nodes are allocated manually through the [`Allocator`](alloc::Allocator) trait and linked with
//! raw pointers, so that every container can be backed by either the [`Global`](alloc::Global)
//! allocator or a [`MallocPool`](alloc::MallocPool). Positions inside a container are cursors
//! which borrow it, so a position from the wrong container (or one that outlived its node) can't
//! be expressed at all.
//!
//! # Error Handling
//! Looking up a missing key isn't an error, it's an [`Option`]. Running out of memory is fatal
//! and goes through [`handle_alloc_error`](std::alloc::handle_alloc_error). Misusing an allocator
//! (freeing a pointer it doesn't own, asking a pool for a block bigger than its blocks) panics
//! with a strongly typed error that implements [`Error`](std::error::Error).
//!
//! # Dependencies
//! `derive_more` removes some very repetitive error boilerplate and `log` is used by the
//! allocator layer to report pool and bucket array lifecycle events. Neither is required by the
//! containers' algorithms themselves.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod alloc;
#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;

#[cfg(all(test, feature = "collections-all", feature = "pool"))]
mod proptests;
