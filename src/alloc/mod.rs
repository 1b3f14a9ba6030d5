//! The allocator hierarchy that every container in this crate allocates its nodes through.
//!
//! [`Allocator`] is the interface, [`MallocAnsi`] wraps the system's allocation routines and
//! [`Global`] is a handle to the process-wide instance of it, which is what containers use when
//! no other allocator is provided. [`MallocPool`] hands out fixed-size blocks from a set of
//! memory pools and is a good fit for node-based containers, which only ever allocate one size.
//!
//! Allocators are taken by value, but `&A` is also an allocator, so several containers can share
//! one pool:
//! ```
//! # use korin_containers::alloc::{MallocPool, PoolConfig};
//! # use korin_containers::collections::binary_tree::RBTree;
//! let pool = MallocPool::new(PoolConfig::for_layout(64, RBTree::<u32>::node_layout()));
//! let mut a: RBTree<u32, _, _> = RBTree::new_in(&pool);
//! let mut b: RBTree<u32, _, _> = RBTree::new_in(&pool);
//! a.insert(1);
//! b.insert(2);
//! assert_eq!(pool.num_pools(), 1);
//! ```

mod ansi;
mod error;
#[cfg(feature = "pool")]
mod pool;

pub use ansi::*;
pub use error::*;
#[cfg(feature = "pool")]
pub use pool::*;

use std::alloc::{self as std_alloc, Layout};
use std::ptr::NonNull;

/// The minimum alignment any allocator in this crate hands out, the size of a pointer.
pub const MIN_ALIGNMENT: usize = size_of::<usize>();

/// An allocator of raw memory.
///
/// Unless stated otherwise, memory allocated by an allocator must be deallocated with the same
/// allocator.
///
/// # Safety
/// Implementors must return memory that is valid for reads and writes of `layout.size()` bytes,
/// aligned to `layout.align()`, and which isn't handed out again until it is deallocated.
pub unsafe trait Allocator {
    /// Allocates a block of memory fitting the provided `layout`, returning an [`AllocError`] if
    /// no memory could be obtained.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Deallocates a block of memory.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with the same `layout`, and must not be
    /// used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Returns the number of bytes currently allocated through this allocator.
    fn used_bytes(&self) -> usize;
}

// SAFETY: Forwards to A, which upholds the contract itself.
unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller upholds the contract for A.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    fn used_bytes(&self) -> usize {
        (**self).used_bytes()
    }
}

/// Allocates space for a `T` through `alloc` and moves `value` into it. Running out of memory is
/// fatal.
pub(crate) fn alloc_value<T, A: Allocator + ?Sized>(alloc: &A, value: T) -> NonNull<T> {
    let layout = Layout::new::<T>();
    let ptr = match alloc.allocate(layout) {
        Ok(ptr) => ptr.cast::<T>(),
        Err(_) => std_alloc::handle_alloc_error(layout),
    };
    // SAFETY: The allocator returned memory valid for a write of T.
    unsafe { ptr.write(value) };
    ptr
}

/// Moves the value out of an allocation made by [`alloc_value`] and deallocates it.
///
/// # Safety
/// `ptr` must have been returned by [`alloc_value`] with the same allocator and must not be used
/// afterwards.
pub(crate) unsafe fn take_value<T, A: Allocator + ?Sized>(alloc: &A, ptr: NonNull<T>) -> T {
    // SAFETY: The caller guarantees that ptr holds an initialized T that it owns.
    let value = unsafe { ptr.read() };
    // SAFETY: The memory was allocated by alloc with the layout of T.
    unsafe { alloc.deallocate(ptr.cast(), Layout::new::<T>()) };
    value
}
