//! A pool allocator, [`MallocPool`], and its configuration.
//!
//! A pool is one buffer from the backing allocator, split into equally sized blocks. Unused blocks
//! form a linked list through their own memory, and the pool's bookkeeping lives in the same
//! buffer, right after the blocks.

mod config;
mod header;
mod malloc_pool;

pub use config::*;
pub(crate) use header::*;
pub use malloc_pool::*;
