use std::alloc::Layout;
use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use super::{Geometry, PoolConfig, PoolRef};
use crate::alloc::{
    AlignTooLarge, AllocError, Allocator, BlockTooLarge, ForeignPointer, Global, PoolError,
};
use crate::collections::binary_tree::RBTree;
use crate::collections::traits::Natural;
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// An allocator which hands out fixed-size blocks from pools of memory, obtained from a backing
/// allocator as needed.
///
/// Every pool holds [`PoolConfig::num_blocks`] blocks. Pools with free blocks are kept on a queue,
/// and the pool at its front serves the next allocation. Once every block of a pool has been
/// returned, the pool's memory goes back to the backing allocator.
///
/// Requests larger or more strictly aligned than a block panic, as does deallocating memory which
/// didn't come from this pool.
///
/// MallocPool keeps its state behind a [`RefCell`], so it can't be shared between threads.
/// Containers share a pool by taking `&MallocPool` as their allocator.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `p`: The number of pools.
///
/// | Method | Complexity |
/// |-|-|
/// | `allocate` | `O(1)`, `O(log p)`* |
/// | `deallocate` | `O(log p)` |
/// | `num_pools` | `O(1)` |
///
/// \* When a new pool has to be created.
pub struct MallocPool<A: Allocator = Global> {
    config: PoolConfig,
    geometry: Geometry,
    state: RefCell<PoolState<A>>,
}

struct PoolState<A: Allocator> {
    /// Every live pool, ordered by address so that the owner of a block can be found.
    pools: RBTree<PoolRef, Natural, A>,
    /// The front of the queue of pools with at least one free block.
    free_head: Option<PoolRef>,
    used: usize,
}

impl<A: Allocator> PoolState<A> {
    fn enqueue(&mut self, pool: PoolRef) {
        let header = pool.header();
        header.prev_free = None;
        header.next_free = self.free_head;
        if let Some(head) = self.free_head {
            head.header().prev_free = Some(pool);
        }
        self.free_head = Some(pool);
    }

    fn unqueue(&mut self, pool: PoolRef) {
        let header = pool.header();
        match header.prev_free {
            Some(prev) => prev.header().next_free = header.next_free,
            None => self.free_head = header.next_free,
        }
        if let Some(next) = header.next_free {
            next.header().prev_free = header.prev_free;
        }
        header.prev_free = None;
        header.next_free = None;
    }
}

impl MallocPool {
    /// Creates a new MallocPool, which takes its pools from the [`Global`] allocator.
    ///
    /// # Panics
    /// Panics if `config` has no blocks per pool, or if a pool of that shape can't be
    /// described by a [`Layout`].
    pub fn new(config: PoolConfig) -> MallocPool {
        MallocPool::new_in(config, Global)
    }
}

impl<A: Allocator> MallocPool<A> {
    /// Creates a new MallocPool, which takes its pools from `alloc`.
    ///
    /// # Panics
    /// Panics if `config` has no blocks per pool, or if a pool of that shape can't be
    /// described by a [`Layout`].
    pub fn new_in(config: PoolConfig, alloc: A) -> MallocPool<A> {
        assert!(config.num_blocks > 0, "Pools must have at least one block!");
        let config = config.with_align(config.block_align);

        MallocPool {
            config,
            geometry: Geometry::new(&config).throw(),
            state: RefCell::new(PoolState {
                pools: RBTree::new_in(alloc),
                free_head: None,
                used: 0,
            }),
        }
    }

    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the number of pools currently held from the backing allocator.
    pub fn num_pools(&self) -> usize {
        self.state.borrow().pools.len()
    }

    fn check_layout(&self, layout: Layout) -> Result<(), PoolError> {
        if layout.size() > self.config.block_size {
            return Err(PoolError::from(BlockTooLarge {
                size: layout.size(),
                block_size: self.config.block_size,
            }));
        }
        if layout.align() > self.config.block_align {
            return Err(PoolError::from(AlignTooLarge {
                align: layout.align(),
                block_align: self.config.block_align,
            }));
        }
        Ok(())
    }

    fn create_pool(&self, state: &mut PoolState<A>) -> Result<PoolRef, AllocError> {
        let buffer = state.pools.allocator().allocate(self.geometry.buffer_layout)?;
        // SAFETY: The buffer was just allocated with the geometry's layout.
        let pool = unsafe { PoolRef::init(buffer, &self.geometry) };

        state.pools.insert(pool);
        state.enqueue(pool);
        log::trace!(
            "MallocPool: created pool {} @ {:p} with {} blocks of {} bytes",
            state.pools.len(),
            buffer,
            self.geometry.num_blocks,
            self.geometry.stride,
        );
        Ok(pool)
    }

    /// Returns an empty pool, which must already be off the queue, to the backing allocator.
    fn release_pool(&self, state: &mut PoolState<A>, pool: PoolRef) {
        let buffer = pool.buffer();
        // SAFETY: Every live pool is in the tree.
        let node = unsafe { state.pools.find_node_by(|other| pool.cmp(other)).unreachable() };
        state.pools.remove_node(node);
        // SAFETY: The buffer was allocated by this allocator with the geometry's layout, and none
        // of its blocks are in use.
        unsafe { state.pools.allocator().deallocate(buffer, self.geometry.buffer_layout) };
        log::trace!(
            "MallocPool: released pool @ {:p}, {} remaining",
            buffer,
            state.pools.len()
        );
    }
}

// SAFETY: Blocks are aligned to the configured alignment, which the layout is checked against,
// and each block is only handed out again once it is returned.
unsafe impl<A: Allocator> Allocator for MallocPool<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.check_layout(layout).throw();

        let mut state = self.state.borrow_mut();
        let pool = match state.free_head {
            Some(pool) => pool,
            None => self.create_pool(&mut state)?,
        };

        // SAFETY: Only pools with free blocks are queued.
        let block = unsafe { pool.pop_block().unreachable() };
        if pool.is_full() {
            state.unqueue(pool);
        }
        state.used += layout.size();
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let mut state = self.state.borrow_mut();
        let pool = *state
            .pools
            .find_node_by(|pool| pool.locate(ptr))
            .ok_or(ForeignPointer {
                addr: ptr.addr().get(),
            })
            .throw()
            .value();

        let was_full = pool.is_full();
        // SAFETY: The caller guarantees that ptr was allocated here and is no longer used.
        unsafe { pool.push_block(ptr) };
        state.used -= layout.size();

        if pool.num_used_blocks() == 0 {
            if !was_full {
                state.unqueue(pool);
            }
            self.release_pool(&mut state, pool);
        } else if was_full {
            state.enqueue(pool);
        }
    }

    fn used_bytes(&self) -> usize {
        self.state.borrow().used
    }
}

impl<A: Allocator> Drop for MallocPool<A> {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.used > 0 {
            log::debug!(
                "MallocPool: dropped with {} bytes still allocated across {} pools",
                state.used,
                state.pools.len()
            );
        }

        while let Some(pool) = state.pools.pop_first() {
            // SAFETY: Every pool's buffer was allocated by the tree's allocator with this layout.
            unsafe {
                state.pools.allocator().deallocate(pool.buffer(), self.geometry.buffer_layout)
            };
        }
    }
}

impl<A: Allocator> Debug for MallocPool<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MallocPool")
            .field("config", &self.config)
            .field("num_pools", &state.pools.len())
            .field("used_bytes", &state.used)
            .finish()
    }
}
