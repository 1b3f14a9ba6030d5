use std::alloc::Layout;

use crate::alloc::MIN_ALIGNMENT;

/// The shape of every pool created by a [`MallocPool`](super::MallocPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// The number of blocks in each pool.
    pub num_blocks: usize,
    /// The largest allocation a block can hold, in bytes.
    pub block_size: usize,
    /// The alignment of every block. Always raised to at least [`MIN_ALIGNMENT`].
    pub block_align: usize,
}

impl PoolConfig {
    /// Creates a configuration for pools of `num_blocks` blocks, each holding `block_size` bytes
    /// aligned to [`MIN_ALIGNMENT`].
    pub const fn new(num_blocks: usize, block_size: usize) -> PoolConfig {
        PoolConfig {
            num_blocks,
            block_size,
            block_align: MIN_ALIGNMENT,
        }
    }

    /// Returns the same configuration with blocks aligned to `block_align`.
    pub const fn with_align(self, block_align: usize) -> PoolConfig {
        PoolConfig {
            block_align: if block_align > MIN_ALIGNMENT { block_align } else { MIN_ALIGNMENT },
            ..self
        }
    }

    /// Creates a configuration for pools of `num_blocks` blocks which each fit `layout`, such as
    /// the [`node_layout`](crate::collections::binary_tree::RBTree::node_layout) of a container.
    pub const fn for_layout(num_blocks: usize, layout: Layout) -> PoolConfig {
        PoolConfig::new(num_blocks, layout.size()).with_align(layout.align())
    }
}
