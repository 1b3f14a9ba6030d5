use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant};

/// An allocator was unable to provide the requested memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl Display for AllocError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Memory allocation failed!")
    }
}

impl Error for AllocError {}

/// A pool allocator was asked for more memory than one of its blocks holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTooLarge {
    pub size: usize,
    pub block_size: usize,
}

impl Display for BlockTooLarge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requested {} bytes from a pool with {} byte blocks!",
            self.size, self.block_size
        )
    }
}

impl Error for BlockTooLarge {}

/// A pool allocator was asked for a stricter alignment than its blocks have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignTooLarge {
    pub align: usize,
    pub block_align: usize,
}

impl Display for AlignTooLarge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requested alignment {} from a pool with blocks aligned to {}!",
            self.align, self.block_align
        )
    }
}

impl Error for AlignTooLarge {}

/// A pointer was returned to an allocator which didn't allocate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignPointer {
    pub addr: usize,
}

impl Display for ForeignPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Memory @ {:#x} was not allocated by this allocator!", self.addr)
    }
}

impl Error for ForeignPointer {}

/// Any of the ways in which a [`MallocPool`](super::MallocPool) can be misused.
#[derive(Debug, Display, Error, From, IsVariant)]
pub enum PoolError {
    BlockTooLarge(BlockTooLarge),
    AlignTooLarge(AlignTooLarge),
    ForeignPointer(ForeignPointer),
}
