use std::alloc::{Layout, LayoutError};
use std::cmp::Ordering;
use std::ptr::NonNull;

use super::PoolConfig;
use crate::alloc::MIN_ALIGNMENT;

/// The link stored at the start of every unused block.
type FreeLink = Option<NonNull<u8>>;

/// Where everything goes inside the buffer of a pool.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Geometry {
    pub num_blocks: usize,
    /// The distance between the starts of two blocks.
    pub stride: usize,
    pub header_offset: usize,
    pub buffer_layout: Layout,
}

impl Geometry {
    pub fn new(config: &PoolConfig) -> Result<Geometry, LayoutError> {
        let align = config.block_align.max(MIN_ALIGNMENT);
        let block =
            Layout::from_size_align(config.block_size.max(size_of::<FreeLink>()), align)?
                .pad_to_align();
        let blocks = Layout::from_size_align(block.size().saturating_mul(config.num_blocks), align)?;
        let (buffer_layout, header_offset) = blocks.extend(Layout::new::<PoolHeader>())?;

        Ok(Geometry {
            num_blocks: config.num_blocks,
            stride: block.size(),
            header_offset,
            buffer_layout: buffer_layout.pad_to_align(),
        })
    }
}

/// The bookkeeping of a single pool, stored in its own buffer after the last block.
#[derive(Debug)]
pub(crate) struct PoolHeader {
    pub buffer: NonNull<u8>,
    /// The address just past the last block.
    pub blocks_end: usize,
    pub free_blocks: FreeLink,
    pub num_used_blocks: usize,
    pub prev_free: Option<PoolRef>,
    pub next_free: Option<PoolRef>,
}

/// A pointer to the header of a live pool. Pools are ordered by address, which is the same as
/// ordering them by buffer because buffers never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct PoolRef(pub NonNull<PoolHeader>);

impl PoolRef {
    /// Sets up a pool in `buffer`, with every block free.
    ///
    /// # Safety
    /// `buffer` must be valid for writes of `geometry.buffer_layout` and not in use by anything
    /// else.
    pub unsafe fn init(buffer: NonNull<u8>, geometry: &Geometry) -> PoolRef {
        let mut free_blocks = None;
        for index in (0..geometry.num_blocks).rev() {
            // SAFETY: Every block lies within the buffer and is aligned for a FreeLink, because
            // the stride is a multiple of at least MIN_ALIGNMENT.
            unsafe {
                let block = buffer.add(index * geometry.stride);
                block.cast::<FreeLink>().write(free_blocks);
                free_blocks = Some(block);
            }
        }

        // SAFETY: The header offset was computed to fit an aligned PoolHeader after the blocks.
        let header = unsafe { buffer.add(geometry.header_offset).cast::<PoolHeader>() };
        // SAFETY: As above.
        unsafe {
            header.write(PoolHeader {
                buffer,
                blocks_end: buffer.addr().get() + geometry.num_blocks * geometry.stride,
                free_blocks,
                num_used_blocks: 0,
                prev_free: None,
                next_free: None,
            })
        };

        PoolRef(header)
    }

    #[allow(clippy::mut_from_ref)]
    pub const fn header<'a>(&self) -> &'a mut PoolHeader {
        // SAFETY: The pool is live and only accessed while its allocator's state is borrowed.
        unsafe { &mut *self.0.as_ptr() }
    }

    pub const fn buffer(&self) -> NonNull<u8> {
        self.header().buffer
    }

    pub const fn is_full(&self) -> bool {
        self.header().free_blocks.is_none()
    }

    pub const fn num_used_blocks(&self) -> usize {
        self.header().num_used_blocks
    }

    /// Compares `ptr` with the range of blocks in this pool, giving Equal if it lies within it.
    pub fn locate(&self, ptr: NonNull<u8>) -> Ordering {
        let header = self.header();
        let addr = ptr.addr().get();

        if addr < header.buffer.addr().get() {
            Ordering::Less
        } else if addr >= header.blocks_end {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Takes the first free block, or returns None if the pool is full.
    pub fn pop_block(&self) -> Option<NonNull<u8>> {
        let header = self.header();
        let block = header.free_blocks?;
        // SAFETY: Every free block starts with the link to the next one.
        header.free_blocks = unsafe { block.cast::<FreeLink>().read() };
        header.num_used_blocks += 1;
        Some(block)
    }

    /// Returns `block` to the pool's free list.
    ///
    /// # Safety
    /// `block` must have been taken from this pool with [`pop_block`](PoolRef::pop_block) and not
    /// be returned already.
    pub unsafe fn push_block(&self, block: NonNull<u8>) {
        let header = self.header();
        // SAFETY: The block belongs to this pool and is no longer in use.
        unsafe { block.cast::<FreeLink>().write(header.free_blocks) };
        header.free_blocks = Some(block);
        header.num_used_blocks -= 1;
    }
}
