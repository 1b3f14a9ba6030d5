use std::alloc::{self as std_alloc, Layout};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{AllocError, Allocator, MIN_ALIGNMENT};

/// An allocator that relies on the system's allocation routines, through [`std::alloc`].
///
/// Every block is aligned to at least [`MIN_ALIGNMENT`] and zero-sized requests still receive a
/// unique block. The number of bytes handed out is tracked and available through
/// [`used_bytes`](Allocator::used_bytes).
#[derive(Debug, Default)]
pub struct MallocAnsi {
    used: AtomicUsize,
}

impl MallocAnsi {
    /// Creates a new MallocAnsi with no memory in use.
    pub const fn new() -> MallocAnsi {
        MallocAnsi {
            used: AtomicUsize::new(0),
        }
    }

    fn system_layout(layout: Layout) -> Result<Layout, AllocError> {
        Layout::from_size_align(layout.size().max(1), layout.align().max(MIN_ALIGNMENT))
            .map_err(|_| AllocError)
    }
}

// SAFETY: Memory comes straight from the system allocator with a layout at least as strict as the
// requested one.
unsafe impl Allocator for MallocAnsi {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let sys_layout = MallocAnsi::system_layout(layout)?;
        // SAFETY: sys_layout has a non-zero size.
        let ptr = NonNull::new(unsafe { std_alloc::alloc(sys_layout) }).ok_or(AllocError)?;
        self.used.fetch_add(sys_layout.size(), Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // UNREACHABLE: The same layout was accepted by allocate.
        let Ok(sys_layout) = MallocAnsi::system_layout(layout) else {
            unreachable!("Layout was accepted when allocating!")
        };
        self.used.fetch_sub(sys_layout.size(), Ordering::Relaxed);
        // SAFETY: The caller guarantees that ptr was allocated by this allocator with layout, which
        // maps to the same sys_layout.
        unsafe { std_alloc::dealloc(ptr.as_ptr(), sys_layout) }
    }

    fn used_bytes(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }
}

static ANSI: MallocAnsi = MallocAnsi::new();

/// The process-wide allocator, a handle to a single shared [`MallocAnsi`].
///
/// This is the default allocator of every container in this crate. Being zero-sized, it adds
/// nothing to the size of the containers that use it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl Global {
    /// Returns the [`MallocAnsi`] instance behind the global allocator.
    pub fn ansi() -> &'static MallocAnsi {
        &ANSI
    }
}

// SAFETY: Forwards to the global MallocAnsi.
unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        ANSI.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller upholds the contract, and every Global allocation comes from ANSI.
        unsafe { ANSI.deallocate(ptr, layout) }
    }

    fn used_bytes(&self) -> usize {
        ANSI.used_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_tracks_usage() {
        let ansi = MallocAnsi::new();
        let layout = Layout::from_size_align(24, 16).unwrap();

        let a = ansi.allocate(layout).unwrap();
        let b = ansi.allocate(layout).unwrap();
        assert_eq!(ansi.used_bytes(), 48);
        assert_eq!(a.as_ptr() as usize % 16, 0);
        assert_ne!(a, b);

        unsafe {
            ansi.deallocate(a, layout);
            ansi.deallocate(b, layout);
        }
        assert_eq!(ansi.used_bytes(), 0);
    }

    #[test]
    fn test_ansi_zero_sized() {
        let ansi = MallocAnsi::new();
        let layout = Layout::new::<()>();

        let a = ansi.allocate(layout).unwrap();
        let b = ansi.allocate(layout).unwrap();
        assert_ne!(a, b, "Zero-sized allocations should still be unique.");
        assert_eq!(a.as_ptr() as usize % MIN_ALIGNMENT, 0);

        unsafe {
            ansi.deallocate(a, layout);
            ansi.deallocate(b, layout);
        }
        assert_eq!(ansi.used_bytes(), 0);
    }

    #[test]
    fn test_shared_by_reference() {
        let ansi = MallocAnsi::new();
        let by_ref = &ansi;
        let layout = Layout::new::<u64>();

        let ptr = by_ref.allocate(layout).unwrap();
        assert_eq!(ansi.used_bytes(), 8);
        unsafe { by_ref.deallocate(ptr, layout) };
        assert_eq!(ansi.used_bytes(), 0);
    }
}
