//! Low-level buffer management and alignment arithmetic.
//!
//! This module owns the arena's single heap acquisition. [`RawBuffer`]
//! requests one block from the global allocator at construction and
//! releases it exactly once when dropped; nothing else in the crate
//! allocates on the arena's hot path. Every `unsafe` block here carries a
//! `// SAFETY:` comment.

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::ptr::NonNull;

/// The platform's maximum default alignment, in bytes.
///
/// The arena buffer is aligned to this value, and types placed in the
/// arena must not require more than this. Over-aligned types are rejected
/// at compile time by [`FixedArena::make`](crate::FixedArena::make).
pub const MAX_ALIGN: usize = 16;

/// Round `x` up to the next multiple of `align`.
///
/// `align` must be a power of two. Callers keep `x` at or below the arena
/// capacity (itself at most `isize::MAX`), so the addition cannot
/// overflow.
pub(crate) const fn align_up(x: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    (x + mask) & !mask
}

/// A fixed-size byte block acquired once from the global allocator.
///
/// The block is aligned to [`MAX_ALIGN`] and never resized. A
/// zero-capacity buffer performs no allocation at all and uses a
/// well-aligned dangling pointer that is never dereferenced.
pub(crate) struct RawBuffer {
    ptr: NonNull<u8>,
    capacity: usize,
}

impl RawBuffer {
    /// Acquire a buffer of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds `isize::MAX`. Allocation failure is
    /// routed to [`handle_alloc_error`], matching the behavior of the
    /// standard collections.
    pub(crate) fn new(capacity: usize) -> Self {
        if capacity == 0 {
            // Dangling through u128 so the address satisfies MAX_ALIGN;
            // zero-sized reads and drops of ZSTs stay well-aligned.
            return Self {
                ptr: NonNull::<u128>::dangling().cast(),
                capacity: 0,
            };
        }
        let layout = Self::layout(capacity);
        // SAFETY: `layout` has non-zero size (capacity > 0 checked above).
        let ptr = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else {
            handle_alloc_error(layout)
        };
        Self { ptr, capacity }
    }

    /// Base pointer of the buffer. Aligned to [`MAX_ALIGN`].
    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Total byte capacity.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    fn layout(capacity: usize) -> Layout {
        Layout::from_size_align(capacity, MAX_ALIGN)
            .expect("arena capacity exceeds isize::MAX")
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        // SAFETY: `ptr` was returned by `alloc` with this exact layout in
        // `new` and is released here exactly once.
        unsafe { dealloc(self.ptr.as_ptr(), Self::layout(self.capacity)) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_base_is_max_aligned() {
        let buf = RawBuffer::new(64);
        assert_eq!(buf.as_ptr() as usize % MAX_ALIGN, 0);
        assert_eq!(buf.capacity(), 64);
    }

    #[test]
    fn zero_capacity_buffer_is_aligned_and_droppable() {
        let buf = RawBuffer::new(0);
        assert_eq!(buf.as_ptr() as usize % MAX_ALIGN, 0);
        assert_eq!(buf.capacity(), 0);
        drop(buf);
    }

    #[test]
    fn align_up_rounds_to_multiples() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(9, 4), 12);
        assert_eq!(align_up(5, 1), 5);
    }
}
