//! The fixed-capacity arena.
//!
//! [`FixedArena`] owns one contiguous byte buffer and a bump pointer.
//! [`FixedArena::make`] carves an aligned region out of the buffer, moves
//! a value into it, and records a finalizer; [`FixedArena::reset`] runs
//! every recorded finalizer in reverse construction order and rewinds the
//! bump pointer. Dropping the arena performs the same teardown before the
//! buffer is released, on every exit path including unwinding.

use std::cell::{Cell, RefCell};
use std::mem::{align_of, size_of};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::ledger::{DropLedger, Finalizer};
use crate::raw::{align_up, RawBuffer, MAX_ALIGN};

/// A fixed-capacity bump arena with LIFO finalization.
///
/// Capacity and finalizer slot count are fixed at construction. Objects
/// are placed by [`make`](Self::make) and handed back as `&mut T`
/// borrowing the arena, so the borrow checker rules out using a handle
/// across a [`reset`](Self::reset) — the reset takes `&mut self`, which
/// cannot coexist with any outstanding handle.
///
/// The arena is a single-threaded structure: it is neither `Send` nor
/// `Sync` (the raw buffer pointer and `Cell` interior see to that), so
/// sharing across threads requires an external wrapper that serializes
/// access and re-establishes the single-owner contract.
///
/// # Example
///
/// ```
/// use loam_arena::FixedArena;
///
/// let mut arena = FixedArena::new(1024);
/// let a = arena.make(41u32).unwrap();
/// *a += 1;
/// assert_eq!(*a, 42);
/// assert_eq!(arena.used(), 4);
///
/// arena.reset();
/// assert_eq!(arena.used(), 0);
/// ```
pub struct FixedArena {
    buf: RawBuffer,
    /// Bump pointer. `Cell` because `make` takes `&self` so that multiple
    /// handles can be live at once.
    offset: Cell<usize>,
    ledger: RefCell<DropLedger>,
}

impl FixedArena {
    /// Create an arena with `capacity` bytes and the default finalizer
    /// slot count ([`ArenaConfig::DEFAULT_MAX_FINALIZERS`]).
    ///
    /// The full buffer is acquired here; `make` never allocates.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(&ArenaConfig::new(capacity))
    }

    /// Create an arena from an explicit [`ArenaConfig`].
    pub fn with_config(config: &ArenaConfig) -> Self {
        Self {
            buf: RawBuffer::new(config.capacity),
            offset: Cell::new(0),
            ledger: RefCell::new(DropLedger::new(config.max_finalizers)),
        }
    }

    /// Move `value` into the arena and return a handle to it.
    ///
    /// The handle borrows the arena and stays valid until the next
    /// [`reset`](Self::reset) or until the arena is dropped, at which
    /// point the value's destructor runs (destructors run in reverse
    /// construction order).
    ///
    /// Types requiring alignment above [`MAX_ALIGN`] are rejected at
    /// compile time:
    ///
    /// ```compile_fail
    /// use loam_arena::FixedArena;
    ///
    /// #[repr(align(32))]
    /// struct Overaligned(u8);
    ///
    /// let arena = FixedArena::new(64);
    /// let _ = arena.make(Overaligned(0)); // alignment 32 > MAX_ALIGN
    /// ```
    ///
    /// On failure the arena is left exactly as it was and `value` is
    /// dropped; use [`make_with`](Self::make_with) to defer construction
    /// until the capacity checks have passed.
    ///
    /// # Errors
    ///
    /// [`ArenaError::OutOfSpace`] if the value does not fit after
    /// alignment; [`ArenaError::TooManyLiveObjects`] if every finalizer
    /// slot is taken. Both checks happen before the value is placed.
    pub fn make<T: 'static>(&self, value: T) -> Result<&mut T, ArenaError> {
        self.make_with(move || value)
    }

    /// Like [`make`](Self::make), but constructs the value only after
    /// both capacity checks pass.
    ///
    /// # Errors
    ///
    /// As for [`make`](Self::make); on failure `init` is never called.
    ///
    /// # Panics
    ///
    /// Panics if `init` calls back into this same arena — allocation or
    /// even the ledger queries [`live_objects`](Self::live_objects) and
    /// [`max_finalizers`](Self::max_finalizers). The ledger stays
    /// borrowed across `init` so a reentrant allocation cannot claim the
    /// slot this call just checked.
    pub fn make_with<T: 'static, F>(&self, init: F) -> Result<&mut T, ArenaError>
    where
        F: FnOnce() -> T,
    {
        const {
            assert!(
                align_of::<T>() <= MAX_ALIGN,
                "type alignment exceeds MAX_ALIGN; over-aligned types are not supported"
            );
        }

        // Held across `init` so a reentrant allocation cannot claim the
        // slot this call just checked.
        let mut ledger = self.ledger.borrow_mut();
        if ledger.is_full() {
            return Err(ArenaError::TooManyLiveObjects {
                max_finalizers: ledger.max(),
            });
        }

        let offset = self.offset.get();
        let aligned = align_up(offset, align_of::<T>());
        let end = match aligned.checked_add(size_of::<T>()) {
            Some(end) if end <= self.buf.capacity() => end,
            _ => {
                return Err(ArenaError::OutOfSpace {
                    requested: size_of::<T>(),
                    align: align_of::<T>(),
                    remaining: self.buf.capacity() - offset,
                })
            }
        };

        // SAFETY: `aligned + size_of::<T>() <= capacity`, so the region
        // lies inside the buffer (for ZSTs it may be the one-past-the-end
        // address, which `add` permits). The base is MAX_ALIGN-aligned and
        // `aligned` is a multiple of `align_of::<T>() <= MAX_ALIGN`, so
        // the pointer satisfies `T`'s alignment.
        let ptr = unsafe { self.buf.as_ptr().add(aligned) }.cast::<T>();
        // SAFETY: the region is within the buffer, properly aligned, and
        // the bump pointer has never handed it out, so nothing aliases it.
        unsafe { ptr.write(init()) };
        self.offset.set(end);
        ledger.push(Finalizer::for_object(ptr));

        // SAFETY: the region holds a live `T` and is disjoint from every
        // other allocation; the `&mut` borrows the arena, so it cannot
        // outlive a reset or the arena itself.
        Ok(unsafe { &mut *ptr })
    }

    /// Destroy every live object, most recently constructed first, and
    /// rewind the arena to empty.
    ///
    /// Taking `&mut self` means no handle returned by `make` can still be
    /// live, so this always succeeds. Calling it on an empty arena is a
    /// no-op.
    pub fn reset(&mut self) {
        // SAFETY: `&mut self` proves no handle into the buffer is
        // outstanding, and every ledger entry points at an object placed
        // by `make_with` and not yet finalized.
        unsafe { self.ledger.get_mut().finalize_all() };
        self.offset.set(0);
    }

    /// Bytes claimed so far, including alignment padding already consumed.
    pub fn used(&self) -> usize {
        self.offset.get()
    }

    /// The fixed total byte capacity.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes still available, before any alignment padding a future
    /// allocation might need.
    pub fn remaining(&self) -> usize {
        self.buf.capacity() - self.offset.get()
    }

    /// Number of live objects, i.e. finalizer ledger entries.
    pub fn live_objects(&self) -> usize {
        self.ledger.borrow().len()
    }

    /// The fixed finalizer slot count.
    pub fn max_finalizers(&self) -> usize {
        self.ledger.borrow().max()
    }
}

impl Drop for FixedArena {
    fn drop(&mut self) {
        // SAFETY: as in `reset`. The buffer itself is released afterwards
        // by RawBuffer's own drop.
        unsafe { self.ledger.get_mut().finalize_all() };
    }
}
