//! The finalizer ledger: type-erased drop obligations in construction order.
//!
//! Each successful allocation records a [`Finalizer`] — a monomorphized
//! drop function paired with the object's address. The [`DropLedger`]
//! holds these in insertion order and drains them back-to-front, so the
//! last-constructed object is the first destroyed, mirroring nested scope
//! teardown. The ledger's backing storage is allocated once at arena
//! construction; the slot check happens before every push, so it never
//! reallocates.

/// A recorded obligation to destroy one constructed object.
///
/// Type erasure is a plain function pointer specialized per constructed
/// type — no trait objects, no allocation, no runtime type tag.
#[derive(Clone, Copy)]
pub(crate) struct Finalizer {
    drop_fn: unsafe fn(*mut u8),
    addr: *mut u8,
}

impl Finalizer {
    /// Record the obligation to drop the object at `addr`.
    pub(crate) fn for_object<T>(addr: *mut T) -> Self {
        Self {
            drop_fn: drop_erased::<T>,
            addr: addr.cast(),
        }
    }

    /// Run the finalizer, consuming the entry.
    ///
    /// # Safety
    ///
    /// `addr` must point at a live, fully constructed object of the type
    /// this entry was created for, and no entry may be invoked twice.
    pub(crate) unsafe fn invoke(self) {
        // SAFETY: upheld by the caller.
        unsafe { (self.drop_fn)(self.addr) };
    }
}

/// Drop the object at `addr`, which must be a live `T`.
unsafe fn drop_erased<T>(addr: *mut u8) {
    // SAFETY: `Finalizer::for_object::<T>` recorded this function against
    // an address of type `T`; `invoke`'s contract guarantees it is live.
    unsafe { addr.cast::<T>().drop_in_place() };
}

/// Fixed-capacity, insertion-ordered list of pending finalizers.
pub(crate) struct DropLedger {
    entries: Vec<Finalizer>,
    max: usize,
}

impl DropLedger {
    /// Create a ledger with exactly `max` slots, allocated up front.
    pub(crate) fn new(max: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max),
            max,
        }
    }

    /// Whether every slot is taken.
    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() == self.max
    }

    /// Number of recorded entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// The fixed slot count.
    pub(crate) fn max(&self) -> usize {
        self.max
    }

    /// Record a new entry. Callers check [`DropLedger::is_full`] first,
    /// which keeps the push within the reserved capacity.
    pub(crate) fn push(&mut self, finalizer: Finalizer) {
        debug_assert!(self.entries.len() < self.max);
        self.entries.push(finalizer);
    }

    /// Invoke every entry, most recently added first, and empty the ledger.
    ///
    /// # Safety
    ///
    /// Every recorded address must still point at the live object it was
    /// recorded for, and no other path may have finalized any of them.
    pub(crate) unsafe fn finalize_all(&mut self) {
        while let Some(finalizer) = self.entries.pop() {
            // SAFETY: upheld by the caller; popping guarantees each entry
            // is invoked at most once.
            unsafe { finalizer.invoke() };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::mem::MaybeUninit;

    struct Probe<'a> {
        log: &'a RefCell<Vec<u32>>,
        id: u32,
    }

    impl Drop for Probe<'_> {
        fn drop(&mut self) {
            self.log.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn drains_most_recent_first() {
        let log = RefCell::new(Vec::new());
        let mut a = MaybeUninit::new(Probe { log: &log, id: 1 });
        let mut b = MaybeUninit::new(Probe { log: &log, id: 2 });
        let mut c = MaybeUninit::new(Probe { log: &log, id: 3 });

        let mut ledger = DropLedger::new(8);
        ledger.push(Finalizer::for_object(a.as_mut_ptr()));
        ledger.push(Finalizer::for_object(b.as_mut_ptr()));
        ledger.push(Finalizer::for_object(c.as_mut_ptr()));
        assert_eq!(ledger.len(), 3);

        // SAFETY: all three objects are live and finalized only here.
        unsafe { ledger.finalize_all() };
        assert_eq!(ledger.len(), 0);
        assert_eq!(*log.borrow(), vec![3, 2, 1]);
    }

    #[test]
    fn full_ledger_reports_full() {
        let mut ledger = DropLedger::new(1);
        assert!(!ledger.is_full());
        let mut x = MaybeUninit::new(17u32);
        ledger.push(Finalizer::for_object(x.as_mut_ptr()));
        assert!(ledger.is_full());
        // SAFETY: the u32 is live; dropping a u32 is a no-op.
        unsafe { ledger.finalize_all() };
        assert!(!ledger.is_full());
    }

    #[test]
    fn zero_slot_ledger_is_always_full() {
        let ledger = DropLedger::new(0);
        assert!(ledger.is_full());
        assert_eq!(ledger.max(), 0);
    }
}
