//! Fixed-capacity bump arena with LIFO finalization.
//!
//! Provides [`FixedArena`]: a single contiguous byte buffer acquired once
//! at construction, carved into aligned allocations by a bump pointer, and
//! paired with a bounded ledger of drop obligations that is discharged in
//! strict reverse-of-construction order on [`FixedArena::reset`] or drop.
//! This is the only crate in the workspace that contains `unsafe` code.
//!
//! # Architecture
//!
//! ```text
//! FixedArena (public API)
//! ├── RawBuffer (one aligned std::alloc block, released once on drop)
//! ├── offset: Cell<usize> (bump pointer, rewound only by reset)
//! └── DropLedger → Finalizer[] (fixed-capacity, insertion order =
//!     construction order, drained back-to-front)
//! ```
//!
//! # Allocation discipline
//!
//! Nothing on the [`FixedArena::make`] path touches the heap: the byte
//! buffer is a single acquisition at construction and the ledger's backing
//! storage is allocated once, with its slot check performed before every
//! push. Both "not enough bytes" and "no ledger slot left" are ordinary
//! recoverable [`ArenaError`]s reported before any object is placed.
//!
//! # Safety
//!
//! `unsafe` is confined to the raw buffer management, the ledger's
//! type-erased drop calls, and the placement write in [`arena`]. Every
//! `unsafe` block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod arena;
pub mod config;
pub mod error;
mod ledger;
mod raw;

// Public re-exports for the primary API surface.
pub use arena::FixedArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use raw::MAX_ALIGN;
