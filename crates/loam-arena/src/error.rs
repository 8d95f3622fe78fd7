//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena allocation.
///
/// Both variants are ordinary recoverable failures: a failed
/// [`FixedArena::make`](crate::FixedArena::make) leaves the arena exactly
/// as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The requested allocation, after alignment padding, does not fit in
    /// the remaining byte capacity.
    OutOfSpace {
        /// Size of the requested allocation in bytes.
        requested: usize,
        /// Alignment required by the requested type.
        align: usize,
        /// Bytes left before the request (not counting alignment padding).
        remaining: usize,
    },
    /// The finalizer ledger has no remaining slot for a new entry.
    ///
    /// Checked before the object is constructed, so this is reported the
    /// same way as [`ArenaError::OutOfSpace`] rather than aborting with an
    /// object that could never be finalized.
    TooManyLiveObjects {
        /// The ledger's fixed slot count.
        max_finalizers: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                align,
                remaining,
            } => {
                write!(
                    f,
                    "arena out of space: requested {requested} bytes (align {align}), {remaining} bytes remaining"
                )
            }
            Self::TooManyLiveObjects { max_finalizers } => {
                write!(
                    f,
                    "finalizer ledger full: {max_finalizers} live objects already recorded"
                )
            }
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_byte_counts() {
        let err = ArenaError::OutOfSpace {
            requested: 64,
            align: 8,
            remaining: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("64"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn display_includes_ledger_cap() {
        let err = ArenaError::TooManyLiveObjects { max_finalizers: 128 };
        assert!(err.to_string().contains("128"));
    }
}
