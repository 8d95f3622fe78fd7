//! Arena configuration parameters.

/// Configuration for a [`FixedArena`](crate::FixedArena).
///
/// Both values are fixed for the arena's lifetime and supplied once at
/// construction.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Total byte capacity of the arena buffer.
    ///
    /// Acquired in full at construction; the arena never grows.
    pub capacity: usize,

    /// Maximum number of finalizer ledger slots.
    ///
    /// Every successful allocation consumes one slot until the next
    /// reset, so this bounds the number of simultaneously live objects.
    /// Default: 128.
    pub max_finalizers: usize,
}

impl ArenaConfig {
    /// Default byte capacity: 4KB, one small page worth of objects.
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Default finalizer ledger slot count.
    pub const DEFAULT_MAX_FINALIZERS: usize = 128;

    /// Create a config with the given byte capacity and the default
    /// ledger slot count.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_finalizers: Self::DEFAULT_MAX_FINALIZERS,
        }
    }

    /// Override the finalizer ledger slot count.
    pub fn with_max_finalizers(mut self, max_finalizers: usize) -> Self {
        self.max_finalizers = max_finalizers;
        self
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_ledger_cap() {
        let config = ArenaConfig::new(1024);
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.max_finalizers, 128);
    }

    #[test]
    fn builder_overrides_ledger_cap() {
        let config = ArenaConfig::new(1024).with_max_finalizers(4);
        assert_eq!(config.max_finalizers, 4);
    }
}
