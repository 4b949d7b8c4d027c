//! List configuration parameters.

use crate::error::ListError;

/// Configuration for a [`SlotList`](crate::SlotList).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Number of slots in the arena.
    ///
    /// Fixed for the lifetime of the list. Must be in `1..=MAX_CAPACITY`.
    pub capacity: u32,

    /// Run [`check_integrity`](crate::SlotList::check_integrity) after every
    /// mutation and log failures at `warn` level.
    ///
    /// Costs O(capacity) per mutation. Default: `false`.
    pub validate_on_mutation: bool,
}

impl ListConfig {
    /// Default slot count.
    pub const DEFAULT_CAPACITY: u32 = 64;

    /// Largest slot count. `u32::MAX` is reserved as the "none" link.
    pub const MAX_CAPACITY: u32 = u32::MAX - 1;

    /// Create a config for the given slot count with default options.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            validate_on_mutation: false,
        }
    }

    /// Enable or disable the per-mutation integrity check.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_on_mutation = enabled;
        self
    }

    /// Check that the config describes a constructible list.
    pub fn validate(&self) -> Result<(), ListError> {
        if self.capacity == 0 || self.capacity > Self::MAX_CAPACITY {
            return Err(ListError::InvalidCapacity {
                requested: self.capacity as usize,
                max: Self::MAX_CAPACITY as usize,
            });
        }
        Ok(())
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
