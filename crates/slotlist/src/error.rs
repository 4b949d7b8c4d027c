//! List error types.
//!
//! [`ListError::CapacityExhausted`] is an expected runtime outcome of a
//! full arena. [`ListError::Contract`] means the caller handed the list a
//! slot reference that does not name a live node.

use std::error::Error;
use std::fmt;

/// Errors returned by [`SlotList`](crate::SlotList) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Every slot is live; the fixed-capacity arena cannot hand out another.
    ///
    /// The list is left exactly as it was before the call.
    CapacityExhausted {
        /// Total slot count of the list.
        capacity: u32,
    },
    /// The caller broke an operation's precondition.
    Contract(ContractViolation),
    /// A list was requested with a capacity outside `1..=MAX_CAPACITY`.
    InvalidCapacity {
        /// Requested slot count.
        requested: usize,
        /// Largest supported slot count.
        max: usize,
    },
}

impl ListError {
    /// Whether the error is an expected runtime outcome rather than a
    /// broken caller contract.
    ///
    /// Only [`ListError::CapacityExhausted`] is recoverable: the caller can
    /// remove nodes and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CapacityExhausted { .. })
    }

    /// The contract violation, if this is one.
    pub fn contract(&self) -> Option<&ContractViolation> {
        match self {
            Self::Contract(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExhausted { capacity } => {
                write!(f, "slot arena exhausted: all {capacity} slots are live")
            }
            Self::Contract(v) => write!(f, "contract violation: {v}"),
            Self::InvalidCapacity { requested, max } => {
                write!(f, "invalid capacity {requested}: must be in 1..={max}")
            }
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Contract(v) => Some(v),
            _ => None,
        }
    }
}

impl From<ContractViolation> for ListError {
    fn from(v: ContractViolation) -> Self {
        Self::Contract(v)
    }
}

/// A slot reference that does not denote a live node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    /// The physical index is past the end of the arena.
    OutOfRange {
        /// The offending index.
        index: u32,
        /// Total slot count of the list.
        capacity: u32,
    },
    /// The slot is on the free chain.
    VacantSlot {
        /// The offending index.
        index: u32,
    },
    /// The slot was released or its occupant moved since the handle was
    /// taken.
    StaleHandle {
        /// The physical index in the handle.
        index: u32,
        /// Generation recorded in the handle.
        handle_generation: u32,
        /// Current generation of the slot.
        slot_generation: u32,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, capacity } => {
                write!(f, "slot {index} out of range for capacity {capacity}")
            }
            Self::VacantSlot { index } => write!(f, "slot {index} is not live"),
            Self::StaleHandle {
                index,
                handle_generation,
                slot_generation,
            } => {
                write!(
                    f,
                    "stale handle for slot {index}: generation {handle_generation}, slot is at {slot_generation}"
                )
            }
        }
    }
}

impl Error for ContractViolation {}
