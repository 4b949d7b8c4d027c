//! Generation-tagged node handles.
//!
//! A [`NodeHandle`] names a physical slot together with the generation the
//! slot had when the handle was issued. The generation allows O(1)
//! staleness checks: releasing a slot or moving its occupant during
//! compaction bumps the generation, so older handles stop resolving.

use std::fmt;

/// Reference to a live node in a [`SlotList`](crate::SlotList).
///
/// Handles are `Copy` and cheap to store. They never borrow the list, so
/// holding one across a mutation is allowed; using it afterwards either
/// resolves to the same node or fails with
/// [`ContractViolation::StaleHandle`](crate::ContractViolation::StaleHandle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    /// Physical slot index.
    pub(crate) index: u32,
    /// Slot generation when the handle was issued.
    pub(crate) generation: u32,
}

impl NodeHandle {
    /// Create a new handle.
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The physical slot index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The slot generation this handle was issued for.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle(slot={}, gen={})", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_fields() {
        let h = NodeHandle::new(7, 3);
        assert_eq!(h.index(), 7);
        assert_eq!(h.generation(), 3);
    }

    #[test]
    fn generation_distinguishes_handles() {
        assert_ne!(NodeHandle::new(2, 0), NodeHandle::new(2, 1));
    }

    #[test]
    fn display_format() {
        assert_eq!(
            NodeHandle::new(4, 9).to_string(),
            "NodeHandle(slot=4, gen=9)"
        );
    }
}
