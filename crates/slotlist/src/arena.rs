//! Fixed-capacity slot arena with an embedded free chain.
//!
//! [`SlotArena`] owns the parallel per-slot stores of a list: the payload
//! entry, the `next`/`prev` traversal links and the slot generation. Dead
//! slots are threaded into a singly linked free chain through their
//! [`Entry::Vacant`] variant, so acquiring and releasing a slot never
//! touches the heap.
//!
//! Free-chain discipline is LIFO: the most recently released slot is the
//! next one handed out. Callers can observe this through physical indices
//! and rely on it.
//!
//! The arena knows nothing about traversal order. `acquire` and `release`
//! leave `next`/`prev` wiring to the caller.

use crate::error::ContractViolation;
use crate::handle::NodeHandle;

/// Link value meaning "no slot".
pub(crate) const NIL: u32 = u32::MAX;

/// Map a raw link to `Option`, hiding the sentinel.
pub(crate) fn link(index: u32) -> Option<u32> {
    (index != NIL).then_some(index)
}

/// Contents of one physical slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Entry<T> {
    /// Slot holds a live payload.
    Occupied(T),
    /// Slot is on the free chain; `next_free` is the following dead slot.
    Vacant {
        /// Next slot on the free chain, or `NIL`.
        next_free: u32,
    },
}

/// Preallocated slot storage for a [`SlotList`](crate::SlotList).
///
/// All stores have exactly `capacity` elements for the arena's lifetime.
pub struct SlotArena<T> {
    /// Payload or free-chain link per slot.
    pub(crate) entries: Box<[Entry<T>]>,
    /// Successor in traversal order, or `NIL`.
    pub(crate) next: Box<[u32]>,
    /// Predecessor in traversal order, or `NIL`.
    pub(crate) prev: Box<[u32]>,
    /// Incremented whenever a slot's occupant stops being the same node.
    pub(crate) generations: Box<[u32]>,
    /// First slot of the free chain, or `NIL` when every slot is live.
    pub(crate) free_head: u32,
}

impl<T> SlotArena<T> {
    /// Create an arena with every slot free.
    ///
    /// The free chain is seeded in slot order: slot `i` links to `i + 1`
    /// and the last slot terminates the chain. `capacity` must be below
    /// `NIL`; [`ListConfig::validate`](crate::ListConfig::validate) enforces
    /// this before a list builds its arena.
    pub(crate) fn new(capacity: u32) -> Self {
        let entries = (0..capacity)
            .map(|i| Entry::Vacant {
                next_free: if i + 1 < capacity { i + 1 } else { NIL },
            })
            .collect();
        let len = capacity as usize;
        Self {
            entries,
            next: vec![NIL; len].into_boxed_slice(),
            prev: vec![NIL; len].into_boxed_slice(),
            generations: vec![0; len].into_boxed_slice(),
            free_head: if capacity == 0 { NIL } else { 0 },
        }
    }

    /// Total slot count.
    pub fn capacity(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Whether the free chain is empty.
    pub fn is_full(&self) -> bool {
        self.free_head == NIL
    }

    /// Pop the head of the free chain and store `value` there.
    ///
    /// Returns `None` when no slot is free. The arena never grows; the
    /// value is dropped in that case.
    pub(crate) fn acquire(&mut self, value: T) -> Option<u32> {
        let index = self.free_head;
        if index == NIL {
            return None;
        }
        let slot = &mut self.entries[index as usize];
        let Entry::Vacant { next_free } = *slot else {
            unreachable!("free chain reaches live slot {index}");
        };
        *slot = Entry::Occupied(value);
        self.free_head = next_free;
        tracing::trace!(slot = index, "acquired slot");
        Some(index)
    }

    /// Take the payload out of a live slot and push the slot onto the free
    /// chain.
    ///
    /// Bumps the slot generation so handles to the old occupant go stale,
    /// and clears its links. The caller must have unlinked the slot from
    /// the traversal order and checked that it is live.
    pub(crate) fn release(&mut self, index: u32) -> T {
        let i = index as usize;
        let old = std::mem::replace(
            &mut self.entries[i],
            Entry::Vacant {
                next_free: self.free_head,
            },
        );
        let Entry::Occupied(value) = old else {
            unreachable!("released slot {index} was already vacant");
        };
        self.free_head = index;
        self.next[i] = NIL;
        self.prev[i] = NIL;
        self.generations[i] = self.generations[i].wrapping_add(1);
        tracing::trace!(slot = index, generation = self.generations[i], "released slot");
        value
    }

    /// Whether `index` is in range and holds a live payload.
    pub fn is_occupied(&self, index: u32) -> bool {
        matches!(
            self.entries.get(index as usize),
            Some(Entry::Occupied(_))
        )
    }

    /// Shared reference to the payload at `index`, if live.
    pub(crate) fn value(&self, index: u32) -> Option<&T> {
        match self.entries.get(index as usize)? {
            Entry::Occupied(v) => Some(v),
            Entry::Vacant { .. } => None,
        }
    }

    /// Mutable reference to the payload at `index`, if live.
    pub(crate) fn value_mut(&mut self, index: u32) -> Option<&mut T> {
        match self.entries.get_mut(index as usize)? {
            Entry::Occupied(v) => Some(v),
            Entry::Vacant { .. } => None,
        }
    }

    /// Current handle for a slot. Does not check liveness.
    pub(crate) fn handle(&self, index: u32) -> NodeHandle {
        NodeHandle::new(index, self.generations[index as usize])
    }

    /// Resolve a handle to its physical index if it still names a live node.
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Result<u32, ContractViolation> {
        let index = handle.index;
        let Some(&generation) = self.generations.get(index as usize) else {
            return Err(ContractViolation::OutOfRange {
                index,
                capacity: self.capacity(),
            });
        };
        if generation != handle.generation {
            return Err(ContractViolation::StaleHandle {
                index,
                handle_generation: handle.generation,
                slot_generation: generation,
            });
        }
        if !self.is_occupied(index) {
            return Err(ContractViolation::VacantSlot { index });
        }
        Ok(index)
    }

    /// Check a raw physical index and return the handle of its occupant.
    pub(crate) fn resolve_index(&self, index: u32) -> Result<NodeHandle, ContractViolation> {
        if index >= self.capacity() {
            return Err(ContractViolation::OutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        if !self.is_occupied(index) {
            return Err(ContractViolation::VacantSlot { index });
        }
        Ok(self.handle(index))
    }

    /// Walk the free chain from its head.
    ///
    /// Stops after `capacity` steps so a corrupted chain cannot loop
    /// forever.
    pub fn free_slots(&self) -> FreeSlots<'_, T> {
        FreeSlots {
            arena: self,
            cursor: self.free_head,
            budget: self.entries.len(),
        }
    }
}

/// Iterator over the free chain, in the order slots will be reused.
pub struct FreeSlots<'a, T> {
    arena: &'a SlotArena<T>,
    cursor: u32,
    budget: usize,
}

impl<T> Iterator for FreeSlots<'_, T> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.cursor == NIL || self.budget == 0 {
            return None;
        }
        let index = self.cursor;
        self.budget -= 1;
        self.cursor = match self.arena.entries.get(index as usize) {
            Some(Entry::Vacant { next_free }) => *next_free,
            _ => NIL,
        };
        Some(index)
    }
}
