//! Structural validation.
//!
//! Two levels:
//!
//! - [`validate`] / [`SlotList::validate`]: the classic walk. Follow `next`
//!   from the head `len - 1` times and require landing on the tail. Cheap,
//!   allocation-free, and blind to a short cycle that happens to revisit the
//!   tail after exactly `len - 1` steps.
//! - [`SlotList::check_integrity`]: checks every structural invariant with a
//!   visited table and names the first one that fails.
//!
//! Both only report. Nothing here repairs a list.

use std::fmt;

use crate::arena::{link, Entry, NIL};
use crate::list::SlotList;

/// Outcome of [`validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Validity {
    /// The chain has the declared length and ends at the tail.
    Ok,
    /// No list was supplied.
    NotFound,
    /// The chain is short, dangling, or ends somewhere other than the tail.
    Corrupted,
}

impl Validity {
    /// Whether the list passed.
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::NotFound => write!(f, "list not found"),
            Self::Corrupted => write!(f, "corrupted"),
        }
    }
}

/// Validate an optional list.
///
/// `NotFound` when `list` is `None`; otherwise see [`SlotList::validate`].
pub fn validate<T>(list: Option<&SlotList<T>>) -> Validity {
    match list {
        Some(list) => list.validate(),
        None => Validity::NotFound,
    }
}

/// The first broken invariant found by [`SlotList::check_integrity`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Corruption {
    /// More live nodes are declared than the arena has slots.
    LengthExceedsCapacity {
        /// Declared length.
        len: u32,
        /// Slot count.
        capacity: u32,
    },
    /// A link points past the end of the arena.
    LinkOutOfRange {
        /// Slot holding the link, or `None` for the head pointer.
        from: Option<u32>,
        /// The out-of-range target.
        to: u32,
    },
    /// The live chain reaches a slot on the free chain.
    LinkToVacantSlot {
        /// The vacant slot.
        index: u32,
    },
    /// The live chain visits a slot twice.
    Cycle {
        /// First slot seen a second time.
        index: u32,
    },
    /// `prev` of a slot does not point back at the slot that links to it.
    AsymmetricLink {
        /// The slot whose `prev` is wrong.
        index: u32,
        /// Slot that precedes it on the forward walk.
        expected_prev: Option<u32>,
        /// Value actually stored in `prev`.
        found_prev: Option<u32>,
    },
    /// The forward walk visits a different number of nodes than declared.
    LengthMismatch {
        /// Declared length.
        declared: u32,
        /// Nodes reached from the head.
        walked: u32,
    },
    /// The forward walk ends somewhere other than the declared tail.
    TailMismatch {
        /// Declared tail.
        declared: Option<u32>,
        /// Last slot reached from the head.
        reached: Option<u32>,
    },
    /// The free chain reaches a live slot.
    FreeChainHitsLiveSlot {
        /// The live slot.
        index: u32,
    },
    /// The free chain loops or points outside the arena.
    FreeChainBroken {
        /// Slot where the walk stopped.
        index: u32,
    },
    /// The free chain does not cover every dead slot.
    FreeCountMismatch {
        /// `capacity - len`.
        expected: u32,
        /// Slots reached from the free head.
        found: u32,
    },
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |s: &Option<u32>| s.map_or_else(|| "none".to_string(), |i| i.to_string());
        match self {
            Self::LengthExceedsCapacity { len, capacity } => {
                write!(f, "length {len} exceeds capacity {capacity}")
            }
            Self::LinkOutOfRange { from, to } => {
                write!(f, "link from {} to out-of-range slot {to}", slot(from))
            }
            Self::LinkToVacantSlot { index } => write!(f, "live chain reaches vacant slot {index}"),
            Self::Cycle { index } => write!(f, "live chain revisits slot {index}"),
            Self::AsymmetricLink {
                index,
                expected_prev,
                found_prev,
            } => write!(
                f,
                "slot {index} has prev {} but is reached from {}",
                slot(found_prev),
                slot(expected_prev)
            ),
            Self::LengthMismatch { declared, walked } => {
                write!(f, "declared length {declared}, walked {walked} nodes")
            }
            Self::TailMismatch { declared, reached } => write!(
                f,
                "declared tail {}, walk ended at {}",
                slot(declared),
                slot(reached)
            ),
            Self::FreeChainHitsLiveSlot { index } => {
                write!(f, "free chain reaches live slot {index}")
            }
            Self::FreeChainBroken { index } => write!(f, "free chain broken at slot {index}"),
            Self::FreeCountMismatch { expected, found } => {
                write!(f, "free chain covers {found} slots, expected {expected}")
            }
        }
    }
}

impl std::error::Error for Corruption {}

impl<T> SlotList<T> {
    /// Walk `next` from the head exactly `len - 1` times and check that the
    /// walk lands on the tail.
    ///
    /// An empty list is `Ok` when head and tail are both unset. A cycle
    /// shorter than `len` that revisits the tail at the right step is not
    /// detected; use [`check_integrity`](Self::check_integrity) for that.
    pub fn validate(&self) -> Validity {
        let validity = self.walk_to_tail();
        if validity == Validity::Corrupted {
            tracing::warn!(len = self.len, "list failed validation");
        }
        validity
    }

    fn walk_to_tail(&self) -> Validity {
        if self.len == 0 {
            return if self.head == NIL && self.tail == NIL {
                Validity::Ok
            } else {
                Validity::Corrupted
            };
        }
        let capacity = self.arena.capacity();
        let mut cursor = self.head;
        for _ in 1..self.len {
            if cursor >= capacity {
                return Validity::Corrupted;
            }
            cursor = self.arena.next[cursor as usize];
        }
        if cursor == NIL || cursor != self.tail {
            return Validity::Corrupted;
        }
        Validity::Ok
    }

    /// Check every structural invariant.
    ///
    /// Verifies `len <= capacity`, that the forward chain from the head is
    /// acyclic, reaches only live slots, has symmetric `prev` links and the
    /// declared length and tail, and that the free chain covers exactly the
    /// remaining slots without touching live ones. O(capacity) time and a
    /// capacity-sized scratch table.
    pub fn check_integrity(&self) -> Result<(), Corruption> {
        let capacity = self.arena.capacity();
        if self.len > capacity {
            return Err(Corruption::LengthExceedsCapacity {
                len: self.len,
                capacity,
            });
        }

        let mut visited = vec![false; capacity as usize];

        let mut previous = NIL;
        let mut cursor = self.head;
        let mut walked = 0u32;
        while cursor != NIL {
            if cursor >= capacity {
                return Err(Corruption::LinkOutOfRange {
                    from: link(previous),
                    to: cursor,
                });
            }
            let i = cursor as usize;
            if visited[i] {
                return Err(Corruption::Cycle { index: cursor });
            }
            if !self.arena.is_occupied(cursor) {
                return Err(Corruption::LinkToVacantSlot { index: cursor });
            }
            if self.arena.prev[i] != previous {
                return Err(Corruption::AsymmetricLink {
                    index: cursor,
                    expected_prev: link(previous),
                    found_prev: link(self.arena.prev[i]),
                });
            }
            visited[i] = true;
            walked += 1;
            previous = cursor;
            cursor = self.arena.next[i];
        }
        if walked != self.len {
            return Err(Corruption::LengthMismatch {
                declared: self.len,
                walked,
            });
        }
        if previous != self.tail {
            return Err(Corruption::TailMismatch {
                declared: link(self.tail),
                reached: link(previous),
            });
        }

        let mut free = 0u32;
        let mut cursor = self.arena.free_head;
        while cursor != NIL {
            let Some(entry) = self.arena.entries.get(cursor as usize) else {
                return Err(Corruption::FreeChainBroken { index: cursor });
            };
            let next_free = match entry {
                Entry::Occupied(_) => {
                    return Err(Corruption::FreeChainHitsLiveSlot { index: cursor })
                }
                Entry::Vacant { next_free } => *next_free,
            };
            let i = cursor as usize;
            if visited[i] {
                return Err(Corruption::FreeChainBroken { index: cursor });
            }
            visited[i] = true;
            free += 1;
            cursor = next_free;
        }
        let expected = capacity - self.len;
        if free != expected {
            return Err(Corruption::FreeCountMismatch {
                expected,
                found: free,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: u32) -> SlotList<u32> {
        let mut l = SlotList::with_capacity(8).unwrap();
        for v in 0..n {
            l.push_back(v).unwrap();
        }
        l
    }

    #[test]
    fn absent_list_is_not_found() {
        assert_eq!(validate::<u32>(None), Validity::NotFound);
        assert_eq!(validate(Some(&filled(2))), Validity::Ok);
    }

    #[test]
    fn empty_and_cleared_lists_are_ok() {
        let mut l = filled(0);
        assert_eq!(l.validate(), Validity::Ok);
        assert!(l.check_integrity().is_ok());
        l.push_back(1).unwrap();
        l.clear();
        assert_eq!(l.validate(), Validity::Ok);
        assert!(l.check_integrity().is_ok());
    }

    #[test]
    fn short_chain_is_corrupted() {
        let mut l = filled(4);
        l.arena.next[1] = NIL;
        assert_eq!(l.validate(), Validity::Corrupted);
        assert_eq!(
            l.check_integrity(),
            Err(Corruption::LengthMismatch {
                declared: 4,
                walked: 2
            })
        );
    }

    #[test]
    fn wrong_tail_is_corrupted() {
        let mut l = filled(3);
        l.tail = 1;
        assert_eq!(l.validate(), Validity::Corrupted);
        assert!(matches!(
            l.check_integrity(),
            Err(Corruption::TailMismatch { .. })
        ));
    }

    #[test]
    fn empty_list_with_endpoint_is_corrupted() {
        let mut l = filled(0);
        l.head = 0;
        assert_eq!(l.validate(), Validity::Corrupted);
    }

    #[test]
    fn short_cycle_slips_past_validate_but_not_check_integrity() {
        // Chain 0 -> 1 -> 2 -> 3, len 4. Redirect 1 -> 0 and declare the
        // tail as slot 1: walking 3 steps goes 0, 1, 0, 1 and lands on it.
        let mut l = filled(4);
        l.arena.next[1] = 0;
        l.tail = 1;
        assert_eq!(l.validate(), Validity::Ok);
        assert_eq!(l.check_integrity(), Err(Corruption::Cycle { index: 0 }));
    }

    #[test]
    fn asymmetric_prev_detected() {
        let mut l = filled(3);
        l.arena.prev[2] = 0;
        assert_eq!(
            l.check_integrity(),
            Err(Corruption::AsymmetricLink {
                index: 2,
                expected_prev: Some(1),
                found_prev: Some(0),
            })
        );
    }

    #[test]
    fn link_into_free_slot_detected() {
        let mut l = filled(2);
        l.arena.next[1] = 5;
        assert_eq!(
            l.check_integrity(),
            Err(Corruption::LinkToVacantSlot { index: 5 })
        );
    }

    #[test]
    fn out_of_range_link_detected() {
        let mut l = filled(2);
        l.arena.next[0] = 40;
        assert_eq!(l.validate(), Validity::Corrupted);
        assert_eq!(
            l.check_integrity(),
            Err(Corruption::LinkOutOfRange {
                from: Some(0),
                to: 40
            })
        );
    }

    #[test]
    fn free_chain_into_live_slot_detected() {
        let mut l = filled(2);
        l.arena.free_head = 1;
        assert_eq!(
            l.check_integrity(),
            Err(Corruption::FreeChainHitsLiveSlot { index: 1 })
        );
    }

    #[test]
    fn truncated_free_chain_detected() {
        let mut l = filled(2);
        l.arena.entries[3] = Entry::Vacant { next_free: NIL };
        assert_eq!(
            l.check_integrity(),
            Err(Corruption::FreeCountMismatch {
                expected: 6,
                found: 2
            })
        );
    }

    #[test]
    fn looping_free_chain_detected() {
        let mut l = filled(2);
        l.arena.entries[4] = Entry::Vacant { next_free: 2 };
        assert_eq!(
            l.check_integrity(),
            Err(Corruption::FreeChainBroken { index: 2 })
        );
    }

    #[test]
    fn corruption_display() {
        let c = Corruption::TailMismatch {
            declared: Some(3),
            reached: None,
        };
        assert_eq!(c.to_string(), "declared tail 3, walk ended at none");
    }
}
