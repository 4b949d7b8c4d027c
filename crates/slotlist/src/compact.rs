//! Compaction and reordering.
//!
//! [`SlotList::compact`] renumbers live nodes so physical order matches
//! traversal order. It moves payloads between slots, so every handle whose
//! node changed slot is invalidated (its slot generation is bumped).
//! Handles to nodes that were already in place stay valid.
//!
//! [`SlotList::sort_by`] reorders the traversal by payload without moving
//! any payload; all handles stay valid.

use std::cmp::Ordering;

use crate::arena::{Entry, NIL};
use crate::list::SlotList;

impl<T> SlotList<T> {
    /// Move live nodes into slots `0..len` in traversal order and rebuild
    /// the free chain over `len..capacity` in ascending order.
    ///
    /// Runs in O(capacity) with no allocation: the target slot of each node
    /// is staged in the `prev` store, which is rewritten afterwards.
    /// Idempotent: compacting a compacted list moves nothing and bumps no
    /// generation.
    pub fn compact(&mut self) {
        let capacity = self.arena.capacity();
        let len = self.len;

        // Stage destinations: live nodes by rank, free slots after them in
        // ascending physical order.
        let mut rank = 0u32;
        let mut cursor = self.head;
        while cursor != NIL {
            let next = self.arena.next[cursor as usize];
            self.arena.prev[cursor as usize] = rank;
            rank += 1;
            cursor = next;
        }
        let mut spare = len;
        for i in 0..capacity {
            if !self.arena.is_occupied(i) {
                self.arena.prev[i as usize] = spare;
                spare += 1;
            }
        }

        // A slot whose destination differs from itself gets a new occupant.
        let mut moved = 0u32;
        for i in 0..capacity as usize {
            if self.arena.prev[i] as usize != i {
                self.arena.generations[i] = self.arena.generations[i].wrapping_add(1);
                moved += 1;
            }
        }

        // Apply the permutation by following cycles.
        for i in 0..capacity as usize {
            loop {
                let dest = self.arena.prev[i] as usize;
                if dest == i {
                    break;
                }
                self.arena.entries.swap(i, dest);
                self.arena.prev.swap(i, dest);
            }
        }

        for i in 0..capacity {
            let slot = i as usize;
            if i < len {
                self.arena.next[slot] = if i + 1 < len { i + 1 } else { NIL };
                self.arena.prev[slot] = if i > 0 { i - 1 } else { NIL };
            } else {
                self.arena.next[slot] = NIL;
                self.arena.prev[slot] = NIL;
                self.arena.entries[slot] = Entry::Vacant {
                    next_free: if i + 1 < capacity { i + 1 } else { NIL },
                };
            }
        }
        self.arena.free_head = if len < capacity { len } else { NIL };
        (self.head, self.tail) = if len == 0 { (NIL, NIL) } else { (0, len - 1) };

        tracing::debug!(len, moved, "compacted list");
        self.after_mutation("compact");
    }

    /// Stable sort of the traversal order by `compare`.
    ///
    /// Only links change; every payload stays in its slot and every handle
    /// stays valid. Allocates a scratch buffer of `len` indices.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut order: Vec<(u32, &T)> = crate::iter::RawIter::new(self).collect();
        order.sort_by(|a, b| compare(a.1, b.1));
        let order: Vec<u32> = order.into_iter().map(|(i, _)| i).collect();
        self.relink(&order);
        self.after_mutation("sort_by");
    }

    /// Stable sort of the traversal order by the payloads' `Ord`.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Thread `next`/`prev` through `order`, which must list every live
    /// slot exactly once.
    fn relink(&mut self, order: &[u32]) {
        let mut previous = NIL;
        for &index in order {
            self.arena.prev[index as usize] = previous;
            if previous != NIL {
                self.arena.next[previous as usize] = index;
            }
            previous = index;
        }
        if previous != NIL {
            self.arena.next[previous as usize] = NIL;
        }
        self.head = order.first().copied().unwrap_or(NIL);
        self.tail = previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ContractViolation, ListError};

    /// `[0, 1, 2, 3]` in slots `[3, 0, 1, 2]`, plus slot 4 freed.
    fn scattered() -> SlotList<u32> {
        let mut l = SlotList::with_capacity(6).unwrap();
        let a = l.push_front(1).unwrap();
        let b = l.push_back(2).unwrap();
        l.insert_after(b, 3).unwrap();
        l.insert_before(a, 0).unwrap();
        let extra = l.push_back(99).unwrap();
        l.remove(extra).unwrap();
        l
    }

    #[test]
    fn compact_puts_traversal_order_in_slot_order() {
        let mut l = scattered();
        l.compact();
        let slots: Vec<u32> = l.handles().map(|h| h.index()).collect();
        assert_eq!(slots, [0, 1, 2, 3]);
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3]);
        assert_eq!(l.free_slots().collect::<Vec<_>>(), [4, 5]);
        assert!(l.check_integrity().is_ok());
    }

    #[test]
    fn compact_invalidates_moved_handles_only() {
        let mut l: SlotList<char> = SlotList::with_capacity(4).unwrap();
        let a = l.push_back('a').unwrap();
        let b = l.push_back('b').unwrap();
        let c = l.push_back('c').unwrap();
        l.remove(b).unwrap();
        l.compact();
        // 'a' stays in slot 0, 'c' moves from slot 2 to slot 1.
        assert_eq!(l.get(a), Some(&'a'));
        assert_eq!(l.get(c), None);
        assert!(matches!(
            l.remove(c),
            Err(ListError::Contract(ContractViolation::StaleHandle { index: 2, .. }))
        ));
        let moved = l.handle_at(1).unwrap();
        assert_eq!(moved.index(), 1);
        assert_eq!(l.get(moved), Some(&'c'));
    }

    #[test]
    fn compact_is_idempotent() {
        let mut l = scattered();
        l.compact();
        let handles: Vec<_> = l.handles().collect();
        let free: Vec<_> = l.free_slots().collect();
        l.compact();
        assert_eq!(l.handles().collect::<Vec<_>>(), handles);
        assert_eq!(l.free_slots().collect::<Vec<_>>(), free);
    }

    #[test]
    fn compact_empty_and_full() {
        let mut empty: SlotList<u8> = SlotList::with_capacity(3).unwrap();
        empty.compact();
        assert!(empty.is_empty());
        assert_eq!(empty.free_slots().collect::<Vec<_>>(), [0, 1, 2]);

        let mut full = SlotList::with_capacity(3).unwrap();
        full.push_back(1).unwrap();
        full.push_front(0).unwrap();
        full.push_front(2).unwrap();
        full.compact();
        assert_eq!(full.iter().copied().collect::<Vec<_>>(), [2, 0, 1]);
        assert!(full.is_full());
        assert!(full.check_integrity().is_ok());
    }

    #[test]
    fn insert_after_compact_uses_first_spare_slot() {
        let mut l = scattered();
        l.compact();
        let h = l.push_back(7).unwrap();
        assert_eq!(h.index(), 4);
    }

    #[test]
    fn sort_relinks_without_moving_payloads() {
        let mut l = SlotList::with_capacity(5).unwrap();
        let h3 = l.push_back(3).unwrap();
        let h1 = l.push_back(1).unwrap();
        let h2 = l.push_back(2).unwrap();
        l.sort();
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(l.front_handle(), Some(h1));
        assert_eq!(l.back_handle(), Some(h3));
        assert_eq!(l.get(h2), Some(&2));
        assert!(l.check_integrity().is_ok());
    }

    #[test]
    fn sort_by_is_stable() {
        let mut l = SlotList::with_capacity(4).unwrap();
        l.push_back((1, 'a')).unwrap();
        l.push_back((0, 'b')).unwrap();
        l.push_back((1, 'c')).unwrap();
        l.push_back((0, 'd')).unwrap();
        l.sort_by(|x, y| x.0.cmp(&y.0));
        let tags: String = l.iter().map(|p| p.1).collect();
        assert_eq!(tags, "bdac");
    }
}
