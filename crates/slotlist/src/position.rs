//! Logical position ↔ physical slot translation and predicate search.
//!
//! Physical slots are reused, so a slot number carries no rank. Finding the
//! node at logical position `p` means walking `p` links from the head;
//! every lookup here is linear.

use crate::arena::NIL;
use crate::error::{ContractViolation, ListError};
use crate::handle::NodeHandle;
use crate::list::SlotList;

impl<T> SlotList<T> {
    /// Handle of the node `position` steps from the head.
    ///
    /// `None` when `position >= len()`. O(position).
    pub fn handle_at(&self, position: usize) -> Option<NodeHandle> {
        self.index_at(position).map(|i| self.arena.handle(i))
    }

    /// Payload of the node at `position`.
    pub fn get_at(&self, position: usize) -> Option<&T> {
        self.index_at(position).and_then(|i| self.arena.value(i))
    }

    /// Mutable payload of the node at `position`.
    pub fn get_at_mut(&mut self, position: usize) -> Option<&mut T> {
        let index = self.index_at(position)?;
        self.arena.value_mut(index)
    }

    /// Logical position of the node named by `handle`. O(len).
    pub fn position_of(&self, handle: NodeHandle) -> Result<usize, ListError> {
        let target = self.arena.resolve(handle)?;
        let mut cursor = self.head;
        for position in 0..self.len() {
            if cursor == target {
                return Ok(position);
            }
            cursor = self.arena.next[cursor as usize];
        }
        // A resolved handle names a live node, so the walk always finds it
        // on a consistent list.
        Err(ContractViolation::VacantSlot { index: target }.into())
    }

    pub(crate) fn index_at(&self, position: usize) -> Option<u32> {
        if position >= self.len() {
            return None;
        }
        let mut cursor = self.head;
        for _ in 0..position {
            if cursor == NIL {
                return None;
            }
            cursor = self.arena.next[cursor as usize];
        }
        (cursor != NIL).then_some(cursor)
    }

    /// First node, walking from the head, whose payload `eq` matches
    /// against `needle`.
    ///
    /// Performs at most `len()` comparisons.
    pub fn find_first<Q, F>(&self, needle: &Q, mut eq: F) -> Option<NodeHandle>
    where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> bool,
    {
        let mut cursor = self.head;
        for _ in 0..self.len {
            let value = self.arena.value(cursor)?;
            if eq(value, needle) {
                return Some(self.arena.handle(cursor));
            }
            cursor = self.arena.next[cursor as usize];
        }
        None
    }

    /// Last node, walking from the tail, whose payload `eq` matches
    /// against `needle`.
    ///
    /// Performs at most `len()` comparisons.
    pub fn find_last<Q, F>(&self, needle: &Q, mut eq: F) -> Option<NodeHandle>
    where
        Q: ?Sized,
        F: FnMut(&T, &Q) -> bool,
    {
        let mut cursor = self.tail;
        for _ in 0..self.len {
            let value = self.arena.value(cursor)?;
            if eq(value, needle) {
                return Some(self.arena.handle(cursor));
            }
            cursor = self.arena.prev[cursor as usize];
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the list `[0, 1, 2, 3]` laid out in slots `[3, 0, 1, 2]`.
    fn rotated() -> SlotList<u32> {
        let mut l = SlotList::with_capacity(6).unwrap();
        let a = l.push_front(1).unwrap();
        let b = l.push_back(2).unwrap();
        l.insert_after(b, 3).unwrap();
        l.insert_before(a, 0).unwrap();
        l
    }

    #[test]
    fn handle_at_walks_traversal_order() {
        let l = rotated();
        let slots: Vec<u32> = (0..4).map(|p| l.handle_at(p).unwrap().index()).collect();
        assert_eq!(slots, [3, 0, 1, 2]);
        assert!(l.handle_at(4).is_none());
    }

    #[test]
    fn get_at_reads_payloads() {
        let mut l = rotated();
        assert_eq!(l.get_at(0), Some(&0));
        assert_eq!(l.get_at(3), Some(&3));
        *l.get_at_mut(2).unwrap() = 20;
        assert_eq!(l.get_at(2), Some(&20));
        assert!(l.get_at(9).is_none());
    }

    #[test]
    fn position_of_inverts_handle_at() {
        let l = rotated();
        for p in 0..l.len() {
            let h = l.handle_at(p).unwrap();
            assert_eq!(l.position_of(h), Ok(p));
        }
    }

    #[test]
    fn find_first_and_last_scan_opposite_ends() {
        let mut l: SlotList<&str> = SlotList::with_capacity(5).unwrap();
        let first = l.push_back("x").unwrap();
        l.push_back("y").unwrap();
        let last = l.push_back("x").unwrap();
        assert_eq!(l.find_first("x", |a, b| *a == b), Some(first));
        assert_eq!(l.find_last("x", |a, b| *a == b), Some(last));
        assert_eq!(l.find_first("z", |a, b| *a == b), None);
    }

    #[test]
    fn find_compares_at_most_len_times() {
        let mut l = SlotList::with_capacity(8).unwrap();
        for v in 0..5u32 {
            l.push_back(v).unwrap();
        }
        let mut calls = 0;
        let found = l.find_first(&99u32, |a, b| {
            calls += 1;
            a == b
        });
        assert!(found.is_none());
        assert_eq!(calls, 5);
    }

    #[test]
    fn find_on_empty_list() {
        let l: SlotList<u32> = SlotList::with_capacity(2).unwrap();
        assert!(l.find_first(&1u32, |a, b| a == b).is_none());
        assert!(l.find_last(&1u32, |a, b| a == b).is_none());
    }
}
