//! Benchmark fixtures for slotlist.
//!
//! - [`filled`]: a list at capacity whose slot order matches traversal order.
//! - [`scattered`]: a list shaped by a seeded op script, so traversal jumps
//!   around the arena.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use slotlist::SlotList;
use slotlist_test_utils::{apply_to_list, OpScript};

/// A full list of `capacity` ascending values in slots `0..capacity`.
pub fn filled(capacity: usize) -> SlotList<u64> {
    let mut list = SlotList::with_capacity(capacity).unwrap();
    for v in 0..capacity as u64 {
        list.push_back(v).unwrap();
    }
    list
}

/// A list of the given capacity after replaying `ops` seeded ops, topped up
/// from the front to at least half full.
pub fn scattered(capacity: usize, seed: u64, ops: usize) -> SlotList<u32> {
    let mut list = SlotList::with_capacity(capacity).unwrap();
    for op in OpScript::generate(seed, ops).ops {
        apply_to_list(&mut list, op);
    }
    let mut v = 0;
    while list.len() < capacity / 2 {
        list.push_front(v).unwrap();
        v += 1;
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_is_full_and_in_slot_order() {
        let l = filled(16);
        assert!(l.is_full());
        assert_eq!(l.handle_at(15).unwrap().index(), 15);
    }

    #[test]
    fn scattered_is_deterministic_and_half_full() {
        let a = scattered(64, 5, 500);
        let b = scattered(64, 5, 500);
        assert!(a.len() >= 32);
        assert!(a.iter().eq(b.iter()));
        assert!(a.check_integrity().is_ok());
    }
}
