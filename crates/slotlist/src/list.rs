//! The list itself: construction, topology operations and accessors.
//!
//! Every inserting operation resolves its anchor first, then acquires a
//! slot, and only then splices the slot into the `next`/`prev` chain. A
//! failure at either step returns before anything is written, so a failed
//! call leaves the list unchanged.

use std::fmt;

use crate::arena::{link, SlotArena, NIL};
use crate::config::ListConfig;
use crate::error::ListError;
use crate::handle::NodeHandle;

/// Fixed-capacity doubly linked list backed by a slot arena.
///
/// See the [crate documentation](crate) for the storage layout.
pub struct SlotList<T> {
    pub(crate) arena: SlotArena<T>,
    pub(crate) head: u32,
    pub(crate) tail: u32,
    pub(crate) len: u32,
    config: ListConfig,
}

impl<T> SlotList<T> {
    /// Create an empty list from a validated config.
    pub fn new(config: ListConfig) -> Result<Self, ListError> {
        config.validate()?;
        Ok(Self {
            arena: SlotArena::new(config.capacity),
            head: NIL,
            tail: NIL,
            len: 0,
            config,
        })
    }

    /// Create an empty list with `capacity` slots and default options.
    pub fn with_capacity(capacity: usize) -> Result<Self, ListError> {
        let capacity = u32::try_from(capacity).map_err(|_| ListError::InvalidCapacity {
            requested: capacity,
            max: ListConfig::MAX_CAPACITY as usize,
        })?;
        Self::new(ListConfig::new(capacity))
    }

    /// Release every node and drop the list.
    ///
    /// Consuming `self` means no handle-bearing reference to the list can
    /// outlive this call.
    pub fn destroy(mut self) {
        self.clear();
    }

    /// The config the list was built with.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slot count. Never changes.
    pub fn capacity(&self) -> usize {
        self.arena.capacity() as usize
    }

    /// Whether every slot is live.
    pub fn is_full(&self) -> bool {
        self.arena.is_full()
    }

    /// Read-only view of the backing arena.
    pub fn arena(&self) -> &SlotArena<T> {
        &self.arena
    }

    /// Physical indices on the free chain, most recently released first.
    pub fn free_slots(&self) -> impl Iterator<Item = u32> + '_ {
        self.arena.free_slots()
    }

    // ── Topology ────────────────────────────────────────────────

    /// Insert `value` before the current head.
    pub fn push_front(&mut self, value: T) -> Result<NodeHandle, ListError> {
        let index = self.acquire(value)?;
        let old_head = self.head;
        self.arena.next[index as usize] = old_head;
        self.arena.prev[index as usize] = NIL;
        if old_head != NIL {
            self.arena.prev[old_head as usize] = index;
        } else {
            self.tail = index;
        }
        self.head = index;
        self.len += 1;
        self.after_mutation("push_front");
        Ok(self.arena.handle(index))
    }

    /// Insert `value` after the current tail.
    pub fn push_back(&mut self, value: T) -> Result<NodeHandle, ListError> {
        let index = self.acquire(value)?;
        let old_tail = self.tail;
        self.arena.prev[index as usize] = old_tail;
        self.arena.next[index as usize] = NIL;
        if old_tail != NIL {
            self.arena.next[old_tail as usize] = index;
        } else {
            self.head = index;
        }
        self.tail = index;
        self.len += 1;
        self.after_mutation("push_back");
        Ok(self.arena.handle(index))
    }

    /// Insert `value` directly after `anchor`.
    pub fn insert_after(&mut self, anchor: NodeHandle, value: T) -> Result<NodeHandle, ListError> {
        let anchor = self.arena.resolve(anchor)?;
        let index = self.acquire(value)?;
        let successor = self.arena.next[anchor as usize];
        self.arena.prev[index as usize] = anchor;
        self.arena.next[index as usize] = successor;
        self.arena.next[anchor as usize] = index;
        if successor != NIL {
            self.arena.prev[successor as usize] = index;
        } else {
            self.tail = index;
        }
        self.len += 1;
        self.after_mutation("insert_after");
        Ok(self.arena.handle(index))
    }

    /// Insert `value` directly before `anchor`.
    pub fn insert_before(
        &mut self,
        anchor: NodeHandle,
        value: T,
    ) -> Result<NodeHandle, ListError> {
        let anchor = self.arena.resolve(anchor)?;
        let index = self.acquire(value)?;
        let predecessor = self.arena.prev[anchor as usize];
        self.arena.next[index as usize] = anchor;
        self.arena.prev[index as usize] = predecessor;
        self.arena.prev[anchor as usize] = index;
        if predecessor != NIL {
            self.arena.next[predecessor as usize] = index;
        } else {
            self.head = index;
        }
        self.len += 1;
        self.after_mutation("insert_before");
        Ok(self.arena.handle(index))
    }

    /// Unlink the node and return its payload.
    ///
    /// The slot goes to the top of the free chain, so the next insertion
    /// reuses it.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T, ListError> {
        let index = self.arena.resolve(handle)?;
        let value = self.unlink_and_release(index);
        self.after_mutation("remove");
        Ok(value)
    }

    /// Remove the head node.
    pub fn pop_front(&mut self) -> Option<T> {
        let index = link(self.head)?;
        let value = self.unlink_and_release(index);
        self.after_mutation("pop_front");
        Some(value)
    }

    /// Remove the tail node.
    pub fn pop_back(&mut self) -> Option<T> {
        let index = link(self.tail)?;
        let value = self.unlink_and_release(index);
        self.after_mutation("pop_back");
        Some(value)
    }

    /// Release every live node, tail included, and reset to empty.
    ///
    /// Slots are pushed onto the free chain in traversal order, leaving the
    /// old tail on top.
    pub fn clear(&mut self) {
        let released = self.len;
        let mut cursor = self.head;
        while cursor != NIL {
            let next = self.arena.next[cursor as usize];
            drop(self.arena.release(cursor));
            cursor = next;
        }
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
        tracing::debug!(released, "cleared list");
        self.after_mutation("clear");
    }

    fn acquire(&mut self, value: T) -> Result<u32, ListError> {
        match self.arena.acquire(value) {
            Some(index) => Ok(index),
            None => {
                let capacity = self.arena.capacity();
                tracing::debug!(capacity, "slot arena exhausted");
                Err(ListError::CapacityExhausted { capacity })
            }
        }
    }

    fn unlink_and_release(&mut self, index: u32) -> T {
        let i = index as usize;
        let prev = self.arena.prev[i];
        let next = self.arena.next[i];
        if prev != NIL {
            self.arena.next[prev as usize] = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.arena.prev[next as usize] = prev;
        } else {
            self.tail = prev;
        }
        self.len -= 1;
        self.arena.release(index)
    }

    pub(crate) fn after_mutation(&self, op: &'static str) {
        if !self.config.validate_on_mutation {
            return;
        }
        if let Err(corruption) = self.check_integrity() {
            tracing::warn!(op, %corruption, "integrity check failed after mutation");
        }
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Handle of the head node.
    pub fn front_handle(&self) -> Option<NodeHandle> {
        link(self.head).map(|i| self.arena.handle(i))
    }

    /// Handle of the tail node.
    pub fn back_handle(&self) -> Option<NodeHandle> {
        link(self.tail).map(|i| self.arena.handle(i))
    }

    /// Handle of the node after `handle`, or `None` at the tail.
    pub fn next_of(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, ListError> {
        let index = self.arena.resolve(handle)?;
        Ok(link(self.arena.next[index as usize]).map(|i| self.arena.handle(i)))
    }

    /// Handle of the node before `handle`, or `None` at the head.
    pub fn prev_of(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, ListError> {
        let index = self.arena.resolve(handle)?;
        Ok(link(self.arena.prev[index as usize]).map(|i| self.arena.handle(i)))
    }

    /// Current handle of the node at a raw physical index.
    ///
    /// Fails if the index is out of range or the slot is free.
    pub fn handle_of(&self, index: u32) -> Result<NodeHandle, ListError> {
        Ok(self.arena.resolve_index(index)?)
    }

    /// Whether `handle` still names a live node.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.arena.resolve(handle).is_ok()
    }

    /// Payload of the node, or `None` if the handle no longer resolves.
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        let index = self.arena.resolve(handle).ok()?;
        self.arena.value(index)
    }

    /// Mutable payload of the node, or `None` if the handle no longer
    /// resolves.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        let index = self.arena.resolve(handle).ok()?;
        self.arena.value_mut(index)
    }

    /// Payload of the head node.
    pub fn front(&self) -> Option<&T> {
        self.arena.value(self.head)
    }

    /// Payload of the tail node.
    pub fn back(&self) -> Option<&T> {
        self.arena.value(self.tail)
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
