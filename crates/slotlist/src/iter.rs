//! Traversal-order iteration.

use std::iter::FusedIterator;

use crate::arena::{SlotArena, NIL};
use crate::handle::NodeHandle;
use crate::list::SlotList;

/// Walks live slots in traversal order from both ends, yielding physical
/// indices. Bounded by `len`, so the ends never cross.
pub(crate) struct RawIter<'a, T> {
    arena: &'a SlotArena<T>,
    front: u32,
    back: u32,
    remaining: usize,
}

// Manual impls: iterators over shared references are `Clone` for any `T`.
impl<T> Clone for RawIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> RawIter<'a, T> {
    pub(crate) fn new(list: &'a SlotList<T>) -> Self {
        Self {
            arena: &list.arena,
            front: list.head,
            back: list.tail,
            remaining: list.len(),
        }
    }

    fn pair(&self, index: u32) -> Option<(u32, &'a T)> {
        self.arena.value(index).map(|v| (index, v))
    }
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = (u32, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.front == NIL {
            return None;
        }
        let index = self.front;
        self.front = self.arena.next[index as usize];
        self.remaining -= 1;
        self.pair(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for RawIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.back == NIL {
            return None;
        }
        let index = self.back;
        self.back = self.arena.prev[index as usize];
        self.remaining -= 1;
        self.pair(index)
    }
}

/// Iterator over payloads in traversal order. Created by
/// [`SlotList::iter`].
pub struct Iter<'a, T> {
    raw: RawIter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.raw.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.raw.next_back().map(|(_, v)| v)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over node handles in traversal order. Created by
/// [`SlotList::handles`].
pub struct Handles<'a, T> {
    raw: RawIter<'a, T>,
}

impl<T> Clone for Handles<'_, T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T> Iterator for Handles<'_, T> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<NodeHandle> {
        let arena = self.raw.arena;
        self.raw.next().map(|(i, _)| arena.handle(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<T> DoubleEndedIterator for Handles<'_, T> {
    fn next_back(&mut self) -> Option<NodeHandle> {
        let arena = self.raw.arena;
        self.raw.next_back().map(|(i, _)| arena.handle(i))
    }
}

impl<T> ExactSizeIterator for Handles<'_, T> {}
impl<T> FusedIterator for Handles<'_, T> {}

impl<T> SlotList<T> {
    /// Payloads from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: RawIter::new(self),
        }
    }

    /// Handles from head to tail.
    pub fn handles(&self) -> Handles<'_, T> {
        Handles {
            raw: RawIter::new(self),
        }
    }

    /// Call `f` on every node from head to tail with mutable access to its
    /// payload.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(NodeHandle, &mut T),
    {
        let mut cursor = self.head;
        for _ in 0..self.len {
            let handle = self.arena.handle(cursor);
            let next = self.arena.next[cursor as usize];
            if let Some(value) = self.arena.value_mut(cursor) {
                f(handle, value);
            }
            cursor = next;
        }
    }
}

impl<'a, T> IntoIterator for &'a SlotList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
