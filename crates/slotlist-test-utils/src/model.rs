//! Reference model and differential runner.

use std::collections::VecDeque;
use std::fmt;

use slotlist::{ListError, SlotList, Validity};

use crate::script::{Op, OpScript};

/// Observable result of applying one [`Op`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    /// Insertion refused because every slot is occupied.
    Full,
    Removed(u32),
    /// Positional op or pop on an empty list.
    Empty,
    Cleared,
    Compacted,
    /// The list returned an error the model never produces.
    Rejected(ListError),
}

/// Bounded `VecDeque` with the same logical semantics as `SlotList<u32>`.
#[derive(Clone, Debug)]
pub struct ModelList {
    items: VecDeque<u32>,
    capacity: usize,
}

impl ModelList {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().copied()
    }

    pub fn apply(&mut self, op: Op) -> Outcome {
        let full = self.items.len() == self.capacity;
        let len = self.items.len();
        match op {
            Op::PushFront(_) | Op::PushBack(_) if full => Outcome::Full,
            Op::PushFront(v) => {
                self.items.push_front(v);
                Outcome::Inserted
            }
            Op::PushBack(v) => {
                self.items.push_back(v);
                Outcome::Inserted
            }
            Op::InsertAfter { .. } | Op::InsertBefore { .. } | Op::Remove { .. } if len == 0 => {
                Outcome::Empty
            }
            Op::InsertAfter { .. } | Op::InsertBefore { .. } if full => Outcome::Full,
            Op::InsertAfter { pos, value } => {
                self.items.insert(pos % len + 1, value);
                Outcome::Inserted
            }
            Op::InsertBefore { pos, value } => {
                self.items.insert(pos % len, value);
                Outcome::Inserted
            }
            Op::Remove { pos } => self
                .items
                .remove(pos % len)
                .map_or(Outcome::Empty, Outcome::Removed),
            Op::PopFront => self.items.pop_front().map_or(Outcome::Empty, Outcome::Removed),
            Op::PopBack => self.items.pop_back().map_or(Outcome::Empty, Outcome::Removed),
            Op::Clear => {
                self.items.clear();
                Outcome::Cleared
            }
            Op::Compact => Outcome::Compacted,
        }
    }
}

/// Apply `op` to a real list, resolving positions through `handle_at`.
pub fn apply_to_list(list: &mut SlotList<u32>, op: Op) -> Outcome {
    fn inserted<H>(r: Result<H, ListError>) -> Outcome {
        match r {
            Ok(_) => Outcome::Inserted,
            Err(ListError::CapacityExhausted { .. }) => Outcome::Full,
            Err(e) => Outcome::Rejected(e),
        }
    }

    let len = list.len();
    let anchor = |list: &SlotList<u32>, pos: usize| list.handle_at(pos % len);
    match op {
        Op::PushFront(v) => inserted(list.push_front(v)),
        Op::PushBack(v) => inserted(list.push_back(v)),
        Op::InsertAfter { .. } | Op::InsertBefore { .. } | Op::Remove { .. } if len == 0 => {
            Outcome::Empty
        }
        Op::InsertAfter { pos, value } => match anchor(list, pos) {
            Some(h) => inserted(list.insert_after(h, value)),
            None => Outcome::Empty,
        },
        Op::InsertBefore { pos, value } => match anchor(list, pos) {
            Some(h) => inserted(list.insert_before(h, value)),
            None => Outcome::Empty,
        },
        Op::Remove { pos } => match anchor(list, pos) {
            Some(h) => match list.remove(h) {
                Ok(v) => Outcome::Removed(v),
                Err(e) => Outcome::Rejected(e),
            },
            None => Outcome::Empty,
        },
        Op::PopFront => list.pop_front().map_or(Outcome::Empty, Outcome::Removed),
        Op::PopBack => list.pop_back().map_or(Outcome::Empty, Outcome::Removed),
        Op::Clear => {
            list.clear();
            Outcome::Cleared
        }
        Op::Compact => {
            list.compact();
            Outcome::Compacted
        }
    }
}

/// First point at which a list and its model disagreed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    pub seed: u64,
    pub step: usize,
    pub op: Op,
    pub detail: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed {} step {} ({:?}): {}",
            self.seed, self.step, self.op, self.detail
        )
    }
}

impl std::error::Error for Divergence {}

/// Replay `script` against a fresh `SlotList` and [`ModelList`] of the given
/// capacity, checking outcomes, contents, free-slot count and integrity
/// after every op.
pub fn run_differential(script: &OpScript, capacity: usize) -> Result<(), Divergence> {
    let mut list: SlotList<u32> = SlotList::with_capacity(capacity).map_err(|e| Divergence {
        seed: script.seed,
        step: 0,
        op: Op::Clear,
        detail: format!("construction failed: {e}"),
    })?;
    let mut model = ModelList::new(capacity);

    for (step, &op) in script.ops.iter().enumerate() {
        let fail = |detail: String| Divergence {
            seed: script.seed,
            step,
            op,
            detail,
        };
        let got = apply_to_list(&mut list, op);
        let want = model.apply(op);
        if got != want {
            return Err(fail(format!("outcome {got:?}, model {want:?}")));
        }
        if !list.iter().copied().eq(model.items()) {
            return Err(fail(format!(
                "contents {:?}, model {:?}",
                list.iter().collect::<Vec<_>>(),
                model.items().collect::<Vec<_>>()
            )));
        }
        if list.len() != model.len() {
            return Err(fail(format!("len {}, model {}", list.len(), model.len())));
        }
        let free = list.free_slots().count();
        if free != capacity - list.len() {
            return Err(fail(format!("{free} free slots for len {}", list.len())));
        }
        if list.validate() != Validity::Ok {
            return Err(fail("validate reported corruption".to_string()));
        }
        if let Err(c) = list.check_integrity() {
            return Err(fail(format!("integrity: {c}")));
        }
    }
    Ok(())
}
