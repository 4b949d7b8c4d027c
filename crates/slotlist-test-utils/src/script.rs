//! Seeded operation scripts.
//!
//! Positions in an [`Op`] are raw draws, reduced modulo the current length
//! when the op is applied, so a script is valid against any list state.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// One mutation of a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    PushFront(u32),
    PushBack(u32),
    InsertAfter { pos: usize, value: u32 },
    InsertBefore { pos: usize, value: u32 },
    Remove { pos: usize },
    PopFront,
    PopBack,
    Clear,
    Compact,
}

/// A reproducible sequence of [`Op`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpScript {
    pub seed: u64,
    pub ops: Vec<Op>,
}

impl OpScript {
    /// Generate `len` ops from `seed`.
    ///
    /// Inserts are weighted above removals so lists regularly reach
    /// capacity. `Clear` is rare.
    pub fn generate(seed: u64, len: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ops = Vec::with_capacity(len);
        for _ in 0..len {
            let value = rng.random_range(0..1000u32);
            let pos = rng.random_range(0..64usize);
            let op = match rng.random_range(0..100u32) {
                0..=14 => Op::PushFront(value),
                15..=34 => Op::PushBack(value),
                35..=49 => Op::InsertAfter { pos, value },
                50..=59 => Op::InsertBefore { pos, value },
                60..=79 => Op::Remove { pos },
                80..=86 => Op::PopFront,
                87..=93 => Op::PopBack,
                94..=97 => Op::Compact,
                _ => Op::Clear,
            };
            ops.push(op);
        }
        Self { seed, ops }
    }
}
