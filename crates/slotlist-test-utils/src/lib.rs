//! Test utilities for slotlist development.
//!
//! - [`script`]: seeded, reproducible operation scripts.
//! - [`model`]: a `VecDeque` reference model and a differential runner
//!   that replays a script against both and reports the first divergence.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod model;
pub mod script;

pub use model::{apply_to_list, run_differential, Divergence, ModelList, Outcome};
pub use script::{Op, OpScript};
