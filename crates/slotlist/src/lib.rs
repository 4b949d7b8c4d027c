//! Fixed-capacity, array-backed doubly linked list.
//!
//! [`SlotList`] stores its values in a preallocated slot arena and threads a
//! doubly linked traversal order through `u32` slot indices instead of heap
//! pointers. Dead slots are chained into an embedded free list, so no
//! operation after construction allocates.
//!
//! # Architecture
//!
//! ```text
//! SlotList<T>
//! ├── SlotArena<T>
//! │   ├── entries:     [Entry<T>; N]   Occupied(T) | Vacant { next_free }
//! │   ├── next, prev:  [u32; N]        traversal links (u32::MAX = none)
//! │   ├── generations: [u32; N]        bumped when a slot changes occupant
//! │   └── free_head                    LIFO free chain through Vacant entries
//! ├── head, tail, len
//! └── ListConfig
//! ```
//!
//! # Physical index vs logical position
//!
//! A node lives at a fixed *physical index* until it is removed or the list
//! is compacted. Its *logical position* is its rank when walking from the
//! head. [`SlotList::handle_at`] translates the latter into the former in
//! O(position).
//!
//! Callers refer to nodes through [`NodeHandle`]s, which pair the physical
//! index with the slot's generation. Once the slot is released or its
//! occupant is moved by [`SlotList::compact`], the handle is rejected with
//! [`ContractViolation::StaleHandle`] instead of silently aliasing a
//! different node.
//!
//! # Errors
//!
//! Running out of slots is the only expected failure
//! ([`ListError::CapacityExhausted`]); the list is left untouched.
//! Everything else a caller can do wrong surfaces as
//! [`ListError::Contract`]. Structural validation ([`SlotList::validate`],
//! [`SlotList::check_integrity`]) reports but never repairs.
//!
//! # Example
//!
//! ```
//! use slotlist::SlotList;
//!
//! let mut list = SlotList::with_capacity(4).unwrap();
//! let a = list.push_back("a").unwrap();
//! list.push_back("c").unwrap();
//! list.insert_after(a, "b").unwrap();
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
//! assert_eq!(list.handle_at(1).map(|h| h.index()), Some(2));
//! assert!(list.validate().is_ok());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod compact;
pub mod config;
pub mod dump;
pub mod error;
pub mod handle;
pub mod iter;
pub mod list;
pub mod position;
pub mod validate;

// Public re-exports for the primary API surface.
pub use config::ListConfig;
pub use dump::NodeView;
pub use error::{ContractViolation, ListError};
pub use handle::NodeHandle;
pub use iter::{Handles, Iter};
pub use list::SlotList;
pub use validate::{validate, Corruption, Validity};
