//! This crate provides a singly-linked list with owned nodes that stays
//! well-behaved even when its chain is deliberately forced into a cycle.
//!
//! The [`List`] supports constant-time insertion at the end, bounded search
//! and deletion by value, a stream-style reading cursor, and three
//! independent cycle detectors. The deliberately dangerous part of the API,
//! [`force_link`], rewires one node's successor link to another node and is
//! the sole way to build a cyclic or otherwise malformed chain; it exists so
//! the detectors have something to detect.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use looplist::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! list.push_back(5);
//! assert_eq!(list.len(), 5);
//! assert_eq!(list.delete_first(&3), Some(3)); // becomes [1, 2, 4, 5]
//! assert!(!list.contains(&3));
//!
//! // Read the list like a stream.
//! assert_eq!(list.read_next(), Some((&1, true)));
//! assert_eq!(list.read_next(), Some((&2, true)));
//! list.reset_reading();
//! assert_eq!(list.read_next(), Some((&1, true)));
//!
//! // Force a cycle: 5 now links back to 2.
//! assert!(list.force_link(&5, &2));
//! assert!(list.is_looping_floyds_cycle_find());
//! assert!(list.is_looping_transition_count());
//! assert!(list.is_looping_open_hash());
//! ```
//!
//! # Storage Layout
//!
//! Nodes are not heap-allocated individually. The `List` owns an arena of
//! slots, and a node's `next` link is an optional index into that arena:
//!
//! ```text
//!    ╔═══════════════╗      arena slots
//!    ║ head: Some(0) ║      ┌──────────────────┐
//!    ║ tail: Some(2) ║   0  │ value A, next: 1 │
//!    ║ cursor        ║   1  │ value B, next: 2 │
//!    ║ len: 3        ║   2  │ value C, next: — │
//!    ╚═══════════════╝   3  │ (free)           │
//!          List            └──────────────────┘
//! ```
//!
//! Because the arena owns every node, tearing the list down frees each slot
//! exactly once no matter how the links are tangled. A forced cycle cannot
//! make `Drop` loop forever, and the sub-chain orphaned by a [`force_link`]
//! is reclaimed with the rest of the arena. A link that names a freed slot
//! simply reads as the end of the chain.
//!
//! # Reading Cursor
//!
//! [`read_next`] returns the value under the list's internal cursor together
//! with a flag telling whether more values follow, and advances the cursor.
//! Once the cursor reaches the last node it stays there, repeating the last
//! value with `has_more = false`, until [`reset_reading`] sends it back to
//! the head. On a cyclic list `read_next` happily keeps going around, so a
//! caller who suspects a cycle should cap its number of reads (or ask a
//! detector first).
//!
//! # Cycle Detection
//!
//! Three algorithms answer the same question with different trade-offs:
//!
//! - [`is_looping_transition_count`] walks the chain and cries foul once it
//!   has made more transitions than the list has nodes. O(1) memory, but it
//!   trusts [`len`], which only tracks insertions and deletions made through
//!   the list API.
//! - [`is_looping_floyds_cycle_find`] is the classic slow/fast pointer race.
//!   O(1) memory and correct regardless of what `len` thinks.
//! - [`is_looping_open_hash`] records visited node identities in an
//!   open-hash table (collision chaining, with buckets that are themselves
//!   `List`s) and reports a revisit. O(n) memory; exists to demonstrate the
//!   technique.
//!
//! [`force_link`]: crate::List::force_link
//! [`read_next`]: crate::List::read_next
//! [`reset_reading`]: crate::List::reset_reading
//! [`len`]: crate::List::len
//! [`is_looping_transition_count`]: crate::List::is_looping_transition_count
//! [`is_looping_floyds_cycle_find`]: crate::List::is_looping_floyds_cycle_find
//! [`is_looping_open_hash`]: crate::List::is_looping_open_hash

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::{List, DEFAULT_HASH_TABLE_SIZE};

pub mod list;

mod experiments;
