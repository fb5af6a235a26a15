//! keyed-entry: key/value storage for ordered containers that shows an
//! immutable key to callers and an assignable key to the container.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: let a tree-based map relocate, splice and extract entries by
//!   assigning keys in place, while no caller can ever write a key and
//!   break the container's ordering.
//! - Layers:
//!   - Entry<K, V>: owns one key/value pair. Public accessors return
//!     `&K` only. Copy, move and pair assignment go through a private
//!     mutable-key view.
//!   - NodeSlots<K, V>: slot storage holding one Entry per occupied
//!     slot behind generational `Handle`s; implements extract, splice,
//!     relocate and copy strictly through Entry's assignment.
//!
//! Constraints
//! - No `unsafe`. Immutability of the key is encapsulation: the field
//!   is private and every public accessor hands out `&K`.
//! - The mutable-key view (`KeyValueMut`) is crate-private, borrowed
//!   from `&mut Entry`, and consumed by value by the single assignment
//!   that created it. It cannot outlive the entry or be stored.
//! - Copy assignment uses `clone_from` per part, so keys that own
//!   buffers keep them when the new key fits.
//! - Pair assignment accepts exactly `(K, V)`, `&(K, V)` and
//!   `&mut (K, V)` through the sealed `PairSource` trait; anything
//!   else is a compile error.
//!
//! Failure model
//! - Entry has no runtime errors. Panics from `K`/`V` clone or drop
//!   propagate; a panic in the value's assignment after the key's has
//!   completed leaves the key updated.
//! - NodeSlots reports stale handles with `SlotError` and leaves its
//!   contents unchanged on error.
//!
//! Notes and non-goals
//! - Single-threaded: no internal synchronization. `Entry` is
//!   `Send`/`Sync` exactly when `K` and `V` are.
//! - No ordering, lookup by key or balancing: those belong to the
//!   container built on top.
//! - Optional `serde` feature: an Entry serializes as its `(K, V)`
//!   tuple.

mod entry;
mod entry_proptest;
pub mod node_slots;

// Public surface
pub use entry::{Entry, PairSource};
pub use node_slots::{Handle, NodeSlots, SlotError};
