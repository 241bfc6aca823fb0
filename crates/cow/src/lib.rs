//! Copy-on-write vectors and hash maps with lock-free snapshot reads.
//!
//! # Purpose
//!
//! Share one collection between a writer and any number of readers without locks. The
//! writer never mutates storage a reader can see; it clones, edits the clone and
//! publishes it.
//!
//! # Mental model
//!
//! * A container holds exactly one published backing store behind an `ArcSwap`.
//! * Readers pin it with `snapshot()` and read an immutable view for as long as they hold it.
//! * Writers run a two-phase plan: decide read-only whether a clone is needed at all, then
//!   clone with planned capacity, mutate the private copy and publish it.
//! * A batch runs many steps against a single clone and publishes once.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints |
//! |---|---|---|
//! | [`CowVec`] | Copy-on-write vector | Published stores are never mutated |
//! | [`CowMap`] | Copy-on-write hash map | Published stores are never mutated |
//! | [`Batch`] | Ordered mutation steps | Steps run in insertion order against one clone |
//! | [`Doer`] | One mutation step | `Fn`, may be replayed after a lost publish race |
//! | [`Store`] | Capacity-planned clone | One allocation per write |
//! | [`SliceSnapshot`] / [`MapSnapshot`] | Read-only views | Re-exported from `immut-snapshot` |
//!
//! # Invariants
//!
//! * A snapshot obtained before a write is element-wise unchanged after it.
//! * A write whose avoidance rule holds returns the current snapshot by identity
//!   (`SliceSnapshot::ptr_eq` / `MapSnapshot::ptr_eq`).
//! * A write that panics (bounds violation, panicking step or comparator) publishes
//!   nothing.
//!
//! # Concurrency & ordering
//!
//! * Publication is an `ArcSwap` compare-and-swap, which gives release/acquire ordering
//!   between the writer that built a store and every reader that loads it. A reader
//!   never observes a partially built store.
//! * Reads are wait-free.
//! * Writers do not lock. A writer that loses a publish race re-runs its plan against the
//!   newer store, so concurrent writers do not lose updates. Closures passed to writes
//!   may therefore run more than once.
//!
//! # Logging
//!
//! Every write emits a `trace` event under the `immut_cow` target: `cow.clone_avoided`,
//! `cow.published` or `cow.publish_retry`, with the operation name and resulting length.

mod batch;
mod error;
mod map;
mod published;
mod store;
mod vec;

pub use batch::{Batch, Doer, MapBatch, VecBatch};
pub use error::CapacityError;
pub use immut_snapshot::{MapSnapshot, SliceSnapshot};
pub use map::CowMap;
pub use store::Store;
pub use vec::CowVec;
