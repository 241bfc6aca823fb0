//! Read-only snapshot views over owned collections.
//!
//! A snapshot adopts a `Vec` or `HashMap` by value and only ever hands out shared
//! references to it. Cloning a snapshot clones the `Arc`, never the elements, so a
//! reader can capture one and keep reading it while writers publish replacements
//! elsewhere.
//!
//! Mutation is deliberately absent. To change the contents, clone the backing store
//! (`to_vec`, `to_map`, or the capacity-planned variants), edit the copy, and freeze it
//! again.

/// Read-only view over a hash map.
pub mod map;
/// Read-only view over a vector.
pub mod slice;

pub use map::MapSnapshot;
pub use slice::SliceSnapshot;
