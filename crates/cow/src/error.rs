use std::collections::TryReserveError;

/// Failure to grow a copy-on-write vector through [`crate::CowVec::try_grow`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
	/// `len + additional` does not fit in `usize`.
	#[error("capacity overflow: len {len} + additional {additional}")]
	Overflow { len: usize, additional: usize },
	/// The allocator refused the planned capacity.
	#[error("allocation failed: {0}")]
	Alloc(#[from] TryReserveError),
}
