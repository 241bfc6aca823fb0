use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// A backing collection that can be cloned into a capacity-planned private copy.
///
/// Every write clones through [`Store::clone_with_capacity`], so the allocation size is
/// decided once, before any element is copied.
pub trait Store {
	/// Number of elements or entries.
	fn len(&self) -> usize;

	/// Clones into a new store with room for at least `max(capacity, self.len())` items.
	///
	/// Passing `0` yields a shrink-to-length clone.
	fn clone_with_capacity(&self, capacity: usize) -> Self;
}

impl<T: Clone> Store for Vec<T> {
	#[inline]
	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn clone_with_capacity(&self, capacity: usize) -> Self {
		let mut out = Vec::with_capacity(capacity.max(Vec::len(self)));
		out.extend_from_slice(self);
		out
	}
}

impl<K, V, S> Store for HashMap<K, V, S>
where
	K: Eq + Hash + Clone,
	V: Clone,
	S: BuildHasher + Clone,
{
	#[inline]
	fn len(&self) -> usize {
		HashMap::len(self)
	}

	fn clone_with_capacity(&self, capacity: usize) -> Self {
		let mut out =
			HashMap::with_capacity_and_hasher(capacity.max(HashMap::len(self)), self.hasher().clone());
		out.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
		out
	}
}
