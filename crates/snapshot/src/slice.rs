use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, cheaply clonable view over a `Vec<T>`.
///
/// Dereferences to `[T]`, so every read-only slice method (indexing, `get`, `iter`,
/// `binary_search`, `contains`, `is_sorted`, ...) is available without allocating.
/// Indexing out of bounds panics exactly like a native slice.
pub struct SliceSnapshot<T> {
	vec: Arc<Vec<T>>,
}

impl<T> SliceSnapshot<T> {
	/// Adopts `vec` without copying it.
	pub fn freeze(vec: Vec<T>) -> Self {
		Self { vec: Arc::new(vec) }
	}

	/// Wraps an already shared backing store.
	pub fn from_shared(vec: Arc<Vec<T>>) -> Self {
		Self { vec }
	}

	/// Returns the shared backing store.
	pub fn shared(&self) -> &Arc<Vec<T>> {
		&self.vec
	}

	/// Capacity of the backing store.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.vec.capacity()
	}

	/// Returns the elements as a slice.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		self.vec.as_slice()
	}

	/// Reports whether both snapshots view the same backing store.
	pub fn ptr_eq(a: &Self, b: &Self) -> bool {
		Arc::ptr_eq(&a.vec, &b.vec)
	}

	/// Copies `min(self.len(), dst.len())` leading elements into `dst` and returns the count.
	pub fn copy_to(&self, dst: &mut [T]) -> usize
	where
		T: Clone,
	{
		let n = self.vec.len().min(dst.len());
		dst[..n].clone_from_slice(&self.vec[..n]);
		n
	}

	/// Clones the elements into a new vector with room for at least `capacity` elements.
	///
	/// The allocation is sized to `max(capacity, len)` up front so that callers can plan
	/// for subsequent growth with a single allocation.
	pub fn to_vec_with_capacity(&self, capacity: usize) -> Vec<T>
	where
		T: Clone,
	{
		let mut out = Vec::with_capacity(capacity.max(self.vec.len()));
		out.extend_from_slice(&self.vec);
		out
	}

	/// Element-wise equality under `eq`. Lengths must match.
	pub fn eq_by<U, F>(&self, other: &[U], mut eq: F) -> bool
	where
		F: FnMut(&T, &U) -> bool,
	{
		self.vec.len() == other.len() && self.vec.iter().zip(other).all(|(a, b)| eq(a, b))
	}

	/// Lexicographic comparison under `cmp`.
	///
	/// The first non-equal pair decides; if one side is a prefix of the other, the shorter
	/// side is less.
	pub fn cmp_by<U, F>(&self, other: &[U], mut cmp: F) -> Ordering
	where
		F: FnMut(&T, &U) -> Ordering,
	{
		for (a, b) in self.vec.iter().zip(other) {
			match cmp(a, b) {
				Ordering::Equal => {}
				non_eq => return non_eq,
			}
		}
		self.vec.len().cmp(&other.len())
	}
}

impl<T> Clone for SliceSnapshot<T> {
	fn clone(&self) -> Self {
		Self {
			vec: Arc::clone(&self.vec),
		}
	}
}

impl<T> Default for SliceSnapshot<T> {
	fn default() -> Self {
		Self::freeze(Vec::new())
	}
}

impl<T> Deref for SliceSnapshot<T> {
	type Target = [T];

	#[inline]
	fn deref(&self) -> &[T] {
		self.vec.as_slice()
	}
}

impl<T> AsRef<[T]> for SliceSnapshot<T> {
	fn as_ref(&self) -> &[T] {
		self.vec.as_slice()
	}
}

impl<T> From<Vec<T>> for SliceSnapshot<T> {
	fn from(vec: Vec<T>) -> Self {
		Self::freeze(vec)
	}
}

impl<T> FromIterator<T> for SliceSnapshot<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::freeze(iter.into_iter().collect())
	}
}

impl<'a, T> IntoIterator for &'a SliceSnapshot<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.vec.iter()
	}
}

impl<T: fmt::Debug> fmt::Debug for SliceSnapshot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.vec, f)
	}
}

impl<T: PartialEq> PartialEq for SliceSnapshot<T> {
	fn eq(&self, other: &Self) -> bool {
		self.vec.as_slice() == other.vec.as_slice()
	}
}

impl<T: Eq> Eq for SliceSnapshot<T> {}

impl<T: PartialEq> PartialEq<[T]> for SliceSnapshot<T> {
	fn eq(&self, other: &[T]) -> bool {
		self.vec.as_slice() == other
	}
}

impl<T: PartialEq> PartialEq<Vec<T>> for SliceSnapshot<T> {
	fn eq(&self, other: &Vec<T>) -> bool {
		self.vec.as_slice() == other.as_slice()
	}
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SliceSnapshot<T> {
	fn eq(&self, other: &[T; N]) -> bool {
		self.vec.as_slice() == other.as_slice()
	}
}

impl<T: PartialOrd> PartialOrd for SliceSnapshot<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.vec.as_slice().partial_cmp(other.vec.as_slice())
	}
}

impl<T: Ord> Ord for SliceSnapshot<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.vec.as_slice().cmp(other.vec.as_slice())
	}
}

impl<T: Hash> Hash for SliceSnapshot<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.vec.as_slice().hash(state);
	}
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for SliceSnapshot<T> {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.vec.as_slice().serialize(serializer)
	}
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for SliceSnapshot<T> {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Vec::<T>::deserialize(deserializer).map(Self::freeze)
	}
}

#[cfg(test)]
mod tests;
