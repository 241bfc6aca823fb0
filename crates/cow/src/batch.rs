//! Batched writes: many edits, one clone, one publish.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops::Range;

/// A single mutation step applied to a private working copy.
///
/// Steps take `&self` because a batch may be replayed when another writer publishes
/// first.
pub trait Doer<S> {
	fn apply(&self, store: &mut S);
}

impl<S, F> Doer<S> for F
where
	F: Fn(&mut S),
{
	#[inline]
	fn apply(&self, store: &mut S) {
		self(store)
	}
}

/// Ordered list of steps for [`crate::CowVec::apply`] or [`crate::CowMap::apply`].
///
/// Steps run strictly in the order they were added. Nothing is reordered, merged or
/// deduplicated.
pub struct Batch<'a, S> {
	steps: Vec<Box<dyn Doer<S> + 'a>>,
}

/// Batch over a vector.
pub type VecBatch<'a, T> = Batch<'a, Vec<T>>;
/// Batch over a hash map.
pub type MapBatch<'a, K, V, S = RandomState> = Batch<'a, HashMap<K, V, S>>;

impl<'a, S> Batch<'a, S> {
	pub fn new() -> Self {
		Self { steps: Vec::new() }
	}

	/// Appends any [`Doer`].
	pub fn step(mut self, step: impl Doer<S> + 'a) -> Self {
		self.steps.push(Box::new(step));
		self
	}

	/// Appends a closure step.
	pub fn then<F>(self, f: F) -> Self
	where
		F: Fn(&mut S) + 'a,
	{
		self.step(f)
	}

	pub fn len(&self) -> usize {
		self.steps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	pub(crate) fn run(&self, store: &mut S) {
		for step in &self.steps {
			step.apply(store);
		}
	}
}

impl<S> Default for Batch<'_, S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S> fmt::Debug for Batch<'_, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Batch").field("steps", &self.steps.len()).finish()
	}
}

impl<'a, T: Clone + 'a> Batch<'a, Vec<T>> {
	/// Drops spare capacity.
	pub fn clip(self) -> Self {
		self.then(|v: &mut Vec<T>| v.shrink_to_fit())
	}

	/// Collapses runs of equal elements.
	pub fn compact(self) -> Self
	where
		T: PartialEq,
	{
		self.then(|v: &mut Vec<T>| v.dedup())
	}

	/// Collapses runs whose neighbours satisfy `eq(prev, next)`.
	pub fn compact_by<F>(self, eq: F) -> Self
	where
		F: Fn(&T, &T) -> bool + 'a,
	{
		self.then(move |v: &mut Vec<T>| v.dedup_by(|b, a| eq(&*a, &*b)))
	}

	/// Removes `range`. Panics when the step runs if the range is invalid.
	pub fn delete(self, range: Range<usize>) -> Self {
		self.then(move |v: &mut Vec<T>| {
			v.drain(range.clone());
		})
	}

	/// Reserves room for `additional` more elements.
	pub fn grow(self, additional: usize) -> Self {
		self.then(move |v: &mut Vec<T>| v.reserve_exact(additional))
	}

	/// Inserts `values` at `index`. Panics when the step runs if `index > len`.
	pub fn insert<I>(self, index: usize, values: I) -> Self
	where
		I: IntoIterator<Item = T>,
	{
		let values: Vec<T> = values.into_iter().collect();
		self.then(move |v: &mut Vec<T>| {
			v.splice(index..index, values.iter().cloned());
		})
	}

	/// Sorts ascending; not stable.
	pub fn sort(self) -> Self
	where
		T: Ord,
	{
		self.then(|v: &mut Vec<T>| v.sort_unstable())
	}

	/// Sorts by `cmp`; not stable.
	pub fn sort_by<F>(self, cmp: F) -> Self
	where
		F: Fn(&T, &T) -> Ordering + 'a,
	{
		self.then(move |v: &mut Vec<T>| v.sort_unstable_by(|a, b| cmp(a, b)))
	}

	/// Sorts by `cmp`, keeping equal elements in their original order.
	pub fn sort_stable_by<F>(self, cmp: F) -> Self
	where
		F: Fn(&T, &T) -> Ordering + 'a,
	{
		self.then(move |v: &mut Vec<T>| v.sort_by(|a, b| cmp(a, b)))
	}
}

impl<'a, K, V, S> Batch<'a, HashMap<K, V, S>>
where
	K: Eq + Hash + Clone + 'a,
	V: Clone + 'a,
	S: BuildHasher + 'a,
{
	/// Sets `key` to `value`.
	pub fn insert(self, key: K, value: V) -> Self {
		self.then(move |m: &mut HashMap<K, V, S>| {
			m.insert(key.clone(), value.clone());
		})
	}

	/// Removes `key` if present.
	pub fn remove(self, key: K) -> Self {
		self.then(move |m: &mut HashMap<K, V, S>| {
			m.remove(&key);
		})
	}

	/// Removes every pair for which `pred` returns true.
	pub fn remove_if<F>(self, pred: F) -> Self
	where
		F: Fn(&K, &V) -> bool + 'a,
	{
		self.then(move |m: &mut HashMap<K, V, S>| m.retain(|k, v| !pred(k, v)))
	}

	/// Copies every pair of `src`, overwriting existing keys.
	pub fn copy_from<S2>(self, src: &'a HashMap<K, V, S2>) -> Self
	where
		S2: BuildHasher,
	{
		self.then(move |m: &mut HashMap<K, V, S>| {
			m.extend(src.iter().map(|(k, v)| (k.clone(), v.clone())));
		})
	}

	/// Removes every pair.
	pub fn clear(self) -> Self {
		self.then(|m: &mut HashMap<K, V, S>| m.clear())
	}
}
