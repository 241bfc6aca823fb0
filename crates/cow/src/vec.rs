use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use immut_snapshot::SliceSnapshot;

use crate::batch::Batch;
use crate::error::CapacityError;
use crate::published::Published;
use crate::store::Store;

/// Copy-on-write vector.
///
/// Readers call [`CowVec::snapshot`] and keep the returned view for as long as they need
/// it. Every write builds a private copy, mutates it and publishes it; a snapshot that
/// has been handed out is never modified.
///
/// Writes that would not change anything (growing into existing capacity, clipping a
/// clipped vector, compacting or sorting data that already is) return the current
/// snapshot without cloning.
///
/// `Clone` produces an independent container that starts out sharing the current
/// snapshot.
pub struct CowVec<T> {
	cell: Published<Vec<T>>,
}

impl<T> CowVec<T> {
	/// Takes ownership of `vec` as the first snapshot. Nothing is copied.
	pub fn new(vec: Vec<T>) -> Self {
		Self {
			cell: Published::new(vec),
		}
	}

	/// Returns the current snapshot.
	#[inline]
	pub fn snapshot(&self) -> SliceSnapshot<T> {
		SliceSnapshot::from_shared(self.cell.load())
	}

	pub fn len(&self) -> usize {
		self.cell.peek().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cell.peek().is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.cell.peek().capacity()
	}
}

impl<T: Clone> CowVec<T> {
	/// Removes the elements in `range` and returns the new snapshot.
	///
	/// Always clones.
	///
	/// # Panics
	///
	/// If `range.start > range.end` or `range.end > len`. Nothing is published.
	pub fn delete(&self, range: Range<usize>) -> SliceSnapshot<T> {
		self.publish("delete", |cur| {
			check_range(&range, cur.len());
			let mut next = cur.clone_with_capacity(0);
			next.drain(range.clone());
			Some(next)
		})
	}

	/// Inserts `values` so that the element at `index` is the first inserted value.
	///
	/// When the result exceeds the current capacity, the copy is allocated with exactly
	/// `len + values.len()` capacity.
	///
	/// # Panics
	///
	/// If `index > len`. Nothing is published.
	pub fn insert<I>(&self, index: usize, values: I) -> SliceSnapshot<T>
	where
		I: IntoIterator<Item = T>,
	{
		let values: Vec<T> = values.into_iter().collect();
		self.publish("insert", |cur| {
			let len = cur.len();
			if index > len {
				panic!("insertion index (is {index}) should be <= len (is {len})");
			}
			let mut next = Vec::with_capacity(cur.capacity().max(len + values.len()));
			next.extend_from_slice(&cur[..index]);
			next.extend_from_slice(&values);
			next.extend_from_slice(&cur[index..]);
			Some(next)
		})
	}

	/// Ensures room for `additional` more elements.
	///
	/// No-op when `capacity >= len + additional`; otherwise the copy is allocated with
	/// exactly that capacity.
	///
	/// # Panics
	///
	/// If `len + additional` overflows `usize`.
	pub fn grow(&self, additional: usize) -> SliceSnapshot<T> {
		self.publish("grow", |cur| {
			let Some(target) = cur.len().checked_add(additional) else {
				panic!("capacity overflow");
			};
			(cur.capacity() < target).then(|| cur.clone_with_capacity(target))
		})
	}

	/// Like [`CowVec::grow`], but reports overflow and allocation failure.
	pub fn try_grow(&self, additional: usize) -> Result<SliceSnapshot<T>, CapacityError> {
		self.cell
			.try_update("try_grow", |cur| {
				let len = cur.len();
				let target = len
					.checked_add(additional)
					.ok_or(CapacityError::Overflow { len, additional })?;
				if cur.capacity() >= target {
					return Ok(None);
				}
				let mut next = Vec::new();
				next.try_reserve_exact(target)?;
				next.extend_from_slice(cur);
				Ok(Some(next))
			})
			.map(SliceSnapshot::from_shared)
	}

	/// Drops spare capacity. No-op when `capacity == len`.
	pub fn clip(&self) -> SliceSnapshot<T> {
		self.publish("clip", |cur| {
			(cur.capacity() != cur.len()).then(|| cur.clone_with_capacity(0))
		})
	}

	/// Collapses runs of equal elements to their first element.
	///
	/// No-op when no two neighbours are equal.
	pub fn compact(&self) -> SliceSnapshot<T>
	where
		T: PartialEq,
	{
		self.publish("compact", |cur| {
			if is_compact_by(cur, |a, b| a == b) {
				return None;
			}
			let mut next = cur.clone_with_capacity(0);
			next.dedup();
			Some(next)
		})
	}

	/// Collapses runs whose neighbours satisfy `eq(prev, next)`.
	pub fn compact_by<F>(&self, mut eq: F) -> SliceSnapshot<T>
	where
		F: FnMut(&T, &T) -> bool,
	{
		self.publish("compact_by", |cur| {
			if is_compact_by(cur, &mut eq) {
				return None;
			}
			let mut next = cur.clone_with_capacity(0);
			next.dedup_by(|b, a| eq(&*a, &*b));
			Some(next)
		})
	}

	/// Sorts ascending. Not stable. No-op when already sorted.
	pub fn sort(&self) -> SliceSnapshot<T>
	where
		T: Ord,
	{
		self.publish("sort", |cur| {
			if cur.is_sorted() {
				return None;
			}
			let mut next = cur.clone_with_capacity(0);
			next.sort_unstable();
			Some(next)
		})
	}

	/// Sorts by `cmp`. Not stable. No-op when already sorted under `cmp`.
	pub fn sort_by<F>(&self, mut cmp: F) -> SliceSnapshot<T>
	where
		F: FnMut(&T, &T) -> Ordering,
	{
		self.publish("sort_by", |cur| {
			if cur.is_sorted_by(|a, b| cmp(a, b) != Ordering::Greater) {
				return None;
			}
			let mut next = cur.clone_with_capacity(0);
			next.sort_unstable_by(&mut cmp);
			Some(next)
		})
	}

	/// Sorts by `cmp`, keeping equal elements in their original order.
	/// No-op when already sorted under `cmp`.
	pub fn sort_stable_by<F>(&self, mut cmp: F) -> SliceSnapshot<T>
	where
		F: FnMut(&T, &T) -> Ordering,
	{
		self.publish("sort_stable_by", |cur| {
			if cur.is_sorted_by(|a, b| cmp(a, b) != Ordering::Greater) {
				return None;
			}
			let mut next = cur.clone_with_capacity(0);
			next.sort_by(&mut cmp);
			Some(next)
		})
	}

	/// Runs every step of `batch` against one copy allocated with capacity
	/// `max(capacity, len)` and publishes the result once.
	///
	/// # Panics
	///
	/// If any step panics. Nothing is published.
	pub fn apply(&self, capacity: usize, batch: &Batch<'_, Vec<T>>) -> SliceSnapshot<T> {
		SliceSnapshot::from_shared(self.cell.apply(capacity, batch))
	}

	fn publish<F>(&self, op: &'static str, plan: F) -> SliceSnapshot<T>
	where
		F: FnMut(&Vec<T>) -> Option<Vec<T>>,
	{
		SliceSnapshot::from_shared(self.cell.update(op, plan))
	}
}

fn check_range(range: &Range<usize>, len: usize) {
	if range.start > range.end {
		panic!("slice index starts at {} but ends at {}", range.start, range.end);
	}
	if range.end > len {
		panic!("range end index {} out of range for slice of length {len}", range.end);
	}
}

fn is_compact_by<T>(s: &[T], mut eq: impl FnMut(&T, &T) -> bool) -> bool {
	!s.windows(2).any(|w| eq(&w[0], &w[1]))
}

impl<T> Clone for CowVec<T> {
	fn clone(&self) -> Self {
		Self {
			cell: self.cell.clone(),
		}
	}
}

impl<T> Default for CowVec<T> {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

impl<T> From<Vec<T>> for CowVec<T> {
	fn from(vec: Vec<T>) -> Self {
		Self::new(vec)
	}
}

impl<T> From<SliceSnapshot<T>> for CowVec<T> {
	fn from(snap: SliceSnapshot<T>) -> Self {
		Self {
			cell: Published::from_shared(snap.shared().clone()),
		}
	}
}

impl<T> FromIterator<T> for CowVec<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl<T: fmt::Debug> fmt::Debug for CowVec<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&**self.cell.peek(), f)
	}
}
