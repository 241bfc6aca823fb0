use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use immut_snapshot::MapSnapshot;

use crate::batch::Batch;
use crate::published::Published;
use crate::store::Store;

/// Copy-on-write hash map.
///
/// Same discipline as [`crate::CowVec`]: readers pin a [`MapSnapshot`], writers clone,
/// edit and publish. Removing an absent key, clearing an empty map, copying from an
/// empty source and `remove_if` with no matches do not clone.
pub struct CowMap<K, V, S = RandomState> {
	cell: Published<HashMap<K, V, S>>,
}

impl<K, V, S> CowMap<K, V, S> {
	/// Takes ownership of `map` as the first snapshot. Nothing is copied.
	pub fn new(map: HashMap<K, V, S>) -> Self {
		Self {
			cell: Published::new(map),
		}
	}

	/// Returns the current snapshot.
	#[inline]
	pub fn snapshot(&self) -> MapSnapshot<K, V, S> {
		MapSnapshot::from_shared(self.cell.load())
	}

	pub fn len(&self) -> usize {
		self.cell.peek().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cell.peek().is_empty()
	}
}

impl<K, V, S> CowMap<K, V, S>
where
	K: Eq + Hash + Clone,
	V: Clone,
	S: BuildHasher + Clone,
{
	/// Removes `key` and returns its value.
	///
	/// Absent keys return `None` without cloning.
	pub fn remove<Q>(&self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		let mut removed = None;
		self.cell.update("remove", |cur| {
			removed = None;
			if !cur.contains_key(key) {
				return None;
			}
			let mut next = cur.clone_with_capacity(0);
			removed = next.remove(key);
			Some(next)
		});
		removed
	}

	/// Sets `key` to `value` and returns the previous value.
	///
	/// Always clones, sizing the copy for `len + 1` entries.
	pub fn insert(&self, key: K, value: V) -> Option<V> {
		let mut previous = None;
		self.cell.update("insert", |cur| {
			let mut next = cur.clone_with_capacity(cur.len() + 1);
			previous = next.insert(key.clone(), value.clone());
			Some(next)
		});
		previous
	}

	/// Replaces the map with an empty one using the same hasher.
	///
	/// No-op when already empty. Existing entries are not cloned.
	pub fn clear(&self) -> MapSnapshot<K, V, S> {
		self.publish("clear", |cur| {
			(!cur.is_empty()).then(|| HashMap::with_hasher(cur.hasher().clone()))
		})
	}

	/// Copies every pair of `src`, overwriting keys already present.
	///
	/// No-op when `src` is empty. The copy is sized for `len + src.len()` entries.
	pub fn copy_from<S2>(&self, src: &HashMap<K, V, S2>) -> MapSnapshot<K, V, S>
	where
		S2: BuildHasher,
	{
		self.publish("copy_from", |cur| {
			if src.is_empty() {
				return None;
			}
			let mut next = cur.clone_with_capacity(cur.len() + src.len());
			next.extend(src.iter().map(|(k, v)| (k.clone(), v.clone())));
			Some(next)
		})
	}

	/// Removes every pair for which `pred` returns true.
	///
	/// No-op when no pair matches.
	pub fn remove_if<F>(&self, mut pred: F) -> MapSnapshot<K, V, S>
	where
		F: FnMut(&K, &V) -> bool,
	{
		self.publish("remove_if", |cur| {
			if !cur.iter().any(|(k, v)| pred(k, v)) {
				return None;
			}
			let mut next = cur.clone_with_capacity(0);
			next.retain(|k, v| !pred(k, v));
			Some(next)
		})
	}

	/// Runs every step of `batch` against one copy sized for `max(capacity, len)`
	/// entries and publishes the result once.
	///
	/// # Panics
	///
	/// If any step panics. Nothing is published.
	pub fn apply(
		&self,
		capacity: usize,
		batch: &Batch<'_, HashMap<K, V, S>>,
	) -> MapSnapshot<K, V, S> {
		MapSnapshot::from_shared(self.cell.apply(capacity, batch))
	}

	fn publish<F>(&self, op: &'static str, plan: F) -> MapSnapshot<K, V, S>
	where
		F: FnMut(&HashMap<K, V, S>) -> Option<HashMap<K, V, S>>,
	{
		MapSnapshot::from_shared(self.cell.update(op, plan))
	}
}

impl<K, V, S> Clone for CowMap<K, V, S> {
	fn clone(&self) -> Self {
		Self {
			cell: self.cell.clone(),
		}
	}
}

impl<K, V, S: Default> Default for CowMap<K, V, S> {
	fn default() -> Self {
		Self::new(HashMap::default())
	}
}

impl<K, V, S> From<HashMap<K, V, S>> for CowMap<K, V, S> {
	fn from(map: HashMap<K, V, S>) -> Self {
		Self::new(map)
	}
}

impl<K, V, S> From<MapSnapshot<K, V, S>> for CowMap<K, V, S> {
	fn from(snap: MapSnapshot<K, V, S>) -> Self {
		Self {
			cell: Published::from_shared(snap.shared().clone()),
		}
	}
}

impl<K, V, S> FromIterator<(K, V)> for CowMap<K, V, S>
where
	K: Eq + Hash,
	S: BuildHasher + Default,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for CowMap<K, V, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.cell.peek().iter()).finish()
	}
}
