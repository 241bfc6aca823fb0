use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, cheaply clonable view over a `HashMap<K, V, S>`.
///
/// Dereferences to the map, so lookups report a miss as `None` and never panic.
pub struct MapSnapshot<K, V, S = RandomState> {
	map: Arc<HashMap<K, V, S>>,
}

impl<K, V, S> MapSnapshot<K, V, S> {
	/// Adopts `map` without copying it.
	pub fn freeze(map: HashMap<K, V, S>) -> Self {
		Self { map: Arc::new(map) }
	}

	/// Wraps an already shared backing store.
	pub fn from_shared(map: Arc<HashMap<K, V, S>>) -> Self {
		Self { map }
	}

	/// Returns the shared backing store.
	pub fn shared(&self) -> &Arc<HashMap<K, V, S>> {
		&self.map
	}

	/// Returns the underlying map.
	#[inline]
	pub fn as_map(&self) -> &HashMap<K, V, S> {
		&self.map
	}

	/// Reports whether both snapshots view the same backing store.
	pub fn ptr_eq(a: &Self, b: &Self) -> bool {
		Arc::ptr_eq(&a.map, &b.map)
	}
}

impl<K, V, S> MapSnapshot<K, V, S>
where
	K: Eq + Hash + Clone,
	V: Clone,
	S: BuildHasher + Clone,
{
	/// Returns an independent mutable copy of the map.
	pub fn to_map(&self) -> HashMap<K, V, S> {
		(*self.map).clone()
	}

	/// Clones the pairs into a fresh map pre-sized for `max(capacity, len)` entries.
	pub fn to_map_with_capacity(&self, capacity: usize) -> HashMap<K, V, S> {
		let mut out =
			HashMap::with_capacity_and_hasher(capacity.max(self.map.len()), self.map.hasher().clone());
		out.extend(self.map.iter().map(|(k, v)| (k.clone(), v.clone())));
		out
	}

	/// Copies every pair into `dst`. Values already present in `dst` are overwritten.
	pub fn copy_to<S2: BuildHasher>(&self, dst: &mut HashMap<K, V, S2>) {
		dst.extend(self.map.iter().map(|(k, v)| (k.clone(), v.clone())));
	}
}

impl<K, V, S> MapSnapshot<K, V, S>
where
	K: Eq + Hash,
	S: BuildHasher,
{
	/// Reports whether both maps hold the same keys with values equal under `eq`.
	pub fn eq_by<V2, S2, F>(&self, other: &HashMap<K, V2, S2>, mut eq: F) -> bool
	where
		S2: BuildHasher,
		F: FnMut(&V, &V2) -> bool,
	{
		self.map.len() == other.len()
			&& self
				.map
				.iter()
				.all(|(k, v)| other.get(k).is_some_and(|v2| eq(v, v2)))
	}
}

impl<K, V, S> Clone for MapSnapshot<K, V, S> {
	fn clone(&self) -> Self {
		Self {
			map: Arc::clone(&self.map),
		}
	}
}

impl<K, V, S: Default> Default for MapSnapshot<K, V, S> {
	fn default() -> Self {
		Self::freeze(HashMap::default())
	}
}

impl<K, V, S> Deref for MapSnapshot<K, V, S> {
	type Target = HashMap<K, V, S>;

	#[inline]
	fn deref(&self) -> &HashMap<K, V, S> {
		&self.map
	}
}

impl<K, V, S> From<HashMap<K, V, S>> for MapSnapshot<K, V, S> {
	fn from(map: HashMap<K, V, S>) -> Self {
		Self::freeze(map)
	}
}

impl<K, V, S> FromIterator<(K, V)> for MapSnapshot<K, V, S>
where
	K: Eq + Hash,
	S: BuildHasher + Default,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::freeze(iter.into_iter().collect())
	}
}

impl<'a, K, V, S> IntoIterator for &'a MapSnapshot<K, V, S> {
	type Item = (&'a K, &'a V);
	type IntoIter = std::collections::hash_map::Iter<'a, K, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.map.iter()
	}
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for MapSnapshot<K, V, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.map.iter()).finish()
	}
}

impl<K, V, S> PartialEq for MapSnapshot<K, V, S>
where
	K: Eq + Hash,
	V: PartialEq,
	S: BuildHasher,
{
	fn eq(&self, other: &Self) -> bool {
		*self.map == *other.map
	}
}

impl<K, V, S> Eq for MapSnapshot<K, V, S>
where
	K: Eq + Hash,
	V: Eq,
	S: BuildHasher,
{
}

impl<K, V, S> PartialEq<HashMap<K, V, S>> for MapSnapshot<K, V, S>
where
	K: Eq + Hash,
	V: PartialEq,
	S: BuildHasher,
{
	fn eq(&self, other: &HashMap<K, V, S>) -> bool {
		*self.map == *other
	}
}

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for MapSnapshot<K, V, S>
where
	K: serde::Serialize,
	V: serde::Serialize,
{
	fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
		serializer.collect_map(self.map.iter())
	}
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for MapSnapshot<K, V, S>
where
	K: serde::Deserialize<'de> + Eq + Hash,
	V: serde::Deserialize<'de>,
	S: BuildHasher + Default,
{
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		HashMap::<K, V, S>::deserialize(deserializer).map(Self::freeze)
	}
}

#[cfg(test)]
mod tests;
