use std::collections::HashMap;

use rustc_hash::FxBuildHasher;

use super::MapSnapshot;

fn sample() -> HashMap<i32, i32> {
	HashMap::from([(1, 2), (2, 4), (4, 8), (8, 16)])
}

#[test]
fn lookup_reports_found_and_missing() {
	let snap = MapSnapshot::freeze(sample());
	assert_eq!(snap.get(&4), Some(&8));
	assert_eq!(snap.get(&3), None);
	assert!(snap.contains_key(&8));
	assert_eq!(snap.len(), 4);
}

#[test]
fn default_is_empty() {
	let snap = MapSnapshot::<u8, u8>::default();
	assert!(snap.is_empty());
	assert_eq!(format!("{snap:?}"), "{}");
}

#[test]
fn debug_renders_pairs() {
	let snap = MapSnapshot::freeze(HashMap::from([(1, "one")]));
	assert_eq!(format!("{snap:?}"), r#"{1: "one"}"#);
}

#[test]
fn to_map_is_independent() {
	let snap = MapSnapshot::freeze(sample());
	let mut copy = snap.to_map();
	copy.insert(3, 6);
	copy.remove(&1);
	assert_eq!(snap, sample());
	assert_eq!(copy.len(), 4);
}

#[test]
fn to_map_with_capacity_reserves() {
	let snap = MapSnapshot::freeze(sample());
	let copy = snap.to_map_with_capacity(64);
	assert!(copy.capacity() >= 64);
	assert_eq!(copy, sample());
}

#[test]
fn copy_to_overwrites_conflicts() {
	let snap = MapSnapshot::freeze(HashMap::from([(1, 10), (5, 50)]));
	let mut dst = sample();
	snap.copy_to(&mut dst);
	assert_eq!(dst.get(&1), Some(&10));
	assert_eq!(dst.get(&5), Some(&50));
	assert_eq!(dst.get(&2), Some(&4));
	assert_eq!(dst.len(), 5);
}

#[test]
fn eq_by_compares_values_with_predicate() {
	let snap = MapSnapshot::freeze(sample());
	let strings: HashMap<i32, String> = sample().into_iter().map(|(k, v)| (k, v.to_string())).collect();
	assert!(snap.eq_by(&strings, |a, b| a.to_string() == *b));

	let mut missing = strings.clone();
	missing.remove(&8);
	assert!(!snap.eq_by(&missing, |a, b| a.to_string() == *b));
}

#[test]
fn custom_hasher_is_preserved() {
	let mut map = HashMap::with_hasher(FxBuildHasher);
	map.insert("a", 1);
	let snap = MapSnapshot::freeze(map);
	let copy: HashMap<&str, i32, FxBuildHasher> = snap.to_map_with_capacity(4);
	assert_eq!(copy.get("a"), Some(&1));
}

#[test]
fn clone_shares_backing_store() {
	let a = MapSnapshot::freeze(sample());
	let b = a.clone();
	assert!(MapSnapshot::ptr_eq(&a, &b));
	assert!(!MapSnapshot::ptr_eq(&a, &MapSnapshot::freeze(sample())));
}

#[test]
fn iteration_visits_every_pair() {
	let snap: MapSnapshot<i32, i32> = sample().into_iter().collect();
	let mut keys: Vec<_> = snap.keys().copied().collect();
	keys.sort_unstable();
	assert_eq!(keys, [1, 2, 4, 8]);
	assert_eq!((&snap).into_iter().map(|(_, v)| v).sum::<i32>(), 30);
	assert!(snap.iter().any(|(k, _)| *k > 3));
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
	let snap = MapSnapshot::freeze(HashMap::from([(String::from("k"), 1)]));
	let json = serde_json::to_string(&snap).unwrap();
	assert_eq!(json, r#"{"k":1}"#);
	let back: MapSnapshot<String, i32> = serde_json::from_str(&json).unwrap();
	assert_eq!(back, snap);
}
