use std::cmp::Ordering;

use proptest::prelude::*;
use rstest::rstest;

use super::SliceSnapshot;

#[rstest]
#[case(vec![], "[]")]
#[case(vec![0], "[0]")]
#[case(vec![1, 2, 3], "[1, 2, 3]")]
fn debug_renders_backing_vec(#[case] input: Vec<i32>, #[case] want: &str) {
	assert_eq!(format!("{:?}", SliceSnapshot::freeze(input)), want);
}

#[test]
fn freeze_adopts_without_copy() {
	let mut v = Vec::with_capacity(8);
	v.extend([1, 2, 3]);
	let ptr = v.as_ptr();
	let snap = SliceSnapshot::freeze(v);
	assert_eq!(snap.as_ptr(), ptr);
	assert_eq!(snap.len(), 3);
	assert_eq!(snap.capacity(), 8);
}

#[test]
fn default_is_empty() {
	let snap = SliceSnapshot::<u8>::default();
	assert!(snap.is_empty());
	assert_eq!(snap.len(), 0);
	assert_eq!(snap.capacity(), 0);
}

#[test]
fn clone_shares_backing_store() {
	let a = SliceSnapshot::freeze(vec![1, 2]);
	let b = a.clone();
	assert!(SliceSnapshot::ptr_eq(&a, &b));
	let c = SliceSnapshot::freeze(vec![1, 2]);
	assert!(!SliceSnapshot::ptr_eq(&a, &c));
	assert_eq!(a, c);
}

#[test]
fn index_reads_elements() {
	let snap = SliceSnapshot::freeze(vec![10, 20, 30]);
	assert_eq!(snap[0], 10);
	assert_eq!(snap[2], 30);
	assert_eq!(snap.get(3), None);
	assert_eq!(&snap[1..], &[20, 30]);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn index_out_of_bounds_panics() {
	let snap = SliceSnapshot::freeze(vec![1, 2, 3]);
	std::hint::black_box(snap[3]);
}

#[test]
fn to_vec_drops_spare_capacity() {
	let mut v = Vec::with_capacity(16);
	v.extend([3, 1, 2]);
	let snap = SliceSnapshot::freeze(v);
	let cloned = snap.to_vec();
	assert_eq!(cloned, [3, 1, 2]);
	assert_eq!(cloned.capacity(), 3);
}

#[test]
fn to_vec_with_capacity_plans_allocation() {
	let snap = SliceSnapshot::freeze(vec![1, 2, 3]);
	let grown = snap.to_vec_with_capacity(10);
	assert_eq!(grown, [1, 2, 3]);
	assert_eq!(grown.capacity(), 10);

	let floor = snap.to_vec_with_capacity(1);
	assert_eq!(floor.capacity(), 3);
}

#[test]
fn clone_then_freeze_is_independent() {
	let original = SliceSnapshot::freeze(vec![1, 2, 3]);
	let mut copy = original.to_vec();
	let refrozen = SliceSnapshot::freeze(copy.clone());
	copy[0] = 99;
	assert_eq!(refrozen, original);
	assert!(!SliceSnapshot::ptr_eq(&refrozen, &original));
	assert_eq!(original, [1, 2, 3]);
}

#[test]
fn copy_to_copies_shorter_length() {
	let snap = SliceSnapshot::freeze(vec![1, 2, 3]);
	let mut short = [0; 2];
	assert_eq!(snap.copy_to(&mut short), 2);
	assert_eq!(short, [1, 2]);

	let mut long = [0; 5];
	assert_eq!(snap.copy_to(&mut long), 3);
	assert_eq!(long, [1, 2, 3, 0, 0]);
}

#[rstest]
#[case(vec![1, 2, 3], vec![1, 2, 3], Ordering::Equal)]
#[case(vec![1, 2], vec![1, 2, 3], Ordering::Less)]
#[case(vec![1, 3], vec![1, 2, 3], Ordering::Greater)]
#[case(vec![], vec![0], Ordering::Less)]
fn ordering_is_lexicographic(#[case] a: Vec<i32>, #[case] b: Vec<i32>, #[case] want: Ordering) {
	let (a, b) = (SliceSnapshot::freeze(a), SliceSnapshot::freeze(b));
	assert_eq!(a.cmp(&b), want);
	assert_eq!(a.cmp_by(b.as_slice(), |x, y| x.cmp(y)), want);
}

#[test]
fn cmp_by_accepts_mixed_element_types() {
	let snap = SliceSnapshot::freeze(vec![1u8, 2, 3]);
	let other = ["1", "2", "4"];
	let ord = snap.cmp_by(&other, |a, b| a.to_string().as_str().cmp(b));
	assert_eq!(ord, Ordering::Less);
}

#[test]
fn eq_by_requires_equal_lengths() {
	let snap = SliceSnapshot::freeze(vec![1, 2, 3]);
	assert!(snap.eq_by(&[1i64, 2, 3], |a, b| i64::from(*a) == *b));
	assert!(!snap.eq_by(&[1i64, 2], |a, b| i64::from(*a) == *b));
	assert!(!snap.eq_by(&[1i64, 2, 4], |a, b| i64::from(*a) == *b));
}

#[test]
fn search_helpers_come_from_slice() {
	let snap = SliceSnapshot::freeze(vec![1, 3, 5, 7]);
	assert!(snap.is_sorted());
	assert_eq!(snap.binary_search(&5), Ok(2));
	assert_eq!(snap.binary_search(&4), Err(2));
	assert!(snap.contains(&7));
	assert_eq!(snap.iter().position(|&x| x > 3), Some(2));
	assert_eq!((&snap).into_iter().sum::<i32>(), 16);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
	let snap = SliceSnapshot::freeze(vec![1, 2, 3]);
	let json = serde_json::to_string(&snap).unwrap();
	assert_eq!(json, "[1,2,3]");
	let back: SliceSnapshot<i32> = serde_json::from_str(&json).unwrap();
	assert_eq!(back, snap);
}

proptest! {
	#[test]
	fn prop_ordering_matches_vec(a in prop::collection::vec(any::<i16>(), 0..16), b in prop::collection::vec(any::<i16>(), 0..16)) {
		let (sa, sb) = (SliceSnapshot::freeze(a.clone()), SliceSnapshot::freeze(b.clone()));
		prop_assert_eq!(sa.cmp(&sb), a.cmp(&b));
		prop_assert_eq!(sa == sb, a == b);
	}
}
