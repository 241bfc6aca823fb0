//! Atomic publication cell shared by both container flavors.

use std::convert::Infallible;
use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};

use crate::batch::Batch;
use crate::store::Store;

/// Holds the current backing store and replaces it wholesale on every write.
///
/// Published stores are never mutated again. Readers `load` an `Arc` and keep it for as
/// long as they like; writers build a private replacement and swap it in with CAS.
pub(crate) struct Published<S> {
	current: ArcSwap<S>,
}

impl<S> Published<S> {
	pub(crate) fn new(store: S) -> Self {
		Self {
			current: ArcSwap::from_pointee(store),
		}
	}

	pub(crate) fn from_shared(store: Arc<S>) -> Self {
		Self {
			current: ArcSwap::new(store),
		}
	}

	/// Pins the current store.
	#[inline]
	pub(crate) fn load(&self) -> Arc<S> {
		self.current.load_full()
	}

	/// Short-lived access for O(1) queries without touching the refcount.
	#[inline]
	pub(crate) fn peek(&self) -> Guard<Arc<S>> {
		self.current.load()
	}
}

impl<S: Store> Published<S> {
	/// Runs an update plan against the current store.
	///
	/// `plan` inspects the current store read-only and returns `None` when the write
	/// would be a no-op, in which case nothing is cloned or published and the current
	/// `Arc` is returned unchanged. Otherwise the returned store is published. If
	/// another writer published first, the plan is re-run against the newer store.
	pub(crate) fn update<F>(&self, op: &'static str, mut plan: F) -> Arc<S>
	where
		F: FnMut(&S) -> Option<S>,
	{
		match self.try_update(op, |cur| Ok::<_, Infallible>(plan(cur))) {
			Ok(store) => store,
			Err(never) => match never {},
		}
	}

	/// Fallible form of [`Published::update`]. An `Err` from `plan` publishes nothing.
	pub(crate) fn try_update<F, E>(&self, op: &'static str, mut plan: F) -> Result<Arc<S>, E>
	where
		F: FnMut(&S) -> Result<Option<S>, E>,
	{
		loop {
			let old = self.current.load_full();

			let Some(next) = plan(&old)? else {
				tracing::trace!(target: "immut_cow", op, len = old.len(), "cow.clone_avoided");
				return Ok(old);
			};

			let len = next.len();
			let next = Arc::new(next);
			let prev = self.current.compare_and_swap(&old, Arc::clone(&next));

			if Arc::ptr_eq(&prev, &old) {
				tracing::trace!(target: "immut_cow", op, len, "cow.published");
				return Ok(next);
			}
			tracing::trace!(target: "immut_cow", op, "cow.publish_retry");
		}
	}

	/// Clones once with capacity `max(capacity, len)`, runs every step of `batch` in
	/// order on the private copy, then publishes the result.
	pub(crate) fn apply(&self, capacity: usize, batch: &Batch<'_, S>) -> Arc<S> {
		self.update("apply", |cur| {
			let mut next = cur.clone_with_capacity(capacity);
			batch.run(&mut next);
			Some(next)
		})
	}
}

impl<S> Clone for Published<S> {
	fn clone(&self) -> Self {
		Self::from_shared(self.load())
	}
}
