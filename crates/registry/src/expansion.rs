//! Expansion registry: late, additive-only registration of mixins onto
//! already-synthesized composed types.
//!
//! # Invariants
//!
//! - Expansion never replaces an existing dispatch-table entry.
//!   - Enforced in: [`extend_table`].
//!   - Tested by: `expansion::tests::redefinition_leaves_existing_plan`.
//! - Concurrent expansions of one type never lose additions.
//!   - Enforced in: [`extend_table`] (CAS loop).
//!   - Tested by: `expansion::tests::concurrent_expansions_all_land`.
//! - Registering the same mixin twice adds nothing the second time.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::compose::{ComposedHandle, ComposedType};
use crate::error::{MixError, Result};
use crate::plan::{Definer, ResolvedPlan};
use crate::source::SourceType;

/// Composed-type name → published composed type.
///
/// Entries are created at synthesis time and live as long as the registry.
#[derive(Debug, Default)]
pub struct ExpansionRegistry {
	types: RwLock<FxHashMap<Box<str>, ComposedHandle>>,
}

impl ExpansionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Publishes `ty` under its name.
	pub(crate) fn publish(&self, ty: ComposedType) -> Result<ComposedHandle> {
		let mut types = self.types.write();
		if types.contains_key(ty.name()) {
			return Err(MixError::DuplicateTypeName {
				name: ty.name().to_owned(),
			});
		}
		let handle = Arc::new(ty);
		types.insert(handle.name().into(), Arc::clone(&handle));
		Ok(handle)
	}

	pub fn get(&self, name: &str) -> Option<ComposedHandle> {
		self.types.read().get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.types.read().contains_key(name)
	}

	/// Published type names, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<_> = self.types.read().keys().map(|k| k.to_string()).collect();
		names.sort();
		names
	}

	pub fn len(&self) -> usize {
		self.types.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Adds every method of `mixin` that `target` does not expose yet.
	///
	/// Returns the names added, in the mixin's declaration order. Names
	/// already present are skipped silently.
	pub fn register_expander(&self, target: &str, mixin: &SourceType) -> Result<Vec<String>> {
		let ty = self.get(target).ok_or_else(|| MixError::UnknownComposedType {
			name: target.to_owned(),
		})?;
		let added = extend_table(&ty, mixin);
		tracing::info!(
			composed = %target,
			mixin = %mixin.name(),
			added = added.len(),
			"registered expander"
		);
		Ok(added)
	}
}

/// Builds an extended table and publishes it with CAS, retrying on races.
fn extend_table(ty: &ComposedType, mixin: &SourceType) -> Vec<String> {
	loop {
		let old = ty.table.load_full();

		let mut next = (*old).clone();
		let mut added = Vec::new();
		for (name, method) in mixin.methods() {
			if next.contains(name) {
				continue;
			}
			let definer = Definer {
				source: Arc::clone(mixin.name_arc()),
				method: Arc::clone(method),
			};
			next.plans
				.insert(name.to_owned(), Arc::new(ResolvedPlan::single(name, definer)));
			added.push(name.to_owned());
		}

		if added.is_empty() {
			return added;
		}

		let prev = ty.table.compare_and_swap(&old, Arc::new(next));
		if Arc::ptr_eq(&prev, &old) {
			return added;
		}
		tracing::trace!(composed = %ty.name(), "dispatch table changed during expansion; retrying");
	}
}

#[cfg(test)]
mod tests;
