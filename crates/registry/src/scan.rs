//! Method registry: which sources define which method names.
//!
//! # Invariants
//!
//! - Definers of a name appear in canonical order `[base, mixin₁, …, mixinₙ]`.
//! - Names appear in first-appearance order (base names first, then each
//!   mixin's previously unseen names). The resolver processes names in this
//!   order, which fixes the winner of exposed-name collisions.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::plan::Definer;
use crate::source::SourceType;

/// Every method name across a composition's sources, with its definers.
#[derive(Debug, Clone, Default)]
pub struct MethodIndex {
	sources: Vec<Arc<str>>,
	by_name: IndexMap<String, Vec<Definer>>,
}

impl MethodIndex {
	/// Source names in canonical order.
	pub fn sources(&self) -> &[Arc<str>] {
		&self.sources
	}

	/// Definers of `name` in canonical order; empty if nothing defines it.
	pub fn definers(&self, name: &str) -> &[Definer] {
		self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Method names with their definers, in first-appearance order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[Definer])> {
		self.by_name.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}

/// Scans `sources` (base first, then mixins in list order).
pub fn scan(sources: &[Arc<SourceType>]) -> MethodIndex {
	let mut index = MethodIndex {
		sources: Vec::with_capacity(sources.len()),
		by_name: IndexMap::new(),
	};

	for source in sources {
		index.sources.push(Arc::clone(source.name_arc()));
		for (name, method) in source.methods() {
			index
				.by_name
				.entry(name.to_owned())
				.or_default()
				.push(Definer {
					source: Arc::clone(source.name_arc()),
					method: Arc::clone(method),
				});
		}
	}

	index
}
