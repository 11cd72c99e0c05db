//! The caller-facing engine object.
//!
//! A [`Mixer`] owns the source catalog, the combinator catalog, and the
//! [`ExpansionRegistry`]. Construct one per program (or per test) and pass
//! it by reference; there is no ambient global state.
//!
//! Source and composed types share one namespace. Name checks happen while
//! holding the source catalog's write lock, so two compositions can never
//! both publish one name.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::advice::AdviceSpec;
use crate::combinator::{Combinator, builtins};
use crate::compose::{self, ComposedHandle, Composition};
use crate::config::MixerConfig;
use crate::error::{MixError, Result};
use crate::expansion::ExpansionRegistry;
use crate::resolve::CombinatorMap;
use crate::source::SourceType;

#[derive(Debug)]
pub struct Mixer {
	config: MixerConfig,
	sources: RwLock<FxHashMap<Box<str>, Arc<SourceType>>>,
	combinators: RwLock<FxHashMap<Box<str>, Combinator>>,
	expansions: ExpansionRegistry,
}

impl Default for Mixer {
	fn default() -> Self {
		Self::new()
	}
}

impl Mixer {
	/// A mixer with default naming conventions and the stock combinators.
	pub fn new() -> Self {
		Self::with_config(MixerConfig::default())
	}

	pub fn with_config(config: MixerConfig) -> Self {
		let combinators = builtins::all()
			.into_iter()
			.map(|c| (Box::from(c.label()), c))
			.collect();
		Self {
			config,
			sources: RwLock::new(FxHashMap::default()),
			combinators: RwLock::new(combinators),
			expansions: ExpansionRegistry::new(),
		}
	}

	pub fn config(&self) -> &MixerConfig {
		&self.config
	}

	pub fn expansions(&self) -> &ExpansionRegistry {
		&self.expansions
	}

	/// Adds a source type to the catalog under its own name.
	pub fn define_source(&self, source: SourceType) -> Result<Arc<SourceType>> {
		let mut sources = self.sources.write();
		if sources.contains_key(source.name()) || self.expansions.contains(source.name()) {
			return Err(MixError::DuplicateTypeName {
				name: source.name().to_owned(),
			});
		}
		let source = Arc::new(source);
		sources.insert(source.name().into(), Arc::clone(&source));
		tracing::debug!(source = %source.name(), methods = source.method_names().count(), "defined source type");
		Ok(source)
	}

	fn is_taken(&self, name: &str) -> bool {
		self.sources.read().contains_key(name) || self.expansions.contains(name)
	}

	/// Looks up a source type, falling back to a view of a composed type.
	pub fn source(&self, name: &str) -> Option<Arc<SourceType>> {
		if let Some(source) = self.sources.read().get(name) {
			return Some(Arc::clone(source));
		}
		self.expansions.get(name).map(|ty| Arc::new(ty.as_source()))
	}

	/// Registers (or replaces) a named merge function.
	pub fn register_combinator(&self, name: impl Into<Box<str>>, combinator: Combinator) {
		let name = name.into();
		tracing::debug!(combinator = %name, "registered combinator");
		self.combinators.write().insert(name, combinator);
	}

	pub fn combinator(&self, name: &str) -> Result<Combinator> {
		self.combinators
			.read()
			.get(name)
			.cloned()
			.ok_or_else(|| MixError::UnknownCombinator { name: name.to_owned() })
	}

	pub fn composed(&self, name: &str) -> Option<ComposedHandle> {
		self.expansions.get(name)
	}

	/// Synthesizes and publishes `request`. Nothing is published on error.
	pub fn compose(&self, request: Composition) -> Result<ComposedHandle> {
		// Checked again under the write lock before publishing.
		if self.is_taken(request.name()) {
			return Err(MixError::DuplicateTypeName {
				name: request.name().to_owned(),
			});
		}

		let resolved = request
			.source_names()
			.map(|name| {
				self.source(name).ok_or_else(|| MixError::UnknownSourceType {
					name: name.to_owned(),
				})
			})
			.collect::<Result<Vec<_>>>()?;

		let ty = compose::synthesize(&request, &resolved, &self.config)?;

		let sources = self.sources.write();
		if sources.contains_key(request.name()) {
			return Err(MixError::DuplicateTypeName {
				name: request.name().to_owned(),
			});
		}
		let handle = self.expansions.publish(ty)?;
		drop(sources);

		tracing::info!(
			composed = %handle.name(),
			base = %handle.base(),
			mixins = handle.mixins().count(),
			methods = handle.table().len(),
			collisions = handle.collisions().len(),
			"published composed type"
		);
		Ok(handle)
	}

	/// Positional form of [`Mixer::compose`].
	pub fn create_composed_type(
		&self,
		name: &str,
		base: &str,
		mixins: &[&str],
		combinators: CombinatorMap,
		before: impl Into<AdviceSpec>,
		after: impl Into<AdviceSpec>,
	) -> Result<ComposedHandle> {
		self.compose(
			Composition::new(name, base)
				.mixins(mixins.iter().copied())
				.combinators(combinators)
				.before(before)
				.after(after),
		)
	}

	/// Adds the methods of source `mixin` that composed type `target` lacks.
	///
	/// Returns the names added.
	pub fn register_expander(&self, target: &str, mixin: &str) -> Result<Vec<String>> {
		if !self.expansions.contains(target) {
			return Err(MixError::UnknownComposedType {
				name: target.to_owned(),
			});
		}
		let mixin = self.source(mixin).ok_or_else(|| MixError::UnknownSourceType {
			name: mixin.to_owned(),
		})?;
		self.expansions.register_expander(target, &mixin)
	}
}
