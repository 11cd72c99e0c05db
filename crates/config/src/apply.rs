//! Running a manifest against a [`Mixer`].
//!
//! Compositions run first, in file order, then expansions. Application stops
//! at the first rejected entry; entries applied before it stay published.

use classmix_registry::{CombinatorEntry, CombinatorMap, Composition, Mixer};

use crate::error::{ConfigError, Result};
use crate::manifest::{CombinatorSpec, CompositionSpec, EntrySpec, Manifest};

/// What a successful [`Manifest::apply`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
	/// Composed type names published, in order.
	pub created: Vec<String>,
	pub expanded: Vec<Expanded>,
}

/// Outcome of one `[[expand]]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
	pub target: String,
	pub mixin: String,
	/// Method names the expansion added; empty when the target already
	/// exposed all of them.
	pub added: Vec<String>,
}

impl Manifest {
	/// Publishes every composition and registers every expansion on `mixer`.
	///
	/// Source types must already be defined on `mixer`.
	pub fn apply(&self, mixer: &Mixer) -> Result<ApplyReport> {
		let mut report = ApplyReport::default();

		for spec in &self.compose {
			let compose_err = |error| ConfigError::Compose {
				name: spec.name.clone(),
				error,
			};
			let request = composition(spec, mixer).map_err(compose_err)?;
			let ty = mixer.compose(request).map_err(compose_err)?;
			report.created.push(ty.name().to_owned());
		}

		for spec in &self.expand {
			let added = mixer
				.register_expander(&spec.target, &spec.mixin)
				.map_err(|error| ConfigError::Expand {
					target: spec.target.clone(),
					mixin: spec.mixin.clone(),
					error,
				})?;
			report.expanded.push(Expanded {
				target: spec.target.clone(),
				mixin: spec.mixin.clone(),
				added,
			});
		}

		tracing::info!(
			created = report.created.len(),
			expanded = report.expanded.len(),
			"applied manifest"
		);
		Ok(report)
	}
}

fn composition(spec: &CompositionSpec, mixer: &Mixer) -> classmix_registry::Result<Composition> {
	let combinators = spec
		.combinators
		.iter()
		.map(|(method, entry)| entry.to_entry(mixer).map(|entry| (method.clone(), entry)))
		.collect::<classmix_registry::Result<CombinatorMap>>()?;

	Ok(Composition::new(&spec.name, &spec.base)
		.mixins(&spec.mixins)
		.combinators(combinators)
		.before(spec.before.clone())
		.after(spec.after.clone()))
}

impl CombinatorSpec {
	/// Resolves merge names through `mixer`'s combinator catalog.
	pub fn to_entry(&self, mixer: &Mixer) -> classmix_registry::Result<CombinatorEntry> {
		match self {
			Self::Merge(name) => Ok(CombinatorEntry::simple(mixer.combinator(name)?)),
			Self::Entry(EntrySpec {
				merge,
				order,
				expose_as,
			}) => Ok(CombinatorEntry {
				merge: merge.as_deref().map(|name| mixer.combinator(name)).transpose()?,
				order: order.clone(),
				expose_as: expose_as.clone(),
			}),
		}
	}
}
