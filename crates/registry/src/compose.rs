//! Type synthesizer: assembles woven plans into a published composed type.
//!
//! # Role
//!
//! [`synthesize`] runs the pipeline `scan → resolve → weave` and materializes
//! the dispatch table. Publication under a name is the [`crate::Mixer`]'s job.
//!
//! # Concurrency
//!
//! - **Reads:** wait-free; each invocation loads the current table snapshot.
//! - **Writes:** only expansion mutates the table, via a CAS retry loop (see
//!   [`crate::expansion`]). Entries are added, never replaced.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use classmix_primitives::Value;
use indexmap::IndexMap;

use crate::advice::{self, AdviceSpec};
use crate::combinator::CombinatorEntry;
use crate::config::MixerConfig;
use crate::error::{MixError, Result};
use crate::instance::Instance;
use crate::plan::ResolvedPlan;
use crate::resolve::{self, Collision, CombinatorMap};
use crate::scan;
use crate::source::SourceType;

/// Shared handle to a published composed type.
pub type ComposedHandle = Arc<ComposedType>;

/// Exposed method name → resolved plan.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
	pub(crate) plans: IndexMap<String, Arc<ResolvedPlan>>,
}

impl DispatchTable {
	#[inline]
	pub fn get(&self, name: &str) -> Option<&Arc<ResolvedPlan>> {
		self.plans.get(name)
	}

	#[inline]
	pub fn contains(&self, name: &str) -> bool {
		self.plans.contains_key(name)
	}

	/// Exposed names in publication order (expansion additions last).
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.plans.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.plans.len()
	}

	pub fn is_empty(&self) -> bool {
		self.plans.is_empty()
	}
}

/// Everything needed to request a composed type.
#[derive(Debug, Clone)]
pub struct Composition {
	pub(crate) name: String,
	pub(crate) base: String,
	pub(crate) mixins: Vec<String>,
	pub(crate) combinators: CombinatorMap,
	pub(crate) before: AdviceSpec,
	pub(crate) after: AdviceSpec,
}

impl Composition {
	/// Requests type `name` built on `base`, with no mixins, combinators, or advice.
	pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			base: base.into(),
			mixins: Vec::new(),
			combinators: CombinatorMap::default(),
			before: AdviceSpec::Disabled,
			after: AdviceSpec::Disabled,
		}
	}

	/// Appends one mixin to the ordered mixin list.
	pub fn mixin(mut self, name: impl Into<String>) -> Self {
		self.mixins.push(name.into());
		self
	}

	pub fn mixins<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.mixins.extend(names.into_iter().map(Into::into));
		self
	}

	/// Sets the combinator entry for lookup name `method`.
	pub fn combinator(mut self, method: impl Into<String>, entry: impl Into<CombinatorEntry>) -> Self {
		self.combinators.insert(method.into(), entry.into());
		self
	}

	pub fn combinators(mut self, map: CombinatorMap) -> Self {
		self.combinators.extend(map);
		self
	}

	pub fn before(mut self, spec: impl Into<AdviceSpec>) -> Self {
		self.before = spec.into();
		self
	}

	pub fn after(mut self, spec: impl Into<AdviceSpec>) -> Self {
		self.after = spec.into();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Base followed by mixins, in canonical order.
	pub(crate) fn source_names(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.base.as_str()).chain(self.mixins.iter().map(String::as_str))
	}
}

/// The synthesized result of merging a base and its mixins.
pub struct ComposedType {
	name: Box<str>,
	base: Box<str>,
	mixins: Vec<Box<str>>,
	before: AdviceSpec,
	after: AdviceSpec,
	constructor: Box<str>,
	fields: IndexMap<String, Value>,
	collisions: Vec<Collision>,
	pub(crate) table: ArcSwap<DispatchTable>,
}

/// Builds the composed type for `request` from its resolved `sources`
/// (base first, then mixins in list order).
pub fn synthesize(
	request: &Composition,
	sources: &[Arc<SourceType>],
	config: &MixerConfig,
) -> Result<ComposedType> {
	let index = scan::scan(sources);
	let resolve::Resolution {
		mut plans,
		collisions,
	} = resolve::resolve(&request.name, &index, &request.combinators, config.collision_policy)?;

	advice::weave(
		&request.name,
		&mut plans,
		sources,
		&request.before,
		&request.after,
		config,
	);

	let mut fields = IndexMap::new();
	for source in sources {
		for (name, default) in source.fields() {
			fields.entry(name.to_owned()).or_insert_with(|| default.clone());
		}
	}

	let table = DispatchTable {
		plans: plans.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
	};

	Ok(ComposedType {
		name: request.name.as_str().into(),
		base: request.base.as_str().into(),
		mixins: request.mixins.iter().map(|m| m.as_str().into()).collect(),
		before: request.before.clone(),
		after: request.after.clone(),
		constructor: config.constructor.as_str().into(),
		fields,
		collisions,
		table: ArcSwap::from_pointee(table),
	})
}

impl ComposedType {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn base(&self) -> &str {
		&self.base
	}

	pub fn mixins(&self) -> impl Iterator<Item = &str> {
		self.mixins.iter().map(|m| &**m)
	}

	pub fn before_advice(&self) -> &AdviceSpec {
		&self.before
	}

	pub fn after_advice(&self) -> &AdviceSpec {
		&self.after
	}

	/// Exposed-name collisions settled during resolution.
	pub fn collisions(&self) -> &[Collision] {
		&self.collisions
	}

	/// Field defaults, first definer in canonical order winning.
	pub fn field_defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Current dispatch table snapshot.
	pub fn table(&self) -> Arc<DispatchTable> {
		self.table.load_full()
	}

	pub fn has_method(&self, name: &str) -> bool {
		self.table.load().contains(name)
	}

	pub fn plan(&self, name: &str) -> Option<Arc<ResolvedPlan>> {
		self.table.load().get(name).cloned()
	}

	/// Exposed method names in publication order.
	pub fn method_names(&self) -> Vec<String> {
		self.table.load().names().map(str::to_owned).collect()
	}

	/// Invokes exposed method `method` on `instance`.
	pub fn invoke(&self, instance: &mut Instance, method: &str, args: &[Value]) -> Result<Value> {
		let plan = self.plan(method).ok_or_else(|| MixError::NoSuchMethod {
			composed: self.name.to_string(),
			method: method.to_owned(),
		})?;
		tracing::trace!(composed = %self.name, %method, args = args.len(), "invoke");
		Ok(plan.run(instance, args))
	}

	/// Invokes `method` against a fresh default instance, for methods that
	/// do not depend on instance state.
	pub fn invoke_static(self: &Arc<Self>, method: &str, args: &[Value]) -> Result<Value> {
		let mut instance = self.instance();
		self.invoke(&mut instance, method, args)
	}

	/// A new instance holding the field defaults; no constructor runs.
	pub fn instance(self: &Arc<Self>) -> Instance {
		Instance::new(Arc::clone(self))
	}

	/// A new instance, running the constructor method with `args` when the
	/// type exposes one.
	pub fn construct(self: &Arc<Self>, args: &[Value]) -> Result<Instance> {
		let mut instance = self.instance();
		if self.has_method(&self.constructor) {
			self.invoke(&mut instance, &self.constructor, args)?;
		}
		Ok(instance)
	}

	/// A source-type view of this composed type, so it can serve as the base
	/// or a mixin of a later composition.
	///
	/// Each exposed method delegates to its current plan (hooks included);
	/// field defaults carry over.
	pub fn as_source(&self) -> SourceType {
		let table = self.table.load();
		let mut source = SourceType::new(&*self.name);
		for (name, plan) in &table.plans {
			let plan = Arc::clone(plan);
			source = source.with_method(name.as_str(), move |instance, args| plan.run(instance, args));
		}
		for (name, default) in &self.fields {
			source = source.with_field(name.as_str(), default.clone());
		}
		source
	}
}

impl fmt::Debug for ComposedType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComposedType")
			.field("name", &self.name)
			.field("base", &self.base)
			.field("mixins", &self.mixins)
			.field("methods", &self.method_names())
			.field("before", &self.before)
			.field("after", &self.after)
			.finish()
	}
}
