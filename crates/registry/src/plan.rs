//! Resolved invocation plans and their per-call execution sequence.
//!
//! A call walks `Idle → BeforeHook? → Body → AfterHook? → Done`. Each `?`
//! step is skipped when its hook is absent or was not enabled at weave time.
//! The sequence is synchronous and never suspends.

use std::fmt;
use std::sync::Arc;

use classmix_primitives::Value;

use crate::combinator::Combinator;
use crate::instance::Instance;
use crate::source::MethodFn;

/// One source type's implementation of a method.
#[derive(Clone)]
pub struct Definer {
	/// Name of the defining source type.
	pub source: Arc<str>,
	pub method: MethodFn,
}

impl Definer {
	#[inline]
	fn call(&self, instance: &mut Instance, args: &[Value]) -> Value {
		(self.method)(instance, args)
	}
}

impl fmt::Debug for Definer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Definer").field(&self.source).finish()
	}
}

/// How one exposed method of a composed type runs.
#[derive(Debug, Clone)]
pub struct ResolvedPlan {
	pub(crate) exposed: Box<str>,
	pub(crate) lookup: Box<str>,
	pub(crate) steps: Vec<Definer>,
	pub(crate) merge: Option<Combinator>,
	pub(crate) before: Option<Definer>,
	pub(crate) after: Option<Definer>,
}

impl ResolvedPlan {
	/// Default-policy plan: one implementation, no merge, no advice.
	pub(crate) fn single(name: &str, definer: Definer) -> Self {
		Self {
			exposed: name.into(),
			lookup: name.into(),
			steps: vec![definer],
			merge: None,
			before: None,
			after: None,
		}
	}

	/// Name the plan is published under in the dispatch table.
	pub fn exposed_name(&self) -> &str {
		&self.exposed
	}

	/// Method name looked up in the source types.
	pub fn lookup_name(&self) -> &str {
		&self.lookup
	}

	/// Source type names invoked by the body, in invocation order.
	pub fn sources(&self) -> impl Iterator<Item = &str> {
		self.steps.iter().map(|d| &*d.source)
	}

	pub fn merge(&self) -> Option<&Combinator> {
		self.merge.as_ref()
	}

	/// Source defining the attached before-hook.
	pub fn before_source(&self) -> Option<&str> {
		self.before.as_ref().map(|d| &*d.source)
	}

	/// Source defining the attached after-hook.
	pub fn after_source(&self) -> Option<&str> {
		self.after.as_ref().map(|d| &*d.source)
	}

	/// Runs hooks around the body; hook results are discarded.
	pub(crate) fn run(&self, instance: &mut Instance, args: &[Value]) -> Value {
		if let Some(hook) = &self.before {
			tracing::trace!(method = %self.exposed, source = %hook.source, "before hook");
			hook.call(instance, args);
		}

		let result = self.body(instance, args);

		if let Some(hook) = &self.after {
			tracing::trace!(method = %self.exposed, source = %hook.source, "after hook");
			hook.call(instance, args);
		}

		result
	}

	fn body(&self, instance: &mut Instance, args: &[Value]) -> Value {
		match &self.merge {
			Some(merge) => {
				let results = self.steps.iter().map(|d| d.call(instance, args)).collect();
				merge.call(results)
			}
			None => self
				.steps
				.first()
				.map(|d| d.call(instance, args))
				.unwrap_or_default(),
		}
	}
}
