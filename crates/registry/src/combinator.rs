//! Merge functions and per-method combinator entries.
//!
//! A [`CombinatorEntry`] tells the resolver how to handle one method name:
//!
//! | Form | `merge` | `order` | `expose_as` |
//! |------|---------|---------|-------------|
//! | simple | set | - | - |
//! | ordered | set or unset | set | - |
//! | renaming | set or unset | set or unset | set |
//!
//! Without an entry the first definer in canonical order wins.

use std::fmt;
use std::sync::Arc;

use classmix_primitives::Value;

type MergeFn = dyn Fn(Vec<Value>) -> Value + Send + Sync;

/// A merge function folding several same-named method results into one.
///
/// Results arrive in invocation order as a single ordered sequence.
#[derive(Clone)]
pub struct Combinator {
	label: Arc<str>,
	func: Arc<MergeFn>,
}

impl Combinator {
	/// Wraps an anonymous merge function.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
	{
		Self::named("<anonymous>", f)
	}

	/// Wraps a merge function under a label shown in logs and debug output.
	pub fn named<F>(label: impl Into<Arc<str>>, f: F) -> Self
	where
		F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
	{
		Self {
			label: label.into(),
			func: Arc::new(f),
		}
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	#[inline]
	pub fn call(&self, results: Vec<Value>) -> Value {
		(self.func)(results)
	}
}

impl fmt::Debug for Combinator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Combinator").field(&self.label).finish()
	}
}

/// Which shape a [`CombinatorEntry`] takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryForm {
	/// Nothing set; behaves like an absent entry.
	Default,
	/// Merge over every definer in canonical order.
	Simple,
	/// Explicit source order, possibly a subset.
	Ordered,
	/// Result exposed under a different method name.
	Renaming,
}

/// Per-method resolution instructions.
#[derive(Debug, Clone, Default)]
pub struct CombinatorEntry {
	/// Merge function; when unset exactly one implementation is invoked.
	pub merge: Option<Combinator>,
	/// Source type names to draw implementations from, in invocation order.
	pub order: Option<Vec<String>>,
	/// Dispatch-table name the resolved plan is published under.
	pub expose_as: Option<String>,
}

impl CombinatorEntry {
	/// Merge over every definer in canonical order.
	pub fn simple(merge: Combinator) -> Self {
		Self {
			merge: Some(merge),
			..Self::default()
		}
	}

	/// Draw only from `order`, in that order.
	pub fn ordered<I, S>(merge: Option<Combinator>, order: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			merge,
			order: Some(order.into_iter().map(Into::into).collect()),
			expose_as: None,
		}
	}

	/// Expose the first canonical definer under another name, no merge.
	pub fn alias(expose_as: impl Into<String>) -> Self {
		Self {
			expose_as: Some(expose_as.into()),
			..Self::default()
		}
	}

	/// Publishes the resolved plan under `name` instead of the lookup key.
	pub fn exposed_as(mut self, name: impl Into<String>) -> Self {
		self.expose_as = Some(name.into());
		self
	}

	pub fn form(&self) -> EntryForm {
		match (&self.merge, &self.order, &self.expose_as) {
			(_, _, Some(_)) => EntryForm::Renaming,
			(_, Some(_), None) => EntryForm::Ordered,
			(Some(_), None, None) => EntryForm::Simple,
			(None, None, None) => EntryForm::Default,
		}
	}
}

impl From<Combinator> for CombinatorEntry {
	fn from(merge: Combinator) -> Self {
		Self::simple(merge)
	}
}

/// Stock merge functions, registered on every new mixer.
pub mod builtins {
	use classmix_primitives::Value;

	use super::Combinator;

	fn join(results: Vec<Value>, sep: &str) -> Value {
		let parts: Vec<String> = results.iter().map(ToString::to_string).collect();
		Value::Str(parts.join(sep))
	}

	/// Concatenates the rendered results with no separator.
	pub fn concat() -> Combinator {
		Combinator::named("concat", |results| join(results, ""))
	}

	/// Joins the rendered results with `" and "`.
	pub fn and_concat() -> Combinator {
		Combinator::named("and_concat", |results| join(results, " and "))
	}

	/// Collects the results into a list.
	pub fn list() -> Combinator {
		Combinator::named("list", Value::List)
	}

	pub fn first() -> Combinator {
		Combinator::named("first", |results| results.into_iter().next().unwrap_or_default())
	}

	pub fn last() -> Combinator {
		Combinator::named("last", |results| results.into_iter().last().unwrap_or_default())
	}

	/// Adds numeric results. Stays integral unless a float is present or the
	/// integer total overflows; non-numeric results are skipped.
	pub fn sum() -> Combinator {
		Combinator::named("sum", |results| {
			let float_sum = || Value::Float(results.iter().filter_map(Value::as_float).sum());
			if results.iter().any(|v| matches!(v, Value::Float(_))) {
				return float_sum();
			}
			results
				.iter()
				.filter_map(Value::as_int)
				.try_fold(0i64, i64::checked_add)
				.map_or_else(float_sum, Value::Int)
		})
	}

	/// All stock merge functions.
	pub fn all() -> [Combinator; 6] {
		[concat(), and_concat(), list(), first(), last(), sum()]
	}
}

#[cfg(test)]
mod tests;
