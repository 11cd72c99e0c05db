//! Source types: named bundles of methods and field defaults.

use std::fmt;
use std::sync::Arc;

use classmix_primitives::Value;
use indexmap::IndexMap;

use crate::instance::Instance;

/// A callable method implementation.
///
/// Receives the instance it is invoked on and the caller's arguments.
pub type MethodFn = Arc<dyn Fn(&mut Instance, &[Value]) -> Value + Send + Sync>;

/// A named bundle of methods (and optionally fields) supplied as a base or
/// mixin input.
///
/// Immutable once built. Method and field order is declaration order, which
/// the method registry preserves when scanning.
#[derive(Clone)]
pub struct SourceType {
	name: Arc<str>,
	methods: IndexMap<String, MethodFn>,
	fields: IndexMap<String, Value>,
}

impl SourceType {
	/// Starts an empty source type.
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			methods: IndexMap::new(),
			fields: IndexMap::new(),
		}
	}

	/// Adds a method. Redefining a name replaces the earlier implementation.
	pub fn with_method<F>(mut self, name: impl Into<String>, f: F) -> Self
	where
		F: Fn(&mut Instance, &[Value]) -> Value + Send + Sync + 'static,
	{
		self.methods.insert(name.into(), Arc::new(f));
		self
	}

	/// Adds an already boxed method.
	pub fn with_method_fn(mut self, name: impl Into<String>, f: MethodFn) -> Self {
		self.methods.insert(name.into(), f);
		self
	}

	/// Declares a field with its default value.
	pub fn with_field(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
		self.fields.insert(name.into(), default.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn name_arc(&self) -> &Arc<str> {
		&self.name
	}

	#[inline]
	pub fn method(&self, name: &str) -> Option<&MethodFn> {
		self.methods.get(name)
	}

	#[inline]
	pub fn defines(&self, name: &str) -> bool {
		self.methods.contains_key(name)
	}

	/// Method names in declaration order.
	pub fn method_names(&self) -> impl Iterator<Item = &str> {
		self.methods.keys().map(String::as_str)
	}

	pub fn methods(&self) -> impl Iterator<Item = (&str, &MethodFn)> {
		self.methods.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl fmt::Debug for SourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceType")
			.field("name", &self.name)
			.field("methods", &self.methods.keys().collect::<Vec<_>>())
			.field("fields", &self.fields)
			.finish()
	}
}
