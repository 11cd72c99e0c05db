//! Instances of composed types and their field storage.

use std::fmt;

use classmix_primitives::Value;
use rustc_hash::FxHashMap;

use crate::compose::ComposedHandle;
use crate::error::Result;

/// A value of a composed type: its type handle plus field storage.
///
/// Methods receive the instance mutably, so they may read and write fields.
pub struct Instance {
	ty: ComposedHandle,
	fields: FxHashMap<String, Value>,
}

impl Instance {
	pub(crate) fn new(ty: ComposedHandle) -> Self {
		let fields = ty
			.field_defaults()
			.map(|(k, v)| (k.to_owned(), v.clone()))
			.collect();
		Self { ty, fields }
	}

	/// The composed type this instance belongs to.
	pub fn composed(&self) -> &ComposedHandle {
		&self.ty
	}

	pub fn get(&self, field: &str) -> Option<&Value> {
		self.fields.get(field)
	}

	/// Field value as a string slice, if it holds a string.
	pub fn get_str(&self, field: &str) -> Option<&str> {
		self.fields.get(field).and_then(Value::as_str)
	}

	/// Sets a field, returning the previous value. Undeclared fields are
	/// created on first write.
	pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.fields.insert(field.into(), value.into())
	}

	/// Invokes an exposed method of this instance's type.
	pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value> {
		let ty = ComposedHandle::clone(&self.ty);
		ty.invoke(self, method, args)
	}
}

impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance")
			.field("type", &self.ty.name())
			.field("fields", &self.fields)
			.finish()
	}
}
