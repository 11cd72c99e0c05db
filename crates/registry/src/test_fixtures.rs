use std::sync::Arc;

use classmix_primitives::Value;
use parking_lot::Mutex;

use crate::source::SourceType;

/// Source type whose methods return fixed strings.
pub(crate) fn constant(name: &str, methods: &[(&str, &str)]) -> SourceType {
	methods.iter().fold(SourceType::new(name), |source, (method, result)| {
		let result = Value::from(*result);
		source.with_method(*method, move |_, _| result.clone())
	})
}

/// Shared call log for asserting invocation order.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
	pub(crate) fn push(&self, entry: impl Into<String>) {
		self.0.lock().push(entry.into());
	}

	pub(crate) fn take(&self) -> Vec<String> {
		std::mem::take(&mut *self.0.lock())
	}
}

/// Source type whose methods append `"{source}.{method}({args})"` to `log`
/// and return the method name.
pub(crate) fn logging(name: &str, methods: &[&str], log: &CallLog) -> SourceType {
	methods.iter().fold(SourceType::new(name), |source, method| {
		let log = log.clone();
		let entry = format!("{name}.{method}");
		let result = Value::from(*method);
		source.with_method(*method, move |_, args| {
			let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
			log.push(format!("{entry}({})", rendered.join(",")));
			result.clone()
		})
	})
}

pub(crate) fn arcs(sources: impl IntoIterator<Item = SourceType>) -> Vec<Arc<SourceType>> {
	sources.into_iter().map(Arc::new).collect()
}
