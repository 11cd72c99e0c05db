//! Loading a manifest from disk and replaying it with hooks enabled.

use std::io::Write;
use std::sync::Arc;

use classmix_config::Manifest;
use classmix_primitives::Value;
use classmix_registry::SourceType;
use pretty_assertions::assert_eq;

#[test]
fn load_and_apply_with_custom_prefixes() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	write!(
		file,
		r#"
[mixer]
before_prefix = "pre_"
after_prefix = "post_"

[[compose]]
name = "Polite"
base = "Base"
mixins = ["Verbose"]
before = ["greet"]
after = true
"#
	)
	.unwrap();

	let manifest = Manifest::load(file.path()).unwrap();
	let mixer = manifest.mixer();

	let calls = Arc::new(std::sync::Mutex::new(Vec::new()));
	let record = |tag: &'static str| {
		let calls = Arc::clone(&calls);
		move |_: &mut classmix_registry::Instance, _: &[Value]| {
			if let Ok(mut calls) = calls.lock() {
				calls.push(tag);
			}
			Value::from(tag)
		}
	};
	mixer
		.define_source(SourceType::new("Base").with_method("greet", record("greet")))
		.unwrap();
	mixer
		.define_source(
			SourceType::new("Verbose")
				.with_method("pre_greet", record("pre"))
				.with_method("post_greet", record("post"))
				.with_method("before-greet", record("ignored")),
		)
		.unwrap();

	let report = manifest.apply(&mixer).unwrap();
	assert_eq!(report.created, ["Polite"]);

	let ty = mixer.composed("Polite").unwrap();
	assert_eq!(ty.invoke_static("greet", &[]).unwrap(), Value::from("greet"));
	assert_eq!(*calls.lock().unwrap(), ["pre", "greet", "post"]);
}
