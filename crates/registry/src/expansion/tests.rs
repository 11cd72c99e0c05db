use classmix_primitives::Value;

use super::*;
use crate::compose::{Composition, synthesize};
use crate::config::MixerConfig;
use crate::test_fixtures::{arcs, constant};

fn registry_with_person() -> ExpansionRegistry {
	let registry = ExpansionRegistry::new();
	let sources = arcs([constant("Base", &[("say_name", "joe"), ("hobby", "breathe")])]);
	let ty = synthesize(&Composition::new("Person", "Base"), &sources, &MixerConfig::default()).unwrap();
	registry.publish(ty).unwrap();
	registry
}

#[test]
fn adds_only_new_names() {
	let registry = registry_with_person();
	let mixin = constant("Coder", &[("hobby", "hack"), ("anti_hobby", "bugs")]);

	let added = registry.register_expander("Person", &mixin).unwrap();
	assert_eq!(added, ["anti_hobby"]);

	let ty = registry.get("Person").unwrap();
	assert_eq!(ty.method_names(), ["say_name", "hobby", "anti_hobby"]);
	assert_eq!(ty.invoke_static("anti_hobby", &[]).unwrap(), Value::from("bugs"));
}

#[test]
fn redefinition_leaves_existing_plan() {
	let registry = registry_with_person();
	let before = registry.get("Person").unwrap().plan("hobby").unwrap();

	let mixin = constant("Coder", &[("hobby", "hack")]);
	assert!(registry.register_expander("Person", &mixin).unwrap().is_empty());

	let ty = registry.get("Person").unwrap();
	let after = ty.plan("hobby").unwrap();
	assert!(Arc::ptr_eq(&before, &after));
	assert_eq!(ty.invoke_static("hobby", &[]).unwrap(), Value::from("breathe"));
}

#[test]
fn idempotent() {
	let registry = registry_with_person();
	let mixin = constant("Skier", &[("ski", "ski")]);
	assert_eq!(registry.register_expander("Person", &mixin).unwrap(), ["ski"]);
	let snap = registry.get("Person").unwrap().table();
	assert!(registry.register_expander("Person", &mixin).unwrap().is_empty());
	assert!(Arc::ptr_eq(&snap, &registry.get("Person").unwrap().table()));
}

#[test]
fn expansion_plans_have_no_advice() {
	let registry = registry_with_person();
	let mixin = constant("Verbose", &[("greet", "hi"), ("before-greet", "psst")]);
	registry.register_expander("Person", &mixin).unwrap();

	let plan = registry.get("Person").unwrap().plan("greet").unwrap();
	assert_eq!(plan.before_source(), None);
	assert_eq!(plan.sources().collect::<Vec<_>>(), ["Verbose"]);
}

#[test]
fn unknown_target() {
	let registry = ExpansionRegistry::new();
	let err = registry
		.register_expander("Ghost", &constant("M", &[("x", "x")]))
		.unwrap_err();
	assert_eq!(err, MixError::UnknownComposedType { name: "Ghost".into() });
}

#[test]
fn duplicate_publish_rejected() {
	let registry = registry_with_person();
	let sources = arcs([constant("Other", &[])]);
	let ty = synthesize(&Composition::new("Person", "Other"), &sources, &MixerConfig::default()).unwrap();
	assert_eq!(
		registry.publish(ty).unwrap_err(),
		MixError::DuplicateTypeName { name: "Person".into() }
	);
	assert_eq!(registry.get("Person").unwrap().base(), "Base");
}

#[test]
fn snapshot_held_by_reader_survives_expansion() {
	let registry = registry_with_person();
	let ty = registry.get("Person").unwrap();
	let old = ty.table();

	registry
		.register_expander("Person", &constant("Coder", &[("code", "rust")]))
		.unwrap();

	assert!(!old.contains("code"));
	assert!(ty.has_method("code"));
}

#[test]
fn concurrent_expansions_all_land() {
	let registry = registry_with_person();
	let mixins: Vec<SourceType> = (0..8)
		.map(|i| {
			let name = format!("m{i}");
			SourceType::new(format!("Mixin{i}")).with_method(name, |_, _| Value::Null)
		})
		.collect();

	std::thread::scope(|scope| {
		for mixin in &mixins {
			let registry = &registry;
			scope.spawn(move || registry.register_expander("Person", mixin).unwrap());
		}
	});

	let ty = registry.get("Person").unwrap();
	for i in 0..8 {
		assert!(ty.has_method(&format!("m{i}")), "m{i} lost");
	}
	assert_eq!(ty.table().len(), 10);
}
