//! Whole-engine scenarios: define sources, compose, invoke, expand.

use std::sync::Arc;

use classmix_primitives::Value;
use classmix_registry::{
	Combinator, CombinatorEntry, CombinatorMap, Composition, Mixer, SourceType, builtins,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

fn constant(name: &str, methods: &[(&str, &str)]) -> SourceType {
	methods.iter().fold(SourceType::new(name), |source, (method, result)| {
		let result = Value::from(*result);
		source.with_method(*method, move |_, _| result.clone())
	})
}

fn hobbyists() -> Mixer {
	let mixer = Mixer::new();
	mixer
		.define_source(constant(
			"Base",
			&[("say_name", "joe"), ("hobby", "breathe"), ("anti_hobby", "germs")],
		))
		.unwrap();
	mixer
		.define_source(constant("Coder", &[("hobby", "hack"), ("anti_hobby", "bugs")]))
		.unwrap();
	mixer
		.define_source(constant("Skier", &[("hobby", "ski")]))
		.unwrap();
	mixer
}

#[test]
fn merged_hobbies_in_canonical_order() {
	let mixer = hobbyists();
	let person = mixer
		.compose(
			Composition::new("Person", "Base")
				.mixins(["Coder", "Skier"])
				.combinator("hobby", builtins::and_concat()),
		)
		.unwrap();

	let mut p = person.instance();
	assert_eq!(p.call("hobby", &[]).unwrap(), Value::from("breathe and hack and ski"));
	assert_eq!(p.call("anti_hobby", &[]).unwrap(), Value::from("germs"));
	assert_eq!(p.call("say_name", &[]).unwrap(), Value::from("joe"));
}

#[test]
fn ordered_subsets() {
	let mixer = hobbyists();
	let person = mixer
		.compose(
			Composition::new("Person", "Base")
				.mixin("Coder")
				.combinator(
					"hobby",
					CombinatorEntry::ordered(Some(builtins::and_concat()), ["Coder", "Base"]),
				)
				.combinator(
					"anti_hobby",
					CombinatorEntry::ordered(Some(builtins::and_concat()), ["Coder"]),
				),
		)
		.unwrap();

	assert_eq!(person.invoke_static("hobby", &[]).unwrap(), Value::from("hack and breathe"));
	assert_eq!(person.invoke_static("anti_hobby", &[]).unwrap(), Value::from("bugs"));
}

#[test]
fn advice_selects_hooks_per_kind() {
	let log = Arc::new(Mutex::new(Vec::<String>::new()));
	let record = |entry: &'static str| {
		let log = Arc::clone(&log);
		move |_: &mut classmix_registry::Instance, args: &[Value]| {
			let who = args.first().map(ToString::to_string).unwrap_or_default();
			log.lock().push(format!("{entry} {who}"));
			Value::from(entry)
		}
	};

	let mixer = Mixer::new();
	mixer
		.define_source(
			SourceType::new("Base")
				.with_method("greet", record("hello"))
				.with_method("adieu", record("goodbye")),
		)
		.unwrap();
	mixer
		.define_source(
			SourceType::new("Verbose")
				.with_method("before-greet", record("about to greet"))
				.with_method("after-greet", record("greeted"))
				.with_method("before-adieu", record("about to leave"))
				.with_method("after-adieu", record("left")),
		)
		.unwrap();

	let ty = mixer
		.compose(
			Composition::new("Polite", "Base")
				.mixin("Verbose")
				.before(["adieu"])
				.after(["greet"]),
		)
		.unwrap();

	let mut p = ty.instance();
	assert_eq!(p.call("greet", &[Value::from("Jane")]).unwrap(), Value::from("hello"));
	assert_eq!(p.call("adieu", &[Value::from("Jane")]).unwrap(), Value::from("goodbye"));
	assert_eq!(
		*log.lock(),
		["hello Jane", "greeted Jane", "about to leave Jane", "goodbye Jane"]
	);
}

#[test]
fn rename_then_expand() {
	let mixer = Mixer::new();
	mixer
		.define_source(constant("Base", &[("name", "Base")]))
		.unwrap();
	mixer
		.define_source(constant("Lawyer", &[("name", "Lawyer"), ("sue", "see you in court")]))
		.unwrap();
	mixer
		.define_source(constant("Doctor", &[("name", "Doctor"), ("heal", "take two")]))
		.unwrap();

	let mut combinators = CombinatorMap::default();
	combinators.insert(
		"name".into(),
		CombinatorEntry::ordered(None, ["Lawyer"]).exposed_as("profession"),
	);
	let person = mixer
		.create_composed_type("Person", "Base", &["Lawyer"], combinators, false, false)
		.unwrap();

	assert_eq!(person.invoke_static("profession", &[]).unwrap(), Value::from("Lawyer"));
	assert!(!person.has_method("name"));

	let added = mixer.register_expander("Person", "Doctor").unwrap();
	assert_eq!(added, ["name", "heal"]);
	assert_eq!(person.invoke_static("name", &[]).unwrap(), Value::from("Doctor"));
	assert_eq!(person.invoke_static("profession", &[]).unwrap(), Value::from("Lawyer"));
	assert_eq!(person.invoke_static("sue", &[]).unwrap(), Value::from("see you in court"));
}

#[test]
fn layered_composition_with_custom_combinator() {
	let mixer = hobbyists();
	mixer.register_combinator(
		"count",
		Combinator::named("count", |results| Value::from(results.len() as i64)),
	);
	mixer
		.compose(
			Composition::new("Person", "Base")
				.mixin("Coder")
				.combinator("hobby", builtins::list()),
		)
		.unwrap();
	let athlete = mixer
		.compose(
			Composition::new("Athlete", "Person")
				.mixin("Skier")
				.combinator("hobby", mixer.combinator("count").unwrap()),
		)
		.unwrap();

	assert_eq!(athlete.invoke_static("hobby", &[]).unwrap(), Value::Int(2));
	assert_eq!(mixer.expansions().names(), ["Athlete", "Person"]);
}
