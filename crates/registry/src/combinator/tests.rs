use classmix_primitives::Value;

use super::*;

fn strs(items: &[&str]) -> Vec<Value> {
	items.iter().map(|s| Value::from(*s)).collect()
}

#[test]
fn and_concat_joins_in_order() {
	let merged = builtins::and_concat().call(strs(&["breathe", "hack", "ski"]));
	assert_eq!(merged, Value::from("breathe and hack and ski"));
}

#[test]
fn concat_renders_non_strings() {
	let merged = builtins::concat().call(vec![Value::from("a"), Value::from(1), Value::from(true)]);
	assert_eq!(merged, Value::from("a1true"));
}

#[test]
fn first_and_last_of_empty_are_null() {
	assert_eq!(builtins::first().call(Vec::new()), Value::Null);
	assert_eq!(builtins::last().call(Vec::new()), Value::Null);
	assert_eq!(builtins::last().call(strs(&["a", "b"])), Value::from("b"));
}

#[test]
fn sum_widens_on_float() {
	assert_eq!(builtins::sum().call(vec![Value::from(1), Value::from(2)]), Value::Int(3));
	assert_eq!(
		builtins::sum().call(vec![Value::from(1), Value::from(0.5), Value::from("x")]),
		Value::Float(1.5)
	);
}

#[test]
fn sum_widens_on_integer_overflow() {
	let merged = builtins::sum().call(vec![Value::Int(i64::MAX), Value::Int(1)]);
	assert_eq!(merged, Value::Float(i64::MAX as f64 + 1.0));
	assert_eq!(
		builtins::sum().call(vec![Value::Int(i64::MIN), Value::Int(-1), Value::Int(1)]),
		Value::Float(i64::MIN as f64)
	);
}

#[test]
fn entry_forms() {
	assert_eq!(CombinatorEntry::default().form(), EntryForm::Default);
	assert_eq!(CombinatorEntry::simple(builtins::list()).form(), EntryForm::Simple);
	assert_eq!(
		CombinatorEntry::ordered(None, ["A", "B"]).form(),
		EntryForm::Ordered
	);
	assert_eq!(
		CombinatorEntry::ordered(Some(builtins::list()), ["A"])
			.exposed_as("y")
			.form(),
		EntryForm::Renaming
	);
	assert_eq!(CombinatorEntry::alias("y").form(), EntryForm::Renaming);
}

#[test]
fn debug_shows_label() {
	assert_eq!(format!("{:?}", builtins::sum()), "Combinator(\"sum\")");
}
