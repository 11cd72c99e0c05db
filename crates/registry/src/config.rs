//! Engine-wide settings.

use serde::Deserialize;

use crate::advice::HookKind;

/// What happens when two resolved plans claim the same exposed name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
	/// Keep the plan resolved first; drop later claimants.
	FirstWins,
	/// Overwrite with the plan resolved last.
	#[default]
	LastWins,
}

/// Naming conventions and collision handling shared by every composition a
/// [`crate::Mixer`] performs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixerConfig {
	/// Prefix marking a method as the before-hook of another (`before-greet`).
	pub before_prefix: String,
	/// Prefix marking a method as the after-hook of another (`after-greet`).
	pub after_prefix: String,
	/// Exposed method run by [`crate::ComposedType::construct`], if present.
	pub constructor: String,
	/// Exposed-name collision handling.
	pub collision_policy: CollisionPolicy,
}

impl Default for MixerConfig {
	fn default() -> Self {
		Self {
			before_prefix: "before-".into(),
			after_prefix: "after-".into(),
			constructor: "construct".into(),
			collision_policy: CollisionPolicy::default(),
		}
	}
}

impl MixerConfig {
	pub fn with_hook_prefixes(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
		self.before_prefix = before.into();
		self.after_prefix = after.into();
		self
	}

	pub fn with_constructor(mut self, name: impl Into<String>) -> Self {
		self.constructor = name.into();
		self
	}

	pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
		self.collision_policy = policy;
		self
	}

	/// Name of the hook method of `kind` for exposed method `method`.
	pub fn hook_name(&self, kind: HookKind, method: &str) -> String {
		let prefix = match kind {
			HookKind::Before => &self.before_prefix,
			HookKind::After => &self.after_prefix,
		};
		format!("{prefix}{method}")
	}
}
