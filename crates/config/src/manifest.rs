//! Manifest schema.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use classmix_registry::{AdviceSpec, CollisionPolicy, Mixer, MixerConfig};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// A parsed composition manifest.
///
/// Every table is optional; an empty document is a valid, empty manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
	/// Engine settings for a mixer built with [`Manifest::mixer`].
	pub mixer: MixerSettings,
	/// Composed types to synthesize, in file order.
	pub compose: Vec<CompositionSpec>,
	/// Expansions to register once every composition exists, in file order.
	pub expand: Vec<ExpansionSpec>,
}

/// The `[mixer]` table. Keys left out fall back to [`MixerConfig`]
/// defaults, and are left alone by [`Manifest::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixerSettings {
	pub before_prefix: Option<String>,
	pub after_prefix: Option<String>,
	pub constructor: Option<String>,
	pub collision_policy: Option<CollisionPolicy>,
}

impl MixerSettings {
	/// Resolved engine settings.
	pub fn config(&self) -> MixerConfig {
		let mut config = MixerConfig::default();
		if let Some(prefix) = &self.before_prefix {
			config.before_prefix.clone_from(prefix);
		}
		if let Some(prefix) = &self.after_prefix {
			config.after_prefix.clone_from(prefix);
		}
		if let Some(name) = &self.constructor {
			config.constructor.clone_from(name);
		}
		if let Some(policy) = self.collision_policy {
			config.collision_policy = policy;
		}
		config
	}

	/// Overrides each setting `other` provides.
	pub fn merge(&mut self, other: MixerSettings) {
		if other.before_prefix.is_some() {
			self.before_prefix = other.before_prefix;
		}
		if other.after_prefix.is_some() {
			self.after_prefix = other.after_prefix;
		}
		if other.constructor.is_some() {
			self.constructor = other.constructor;
		}
		if other.collision_policy.is_some() {
			self.collision_policy = other.collision_policy;
		}
	}
}

/// One `[[compose]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionSpec {
	pub name: String,
	pub base: String,
	#[serde(default)]
	pub mixins: Vec<String>,
	/// Lookup method name → entry.
	#[serde(default)]
	pub combinators: BTreeMap<String, CombinatorSpec>,
	/// `true`, `false`, or a list of exposed method names.
	#[serde(default)]
	pub before: AdviceSpec,
	#[serde(default)]
	pub after: AdviceSpec,
}

/// A combinator entry as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CombinatorSpec {
	/// `hobby = "and_concat"`: simple form over every definer.
	Merge(String),
	/// `[compose.combinators.hobby]` table.
	Entry(EntrySpec),
}

/// Table form of a combinator entry. Merge functions are referenced by
/// their catalog name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
	pub merge: Option<String>,
	pub order: Option<Vec<String>>,
	pub expose_as: Option<String>,
}

/// One `[[expand]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpansionSpec {
	pub target: String,
	pub mixin: String,
}

impl Manifest {
	/// Parse a TOML string into a [`Manifest`].
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Load a manifest from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// A fresh mixer configured from the `[mixer]` table.
	pub fn mixer(&self) -> Mixer {
		Mixer::with_config(self.mixer.config())
	}

	/// Merge another manifest into this one.
	///
	/// Entries of `other` run after those of `self`; settings present in its
	/// `[mixer]` table override ours.
	pub fn merge(&mut self, other: Manifest) {
		self.mixer.merge(other.mixer);
		self.compose.extend(other.compose);
		self.expand.extend(other.expand);
	}
}

impl FromStr for Manifest {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}
