//! Composition manifests for classmix.
//!
//! A manifest declares composed types and expansions in TOML so they can be
//! replayed against a [`classmix_registry::Mixer`] whose source types were
//! defined in code.
//!
//! # Schema
//!
//! ```toml
//! # Engine settings (all optional)
//! [mixer]
//! before_prefix = "before-"
//! after_prefix = "after-"
//! constructor = "construct"
//! collision_policy = "last_wins"
//!
//! [[compose]]
//! name = "Person"
//! base = "BasePerson"
//! mixins = ["ProgrammerMixin", "SkierMixin"]
//! before = true             # or a list of method names
//! after = ["greet"]
//!
//! [compose.combinators]
//! # Shorthand: merge every definer with a named combinator
//! anti_hobby = "first"
//!
//! [compose.combinators.hobby]
//! merge = "and_concat"
//! order = ["ProgrammerMixin", "BasePerson"]
//! expose_as = "pastime"
//!
//! [[expand]]
//! target = "Person"
//! mixin = "LawyerMixin"
//! ```
//!
//! Merge names refer to the mixer's combinator catalog, so custom merge
//! functions must be registered before [`Manifest::apply`] runs.

pub mod apply;
pub mod error;
pub mod manifest;

pub use apply::{ApplyReport, Expanded};
pub use error::{ConfigError, Result};
pub use manifest::{
	CombinatorSpec, CompositionSpec, EntrySpec, ExpansionSpec, Manifest, MixerSettings,
};
