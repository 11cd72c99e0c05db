//! Mixin composition engine.
//!
//! Given a base source type and an ordered list of mixins, the engine
//! synthesizes a composed type whose method set is the union of all inputs.
//!
//! # Mental Model
//!
//! 1. **Scan:** [`scan`] enumerates every method name and its definers in
//!    canonical order `[base, mixin₁, …]`.
//! 2. **Resolve:** [`resolve`] turns each name into a [`ResolvedPlan`]
//!    according to its [`CombinatorEntry`] (or the first-definer default).
//! 3. **Weave:** [`advice`] attaches `before-*` / `after-*` hooks to plans
//!    whose exposed name is enabled by the [`AdviceSpec`]s.
//! 4. **Publish:** [`Mixer::compose`] stores the [`ComposedType`] in the
//!    [`ExpansionRegistry`] under its name.
//! 5. **Expand:** [`Mixer::register_expander`] later adds methods the type
//!    does not expose yet. Existing entries are never replaced.
//!
//! # Example
//!
//! ```
//! use classmix_primitives::Value;
//! use classmix_registry::{Composition, Mixer, SourceType, builtins};
//!
//! let mixer = Mixer::new();
//! mixer.define_source(SourceType::new("Base").with_method("hobby", |_, _| "breathe".into()))?;
//! mixer.define_source(SourceType::new("Coder").with_method("hobby", |_, _| "hack".into()))?;
//!
//! let person = mixer.compose(
//! 	Composition::new("Person", "Base")
//! 		.mixin("Coder")
//! 		.combinator("hobby", builtins::and_concat()),
//! )?;
//!
//! let mut p = person.instance();
//! assert_eq!(p.call("hobby", &[])?, Value::from("breathe and hack"));
//! # Ok::<(), classmix_registry::MixError>(())
//! ```

pub mod advice;
pub mod combinator;
pub mod compose;
pub mod config;
pub mod error;
pub mod expansion;
mod instance;
mod mixer;
pub mod plan;
pub mod resolve;
pub mod scan;
pub mod source;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use advice::{AdviceSpec, HookKind};
pub use combinator::{Combinator, CombinatorEntry, EntryForm, builtins};
pub use compose::{ComposedHandle, ComposedType, Composition, DispatchTable};
pub use config::{CollisionPolicy, MixerConfig};
pub use error::{MixError, Result};
pub use expansion::ExpansionRegistry;
pub use instance::Instance;
pub use mixer::Mixer;
pub use plan::{Definer, ResolvedPlan};
pub use resolve::{Collision, CombinatorMap, Precedence};
pub use source::{MethodFn, SourceType};
