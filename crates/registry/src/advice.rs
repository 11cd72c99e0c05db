//! Advice weaver: attaches before/after hooks to resolved plans.
//!
//! A hook for exposed method `m` is any source method named by the
//! configured prefix plus `m` (`before-m`, `after-m` by default). Hooks wrap
//! only the synthesized body, never the individual merged constituents.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::config::MixerConfig;
use crate::plan::{Definer, ResolvedPlan};
use crate::source::SourceType;

/// Join point a hook runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
	Before,
	After,
}

impl HookKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Before => "before",
			Self::After => "after",
		}
	}
}

impl fmt::Display for HookKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Which exposed methods consider hooks of one kind.
///
/// Before and after advice are configured independently; each accepts a
/// boolean or an explicit set of method names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "AdviceRepr")]
pub enum AdviceSpec {
	/// No method runs hooks of this kind.
	#[default]
	Disabled,
	/// Every method runs hooks of this kind when one is defined.
	All,
	/// Only the named exposed methods run hooks of this kind.
	Only(FxHashSet<String>),
}

impl AdviceSpec {
	/// Enables advice for exactly `names`.
	pub fn only<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Only(names.into_iter().map(Into::into).collect())
	}

	/// Whether hooks of this kind are considered for `method`.
	pub fn enables(&self, method: &str) -> bool {
		match self {
			Self::Disabled => false,
			Self::All => true,
			Self::Only(names) => names.contains(method),
		}
	}
}

impl From<bool> for AdviceSpec {
	fn from(enabled: bool) -> Self {
		if enabled { Self::All } else { Self::Disabled }
	}
}

impl<S: Into<String>, const N: usize> From<[S; N]> for AdviceSpec {
	fn from(names: [S; N]) -> Self {
		Self::only(names)
	}
}

impl From<Vec<String>> for AdviceSpec {
	fn from(names: Vec<String>) -> Self {
		Self::only(names)
	}
}

/// Serialized shape: `true`/`false` or a list of method names.
#[derive(Deserialize)]
#[serde(untagged)]
enum AdviceRepr {
	Flag(bool),
	Names(Vec<String>),
}

impl From<AdviceRepr> for AdviceSpec {
	fn from(repr: AdviceRepr) -> Self {
		match repr {
			AdviceRepr::Flag(flag) => flag.into(),
			AdviceRepr::Names(names) => names.into(),
		}
	}
}

/// Attaches hooks to every eligible plan in `plans`.
pub fn weave(
	composed: &str,
	plans: &mut IndexMap<String, ResolvedPlan>,
	sources: &[Arc<SourceType>],
	before: &AdviceSpec,
	after: &AdviceSpec,
	config: &MixerConfig,
) {
	for (exposed, plan) in plans.iter_mut() {
		if before.enables(exposed) {
			plan.before = find_hook(composed, sources, HookKind::Before, exposed, config);
		}
		if after.enables(exposed) {
			plan.after = find_hook(composed, sources, HookKind::After, exposed, config);
		}
	}
}

fn find_hook(
	composed: &str,
	sources: &[Arc<SourceType>],
	kind: HookKind,
	method: &str,
	config: &MixerConfig,
) -> Option<Definer> {
	let hook_name = config.hook_name(kind, method);
	let mut found = sources.iter().filter_map(|source| {
		source.method(&hook_name).map(|f| Definer {
			source: Arc::clone(source.name_arc()),
			method: Arc::clone(f),
		})
	});

	let hook = found.next()?;
	let extra = found.count();
	if extra > 0 {
		tracing::warn!(
			%composed,
			%method,
			%kind,
			chosen = %hook.source,
			ignored = extra,
			"several sources define the same hook; using the first"
		);
	}
	tracing::debug!(%composed, %method, %kind, source = %hook.source, "attached hook");
	Some(hook)
}
