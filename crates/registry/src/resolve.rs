//! Combinator resolver: turns each scanned method name into a [`ResolvedPlan`].
//!
//! # Precedence Contract
//!
//! - No entry: the first definer in canonical order is the only step.
//! - Simple entry: every definer, canonical order, results merged.
//! - Ordered entry: only the named sources, in the given order.
//! - Renaming entry: as above, published under `expose_as`; the lookup name
//!   gets no plan of its own.
//! - Without a merge function exactly one step is kept (the first of the
//!   resolved order).
//!
//! Two plans claiming one exposed name are recorded as a [`Collision`]. A
//! plan built from an explicit entry always beats a default-policy plan;
//! between two plans of the same kind, [`CollisionPolicy`] decides in
//! first-appearance order of their lookup names.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::combinator::CombinatorEntry;
use crate::config::CollisionPolicy;
use crate::error::{MixError, Result};
use crate::plan::{Definer, ResolvedPlan};
use crate::scan::MethodIndex;

/// Combinator entries keyed by lookup (source-side) method name.
pub type CombinatorMap = FxHashMap<String, CombinatorEntry>;

/// Two plans resolved to the same exposed name; one was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
	/// The contested dispatch-table name.
	pub exposed: String,
	/// Lookup name of the plan that kept the slot.
	pub kept: String,
	/// Lookup name of the plan that was discarded.
	pub dropped: String,
	pub settled_by: Precedence,
}

/// What decided a [`Collision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
	/// Only one claimant came from a combinator entry; it was kept.
	ExplicitEntry,
	/// Both claimants were of the same kind.
	Policy(CollisionPolicy),
}

/// Resolver output: plans keyed by exposed name, plus discarded claimants.
#[derive(Debug, Default)]
pub struct Resolution {
	pub plans: IndexMap<String, ResolvedPlan>,
	pub collisions: Vec<Collision>,
}

/// Resolves every method in `index` against `combinators`.
pub fn resolve(
	composed: &str,
	index: &MethodIndex,
	combinators: &CombinatorMap,
	policy: CollisionPolicy,
) -> Result<Resolution> {
	for method in combinators.keys() {
		if !index.contains(method) {
			tracing::warn!(%composed, %method, "combinator entry names a method no source defines");
		}
	}

	let mut out = Resolution::default();
	let mut explicit = FxHashSet::default();

	for (name, definers) in index.iter() {
		let (plan, from_entry) = match combinators.get(name) {
			Some(entry) => (resolve_entry(name, definers, entry)?, true),
			None => (default_plan(name, definers), false),
		};

		tracing::debug!(
			%composed,
			method = %plan.lookup,
			exposed = %plan.exposed,
			steps = plan.steps.len(),
			merge = plan.merge.as_ref().map(|m| m.label()),
			"resolved plan"
		);

		insert_plan(composed, &mut out, &mut explicit, (plan, from_entry), policy);
	}

	Ok(out)
}

fn default_plan(name: &str, definers: &[Definer]) -> ResolvedPlan {
	ResolvedPlan {
		exposed: name.into(),
		lookup: name.into(),
		steps: definers.iter().take(1).cloned().collect(),
		merge: None,
		before: None,
		after: None,
	}
}

fn resolve_entry(name: &str, definers: &[Definer], entry: &CombinatorEntry) -> Result<ResolvedPlan> {
	let mut steps = match &entry.order {
		None => definers.to_vec(),
		Some(order) => order
			.iter()
			.map(|wanted| {
				definers
					.iter()
					.find(|d| *d.source == **wanted)
					.cloned()
					.ok_or_else(|| MixError::UnresolvedCombinatorSource {
						method: name.to_owned(),
						source_name: wanted.clone(),
					})
			})
			.collect::<Result<Vec<_>>>()?,
	};

	if entry.merge.is_none() && steps.len() > 1 {
		tracing::debug!(
			method = %name,
			dropped = steps.len() - 1,
			"no merge function; keeping first implementation only"
		);
		steps.truncate(1);
	}

	Ok(ResolvedPlan {
		exposed: entry.expose_as.as_deref().unwrap_or(name).into(),
		lookup: name.into(),
		steps,
		merge: entry.merge.clone(),
		before: None,
		after: None,
	})
}

/// `explicit` holds the exposed names whose current plan came from an entry.
fn insert_plan(
	composed: &str,
	out: &mut Resolution,
	explicit: &mut FxHashSet<String>,
	(plan, from_entry): (ResolvedPlan, bool),
	policy: CollisionPolicy,
) {
	match out.plans.entry(plan.exposed.to_string()) {
		Entry::Vacant(slot) => {
			if from_entry {
				explicit.insert(slot.key().clone());
			}
			slot.insert(plan);
		}
		Entry::Occupied(mut slot) => {
			let existing = slot.get().lookup.to_string();
			let incoming = plan.lookup.to_string();
			let existing_explicit = explicit.contains(slot.key());

			let settled_by = if existing_explicit == from_entry {
				Precedence::Policy(policy)
			} else {
				Precedence::ExplicitEntry
			};
			let replace = match settled_by {
				Precedence::ExplicitEntry => from_entry,
				Precedence::Policy(CollisionPolicy::FirstWins) => false,
				Precedence::Policy(CollisionPolicy::LastWins) => true,
			};

			let (kept, dropped) = if replace {
				slot.insert(plan);
				if from_entry {
					explicit.insert(slot.key().clone());
				} else {
					explicit.remove(slot.key());
				}
				(incoming, existing)
			} else {
				(existing, incoming)
			};
			tracing::debug!(
				%composed,
				exposed = %slot.key(),
				%kept,
				%dropped,
				?settled_by,
				"exposed name collision"
			);
			out.collisions.push(Collision {
				exposed: slot.key().clone(),
				kept,
				dropped,
				settled_by,
			});
		}
	}
}
