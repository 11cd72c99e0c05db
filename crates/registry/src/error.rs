//! Error types for composition, invocation, and expansion.

/// Failures surfaced by the composition engine.
///
/// Every error is returned synchronously to the immediate caller; nothing is
/// retried internally. A failed composition publishes nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MixError {
	/// The base or a listed mixin does not name a defined source type.
	#[error("unknown source type: {name}")]
	UnknownSourceType { name: String },

	/// An ordered or renaming combinator entry names a source that does not
	/// define the target method.
	#[error("combinator for {method:?} draws from {source_name:?}, which does not define it")]
	UnresolvedCombinatorSource { method: String, source_name: String },

	/// Composition (or source definition) requested under a name already in use.
	#[error("type name already registered: {name}")]
	DuplicateTypeName { name: String },

	/// Invocation of an exposed name absent from the dispatch table.
	#[error("{composed} has no method {method:?}")]
	NoSuchMethod { composed: String, method: String },

	/// Expansion requested against a name that was never synthesized.
	#[error("unknown composed type: {name}")]
	UnknownComposedType { name: String },

	/// A merge function was referenced by name but never registered.
	#[error("unknown combinator: {name}")]
	UnknownCombinator { name: String },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, MixError>;
