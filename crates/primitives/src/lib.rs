//! Core value types shared by the composition engine and its manifest loader.

/// Dynamically typed arguments and results.
pub mod value;

pub use value::Value;
