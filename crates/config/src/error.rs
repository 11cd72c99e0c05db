//! Error types for manifest parsing and application.

use std::path::PathBuf;

use classmix_registry::MixError;
use thiserror::Error;

/// Errors that can occur when loading or applying a manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or manifest structure.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a manifest file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A `[[compose]]` entry was rejected by the engine.
	#[error("composing {name}: {error}")]
	Compose {
		/// Requested composed type name.
		name: String,
		#[source]
		error: MixError,
	},

	/// An `[[expand]]` entry was rejected by the engine.
	#[error("expanding {target} with {mixin}: {error}")]
	Expand {
		target: String,
		mixin: String,
		#[source]
		error: MixError,
	},
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
