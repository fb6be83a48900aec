//! Error types for grammar loading.

use std::path::PathBuf;

use moltree_descriptor::HeaderError;
use thiserror::Error;

/// Why a descriptor was rejected by [`crate::GrammarLoader::load`].
///
/// Every variant is deterministic in the input bytes; retrying the same
/// descriptor always fails the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
	/// The descriptor contains no data.
	#[error("grammar descriptor is empty")]
	Empty,

	/// The bytes do not form a valid grammar table.
	#[error("malformed grammar descriptor: {0}")]
	Malformed(#[from] Malformed),

	/// The format version lies outside what the loader accepts.
	#[error("unsupported descriptor format version {found} (supported {min}..={max})")]
	UnsupportedVersion { found: u32, min: u32, max: u32 },
}

/// Detail for [`LoadError::Malformed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Malformed {
	#[error("header truncated at {len} bytes")]
	TruncatedHeader { len: usize },

	#[error("unrecognized format marker")]
	BadMagic,

	#[error("payload could not be decoded: {0}")]
	Payload(#[from] postcard::Error),

	#[error("{count} unexpected bytes after tables")]
	TrailingBytes { count: usize },

	#[error("language name is empty")]
	EmptyName,

	#[error("declared {declared} symbols but table holds {actual}")]
	SymbolCountMismatch { declared: u32, actual: usize },

	#[error("symbol at index {index} has id {id}")]
	SymbolIdOutOfOrder { index: usize, id: u16 },

	#[error("symbol {id} has an empty name")]
	EmptySymbolName { id: u16 },

	#[error("field {id} has an empty name")]
	EmptyFieldName { id: u16 },

	#[error("{count} fields exceed the 16-bit field id space")]
	TooManyFields { count: usize },

	#[error("duplicate field name: '{0}'")]
	DuplicateField(String),
}

impl From<HeaderError> for LoadError {
	fn from(err: HeaderError) -> Self {
		match err {
			HeaderError::Empty => Self::Empty,
			HeaderError::Truncated { len } => Malformed::TruncatedHeader { len }.into(),
			HeaderError::BadMagic => Malformed::BadMagic.into(),
		}
	}
}

/// Invalid [`crate::LoaderConfig`] values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
	#[error("version window {min}..={max} is empty")]
	EmptyWindow { min: u32, max: u32 },

	#[error("version window {min}..={max} exceeds supported range {supported_min}..={supported_max}")]
	OutOfRange {
		min: u32,
		max: u32,
		supported_min: u32,
		supported_max: u32,
	},

	#[error("invalid value for {var}: '{value}'")]
	InvalidEnv { var: &'static str, value: String },
}

/// Errors from loading a grammar through a [`crate::GrammarSource`].
#[derive(Debug, Error)]
pub enum GrammarError {
	#[error("grammar not found: {0}")]
	NotFound(String),

	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	#[error(transparent)]
	Load(#[from] LoadError),
}

/// Result type for descriptor loading.
pub type Result<T> = std::result::Result<T, LoadError>;
