//! Loader configuration.

use std::env::VarError;

use moltree_descriptor::{MAX_FORMAT_VERSION, MIN_FORMAT_VERSION};

use crate::error::ConfigError;

/// Environment variable capping the accepted format version.
pub const MAX_VERSION_ENV: &str = "MOLTREE_MAX_FORMAT_VERSION";

/// Format versions a [`crate::GrammarLoader`] accepts.
///
/// The window can only be narrowed relative to what this build can decode,
/// e.g. to pin a deployment to version 1 descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
	min_version: u32,
	max_version: u32,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			min_version: MIN_FORMAT_VERSION,
			max_version: MAX_FORMAT_VERSION,
		}
	}
}

impl LoaderConfig {
	pub fn new(min_version: u32, max_version: u32) -> Result<Self, ConfigError> {
		if min_version > max_version {
			return Err(ConfigError::EmptyWindow {
				min: min_version,
				max: max_version,
			});
		}
		if min_version < MIN_FORMAT_VERSION || max_version > MAX_FORMAT_VERSION {
			return Err(ConfigError::OutOfRange {
				min: min_version,
				max: max_version,
				supported_min: MIN_FORMAT_VERSION,
				supported_max: MAX_FORMAT_VERSION,
			});
		}
		Ok(Self { min_version, max_version })
	}

	/// Default window, capped by [`MAX_VERSION_ENV`] when set.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_env_value(std::env::var(MAX_VERSION_ENV))
	}

	fn from_env_value(value: Result<String, VarError>) -> Result<Self, ConfigError> {
		let value = match value {
			Ok(value) => value,
			Err(VarError::NotPresent) => return Ok(Self::default()),
			Err(VarError::NotUnicode(raw)) => {
				return Err(ConfigError::InvalidEnv {
					var: MAX_VERSION_ENV,
					value: raw.to_string_lossy().into_owned(),
				});
			}
		};
		let max = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
			var: MAX_VERSION_ENV,
			value: value.clone(),
		})?;
		Self::default().with_max_version(max)
	}

	pub fn with_max_version(self, max_version: u32) -> Result<Self, ConfigError> {
		Self::new(self.min_version, max_version)
	}

	pub fn min_version(&self) -> u32 {
		self.min_version
	}

	pub fn max_version(&self) -> u32 {
		self.max_version
	}

	pub fn supports(&self, version: u32) -> bool {
		(self.min_version..=self.max_version).contains(&version)
	}
}
