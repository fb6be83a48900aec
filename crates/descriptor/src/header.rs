//! Descriptor header handling.

use std::mem::size_of;

use thiserror::Error;

/// Magic bytes identifying a compiled moltree grammar descriptor.
pub const MAGIC: &[u8; 8] = b"MOLTGRAM";

/// Oldest payload layout this build understands.
pub const MIN_FORMAT_VERSION: u32 = 1;

/// Newest payload layout this build understands.
pub const MAX_FORMAT_VERSION: u32 = 2;

/// Total header size in bytes (magic + version).
pub const HEADER_SIZE: usize = MAGIC.len() + size_of::<u32>();

/// Decoded descriptor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	pub version: u32,
}

impl Header {
	/// Serializes the header into its on-disk form.
	pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
		let mut out = [0u8; HEADER_SIZE];
		out[..MAGIC.len()].copy_from_slice(MAGIC);
		out[MAGIC.len()..].copy_from_slice(&self.version.to_le_bytes());
		out
	}
}

/// Reasons a header could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
	#[error("descriptor is empty")]
	Empty,
	#[error("descriptor truncated: {len} bytes, header needs {HEADER_SIZE}")]
	Truncated { len: usize },
	#[error("descriptor magic mismatch")]
	BadMagic,
}

/// Validates the header and returns it along with the payload slice.
///
/// Only the layout is checked here; whether the version is acceptable is up to
/// the caller.
pub fn split_header(data: &[u8]) -> Result<(Header, &[u8]), HeaderError> {
	if data.is_empty() {
		return Err(HeaderError::Empty);
	}
	if data.len() < HEADER_SIZE {
		return Err(HeaderError::Truncated { len: data.len() });
	}
	let (magic, rest) = data.split_at(MAGIC.len());
	if magic != MAGIC {
		return Err(HeaderError::BadMagic);
	}
	let (version, payload) = rest.split_at(size_of::<u32>());
	let version = u32::from_le_bytes([version[0], version[1], version[2], version[3]]);
	Ok((Header { version }, payload))
}
