//! Compiled grammar descriptor format.
//!
//! A descriptor is what the grammar compiler hands to the loader: a fixed
//! header followed by postcard-encoded tables.
//!
//! ```text
//! offset  size  field
//! 0       8     magic (b"MOLTGRAM")
//! 8       4     format version, little endian u32
//! 12      ..    payload (`TablesV1` or `TablesV2`, selected by version)
//! ```
//!
//! Postcard writes every string and sequence with a varint length prefix, so
//! the payload is a chain of length-prefixed tables.
//!
//! The `compile` feature adds the writer side ([`compile`]) used by build
//! scripts and tests.

pub mod header;
pub mod tables;

#[cfg(feature = "compile")]
pub mod compile;

pub use header::{HEADER_SIZE, Header, HeaderError, MAGIC, MAX_FORMAT_VERSION, MIN_FORMAT_VERSION, split_header};
pub use tables::{SymbolEntry, SymbolKind, TablesV1, TablesV2};
