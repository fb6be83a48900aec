//! Descriptor validation.
//!
//! Checks run in a fixed order so each input maps to exactly one error:
//! emptiness, header length, magic, version window, payload decoding, table
//! consistency.

use std::collections::HashSet;

use moltree_descriptor::{TablesV1, TablesV2, split_header};

use crate::config::LoaderConfig;
use crate::error::{LoadError, Malformed, Result};
use crate::handle::{LanguageHandle, Symbol, SymbolTable};

/// Converts grammar descriptors into [`LanguageHandle`]s.
///
/// The loader holds only its configuration, so it is cheap to copy and can be
/// shared across threads freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarLoader {
	config: LoaderConfig,
}

impl GrammarLoader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: LoaderConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Validates `descriptor` and builds a handle from it.
	pub fn load(&self, descriptor: impl AsRef<[u8]>) -> Result<LanguageHandle> {
		let (header, payload) = split_header(descriptor.as_ref())?;
		if !self.config.supports(header.version) {
			return Err(LoadError::UnsupportedVersion {
				found: header.version,
				min: self.config.min_version(),
				max: self.config.max_version(),
			});
		}

		let tables = decode_tables(header.version, payload)?;
		let handle = build_handle(header.version, tables)?;
		tracing::debug!(
			language = %handle.name,
			version = handle.format_version,
			symbols = handle.symbols.len(),
			fields = handle.fields.len(),
			"loaded grammar descriptor"
		);
		Ok(handle)
	}
}

/// Loads `descriptor` with the default configuration.
pub fn load(descriptor: impl AsRef<[u8]>) -> Result<LanguageHandle> {
	GrammarLoader::new().load(descriptor)
}

fn decode_tables(version: u32, payload: &[u8]) -> std::result::Result<TablesV2, Malformed> {
	// The version window was checked by the caller; anything past 1 uses the v2 layout.
	let (tables, rest) = match version {
		1 => {
			let (v1, rest) = postcard::take_from_bytes::<TablesV1>(payload)?;
			(TablesV2::from(v1), rest)
		}
		_ => postcard::take_from_bytes::<TablesV2>(payload)?,
	};
	if !rest.is_empty() {
		return Err(Malformed::TrailingBytes { count: rest.len() });
	}
	Ok(tables)
}

fn build_handle(format_version: u32, tables: TablesV2) -> std::result::Result<LanguageHandle, Malformed> {
	if tables.name.is_empty() {
		return Err(Malformed::EmptyName);
	}
	if usize::try_from(tables.symbol_count).ok() != Some(tables.symbols.len()) {
		return Err(Malformed::SymbolCountMismatch {
			declared: tables.symbol_count,
			actual: tables.symbols.len(),
		});
	}

	let mut symbols = Vec::with_capacity(tables.symbols.len());
	for (index, entry) in tables.symbols.into_iter().enumerate() {
		if usize::from(entry.id) != index {
			return Err(Malformed::SymbolIdOutOfOrder { index, id: entry.id });
		}
		if entry.name.is_empty() {
			return Err(Malformed::EmptySymbolName { id: entry.id });
		}
		symbols.push(Symbol {
			id: entry.id,
			name: entry.name,
			kind: entry.kind,
		});
	}

	check_fields(&tables.fields)?;

	Ok(LanguageHandle {
		name: tables.name,
		format_version,
		symbols: SymbolTable::from_dense(symbols),
		fields: tables.fields,
		rules: tables.rules,
	})
}

fn check_fields(fields: &[String]) -> std::result::Result<(), Malformed> {
	// Field ids are 1-based, so u16::MAX fields fill the id space exactly.
	if fields.len() > usize::from(u16::MAX) {
		return Err(Malformed::TooManyFields { count: fields.len() });
	}
	let mut seen = HashSet::with_capacity(fields.len());
	for (index, field) in fields.iter().enumerate() {
		if field.is_empty() {
			return Err(Malformed::EmptyFieldName { id: index as u16 + 1 });
		}
		if !seen.insert(field.as_str()) {
			return Err(Malformed::DuplicateField(field.clone()));
		}
	}
	Ok(())
}
