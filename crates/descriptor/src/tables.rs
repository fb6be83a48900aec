//! Payload tables, one struct per format version.

use serde::{Deserialize, Serialize};

/// Visibility class of a grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
	/// Rule or regex terminal, visible as a named node.
	Named,
	/// Literal token such as `{` or `<=>`.
	Anonymous,
	/// Helper symbol introduced by the grammar compiler.
	Auxiliary,
}

impl SymbolKind {
	pub fn is_named(self) -> bool {
		matches!(self, Self::Named)
	}
}

/// One row of the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
	pub id: u16,
	pub name: String,
	pub kind: SymbolKind,
}

/// Version 1 payload.
///
/// `symbol_count` is written separately from `symbols` so that a compiler bug
/// or a spliced table is caught by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesV1 {
	pub name: String,
	pub symbol_count: u32,
	pub symbols: Vec<SymbolEntry>,
	/// Opaque rule table, passed through to the parsing engine.
	pub rules: Vec<u8>,
}

/// Version 2 payload: version 1 plus the field-name table.
///
/// Field ids are 1-based; id 0 is reserved for "no field".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesV2 {
	pub name: String,
	pub symbol_count: u32,
	pub symbols: Vec<SymbolEntry>,
	pub fields: Vec<String>,
	pub rules: Vec<u8>,
}

impl From<TablesV1> for TablesV2 {
	fn from(v1: TablesV1) -> Self {
		Self {
			name: v1.name,
			symbol_count: v1.symbol_count,
			symbols: v1.symbols,
			fields: Vec::new(),
			rules: v1.rules,
		}
	}
}
