//! Validated in-memory grammar.

use moltree_descriptor::SymbolKind;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
	pub id: u16,
	pub name: String,
	pub kind: SymbolKind,
}

/// Symbol id to name mapping, with a reverse index for named and anonymous
/// symbols.
///
/// Ids are dense: the symbol with id `n` is at position `n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolTable {
	symbols: Vec<Symbol>,
	named: FxHashMap<String, u16>,
	anonymous: FxHashMap<String, u16>,
}

impl SymbolTable {
	/// Builds the table from symbols already checked to have dense ids.
	///
	/// When a name repeats within a kind, lookups resolve to the lowest id.
	pub(crate) fn from_dense(symbols: Vec<Symbol>) -> Self {
		let mut named = FxHashMap::default();
		let mut anonymous = FxHashMap::default();
		for symbol in &symbols {
			let index = match symbol.kind {
				SymbolKind::Named => &mut named,
				SymbolKind::Anonymous => &mut anonymous,
				SymbolKind::Auxiliary => continue,
			};
			index.entry(symbol.name.clone()).or_insert(symbol.id);
		}
		Self {
			symbols,
			named,
			anonymous,
		}
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	pub fn get(&self, id: u16) -> Option<&Symbol> {
		self.symbols.get(usize::from(id))
	}

	pub fn name(&self, id: u16) -> Option<&str> {
		self.get(id).map(|s| s.name.as_str())
	}

	/// Looks up a visible symbol by name. Auxiliary symbols are not indexed.
	pub fn id_for(&self, name: &str, named: bool) -> Option<u16> {
		let index = if named { &self.named } else { &self.anonymous };
		index.get(name).copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
		self.symbols.iter()
	}
}

/// A grammar that passed validation and is ready for a parsing engine.
///
/// Handles are only produced by [`crate::GrammarLoader::load`], so every
/// handle is internally consistent. Handles share nothing with each other or
/// with the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageHandle {
	pub(crate) name: String,
	pub(crate) format_version: u32,
	pub(crate) symbols: SymbolTable,
	pub(crate) fields: Vec<String>,
	pub(crate) rules: Vec<u8>,
}

impl LanguageHandle {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn format_version(&self) -> u32 {
		self.format_version
	}

	pub fn symbol_table(&self) -> &SymbolTable {
		&self.symbols
	}

	pub fn symbol_count(&self) -> usize {
		self.symbols.len()
	}

	pub fn symbol_name(&self, id: u16) -> Option<&str> {
		self.symbols.name(id)
	}

	pub fn symbol_kind(&self, id: u16) -> Option<SymbolKind> {
		self.symbols.get(id).map(|s| s.kind)
	}

	/// Equivalent of tree-sitter's `id_for_node_kind`.
	pub fn id_for_symbol(&self, name: &str, named: bool) -> Option<u16> {
		self.symbols.id_for(name, named)
	}

	/// Number of named fields. Always zero for format version 1.
	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Field name for a 1-based field id.
	pub fn field_name(&self, id: u16) -> Option<&str> {
		let index = usize::from(id).checked_sub(1)?;
		self.fields.get(index).map(String::as_str)
	}

	pub fn field_id(&self, name: &str) -> Option<u16> {
		self.fields.iter().position(|f| f == name).map(|i| i as u16 + 1)
	}

	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(String::as_str)
	}

	/// Opaque rule table, passed through unchanged from the descriptor.
	pub fn rule_table(&self) -> &[u8] {
		&self.rules
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sym(id: u16, name: &str, kind: SymbolKind) -> Symbol {
		Symbol {
			id,
			name: name.to_string(),
			kind,
		}
	}

	fn table() -> SymbolTable {
		SymbolTable::from_dense(vec![
			sym(0, "end", SymbolKind::Auxiliary),
			sym(1, "identifier", SymbolKind::Named),
			sym(2, "identifier", SymbolKind::Anonymous),
			sym(3, "identifier", SymbolKind::Named),
		])
	}

	#[test]
	fn lookup_by_id() {
		let table = table();
		assert_eq!(table.len(), 4);
		assert_eq!(table.name(1), Some("identifier"));
		assert_eq!(table.get(2).map(|s| s.kind), Some(SymbolKind::Anonymous));
		assert_eq!(table.name(4), None);
	}

	#[test]
	fn reverse_lookup_separates_kinds() {
		let table = table();
		assert_eq!(table.id_for("identifier", true), Some(1));
		assert_eq!(table.id_for("identifier", false), Some(2));
	}

	#[test]
	fn auxiliary_symbols_are_not_indexed() {
		let table = table();
		assert_eq!(table.id_for("end", true), None);
		assert_eq!(table.id_for("end", false), None);
	}

	#[test]
	fn field_ids_start_at_one() {
		let handle = LanguageHandle {
			name: "demo".into(),
			format_version: 2,
			symbols: SymbolTable::default(),
			fields: vec!["name".into(), "type".into()],
			rules: Vec::new(),
		};
		assert_eq!(handle.field_name(0), None);
		assert_eq!(handle.field_name(1), Some("name"));
		assert_eq!(handle.field_name(2), Some("type"));
		assert_eq!(handle.field_name(3), None);
		assert_eq!(handle.field_id("type"), Some(2));
		assert_eq!(handle.field_id("missing"), None);
	}
}
