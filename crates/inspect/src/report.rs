//! Human and JSON rendering of a loaded grammar.

use std::fmt;

use moltree_loader::{LanguageHandle, Symbol, SymbolKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
	pub name: &'a str,
	pub format_version: u32,
	pub symbol_count: usize,
	pub field_count: usize,
	pub rule_table_len: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub symbols: Option<Vec<&'a Symbol>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fields: Option<Vec<&'a str>>,
}

impl<'a> Report<'a> {
	pub fn new(handle: &'a LanguageHandle, include_tables: bool) -> Self {
		Self {
			name: handle.name(),
			format_version: handle.format_version(),
			symbol_count: handle.symbol_count(),
			field_count: handle.field_count(),
			rule_table_len: handle.rule_table().len(),
			symbols: include_tables.then(|| handle.symbol_table().iter().collect()),
			fields: include_tables.then(|| handle.fields().collect()),
		}
	}
}

fn kind_label(kind: SymbolKind) -> &'static str {
	match kind {
		SymbolKind::Named => "named",
		SymbolKind::Anonymous => "anonymous",
		SymbolKind::Auxiliary => "auxiliary",
	}
}

impl fmt::Display for Report<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "language:       {}", self.name)?;
		writeln!(f, "format version: {}", self.format_version)?;
		writeln!(f, "symbols:        {}", self.symbol_count)?;
		writeln!(f, "fields:         {}", self.field_count)?;
		writeln!(f, "rule table:     {} bytes", self.rule_table_len)?;

		if let Some(symbols) = &self.symbols {
			writeln!(f, "\nsymbol table:")?;
			for symbol in symbols {
				writeln!(f, "  {:>4}  {:<24} {}", symbol.id, symbol.name, kind_label(symbol.kind))?;
			}
		}
		if let Some(fields) = &self.fields
			&& !fields.is_empty()
		{
			writeln!(f, "\nfield table:")?;
			for (index, name) in fields.iter().enumerate() {
				writeln!(f, "  {:>4}  {name}", index + 1)?;
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn summary_omits_tables() {
		let handle = moltree_grammar::language().unwrap();
		let text = Report::new(&handle, false).to_string();
		assert!(text.starts_with("language:       moltree\n"));
		assert!(text.contains("format version: 2\n"));
		assert!(!text.contains("symbol table:"));
	}

	#[test]
	fn tables_list_every_symbol_and_field() {
		let handle = moltree_grammar::language().unwrap();
		let text = Report::new(&handle, true).to_string();
		assert!(text.contains("symbol table:"));
		assert!(text.contains("<=>"));
		assert!(text.contains("auxiliary"));
		assert!(text.contains("field table:"));
		assert_eq!(text.lines().filter(|l| l.starts_with("  ")).count(), handle.symbol_count() + handle.field_count());
	}

	#[test]
	fn json_skips_absent_tables() {
		let handle = moltree_grammar::language().unwrap();
		let value = serde_json::to_value(Report::new(&handle, false)).unwrap();
		assert_eq!(value["name"], "moltree");
		assert!(value.get("symbols").is_none());

		let value = serde_json::to_value(Report::new(&handle, true)).unwrap();
		assert_eq!(value["symbols"][0]["kind"], "auxiliary");
	}
}
