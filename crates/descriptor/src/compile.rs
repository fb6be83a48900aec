//! Writer side of the descriptor format.
//!
//! Gated behind the `compile` feature. Build scripts use [`BuildCtx`] and
//! [`GrammarAsset`] to turn a JSON grammar inventory into a descriptor blob
//! under `OUT_DIR`; tests use [`DescriptorBuilder`] and [`encode_tables`]
//! directly.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::header::{Header, MAX_FORMAT_VERSION};
use crate::tables::{SymbolEntry, SymbolKind, TablesV1, TablesV2};

/// Prepends a header for `version` to the postcard encoding of `tables`.
///
/// No consistency checks are made, so this can produce descriptors the loader
/// rejects.
pub fn encode_tables<T: Serialize>(version: u32, tables: &T) -> postcard::Result<Vec<u8>> {
	let mut out = Header { version }.to_bytes().to_vec();
	out.extend(postcard::to_stdvec(tables)?);
	Ok(out)
}

/// Incrementally assembles a well-formed descriptor.
///
/// Symbol ids are assigned in insertion order starting at 0, so at most
/// `u16::MAX + 1` symbols fit. Field names are only written for format
/// version 2 and later.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
	version: u32,
	name: String,
	symbols: Vec<(String, SymbolKind)>,
	fields: Vec<String>,
	rules: Vec<u8>,
}

impl DescriptorBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			version: MAX_FORMAT_VERSION,
			name: name.into(),
			symbols: Vec::new(),
			fields: Vec::new(),
			rules: Vec::new(),
		}
	}

	pub fn version(mut self, version: u32) -> Self {
		self.version = version;
		self
	}

	pub fn symbol(mut self, name: impl Into<String>, kind: SymbolKind) -> Self {
		self.symbols.push((name.into(), kind));
		self
	}

	pub fn field(mut self, name: impl Into<String>) -> Self {
		self.fields.push(name.into());
		self
	}

	pub fn rules(mut self, rules: impl Into<Vec<u8>>) -> Self {
		self.rules = rules.into();
		self
	}

	/// Encodes the descriptor using the payload layout of the chosen version.
	pub fn build(self) -> Result<Vec<u8>, BuildError> {
		let count = self.symbols.len();
		let symbols = self
			.symbols
			.into_iter()
			.enumerate()
			.map(|(index, (name, kind))| {
				let id = u16::try_from(index).map_err(|_| BuildError::TooManySymbols { count })?;
				Ok(SymbolEntry { id, name, kind })
			})
			.collect::<Result<Vec<_>, BuildError>>()?;
		let symbol_count = count as u32;

		if self.version < 2 {
			let tables = TablesV1 {
				name: self.name,
				symbol_count,
				symbols,
				rules: self.rules,
			};
			return Ok(encode_tables(self.version, &tables)?);
		}
		let tables = TablesV2 {
			name: self.name,
			symbol_count,
			symbols,
			fields: self.fields,
			rules: self.rules,
		};
		Ok(encode_tables(self.version, &tables)?)
	}
}

/// Errors from [`DescriptorBuilder::build`].
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("{count} symbols exceed the 16-bit symbol id space")]
	TooManySymbols { count: usize },
	#[error("failed to encode descriptor: {0}")]
	Encode(#[from] postcard::Error),
}

/// Errors raised while compiling a grammar asset.
#[derive(Debug, Error)]
pub enum AssetError {
	#[error("failed to parse grammar asset: {0}")]
	Json(#[from] serde_json::Error),
	#[error(transparent)]
	Build(#[from] BuildError),
	#[error("duplicate {kind:?} symbol: '{name}'")]
	DuplicateSymbol { name: String, kind: SymbolKind },
	#[error("duplicate field: '{0}'")]
	DuplicateField(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetSymbol {
	pub name: String,
	pub kind: SymbolKind,
}

/// JSON grammar inventory as checked into a grammar crate.
#[derive(Debug, Clone, Deserialize)]
pub struct GrammarAsset {
	pub name: String,
	#[serde(default = "default_version")]
	pub version: u32,
	pub symbols: Vec<AssetSymbol>,
	#[serde(default)]
	pub fields: Vec<String>,
	/// Stored verbatim (re-serialized as compact JSON) as the opaque rule table.
	#[serde(default)]
	pub rules: serde_json::Value,
}

fn default_version() -> u32 {
	MAX_FORMAT_VERSION
}

impl GrammarAsset {
	pub fn from_json(text: &str) -> Result<Self, AssetError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Validates uniqueness and encodes the asset as a descriptor.
	///
	/// A name may appear once as a named symbol and once as an anonymous one,
	/// matching how tree-sitter distinguishes `identifier` from `"identifier"`.
	pub fn compile(&self) -> Result<Vec<u8>, AssetError> {
		let mut seen = HashSet::new();
		for symbol in &self.symbols {
			if !seen.insert((symbol.name.as_str(), symbol.kind)) {
				return Err(AssetError::DuplicateSymbol {
					name: symbol.name.clone(),
					kind: symbol.kind,
				});
			}
		}
		let mut seen = HashSet::new();
		for field in &self.fields {
			if !seen.insert(field.as_str()) {
				return Err(AssetError::DuplicateField(field.clone()));
			}
		}

		let rules = match &self.rules {
			serde_json::Value::Null => Vec::new(),
			value => serde_json::to_vec(value)?,
		};
		let builder = self
			.symbols
			.iter()
			.fold(DescriptorBuilder::new(&self.name).version(self.version), |b, s| b.symbol(&s.name, s.kind));
		let builder = self.fields.iter().fold(builder, |b, f| b.field(f));
		Ok(builder.rules(rules).build()?)
	}
}

/// Writes a descriptor to `path`, creating or truncating it.
pub fn write_descriptor(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
	let mut file = fs::File::create(path)?;
	file.write_all(bytes)
}

/// Paths and cargo plumbing for grammar build scripts.
pub struct BuildCtx {
	pub manifest_dir: PathBuf,
	pub out_dir: PathBuf,
}

impl Default for BuildCtx {
	fn default() -> Self {
		Self::new()
	}
}

impl BuildCtx {
	/// Reads `CARGO_MANIFEST_DIR` and `OUT_DIR`. Only valid inside a build script.
	pub fn new() -> Self {
		let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
		let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR not set"));
		Self { manifest_dir, out_dir }
	}

	pub fn asset(&self, rel: &str) -> PathBuf {
		self.manifest_dir.join(rel)
	}

	pub fn rerun_if_changed(&self, path: &Path) {
		println!("cargo:rerun-if-changed={}", path.display());
	}

	/// Compiles the JSON asset at `rel` into `OUT_DIR/<out_name>`.
	pub fn compile_asset(&self, rel: &str, out_name: &str) {
		let path = self.asset(rel);
		self.rerun_if_changed(&path);
		let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
		let bytes = GrammarAsset::from_json(&text)
			.and_then(|asset| asset.compile())
			.unwrap_or_else(|e| panic!("failed to compile {}: {e}", path.display()));
		let out = self.out_dir.join(out_name);
		write_descriptor(&out, &bytes).unwrap_or_else(|e| panic!("failed to write {}: {e}", out.display()));
	}
}
