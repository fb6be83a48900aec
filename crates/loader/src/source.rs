//! Grammar sources and search paths.
//!
//! Compiled descriptors live in `<name>.bin` files. This module resolves a
//! grammar name against the runtime directories and reads the file; the bytes
//! then go through the same [`GrammarLoader`] as in-memory descriptors.

use std::path::PathBuf;

use crate::error::GrammarError;
use crate::handle::LanguageHandle;
use crate::loader::GrammarLoader;

/// Environment variable pointing at a development runtime directory.
pub const RUNTIME_ENV: &str = "MOLTREE_RUNTIME";

/// File extension of compiled descriptors.
pub const DESCRIPTOR_EXTENSION: &str = "bin";

/// Where a descriptor comes from.
#[derive(Debug, Clone)]
pub enum GrammarSource {
	/// Read from a descriptor file.
	Path(PathBuf),
	/// Descriptor embedded in the binary, e.g. by a grammar crate's build script.
	Static(&'static [u8]),
}

/// Loads a grammar from `source`.
pub fn load_grammar(loader: &GrammarLoader, source: &GrammarSource) -> Result<LanguageHandle, GrammarError> {
	match source {
		GrammarSource::Path(path) => {
			let bytes = std::fs::read(path).map_err(|error| GrammarError::Io {
				path: path.clone(),
				error,
			})?;
			tracing::debug!(path = %path.display(), len = bytes.len(), "read grammar descriptor");
			Ok(loader.load(bytes)?)
		}
		GrammarSource::Static(bytes) => Ok(loader.load(bytes)?),
	}
}

/// Finds `<name>.bin` in the first directory of `dirs` that has it.
pub fn find_grammar(name: &str, dirs: &[PathBuf]) -> Result<GrammarSource, GrammarError> {
	let file_name = format!("{name}.{DESCRIPTOR_EXTENSION}");
	dirs.iter()
		.map(|dir| dir.join(&file_name))
		.find(|path| path.is_file())
		.map(|path| {
			tracing::debug!(grammar = name, path = %path.display(), "resolved grammar");
			GrammarSource::Path(path)
		})
		.ok_or_else(|| GrammarError::NotFound(name.to_string()))
}

/// Returns runtime directories where grammars are searched.
/// Order: `MOLTREE_RUNTIME`, user config dir, user data dir, bundled dirs.
pub fn grammar_search_paths() -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(runtime) = std::env::var_os(RUNTIME_ENV) {
		paths.push(PathBuf::from(runtime).join("grammars"));
	}

	// ~/.config/moltree/grammars/
	if let Some(config_dir) = dirs::config_dir() {
		paths.push(config_dir.join("moltree").join("grammars"));
	}

	if let Some(data_dir) = dirs::data_local_dir() {
		paths.push(data_dir.join("moltree").join("grammars"));
	}

	// Bundled grammars relative to executable
	if let Ok(exe_path) = std::env::current_exe()
		&& let Some(exe_dir) = exe_path.parent()
	{
		paths.push(exe_dir.join("grammars"));
		paths.push(exe_dir.join("..").join("share").join("moltree").join("grammars"));
	}

	paths
}

#[cfg(test)]
mod tests {
	use moltree_descriptor::SymbolKind;
	use moltree_descriptor::compile::DescriptorBuilder;

	use super::*;
	use crate::error::LoadError;

	#[test]
	fn search_paths_not_empty() {
		// Should have at least the exe-relative path
		assert!(!grammar_search_paths().is_empty());
	}

	#[test]
	fn first_directory_wins() {
		let first = tempfile::tempdir().unwrap();
		let second = tempfile::tempdir().unwrap();
		std::fs::write(second.path().join("demo.bin"), b"x").unwrap();
		std::fs::write(first.path().join("demo.bin"), b"y").unwrap();

		let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
		match find_grammar("demo", &dirs).unwrap() {
			GrammarSource::Path(path) => assert_eq!(path, first.path().join("demo.bin")),
			other => panic!("unexpected source {other:?}"),
		}
	}

	#[test]
	fn missing_grammar() {
		let dir = tempfile::tempdir().unwrap();
		let err = find_grammar("absent", &[dir.path().to_path_buf()]).unwrap_err();
		assert!(matches!(err, GrammarError::NotFound(name) if name == "absent"));
	}

	#[test]
	fn load_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("demo.bin");
		let bytes = DescriptorBuilder::new("demo")
			.symbol("identifier", SymbolKind::Named)
			.build()
			.unwrap();
		std::fs::write(&path, bytes).unwrap();

		let handle = load_grammar(&GrammarLoader::new(), &GrammarSource::Path(path)).unwrap();
		assert_eq!(handle.name(), "demo");
	}

	#[test]
	fn unreadable_file_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nope.bin");
		let err = load_grammar(&GrammarLoader::new(), &GrammarSource::Path(path.clone())).unwrap_err();
		assert!(matches!(err, GrammarError::Io { path: p, .. } if p == path));
	}

	#[test]
	fn load_errors_pass_through() {
		let err = load_grammar(&GrammarLoader::new(), &GrammarSource::Static(b"")).unwrap_err();
		assert!(matches!(err, GrammarError::Load(LoadError::Empty)));
	}
}
