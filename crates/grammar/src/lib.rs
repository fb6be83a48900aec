//! The view.tree grammar, compiled at build time.
//!
//! `build.rs` turns `assets/moltree.json` into a descriptor under `OUT_DIR`;
//! this crate embeds it and exposes it through [`language`].

use moltree_loader::{GrammarSource, LanguageHandle, LoadError};

/// Name recorded in the descriptor.
pub const LANGUAGE_NAME: &str = "moltree";

/// File extensions handled by this grammar.
pub const FILE_EXTENSIONS: &[&str] = &["view.tree"];

/// The compiled grammar descriptor.
pub static DESCRIPTOR: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/moltree.bin"));

/// Loads the bundled grammar.
pub fn language() -> Result<LanguageHandle, LoadError> {
	moltree_loader::load(DESCRIPTOR)
}

/// The bundled grammar as a [`GrammarSource`].
pub fn source() -> GrammarSource {
	GrammarSource::Static(DESCRIPTOR)
}
