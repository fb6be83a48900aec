//! Grammar descriptor loading.
//!
//! A grammar compiler produces an opaque descriptor blob (see
//! `moltree_descriptor` for the layout). [`GrammarLoader::load`] validates that
//! blob and returns a [`LanguageHandle`] a parsing engine can use, or a typed
//! [`LoadError`]. There is no global registry: grammars are passed in as bytes,
//! either directly or through a [`GrammarSource`].
//!
//! ```
//! # fn demo(bytes: &[u8]) {
//! match moltree_loader::load(bytes) {
//! 	Ok(language) => println!("{} has {} symbols", language.name(), language.symbol_count()),
//! 	Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```
//!
//! # Modules
//!
//! * [`loader`]: header, version and table validation
//! * [`handle`]: the validated [`LanguageHandle`] and its [`SymbolTable`]
//! * [`config`]: supported format version window
//! * [`source`]: file-backed grammars and search paths

pub mod config;
pub mod error;
pub mod handle;
pub mod loader;
pub mod source;

pub use config::LoaderConfig;
pub use error::{ConfigError, GrammarError, LoadError, Malformed};
pub use handle::{LanguageHandle, Symbol, SymbolTable};
pub use loader::{GrammarLoader, load};
pub use moltree_descriptor::{MAX_FORMAT_VERSION, MIN_FORMAT_VERSION, SymbolKind};
pub use source::{GrammarSource, find_grammar, grammar_search_paths, load_grammar};
