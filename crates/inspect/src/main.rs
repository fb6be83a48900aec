//! moltree-inspect binary.
//!
//! Loads a compiled grammar descriptor from a file, from the grammar search
//! paths, or from the grammar bundled with the binary, and prints a summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use moltree_loader::{GrammarLoader, GrammarSource, LoaderConfig, find_grammar, grammar_search_paths, load_grammar};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;

use report::Report;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "MOLTREE_LOG";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "moltree-inspect")]
#[command(about = "Load a compiled grammar descriptor and print its tables")]
struct Args {
	/// Descriptor file to load
	#[arg(value_name = "PATH", conflicts_with_all = ["name", "builtin"])]
	path: Option<PathBuf>,

	/// Grammar name to resolve against the search paths
	#[arg(short, long, conflicts_with = "builtin")]
	name: Option<String>,

	/// Load the bundled moltree grammar (default when nothing else is given)
	#[arg(long)]
	builtin: bool,

	/// Directory searched before the default grammar paths
	#[arg(long = "grammar-dir", value_name = "DIR", requires = "name")]
	grammar_dirs: Vec<PathBuf>,

	/// Highest descriptor format version to accept
	#[arg(long, value_name = "N")]
	max_version: Option<u32>,

	/// Print the symbol and field tables
	#[arg(short, long)]
	symbols: bool,

	/// Print the report as JSON
	#[arg(long)]
	json: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.verbose);

	let config = loader_config(&args)?;
	let source = resolve_source(&args)?;
	info!(source = %describe(&source), "loading grammar");

	let handle = load_grammar(&GrammarLoader::with_config(config), &source)
		.with_context(|| format!("failed to load grammar from {}", describe(&source)))?;

	let report = Report::new(&handle, args.symbols);
	if args.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
	} else {
		print!("{report}");
	}
	Ok(())
}

fn init_tracing(verbose: bool) {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn loader_config(args: &Args) -> Result<LoaderConfig> {
	let config = LoaderConfig::from_env()?;
	match args.max_version {
		Some(max) => Ok(config.with_max_version(max)?),
		None => Ok(config),
	}
}

fn resolve_source(args: &Args) -> Result<GrammarSource> {
	if args.builtin {
		return Ok(moltree_grammar::source());
	}
	if let Some(path) = &args.path {
		return Ok(GrammarSource::Path(path.clone()));
	}
	if let Some(name) = &args.name {
		let mut dirs = args.grammar_dirs.clone();
		dirs.extend(grammar_search_paths());
		return Ok(find_grammar(name, &dirs)?);
	}
	Ok(moltree_grammar::source())
}

fn describe(source: &GrammarSource) -> String {
	match source {
		GrammarSource::Path(path) => path.display().to_string(),
		GrammarSource::Static(_) => "bundled descriptor".to_string(),
	}
}
