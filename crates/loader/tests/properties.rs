#![allow(unused_crate_dependencies)]

use moltree_descriptor::{HEADER_SIZE, Header, SymbolKind};
use moltree_descriptor::compile::DescriptorBuilder;
use moltree_loader::{GrammarLoader, LoadError, MAX_FORMAT_VERSION, MIN_FORMAT_VERSION, load};
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

fn kind() -> impl Strategy<Value = SymbolKind> {
	prop_oneof![
		Just(SymbolKind::Named),
		Just(SymbolKind::Anonymous),
		Just(SymbolKind::Auxiliary),
	]
}

#[derive(Debug, Clone)]
struct Grammar {
	version: u32,
	name: String,
	symbols: Vec<(String, SymbolKind)>,
	fields: Vec<String>,
	rules: Vec<u8>,
}

impl Grammar {
	fn encode(&self) -> Vec<u8> {
		let builder = self
			.symbols
			.iter()
			.fold(DescriptorBuilder::new(&self.name).version(self.version), |b, (name, kind)| b.symbol(name, *kind));
		self.fields
			.iter()
			.fold(builder, |b, f| b.field(f))
			.rules(self.rules.clone())
			.build()
			.unwrap()
	}
}

fn grammar() -> impl Strategy<Value = Grammar> {
	(
		MIN_FORMAT_VERSION..=MAX_FORMAT_VERSION,
		"[a-z_][a-z0-9_]{0,15}",
		vec(("[a-z_{}<=>?$]{1,10}", kind()), 0..40),
		btree_set("[a-z_]{1,8}", 0..8),
		vec(any::<u8>(), 0..64),
	)
		.prop_map(|(version, name, symbols, fields, rules)| Grammar {
			version,
			name,
			symbols,
			fields: fields.into_iter().collect(),
			rules,
		})
}

proptest! {
	#[test]
	fn valid_descriptors_load(g in grammar()) {
		let handle = load(g.encode()).unwrap();
		prop_assert_eq!(handle.name(), g.name.as_str());
		prop_assert_eq!(handle.format_version(), g.version);
		prop_assert_eq!(handle.symbol_count(), g.symbols.len());
		for (id, (name, kind)) in g.symbols.iter().enumerate() {
			let id = id as u16;
			prop_assert_eq!(handle.symbol_name(id), Some(name.as_str()));
			prop_assert_eq!(handle.symbol_kind(id), Some(*kind));
		}
		let expected_fields = if g.version >= 2 { g.fields.len() } else { 0 };
		prop_assert_eq!(handle.field_count(), expected_fields);
		prop_assert_eq!(handle.rule_table(), g.rules.as_slice());
	}

	#[test]
	fn reverse_lookup_finds_first_visible_symbol(g in grammar()) {
		let handle = load(g.encode()).unwrap();
		for (name, kind) in &g.symbols {
			if *kind == SymbolKind::Auxiliary {
				continue;
			}
			let named = kind.is_named();
			let first = g.symbols.iter().position(|(n, k)| n == name && *k == *kind).map(|i| i as u16);
			prop_assert_eq!(handle.id_for_symbol(name, named), first);
		}
	}

	#[test]
	fn loading_is_idempotent(g in grammar()) {
		let bytes = g.encode();
		prop_assert_eq!(load(&bytes).unwrap(), load(&bytes).unwrap());
	}

	#[test]
	fn arbitrary_bytes_never_panic(bytes in vec(any::<u8>(), 0..256)) {
		let _ = GrammarLoader::new().load(&bytes);
	}

	#[test]
	fn random_payload_behind_valid_header_never_panics(
		version in MIN_FORMAT_VERSION..=MAX_FORMAT_VERSION + 1,
		payload in vec(any::<u8>(), 0..256),
	) {
		let mut bytes = Header { version }.to_bytes().to_vec();
		bytes.extend_from_slice(&payload);
		match load(&bytes) {
			Ok(handle) => prop_assert_eq!(handle.format_version(), version),
			Err(LoadError::Malformed(_)) => {}
			Err(LoadError::UnsupportedVersion { found, .. }) => prop_assert_eq!(found, MAX_FORMAT_VERSION + 1),
			Err(LoadError::Empty) => prop_assert!(false, "non-empty input reported as empty"),
		}
	}

	#[test]
	fn mutated_payload_never_panics(
		g in grammar(),
		flips in vec((any::<prop::sample::Index>(), 1..=u8::MAX), 1..8),
	) {
		let mut bytes = g.encode();
		let payload_len = bytes.len() - HEADER_SIZE;
		for (index, mask) in flips {
			let at = HEADER_SIZE + index.index(payload_len);
			bytes[at] ^= mask;
		}
		if let Ok(handle) = load(&bytes) {
			prop_assert_eq!(handle.format_version(), g.version);
			prop_assert!(!handle.name().is_empty());
		}
	}

	#[test]
	fn every_strict_prefix_is_rejected(g in grammar()) {
		let bytes = g.encode();
		for len in 0..bytes.len() {
			let result = load(&bytes[..len]);
			match len {
				0 => prop_assert_eq!(result, Err(LoadError::Empty)),
				_ => prop_assert!(matches!(result, Err(LoadError::Malformed(_)))),
			}
		}
	}
}
