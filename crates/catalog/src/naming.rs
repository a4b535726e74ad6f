// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Physical naming: slugs, safety checks, and catalog lookup patterns.
//!
//! A physical table is named `{namespace}_{slug(name)}_{identifier}`. The
//! identifier is unknown to most callers, so lookups go through a
//! prefix-wildcard pattern against the storage catalog.

/// Sanitize a logical name: lowercase, spaces become underscores.
pub fn slug(name: &str) -> String {
	name.to_lowercase().replace(' ', "_")
}

/// Word characters only. Everything interpolated into DDL must pass this.
pub fn is_safe_identifier(value: &str) -> bool {
	!value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Derive the physical table name for a definition.
pub fn physical_table_name(namespace: &str, name: &str, identifier: &str) -> String {
	format!("{}_{}_{}", namespace, slug(name), identifier)
}

/// Build the LIKE pattern that resolves a logical name's current physical
/// table. Literal underscores are escaped with `\` so that the pattern's
/// only wildcard is the trailing `%` covering the identifier.
pub fn resolve_pattern(namespace: &str, name: &str) -> String {
	let prefix = format!("{}_{}_", namespace, slug(name));
	let mut pattern = String::with_capacity(prefix.len() + 8);
	for c in prefix.chars() {
		if matches!(c, '_' | '%' | '\\') {
			pattern.push('\\');
		}
		pattern.push(c);
	}
	pattern.push('%');
	pattern
}

/// Quote an identifier for interpolation into SQL.
pub fn quote_ident(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_slug_lowercases_and_replaces_spaces() {
		assert_eq!(slug("My Table"), "my_table");
		assert_eq!(slug("users"), "users");
		assert_eq!(slug("A B C"), "a_b_c");
	}

	#[test]
	fn test_is_safe_identifier() {
		assert!(is_safe_identifier("users_2"));
		assert!(is_safe_identifier("a"));
		assert!(!is_safe_identifier(""));
		assert!(!is_safe_identifier("users; DROP TABLE defs"));
		assert!(!is_safe_identifier("user-name"));
		assert!(!is_safe_identifier("täble"));
	}

	#[test]
	fn test_physical_table_name() {
		assert_eq!(
			physical_table_name("dyntable", "My Table", "ab12"),
			"dyntable_my_table_ab12"
		);
	}

	#[test]
	fn test_resolve_pattern_escapes_literal_underscores() {
		assert_eq!(resolve_pattern("dyntable", "My Table"), "dyntable\\_my\\_table\\_%");
		assert_eq!(resolve_pattern("app", "users"), "app\\_users\\_%");
	}

	#[test]
	fn test_quote_ident_escapes_quotes() {
		assert_eq!(quote_ident("plain"), "\"plain\"");
		assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
	}
}
