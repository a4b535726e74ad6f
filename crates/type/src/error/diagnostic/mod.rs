// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Structured diagnostics with stable codes.
//!
//! Constructor functions live in one submodule per area; call sites raise
//! them through the `error!`/`return_error!` macros. Code families:
//! `SCHEMA_` (declaration validation), `CATALOG_` (definition lookups and
//! naming), `CONSTRAINT_` (row payload validation), `STORE_` (storage
//! failures), `INTERNAL_` (bug signals).

pub mod catalog;
pub mod constraint;
pub mod internal;
pub mod schema;
pub mod store;

use serde::{Deserialize, Serialize};

/// A structured description of a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	/// Stable machine-readable code, e.g. `CONSTRAINT_002`.
	pub code: String,
	/// Human-readable description of what went wrong.
	pub message: String,
	/// The schema field the failure concerns, when one can be named.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
	/// The SQL statement involved, for storage failures.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub statement: Option<String>,
	/// Short classification label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Guidance for resolving the failure.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub help: Option<String>,
	/// Additional context lines.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_serde_skips_empty_fields() {
		let diagnostic = Diagnostic {
			code: "SCHEMA_001".to_string(),
			message: "broken".to_string(),
			field: None,
			statement: None,
			label: None,
			help: None,
			notes: vec![],
		};
		let json = serde_json::to_string(&diagnostic).unwrap();
		assert_eq!(json, r#"{"code":"SCHEMA_001","message":"broken"}"#);

		let back: Diagnostic = serde_json::from_str(&json).unwrap();
		assert_eq!(back, diagnostic);
	}
}
