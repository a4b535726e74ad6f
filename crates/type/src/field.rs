// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The closed field-type vocabulary clients declare schemas with.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive type of a declared schema field.
///
/// The set is closed: a declaration naming anything else fails validation
/// before it reaches the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	String,
	Number,
	Boolean,
}

impl FieldType {
	/// Parse the client-facing type name. Returns `None` for anything
	/// outside the vocabulary; the caller decides how to report it.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"string" => Some(FieldType::String),
			"number" => Some(FieldType::Number),
			"boolean" => Some(FieldType::Boolean),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::String => "string",
			FieldType::Number => "number",
			FieldType::Boolean => "boolean",
		}
	}

	/// SQLite storage type the field compiles to.
	pub fn storage_type(&self) -> &'static str {
		match self {
			FieldType::String => "TEXT",
			FieldType::Number => "REAL",
			FieldType::Boolean => "INTEGER",
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
