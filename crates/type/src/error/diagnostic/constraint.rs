// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Diagnostics raised when a row payload violates a compiled column
//! constraint. Every constructor names the offending field.

use crate::error::diagnostic::Diagnostic;

/// A required field is absent from the payload.
pub fn required_field_missing(field: impl Into<String>) -> Diagnostic {
	let field = field.into();
	Diagnostic {
		code: "CONSTRAINT_001".to_string(),
		message: format!("Field '{}' is required", field),
		field: Some(field),
		statement: None,
		label: Some("required field".to_string()),
		help: Some("include the field in the payload".to_string()),
		notes: vec![],
	}
}

/// A string value exceeds the column's `max_length`.
pub fn utf8_exceeds_max_length(field: impl Into<String>, actual: usize, max: u32) -> Diagnostic {
	let field = field.into();
	Diagnostic {
		code: "CONSTRAINT_002".to_string(),
		message: format!(
			"Value for field '{}' exceeds the maximum length of {} characters, got {}",
			field, max, actual
		),
		field: Some(field),
		statement: None,
		label: Some("constraint violation".to_string()),
		help: Some(format!("shorten the value to at most {} characters", max)),
		notes: vec![],
	}
}

/// Null (explicit or via absence) on a column that does not allow it.
pub fn null_not_allowed(field: impl Into<String>) -> Diagnostic {
	let field = field.into();
	Diagnostic {
		code: "CONSTRAINT_003".to_string(),
		message: format!("Field '{}' does not allow null values", field),
		field: Some(field),
		statement: None,
		label: Some("constraint violation".to_string()),
		help: Some("provide a non-null value, or declare the field with 'null: true'".to_string()),
		notes: vec![],
	}
}

/// The payload value cannot be coerced into a number.
pub fn invalid_number_value(field: impl Into<String>) -> Diagnostic {
	let field = field.into();
	Diagnostic {
		code: "CONSTRAINT_004".to_string(),
		message: format!("A valid number is required for field '{}'", field),
		field: Some(field),
		statement: None,
		label: Some("invalid value".to_string()),
		help: Some("number fields accept JSON numbers and numeric strings".to_string()),
		notes: vec![],
	}
}

/// The payload value cannot be coerced into a boolean.
pub fn invalid_boolean_value(field: impl Into<String>) -> Diagnostic {
	let field = field.into();
	Diagnostic {
		code: "CONSTRAINT_005".to_string(),
		message: format!("A valid boolean is required for field '{}'", field),
		field: Some(field),
		statement: None,
		label: Some("invalid value".to_string()),
		help: Some("boolean fields accept true/false, \"true\"/\"false\", \"1\"/\"0\", 1/0".to_string()),
		notes: vec![],
	}
}

/// The payload value is not a string.
pub fn invalid_string_value(field: impl Into<String>) -> Diagnostic {
	let field = field.into();
	Diagnostic {
		code: "CONSTRAINT_006".to_string(),
		message: format!("A valid string is required for field '{}'", field),
		field: Some(field),
		statement: None,
		label: Some("invalid value".to_string()),
		help: Some("string fields accept JSON strings only".to_string()),
		notes: vec![],
	}
}
