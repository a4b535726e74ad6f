// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Diagnostics raised while validating a raw schema declaration.

use crate::{FieldType, error::diagnostic::Diagnostic};

/// The declared field type is outside the fixed vocabulary.
pub fn field_type_unknown(field: impl Into<String>, got: impl Into<String>) -> Diagnostic {
	let field = field.into();
	let got = got.into();
	Diagnostic {
		code: "SCHEMA_001".to_string(),
		message: format!("'{}' is not a valid choice for field '{}'", got, field),
		field: Some(field),
		statement: None,
		label: Some("invalid field type".to_string()),
		help: Some("valid types are 'string', 'number' and 'boolean'".to_string()),
		notes: vec![],
	}
}

/// The option key is not supported by the compiled column for this type.
pub fn option_not_recognized(
	field: impl Into<String>,
	ty: FieldType,
	option: impl Into<String>,
) -> Diagnostic {
	let field = field.into();
	let option = option.into();
	Diagnostic {
		code: "SCHEMA_002".to_string(),
		message: format!("Invalid option provided for {}: {}", ty, option),
		field: Some(field),
		statement: None,
		label: Some("invalid option".to_string()),
		help: Some(format!("'{}' columns do not support the '{}' option", ty, option)),
		notes: vec![],
	}
}

/// The option value's primitive kind does not match the whitelist.
pub fn option_kind_mismatch(
	field: impl Into<String>,
	option: impl Into<String>,
	expected: &str,
) -> Diagnostic {
	let field = field.into();
	let option = option.into();
	Diagnostic {
		code: "SCHEMA_003".to_string(),
		message: format!("Invalid type {}: expected {}", option, expected),
		field: Some(field),
		statement: None,
		label: Some("invalid option value".to_string()),
		help: Some(format!("the '{}' option takes {} values", option, expected)),
		notes: vec![],
	}
}

/// The field declaration itself is malformed (missing type, empty name).
pub fn field_spec_malformed(field: impl Into<String>, reason: &str) -> Diagnostic {
	let field = field.into();
	Diagnostic {
		code: "SCHEMA_004".to_string(),
		message: format!("Invalid declaration for field '{}': {}", field, reason),
		field: Some(field),
		statement: None,
		label: Some("malformed field declaration".to_string()),
		help: Some("each field must be an object with a 'type' key and optional 'options'".to_string()),
		notes: vec![],
	}
}
