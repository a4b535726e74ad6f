// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Diagnostics for definition lookups and logical naming.

use crate::error::diagnostic::Diagnostic;

/// A definition with this logical name already exists.
pub fn table_already_exists(name: impl Into<String>) -> Diagnostic {
	let name = name.into();
	Diagnostic {
		code: "CATALOG_001".to_string(),
		message: format!("Table '{}' already exists", name),
		field: None,
		statement: None,
		label: Some("duplicate table".to_string()),
		help: Some("logical table names are unique; choose a different name".to_string()),
		notes: vec![],
	}
}

/// No definition with this id.
pub fn table_not_found(id: u64) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_002".to_string(),
		message: format!("Table with id {} not found", id),
		field: None,
		statement: None,
		label: Some("table not found".to_string()),
		help: None,
		notes: vec![],
	}
}

/// No row with this id in the table's physical storage.
pub fn row_not_found(table: impl Into<String>, row: i64) -> Diagnostic {
	Diagnostic {
		code: "CATALOG_003".to_string(),
		message: format!("Row {} not found in table '{}'", row, table.into()),
		field: None,
		statement: None,
		label: Some("row not found".to_string()),
		help: None,
		notes: vec![],
	}
}

/// The logical name does not reduce to a safe storage identifier.
pub fn invalid_table_name(name: impl Into<String>) -> Diagnostic {
	let name = name.into();
	Diagnostic {
		code: "CATALOG_004".to_string(),
		message: format!("Table name '{}' does not produce a safe storage identifier", name),
		field: None,
		statement: None,
		label: Some("invalid table name".to_string()),
		help: Some(
			"names may contain letters, digits, spaces and underscores; they are lowercased and spaces become underscores".to_string(),
		),
		notes: vec![],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_table_already_exists() {
		let diagnostic = table_already_exists("users");
		assert_eq!(diagnostic.code, "CATALOG_001");
		assert_eq!(diagnostic.message, "Table 'users' already exists");
	}

	#[test]
	fn test_not_found_family() {
		assert_eq!(table_not_found(7).code, "CATALOG_002");
		assert_eq!(row_not_found("users", 3).code, "CATALOG_003");
		assert!(row_not_found("users", 3).message.contains("Row 3"));
	}
}
