// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Diagnostics for storage-layer failures.
//!
//! `STORE_002` and `STORE_003` are the retryable pair; everything else in
//! this family is surfaced as-is.

use crate::error::diagnostic::Diagnostic;

/// A DDL statement failed. Fatal: a half-applied schema change must be
/// reported, never swallowed.
pub fn ddl_failed(statement: impl Into<String>, reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "STORE_001".to_string(),
		message: format!("DDL statement failed: {}", reason.into()),
		field: None,
		statement: Some(statement.into()),
		label: Some("storage failure".to_string()),
		help: None,
		notes: vec![],
	}
}

/// The storage engine timed out waiting for a lock.
pub fn store_busy(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "STORE_002".to_string(),
		message: format!("Storage is busy: {}", reason.into()),
		field: None,
		statement: None,
		label: Some("storage contention".to_string()),
		help: Some("the operation timed out waiting for a lock and may be retried".to_string()),
		notes: vec![],
	}
}

/// The physical table disappeared mid-operation, typically because a
/// concurrent schema update rebuilt it.
pub fn table_vanished(detail: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "STORE_003".to_string(),
		message: format!("Physical table disappeared mid-operation: {}", detail.into()),
		field: None,
		statement: None,
		label: Some("table vanished".to_string()),
		help: Some("a concurrent schema change replaced the table; retry the operation".to_string()),
		notes: vec![],
	}
}

/// A row statement failed for a reason other than contention or a vanished
/// table.
pub fn statement_failed(statement: impl Into<String>, reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "STORE_004".to_string(),
		message: format!("Statement failed: {}", reason.into()),
		field: None,
		statement: Some(statement.into()),
		label: Some("storage failure".to_string()),
		help: None,
		notes: vec![],
	}
}

/// Opening the database failed.
pub fn connect_failed(path: impl Into<String>, reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "STORE_005".to_string(),
		message: format!("Failed to open database at {}: {}", path.into(), reason.into()),
		field: None,
		statement: None,
		label: Some("storage failure".to_string()),
		help: None,
		notes: vec![],
	}
}
