// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Error model shared across the workspace.
//!
//! Every fallible operation returns [`Result`], and every failure is a
//! single [`Error`] wrapping a [`Diagnostic`]: a structured, serializable
//! description with a stable code. Callers classify failures by code family
//! rather than by matching on types.

pub mod diagnostic;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use diagnostic::Diagnostic;

/// A serializable diagnostic wrapped as the universal error type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error(pub Diagnostic);

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	/// Consume and return the underlying diagnostic.
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}

	pub fn code(&self) -> &str {
		&self.0.code
	}

	/// Schema declaration rejected by the validator.
	pub fn is_validation(&self) -> bool {
		self.0.code.starts_with("SCHEMA_")
	}

	/// Row payload rejected by a compiled column constraint.
	pub fn is_constraint(&self) -> bool {
		self.0.code.starts_with("CONSTRAINT_")
	}

	/// Definition or row lookup miss, the 404-equivalent family.
	pub fn is_not_found(&self) -> bool {
		matches!(self.0.code.as_str(), "CATALOG_002" | "CATALOG_003")
	}

	/// Internal inconsistency that should have been impossible; a bug signal.
	pub fn is_internal(&self) -> bool {
		self.0.code.starts_with("INTERNAL_")
	}

	/// Transient storage failure the caller may retry: lock contention or a
	/// physical table vanishing mid-operation during a concurrent rebuild.
	pub fn is_retryable(&self) -> bool {
		matches!(self.0.code.as_str(), "STORE_002" | "STORE_003")
	}

	/// Storage lock contention specifically, the only failure the lifecycle
	/// manager retries on its own.
	pub fn is_lock_contention(&self) -> bool {
		self.0.code == "STORE_002"
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.0.code, self.0.message)?;
		if let Some(field) = &self.0.field {
			write!(f, " (field: {})", field)?;
		}
		Ok(())
	}
}

impl std::error::Error for Error {}

/// Wrap a [`Diagnostic`] into an [`Error`].
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error($diagnostic)
	};
}

/// Return early with a [`Diagnostic`] wrapped into an [`Error`].
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::Error($diagnostic))
	};
}

/// Build an internal error from a format string.
#[macro_export]
macro_rules! internal_error {
	($($arg:tt)*) => {
		$crate::Error($crate::diagnostic::internal::internal(format!($($arg)*)))
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagnostic::{constraint, internal, schema, store};

	#[test]
	fn test_display_includes_code_and_field() {
		let err = Error(constraint::required_field_missing("email"));
		let rendered = err.to_string();
		assert!(rendered.contains("CONSTRAINT_001"));
		assert!(rendered.contains("(field: email)"));
	}

	#[test]
	fn test_classification_by_code_family() {
		assert!(Error(schema::field_type_unknown("a", "test")).is_validation());
		assert!(Error(constraint::null_not_allowed("a")).is_constraint());
		assert!(Error(internal::internal("boom")).is_internal());
		assert!(!Error(internal::internal("boom")).is_retryable());
	}

	#[test]
	fn test_retryable_store_codes() {
		let busy = Error(store::store_busy("database is locked"));
		assert!(busy.is_retryable());
		assert!(busy.is_lock_contention());

		let vanished = Error(store::table_vanished("no such table: dyntable_users_ab12"));
		assert!(vanished.is_retryable());
		assert!(!vanished.is_lock_contention());

		let ddl = Error(store::ddl_failed("CREATE TABLE t (x)", "syntax error"));
		assert!(!ddl.is_retryable());
	}

	#[test]
	fn test_macros_produce_errors() {
		fn fails() -> crate::Result<()> {
			return_error!(internal::internal("unreachable state"));
		}
		assert!(fails().unwrap_err().is_internal());

		let err = internal_error!("bad {}", "state");
		assert_eq!(err.code(), "INTERNAL_001");
		assert!(err.to_string().contains("bad state"));
	}
}
