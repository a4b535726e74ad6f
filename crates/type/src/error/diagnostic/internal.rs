// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Diagnostics for states that validation should have made unreachable.

use crate::error::diagnostic::Diagnostic;

/// Generic internal inconsistency.
pub fn internal(message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_001".to_string(),
		message: message.into(),
		field: None,
		statement: None,
		label: Some("internal error".to_string()),
		help: Some("this is a bug; please report it".to_string()),
		notes: vec![],
	}
}

/// A derived physical name failed the safe-identifier check after
/// validation should have prevented it.
pub fn unsafe_physical_name(name: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_002".to_string(),
		message: format!("Derived physical name '{}' is not a safe identifier", name.into()),
		field: None,
		statement: None,
		label: Some("internal error".to_string()),
		help: Some("this is a bug; please report it".to_string()),
		notes: vec![],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_codes() {
		assert_eq!(internal("x").code, "INTERNAL_001");
		assert_eq!(unsafe_physical_name("bad name").code, "INTERNAL_002");
	}
}
