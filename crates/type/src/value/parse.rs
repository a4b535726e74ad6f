// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Parsing helpers used by column coercion for string-typed payloads.

/// Parse a numeric-looking string into a finite 64-bit float.
///
/// Accepts integer, decimal and exponent notation with surrounding
/// whitespace. Non-finite results (`NaN`, `inf`) are rejected because they
/// cannot be rendered back as JSON numbers.
pub fn parse_float(raw: &str) -> Option<f64> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return None;
	}
	trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse the accepted textual boolean forms: `true`/`false`/`1`/`0`,
/// case-insensitive.
pub fn parse_bool(raw: &str) -> Option<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" => Some(true),
		"false" | "0" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_float_integer() {
		assert_eq!(parse_float("123"), Some(123.0));
	}

	#[test]
	fn test_parse_float_decimal_and_exponent() {
		assert_eq!(parse_float("1.5"), Some(1.5));
		assert_eq!(parse_float("1e3"), Some(1000.0));
		assert_eq!(parse_float("-2.25"), Some(-2.25));
	}

	#[test]
	fn test_parse_float_trims_whitespace() {
		assert_eq!(parse_float(" 42 "), Some(42.0));
	}

	#[test]
	fn test_parse_float_rejects_non_numeric() {
		assert_eq!(parse_float("test"), None);
		assert_eq!(parse_float(""), None);
		assert_eq!(parse_float("12abc"), None);
	}

	#[test]
	fn test_parse_float_rejects_non_finite() {
		assert_eq!(parse_float("NaN"), None);
		assert_eq!(parse_float("inf"), None);
		assert_eq!(parse_float("-inf"), None);
	}

	#[test]
	fn test_parse_bool_forms() {
		assert_eq!(parse_bool("true"), Some(true));
		assert_eq!(parse_bool("TRUE"), Some(true));
		assert_eq!(parse_bool("1"), Some(true));
		assert_eq!(parse_bool("false"), Some(false));
		assert_eq!(parse_bool("0"), Some(false));
	}

	#[test]
	fn test_parse_bool_rejects_other() {
		assert_eq!(parse_bool("yes"), None);
		assert_eq!(parse_bool("2"), None);
		assert_eq!(parse_bool(""), None);
	}
}
