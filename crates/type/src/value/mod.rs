// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Runtime value representation for row data after coercion.

pub mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// A coerced row value, ready to be bound into a storage statement.
///
/// `Undefined` represents SQL NULL: either an explicit null in the payload or
/// an absent optional field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
	Undefined,
	Boolean(bool),
	Float(f64),
	Utf8(String),
}

impl Value {
	/// The field type this value conforms to, `None` for `Undefined`.
	pub fn field_type(&self) -> Option<FieldType> {
		match self {
			Value::Undefined => None,
			Value::Boolean(_) => Some(FieldType::Boolean),
			Value::Float(_) => Some(FieldType::Number),
			Value::Utf8(_) => Some(FieldType::String),
		}
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	/// Render as a JSON value, the shape rows are returned in.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Undefined => serde_json::Value::Null,
			Value::Boolean(b) => serde_json::Value::Bool(*b),
			Value::Float(f) => serde_json::Number::from_f64(*f)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Value::Utf8(s) => serde_json::Value::String(s.clone()),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(b) => write!(f, "{}", b),
			Value::Float(v) => write!(f, "{}", v),
			Value::Utf8(s) => f.write_str(s),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_field_type() {
		assert_eq!(Value::Undefined.field_type(), None);
		assert_eq!(Value::Boolean(true).field_type(), Some(FieldType::Boolean));
		assert_eq!(Value::Float(1.5).field_type(), Some(FieldType::Number));
		assert_eq!(Value::Utf8("a".into()).field_type(), Some(FieldType::String));
	}

	#[test]
	fn test_to_json() {
		assert_eq!(Value::Undefined.to_json(), serde_json::Value::Null);
		assert_eq!(Value::Boolean(false).to_json(), serde_json::json!(false));
		assert_eq!(Value::Float(1.0).to_json(), serde_json::json!(1.0));
		assert_eq!(Value::Utf8("hi".into()).to_json(), serde_json::json!("hi"));
	}

	#[test]
	fn test_display() {
		assert_eq!(Value::Undefined.to_string(), "undefined");
		assert_eq!(Value::Float(2.5).to_string(), "2.5");
	}
}
