// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Compiled column model.
//!
//! A schema field compiles to a [`ColumnDef`]: a closed tagged variant per
//! field type, each carrying its own constraint struct. Columns are plain
//! data, never synthesized types; the row layer drives validation and
//! coercion through [`ColumnDef::coerce`].

use serde_json::Value as JsonValue;

use dyntable_type::{
	FieldType, Result, Value,
	diagnostic::constraint::{
		invalid_boolean_value, invalid_number_value, invalid_string_value, null_not_allowed,
		utf8_exceeds_max_length,
	},
	error, return_error,
	value::parse::{parse_bool, parse_float},
};

use crate::{def::FieldSpec, naming::quote_ident};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringConstraints {
	pub max_length: Option<u32>,
	pub required: bool,
	pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberConstraints {
	pub required: bool,
	pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanConstraints {
	pub required: bool,
	pub nullable: bool,
}

/// The closed set of compiled column variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
	String(StringConstraints),
	Number(NumberConstraints),
	Boolean(BooleanConstraints),
}

impl ColumnType {
	/// Build the variant for a validated field declaration.
	///
	/// A field declared `null: true` is nullable and, unless `required` says
	/// otherwise, optional on create.
	pub fn from_spec(spec: &FieldSpec) -> Self {
		let nullable = spec.options.null.unwrap_or(false);
		let required = spec.options.required.unwrap_or(!nullable);
		match spec.ty {
			FieldType::String => ColumnType::String(StringConstraints {
				max_length: spec.options.max_length,
				required,
				nullable,
			}),
			FieldType::Number => ColumnType::Number(NumberConstraints { required, nullable }),
			FieldType::Boolean => ColumnType::Boolean(BooleanConstraints { required, nullable }),
		}
	}

	pub fn field_type(&self) -> FieldType {
		match self {
			ColumnType::String(_) => FieldType::String,
			ColumnType::Number(_) => FieldType::Number,
			ColumnType::Boolean(_) => FieldType::Boolean,
		}
	}

	pub fn required(&self) -> bool {
		match self {
			ColumnType::String(c) => c.required,
			ColumnType::Number(c) => c.required,
			ColumnType::Boolean(c) => c.required,
		}
	}

	pub fn nullable(&self) -> bool {
		match self {
			ColumnType::String(c) => c.nullable,
			ColumnType::Number(c) => c.nullable,
			ColumnType::Boolean(c) => c.nullable,
		}
	}

	/// Option keys the compiled column for `ty` recognizes. The validator
	/// checks declarations against this set.
	pub fn supported_options(ty: FieldType) -> &'static [&'static str] {
		match ty {
			FieldType::String => &["max_length", "required", "null"],
			FieldType::Number | FieldType::Boolean => &["required", "null"],
		}
	}
}

/// One compiled column: a field name plus its typed constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
	pub name: String,
	pub ty: ColumnType,
}

impl ColumnDef {
	pub fn from_field(name: &str, spec: &FieldSpec) -> Self {
		Self { name: name.to_string(), ty: ColumnType::from_spec(spec) }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn field_type(&self) -> FieldType {
		self.ty.field_type()
	}

	pub fn required(&self) -> bool {
		self.ty.required()
	}

	pub fn nullable(&self) -> bool {
		self.ty.nullable()
	}

	/// Column clause for CREATE TABLE.
	pub fn ddl_fragment(&self) -> String {
		let mut fragment = format!("{} {}", quote_ident(&self.name), self.field_type().storage_type());
		if !self.nullable() {
			fragment.push_str(" NOT NULL");
		}
		fragment
	}

	/// Validate and coerce one payload value into a storage value.
	///
	/// Null handling is shared across variants: an explicit null (or an
	/// absent optional field routed here as null) stores NULL when the
	/// column allows it and fails otherwise.
	pub fn coerce(&self, value: &JsonValue) -> Result<Value> {
		if value.is_null() {
			if self.nullable() {
				return Ok(Value::Undefined);
			}
			return_error!(null_not_allowed(&self.name));
		}

		match &self.ty {
			ColumnType::String(constraints) => {
				let Some(text) = value.as_str() else {
					return_error!(invalid_string_value(&self.name));
				};
				if let Some(max) = constraints.max_length {
					let length = text.chars().count();
					if length > max as usize {
						return_error!(utf8_exceeds_max_length(&self.name, length, max));
					}
				}
				Ok(Value::Utf8(text.to_string()))
			}
			ColumnType::Number(_) => {
				if let Some(number) = value.as_f64() {
					return Ok(Value::Float(number));
				}
				if let Some(text) = value.as_str() {
					if let Some(number) = parse_float(text) {
						return Ok(Value::Float(number));
					}
				}
				Err(error!(invalid_number_value(&self.name)))
			}
			ColumnType::Boolean(_) => {
				if let Some(flag) = value.as_bool() {
					return Ok(Value::Boolean(flag));
				}
				if let Some(text) = value.as_str() {
					if let Some(flag) = parse_bool(text) {
						return Ok(Value::Boolean(flag));
					}
				}
				if let Some(number) = value.as_f64() {
					if number == 0.0 {
						return Ok(Value::Boolean(false));
					}
					if number == 1.0 {
						return Ok(Value::Boolean(true));
					}
				}
				Err(error!(invalid_boolean_value(&self.name)))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::def::FieldOptions;

	fn field(ty: FieldType, options: FieldOptions) -> FieldSpec {
		FieldSpec { ty, options }
	}

	#[test]
	fn test_plain_field_is_required_and_not_nullable() {
		let column = ColumnDef::from_field("email", &FieldSpec::new(FieldType::Number));
		assert!(column.required());
		assert!(!column.nullable());
	}

	#[test]
	fn test_null_option_makes_field_optional() {
		let spec = field(
			FieldType::String,
			FieldOptions { null: Some(true), ..FieldOptions::default() },
		);
		let column = ColumnDef::from_field("text", &spec);
		assert!(!column.required());
		assert!(column.nullable());
	}

	#[test]
	fn test_explicit_required_overrides_null_default() {
		let spec = field(
			FieldType::String,
			FieldOptions { required: Some(true), null: Some(true), ..FieldOptions::default() },
		);
		let column = ColumnDef::from_field("text", &spec);
		assert!(column.required());
		assert!(column.nullable());
	}

	#[test]
	fn test_supported_options_per_type() {
		assert_eq!(
			ColumnType::supported_options(FieldType::String),
			&["max_length", "required", "null"]
		);
		assert_eq!(ColumnType::supported_options(FieldType::Number), &["required", "null"]);
		assert_eq!(ColumnType::supported_options(FieldType::Boolean), &["required", "null"]);
	}

	#[test]
	fn test_ddl_fragment() {
		let column = ColumnDef::from_field("email", &FieldSpec::new(FieldType::Number));
		assert_eq!(column.ddl_fragment(), "\"email\" REAL NOT NULL");

		let nullable = field(
			FieldType::String,
			FieldOptions { null: Some(true), ..FieldOptions::default() },
		);
		let column = ColumnDef::from_field("text", &nullable);
		assert_eq!(column.ddl_fragment(), "\"text\" TEXT");
	}

	#[test]
	fn test_coerce_string() {
		let column = ColumnDef::from_field("text", &FieldSpec::new(FieldType::String));
		assert_eq!(column.coerce(&json!("hello")).unwrap(), Value::Utf8("hello".into()));

		let err = column.coerce(&json!(5)).unwrap_err();
		assert_eq!(err.code(), "CONSTRAINT_006");
	}

	#[test]
	fn test_coerce_string_enforces_max_length() {
		let spec = field(
			FieldType::String,
			FieldOptions { max_length: Some(5), ..FieldOptions::default() },
		);
		let column = ColumnDef::from_field("text", &spec);
		assert!(column.coerce(&json!("12345")).is_ok());

		let err = column.coerce(&json!("123456")).unwrap_err();
		assert_eq!(err.code(), "CONSTRAINT_002");
		assert_eq!(err.diagnostic().field.as_deref(), Some("text"));
	}

	#[test]
	fn test_coerce_max_length_counts_characters_not_bytes() {
		let spec = field(
			FieldType::String,
			FieldOptions { max_length: Some(5), ..FieldOptions::default() },
		);
		let column = ColumnDef::from_field("text", &spec);
		assert!(column.coerce(&json!("äääää")).is_ok());
	}

	#[test]
	fn test_coerce_number() {
		let column = ColumnDef::from_field("email", &FieldSpec::new(FieldType::Number));
		assert_eq!(column.coerce(&json!(1)).unwrap(), Value::Float(1.0));
		assert_eq!(column.coerce(&json!(2.5)).unwrap(), Value::Float(2.5));
		assert_eq!(column.coerce(&json!("123")).unwrap(), Value::Float(123.0));

		let err = column.coerce(&json!("test")).unwrap_err();
		assert_eq!(err.code(), "CONSTRAINT_004");
		assert_eq!(err.diagnostic().field.as_deref(), Some("email"));
	}

	#[test]
	fn test_coerce_number_rejects_boolean() {
		let column = ColumnDef::from_field("email", &FieldSpec::new(FieldType::Number));
		assert_eq!(column.coerce(&json!(true)).unwrap_err().code(), "CONSTRAINT_004");
	}

	#[test]
	fn test_coerce_boolean_forms() {
		let column = ColumnDef::from_field("flag", &FieldSpec::new(FieldType::Boolean));
		assert_eq!(column.coerce(&json!(true)).unwrap(), Value::Boolean(true));
		assert_eq!(column.coerce(&json!("false")).unwrap(), Value::Boolean(false));
		assert_eq!(column.coerce(&json!("1")).unwrap(), Value::Boolean(true));
		assert_eq!(column.coerce(&json!(0)).unwrap(), Value::Boolean(false));

		assert_eq!(column.coerce(&json!("maybe")).unwrap_err().code(), "CONSTRAINT_005");
		assert_eq!(column.coerce(&json!(2)).unwrap_err().code(), "CONSTRAINT_005");
	}

	#[test]
	fn test_coerce_null() {
		let nullable = field(
			FieldType::Number,
			FieldOptions { null: Some(true), ..FieldOptions::default() },
		);
		let column = ColumnDef::from_field("email", &nullable);
		assert_eq!(column.coerce(&JsonValue::Null).unwrap(), Value::Undefined);

		let strict = ColumnDef::from_field("email", &FieldSpec::new(FieldType::Number));
		let err = strict.coerce(&JsonValue::Null).unwrap_err();
		assert_eq!(err.code(), "CONSTRAINT_003");
		assert_eq!(err.diagnostic().field.as_deref(), Some("email"));
	}
}
