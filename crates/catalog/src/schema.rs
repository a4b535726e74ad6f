// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Schema validation: raw client declarations into typed schemas.
//!
//! Validation is a pure check with no side effects. Every rejection names
//! the offending field, and option rejections name the option too.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use dyntable_type::{
	FieldType, Result,
	diagnostic::schema::{
		field_spec_malformed, field_type_unknown, option_kind_mismatch, option_not_recognized,
	},
	return_error,
};

use crate::{
	column::ColumnType,
	def::{FieldOptions, FieldSpec, TableSchema},
};

/// A raw schema declaration as submitted by a client, before validation.
pub type RawSchema = IndexMap<String, RawFieldSpec>;

/// One raw field declaration. `type` stays a string until validation so an
/// unknown type is a validation failure, not a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFieldSpec {
	#[serde(rename = "type")]
	pub ty: Option<String>,
	#[serde(default)]
	pub options: IndexMap<String, JsonValue>,
}

/// Validate a raw declaration into a typed [`TableSchema`].
///
/// For each field: the type must be in the fixed vocabulary; each option
/// key must be recognized by the compiled column for that type; each option
/// value must have the kind the whitelist declares for that key.
pub fn validate_schema(raw: &RawSchema) -> Result<TableSchema> {
	let mut schema = TableSchema::with_capacity(raw.len());

	for (field_name, raw_spec) in raw {
		if field_name.is_empty() {
			return_error!(field_spec_malformed(field_name, "field name must not be empty"));
		}
		let Some(ty_raw) = raw_spec.ty.as_deref() else {
			return_error!(field_spec_malformed(field_name, "missing 'type'"));
		};
		let Some(ty) = FieldType::parse(ty_raw) else {
			return_error!(field_type_unknown(field_name, ty_raw));
		};

		let mut options = FieldOptions::default();
		for (key, value) in &raw_spec.options {
			match key.as_str() {
				"max_length" if ColumnType::supported_options(ty).contains(&"max_length") => {
					match value.as_u64() {
						Some(max) if max > 0 && max <= u32::MAX as u64 => {
							options.max_length = Some(max as u32);
						}
						_ => return_error!(option_kind_mismatch(
							field_name,
							key,
							"positive integer"
						)),
					}
				}
				"required" => match value.as_bool() {
					Some(required) => options.required = Some(required),
					None => return_error!(option_kind_mismatch(field_name, key, "boolean")),
				},
				"null" => match value.as_bool() {
					Some(null) => options.null = Some(null),
					None => return_error!(option_kind_mismatch(field_name, key, "boolean")),
				},
				_ => return_error!(option_not_recognized(field_name, ty, key)),
			}
		}

		schema.insert(field_name.clone(), FieldSpec { ty, options });
	}

	Ok(schema)
}
