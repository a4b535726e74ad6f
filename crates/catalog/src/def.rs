// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The durable, client-visible definition model.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dyntable_type::FieldType;

/// Stable identity of a logical table, assigned on creation.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TableId(pub u64);

impl fmt::Display for TableId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Ordered mapping from field name to its declaration.
pub type TableSchema = IndexMap<String, FieldSpec>;

/// A validated field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
	#[serde(rename = "type")]
	pub ty: FieldType,
	#[serde(default, skip_serializing_if = "FieldOptions::is_empty")]
	pub options: FieldOptions,
}

impl FieldSpec {
	pub fn new(ty: FieldType) -> Self {
		Self { ty, options: FieldOptions::default() }
	}
}

/// Whitelisted per-field constraint options. Absent options serialize to
/// nothing, so a stored schema round-trips exactly what was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub required: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub null: Option<bool>,
}

impl FieldOptions {
	pub fn is_empty(&self) -> bool {
		self.max_length.is_none() && self.required.is_none() && self.null.is_none()
	}
}

/// A logical table definition.
///
/// `identifier` is the opaque token embedded in the physical table name. It
/// rotates on every definition update and never changes on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
	pub id: TableId,
	pub name: String,
	pub identifier: String,
	pub schema: TableSchema,
}

/// Generate a fresh identifier token: 32 lowercase hex characters.
pub fn generate_identifier() -> String {
	Uuid::new_v4().simple().to_string()
}
