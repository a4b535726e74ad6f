// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Compilation of a stored table definition into its physical shape.

use dyntable_type::{Result, diagnostic::internal::unsafe_physical_name, return_error};

use crate::{
	column::ColumnDef,
	def::TableDef,
	naming::{is_safe_identifier, physical_table_name, quote_ident},
};

/// The physical shape of one table: its backing table name and the
/// compiled columns, in declaration order. The implicit `id` primary key
/// is not part of `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTable {
	pub physical_name: String,
	pub columns: Vec<ColumnDef>,
}

impl CompiledTable {
	pub fn column(&self, name: &str) -> Option<&ColumnDef> {
		self.columns.iter().find(|column| column.name == name)
	}

	/// DDL that creates the backing table. `IF NOT EXISTS` makes losers of
	/// a concurrent first-compile race converge on the same table.
	pub fn create_ddl(&self) -> String {
		let mut ddl = format!(
			"CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT",
			quote_ident(&self.physical_name)
		);
		for column in &self.columns {
			ddl.push_str(", ");
			ddl.push_str(&column.ddl_fragment());
		}
		ddl.push(')');
		ddl
	}
}

/// Compile a definition into its physical shape.
///
/// The backing table name is derived from the namespace, the slug of the
/// logical name and the identifier. Passing `forced_identifier` compiles
/// against a fresh identifier instead of the stored one; the caller is
/// responsible for persisting it.
pub fn compile_table(
	namespace: &str,
	def: &TableDef,
	forced_identifier: Option<&str>,
) -> Result<CompiledTable> {
	let identifier = forced_identifier.unwrap_or(&def.identifier);
	let physical_name = physical_table_name(namespace, &def.name, identifier);
	if !is_safe_identifier(&physical_name) {
		return_error!(unsafe_physical_name(&physical_name));
	}

	let columns = def
		.schema
		.iter()
		.map(|(name, spec)| ColumnDef::from_field(name, spec))
		.collect();

	Ok(CompiledTable {
		physical_name,
		columns,
	})
}
