// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use rusqlite::params;

use dyntable_store::{SqliteStore, map_statement_err};
use dyntable_type::{
	Result,
	diagnostic::catalog::{invalid_table_name, table_already_exists, table_not_found},
	internal_error, return_error,
};

use crate::{
	CatalogStore,
	def::{TableDef, TableId, TableSchema},
	naming::{is_safe_identifier, slug},
};

/// A partial change to a stored definition. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TableChange {
	pub name: Option<String>,
	pub schema: Option<TableSchema>,
}

impl CatalogStore {
	/// Apply a partial change to name and schema. The identifier is left
	/// untouched; rotating it is the lifecycle manager's move.
	pub fn update_table(
		&self,
		store: &SqliteStore,
		id: TableId,
		change: TableChange,
	) -> Result<TableDef> {
		let current = self.get_table(store, id)?;

		if let Some(name) = &change.name {
			if !is_safe_identifier(&slug(name)) {
				return_error!(invalid_table_name(name));
			}
			if let Some(other) = self.find_table_by_name(store, name)? {
				if other.id != id {
					return_error!(table_already_exists(name));
				}
			}
		}

		let name = change.name.unwrap_or(current.name);
		let schema = change.schema.unwrap_or(current.schema);
		let schema_json = serde_json::to_string(&schema)
			.map_err(|err| internal_error!("failed to serialize schema: {err}"))?;

		{
			let conn = store.connection();
			let sql = format!("UPDATE {} SET name = ?1, schema = ?2 WHERE id = ?3", self.defs_table());
			conn.execute(&sql, params![name, schema_json, id.0])
				.map_err(|err| map_statement_err(&sql, err))?;
		}

		self.get_table(store, id)
	}

	/// Overwrite the stored identifier directly. This deliberately bypasses
	/// [`CatalogStore::update_table`] so that identifier rotation never
	/// looks like another definition change.
	pub fn update_identifier(
		&self,
		store: &SqliteStore,
		id: TableId,
		identifier: &str,
	) -> Result<()> {
		let conn = store.connection();
		let sql = format!("UPDATE {} SET identifier = ?1 WHERE id = ?2", self.defs_table());
		let affected = conn
			.execute(&sql, params![identifier, id.0])
			.map_err(|err| map_statement_err(&sql, err))?;
		if affected == 0 {
			return_error!(table_not_found(id.0));
		}
		Ok(())
	}
}
