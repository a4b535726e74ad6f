// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use rusqlite::params;

use dyntable_store::{SqliteStore, is_unique_violation, map_statement_err};
use dyntable_type::{
	Result,
	diagnostic::catalog::{invalid_table_name, table_already_exists},
	error, internal_error, return_error,
};

use crate::{
	CatalogStore,
	def::{TableDef, TableId, TableSchema, generate_identifier},
	naming::{is_safe_identifier, slug},
};

#[derive(Debug, Clone)]
pub struct TableToCreate {
	pub name: String,
	pub schema: TableSchema,
}

impl CatalogStore {
	/// Store a new definition and hand back the persisted row, with its
	/// assigned id and freshly generated identifier.
	pub fn create_table(&self, store: &SqliteStore, to_create: TableToCreate) -> Result<TableDef> {
		if !is_safe_identifier(&slug(&to_create.name)) {
			return_error!(invalid_table_name(&to_create.name));
		}
		if let Some(existing) = self.find_table_by_name(store, &to_create.name)? {
			return_error!(table_already_exists(&existing.name));
		}

		let identifier = generate_identifier();
		let schema_json = serde_json::to_string(&to_create.schema)
			.map_err(|err| internal_error!("failed to serialize schema: {err}"))?;

		let id = {
			let conn = store.connection();
			let sql =
				format!("INSERT INTO {} (name, identifier, schema) VALUES (?1, ?2, ?3)", self.defs_table());
			conn.execute(&sql, params![to_create.name, identifier, schema_json]).map_err(|err| {
				// Two writers racing on the same name: the UNIQUE index
				// decides, the loser sees a duplicate.
				if is_unique_violation(&err) {
					return error!(table_already_exists(&to_create.name));
				}
				map_statement_err(&sql, err)
			})?;
			conn.last_insert_rowid() as u64
		};

		self.get_table(store, TableId(id))
	}
}
