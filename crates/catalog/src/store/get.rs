// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use rusqlite::{OptionalExtension, params};

use dyntable_store::{SqliteStore, map_statement_err};
use dyntable_type::{Result, diagnostic::catalog::table_not_found, error};

use crate::{
	CatalogStore,
	def::{TableDef, TableId},
};

impl CatalogStore {
	pub fn find_table(&self, store: &SqliteStore, id: TableId) -> Result<Option<TableDef>> {
		let conn = store.connection();
		let sql = format!(
			"SELECT id, name, identifier, schema FROM {} WHERE id = ?1",
			self.defs_table()
		);
		conn.query_row(&sql, params![id.0], Self::def_from_row)
			.optional()
			.map_err(|err| map_statement_err(&sql, err))
	}

	pub fn get_table(&self, store: &SqliteStore, id: TableId) -> Result<TableDef> {
		self.find_table(store, id)?.ok_or_else(|| error!(table_not_found(id.0)))
	}

	pub fn find_table_by_name(&self, store: &SqliteStore, name: &str) -> Result<Option<TableDef>> {
		let conn = store.connection();
		let sql = format!(
			"SELECT id, name, identifier, schema FROM {} WHERE name = ?1",
			self.defs_table()
		);
		conn.query_row(&sql, params![name], Self::def_from_row)
			.optional()
			.map_err(|err| map_statement_err(&sql, err))
	}

	/// All definitions, oldest first.
	pub fn list_tables(&self, store: &SqliteStore) -> Result<Vec<TableDef>> {
		let conn = store.connection();
		let sql = format!("SELECT id, name, identifier, schema FROM {} ORDER BY id", self.defs_table());
		let mut stmt = conn.prepare(&sql).map_err(|err| map_statement_err(&sql, err))?;
		let rows = stmt
			.query_map([], Self::def_from_row)
			.map_err(|err| map_statement_err(&sql, err))?;
		rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|err| map_statement_err(&sql, err))
	}
}
