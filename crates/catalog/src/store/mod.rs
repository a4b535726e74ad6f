// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Persistence of table definitions.
//!
//! Definitions live in one ordinary SQLite table per namespace,
//! `{namespace}_defs`. The schema column holds the validated field map as
//! JSON; the identifier column holds the physical-name suffix that rotates
//! on every schema change.

use rusqlite::{Row, types::Type};

pub use create::TableToCreate;
pub use update::TableChange;

use dyntable_store::SqliteStore;
use dyntable_type::Result;

use crate::{
	def::{TableDef, TableId},
	naming::quote_ident,
};

mod create;
mod delete;
mod get;
mod update;

/// Access to the definitions table of one namespace.
#[derive(Debug, Clone)]
pub struct CatalogStore {
	defs_table: String,
}

impl CatalogStore {
	pub fn new(namespace: &str) -> Self {
		Self {
			defs_table: format!("{namespace}_defs"),
		}
	}

	/// Name of the backing definitions table.
	pub fn defs_table(&self) -> &str {
		&self.defs_table
	}

	/// Create the definitions table if this is a fresh database.
	pub fn bootstrap(&self, store: &SqliteStore) -> Result<()> {
		store.execute_ddl(&format!(
			"CREATE TABLE IF NOT EXISTS {} (\
			 id INTEGER PRIMARY KEY AUTOINCREMENT, \
			 name TEXT NOT NULL UNIQUE, \
			 identifier TEXT NOT NULL, \
			 schema TEXT NOT NULL)",
			quote_ident(&self.defs_table)
		))
	}

	pub(crate) fn def_from_row(row: &Row<'_>) -> rusqlite::Result<TableDef> {
		let schema_json: String = row.get(3)?;
		let schema = serde_json::from_str(&schema_json).map_err(|err| {
			rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err))
		})?;
		Ok(TableDef {
			id: TableId(row.get(0)?),
			name: row.get(1)?,
			identifier: row.get(2)?,
			schema,
		})
	}
}
