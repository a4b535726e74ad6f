// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use rusqlite::params;

use dyntable_store::{SqliteStore, map_statement_err};
use dyntable_type::{Result, diagnostic::catalog::table_not_found, return_error};

use crate::{CatalogStore, def::TableId};

impl CatalogStore {
	/// Remove a definition. The physical table is not touched here; the
	/// lifecycle manager drops it before the definition goes away.
	pub fn delete_table(&self, store: &SqliteStore, id: TableId) -> Result<()> {
		let conn = store.connection();
		let sql = format!("DELETE FROM {} WHERE id = ?1", self.defs_table());
		let affected =
			conn.execute(&sql, params![id.0]).map_err(|err| map_statement_err(&sql, err))?;
		if affected == 0 {
			return_error!(table_not_found(id.0));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use dyntable_store::SqliteStore;

	use super::*;
	use crate::{schema::validate_schema, store::TableToCreate};

	#[test]
	fn test_ok() {
		let store = SqliteStore::in_memory().unwrap();
		let catalog = CatalogStore::new("dyntable");
		catalog.bootstrap(&store).unwrap();
		catalog
			.create_table(
				&store,
				TableToCreate {
					name: "users".to_string(),
					schema: validate_schema(
						&serde_json::from_value(json!({"name": {"type": "string"}})).unwrap(),
					)
					.unwrap(),
				},
			)
			.unwrap();

		catalog.delete_table(&store, TableId(1)).unwrap();
		assert!(catalog.find_table(&store, TableId(1)).unwrap().is_none());
	}

	#[test]
	fn test_not_found() {
		let store = SqliteStore::in_memory().unwrap();
		let catalog = CatalogStore::new("dyntable");
		catalog.bootstrap(&store).unwrap();

		let err = catalog.delete_table(&store, TableId(7)).unwrap_err();
		assert_eq!(err.code(), "CATALOG_002");
	}
}
