// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Compiler orchestration: pure compilation plus cache and persistence.

use std::sync::Arc;

use tracing::{debug, instrument};

use dyntable_catalog::{
	CatalogStore, CompiledTable, DefinitionCache, TableDef, compile_table, generate_identifier,
};
use dyntable_store::SqliteStore;
use dyntable_type::{Result, internal_error};

/// Turns stored definitions into live physical shapes.
///
/// `compile` is the single entry point for every component that needs a
/// table's physical shape: the read path (rows), which must not touch
/// storage, and the lifecycle path, which materializes the shape as DDL.
#[derive(Clone)]
pub struct EntityCompiler {
	namespace: String,
	store: SqliteStore,
	catalog: CatalogStore,
	cache: Arc<DefinitionCache>,
}

impl EntityCompiler {
	pub fn new(
		namespace: impl Into<String>,
		store: SqliteStore,
		catalog: CatalogStore,
		cache: Arc<DefinitionCache>,
	) -> Self {
		Self {
			namespace: namespace.into(),
			store,
			catalog,
			cache,
		}
	}

	pub fn cache(&self) -> &DefinitionCache {
		&self.cache
	}

	/// Compile `def` into its physical shape.
	///
	/// With `persist` unset this is the hot read path: a live cache entry is
	/// answered without touching storage, and every outcome (hit or
	/// recompile) rewrites the cache entry, restarting its TTL.
	///
	/// With `persist` set the shape is materialized with
	/// `CREATE TABLE IF NOT EXISTS`; `force_new_identifier` additionally
	/// compiles against a freshly generated identifier and writes it to the
	/// stored definition through [`CatalogStore::update_identifier`], the
	/// direct path that raises no further lifecycle events.
	#[instrument(name = "engine::compile", level = "trace", skip(self, def), fields(
		table = %def.name,
		persist,
		force_new_identifier,
	))]
	pub fn compile(
		&self,
		def: &TableDef,
		persist: bool,
		force_new_identifier: bool,
	) -> Result<CompiledTable> {
		if force_new_identifier && !persist {
			return Err(internal_error!(
				"compile of '{}' forced a new identifier without persist",
				def.name
			));
		}

		if !persist {
			if let Some(hit) = self.cache.get(&def.name) {
				self.cache.put(&def.name, hit.clone());
				return Ok(hit);
			}
		}

		let forced = force_new_identifier.then(generate_identifier);
		let compiled = compile_table(&self.namespace, def, forced.as_deref())?;

		if persist {
			self.store.execute_ddl(&compiled.create_ddl())?;
			if let Some(identifier) = &forced {
				self.catalog.update_identifier(&self.store, def.id, identifier)?;
				debug!(table = %def.name, identifier = %identifier, "identifier rotated");
			}
		}

		self.cache.put(&def.name, compiled.clone());
		Ok(compiled)
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use serde_json::json;

	use dyntable_catalog::{TableToCreate, naming::resolve_pattern, validate_schema};

	use super::*;

	fn setup() -> (SqliteStore, CatalogStore, EntityCompiler, TableDef) {
		let store = SqliteStore::in_memory().unwrap();
		let catalog = CatalogStore::new("dyntable");
		catalog.bootstrap(&store).unwrap();
		let def = catalog
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
		let compiler = EntityCompiler::new(
			"dyntable",
			store.clone(),
			catalog.clone(),
			Arc::new(DefinitionCache::new(Duration::from_secs(60))),
		);
		(store, catalog, compiler, def)
	}

	#[test]
	fn test_persist_creates_the_physical_table() {
		let (store, _, compiler, def) = setup();
		let compiled = compiler.compile(&def, true, false).unwrap();
		assert_eq!(
			store.resolve_physical_name(&resolve_pattern("dyntable", "users")).unwrap().as_deref(),
			Some(compiled.physical_name.as_str())
		);
	}

	#[test]
	fn test_read_path_is_cached() {
		let (_, _, compiler, def) = setup();
		let first = compiler.compile(&def, false, false).unwrap();
		let second = compiler.compile(&def, false, false).unwrap();
		assert_eq!(first, second);
		assert_eq!(compiler.cache().len(), 1);
	}

	#[test]
	fn test_persist_is_idempotent() {
		let (_, _, compiler, def) = setup();
		compiler.compile(&def, true, false).unwrap();
		compiler.compile(&def, true, false).unwrap();
	}

	#[test]
	fn test_forced_identifier_is_persisted() {
		let (store, catalog, compiler, def) = setup();
		compiler.compile(&def, true, false).unwrap();
		let compiled = compiler.compile(&def, true, true).unwrap();

		let reloaded = catalog.get_table(&store, def.id).unwrap();
		assert_ne!(reloaded.identifier, def.identifier);
		assert!(compiled.physical_name.ends_with(&reloaded.identifier));
	}

	#[test]
	fn test_forced_identifier_requires_persist() {
		let (_, _, compiler, def) = setup();
		let err = compiler.compile(&def, false, true).unwrap_err();
		assert!(err.is_internal());
	}
}
