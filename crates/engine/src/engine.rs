// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{ops::Deref, sync::Arc};

use tracing::{debug, instrument};

use dyntable_catalog::{
	CatalogStore, DefinitionCache, RawSchema, TableChange, TableDef, TableId, TableToCreate,
	naming::{is_safe_identifier, resolve_pattern},
	validate_schema,
};
use dyntable_store::SqliteStore;
use dyntable_type::{Result, internal_error};

use crate::{compiler::EntityCompiler, config::EngineConfig, lifecycle::TableLifecycle};

/// The engine facade: definition CRUD plus the row access layer.
///
/// Cheap to clone and safe to share across threads; all clones operate on
/// the same storage, cache and lock registry.
pub struct Engine(Arc<EngineInner>);

pub struct EngineInner {
	pub(crate) config: EngineConfig,
	pub(crate) store: SqliteStore,
	pub(crate) catalog: CatalogStore,
	pub(crate) compiler: EntityCompiler,
	pub(crate) lifecycle: TableLifecycle,
}

impl Clone for Engine {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl Deref for Engine {
	type Target = EngineInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Engine {
	/// Open the engine: connect storage and make sure the definitions
	/// table exists.
	#[instrument(name = "engine::open", level = "info", skip(config), fields(
		namespace = %config.namespace,
		path = %config.storage.path.display(),
	))]
	pub fn open(config: EngineConfig) -> Result<Self> {
		if !is_safe_identifier(&config.namespace) {
			return Err(internal_error!(
				"namespace '{}' is not a safe storage identifier",
				config.namespace
			));
		}

		let store = SqliteStore::open(config.storage.clone())?;
		let catalog = CatalogStore::new(&config.namespace);
		catalog.bootstrap(&store)?;

		let cache = Arc::new(DefinitionCache::new(config.cache_ttl));
		let compiler = EntityCompiler::new(
			config.namespace.clone(),
			store.clone(),
			catalog.clone(),
			cache.clone(),
		);
		let lifecycle =
			TableLifecycle::new(config.namespace.clone(), store.clone(), compiler.clone(), cache);

		debug!("engine opened");
		Ok(Self(Arc::new(EngineInner {
			config,
			store,
			catalog,
			compiler,
			lifecycle,
		})))
	}

	pub fn in_memory() -> Result<Self> {
		Self::open(EngineConfig::in_memory())
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Create a logical table: validate the declaration, persist the
	/// definition, materialize the physical table.
	#[instrument(name = "engine::create_table", level = "trace", skip(self, schema), fields(table = %name))]
	pub fn create_table(&self, name: &str, schema: RawSchema) -> Result<TableDef> {
		let schema = validate_schema(&schema)?;
		let def = self.catalog.create_table(
			&self.store,
			TableToCreate {
				name: name.to_string(),
				schema,
			},
		)?;
		self.lifecycle.post_create(&def)?;
		Ok(def)
	}

	/// Apply a partial definition change and rebuild the physical table.
	///
	/// Any update, including a plain rename, rotates the identifier and
	/// rebuilds; the rows of the old physical table are gone afterwards.
	#[instrument(name = "engine::update_table", level = "trace", skip(self, name, schema), fields(table = %id))]
	pub fn update_table(
		&self,
		id: TableId,
		name: Option<&str>,
		schema: Option<RawSchema>,
	) -> Result<TableDef> {
		let old = self.catalog.get_table(&self.store, id)?;
		let schema = schema.map(|raw| validate_schema(&raw)).transpose()?;
		let updated = self.catalog.update_table(
			&self.store,
			id,
			TableChange {
				name: name.map(String::from),
				schema,
			},
		)?;
		self.lifecycle.post_update(&old, &updated)?;
		// Read back: the rebuild rotated the stored identifier.
		self.catalog.get_table(&self.store, id)
	}

	/// Delete a definition and its physical table.
	#[instrument(name = "engine::delete_table", level = "trace", skip(self), fields(table = %id))]
	pub fn delete_table(&self, id: TableId) -> Result<()> {
		let def = self.catalog.get_table(&self.store, id)?;
		self.lifecycle.pre_delete(&def)?;
		self.catalog.delete_table(&self.store, id)
	}

	pub fn get_table(&self, id: TableId) -> Result<TableDef> {
		self.catalog.get_table(&self.store, id)
	}

	pub fn list_tables(&self) -> Result<Vec<TableDef>> {
		self.catalog.list_tables(&self.store)
	}

	/// Resolve the physical table currently backing `name`, if any.
	pub fn resolve_physical_name(&self, name: &str) -> Result<Option<String>> {
		self.store.resolve_physical_name(&resolve_pattern(&self.config.namespace, name))
	}
}
