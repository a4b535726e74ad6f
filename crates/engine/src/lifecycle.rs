// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Physical table lifecycle: create, destructive rebuild, drop.
//!
//! Each definition event maps to one explicit call. The update path is a
//! destructive rebuild: the old physical table is dropped and a fresh one
//! created under a rotated identifier, so existing rows do not survive a
//! schema edit. That is a documented property of the engine, not an
//! accident.

use std::{sync::Arc, thread, time::Duration};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use dyntable_catalog::{
	CompiledTable, DefinitionCache, TableDef,
	naming::{is_safe_identifier, quote_ident, resolve_pattern, slug},
};
use dyntable_store::SqliteStore;
use dyntable_type::{
	Result, diagnostic::internal::unsafe_physical_name, return_error,
};

use crate::compiler::EntityCompiler;

const CONTENTION_BACKOFF: Duration = Duration::from_millis(50);

/// Serializes lifecycle work per logical table name and keeps the physical
/// side in step with the definition store.
pub struct TableLifecycle {
	namespace: String,
	store: SqliteStore,
	compiler: EntityCompiler,
	cache: Arc<DefinitionCache>,
	locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TableLifecycle {
	pub fn new(
		namespace: impl Into<String>,
		store: SqliteStore,
		compiler: EntityCompiler,
		cache: Arc<DefinitionCache>,
	) -> Self {
		Self {
			namespace: namespace.into(),
			store,
			compiler,
			cache,
			locks: DashMap::new(),
		}
	}

	/// A definition was created: materialize its physical table.
	#[instrument(name = "engine::lifecycle::post_create", level = "trace", skip(self, def), fields(table = %def.name))]
	pub fn post_create(&self, def: &TableDef) -> Result<CompiledTable> {
		let lock = self.lock_for(&def.name);
		let _guard = lock.lock();
		self.with_retry(|| self.compiler.compile(def, true, false))
	}

	/// A definition changed: rebuild its physical table from scratch.
	///
	/// `old` is the definition as it read before the change; its name
	/// resolves the physical table to drop, so a rename does not leak the
	/// previous table. The fresh table is compiled under a rotated
	/// identifier, which the compiler persists.
	#[instrument(name = "engine::lifecycle::post_update", level = "trace", skip(self, old, updated), fields(
		table = %old.name,
		renamed_to = %updated.name,
	))]
	pub fn post_update(&self, old: &TableDef, updated: &TableDef) -> Result<CompiledTable> {
		let lock = self.lock_for(&old.name);
		let _guard = lock.lock();

		warn!(
			table = %old.name,
			"definition update rebuilds the physical table; existing rows are dropped"
		);
		if old.name != updated.name {
			self.cache.remove(&old.name);
		}
		self.with_retry(|| {
			self.drop_table(&old.name)?;
			self.compiler.compile(updated, true, true)
		})
	}

	/// A definition is being deleted: drop its physical table and forget
	/// the cached shape.
	#[instrument(name = "engine::lifecycle::pre_delete", level = "trace", skip(self, def), fields(table = %def.name))]
	pub fn pre_delete(&self, def: &TableDef) -> Result<()> {
		let lock = self.lock_for(&def.name);
		let _guard = lock.lock();

		let result = self.with_retry(|| self.drop_table(&def.name));
		self.cache.remove(&def.name);
		result
	}

	/// Drop whatever physical table currently backs `logical_name`.
	///
	/// The identifier suffix is unknown here, so the name is resolved
	/// through the storage catalog by prefix pattern. No match is a no-op:
	/// the table may never have been materialized.
	pub fn drop_table(&self, logical_name: &str) -> Result<()> {
		let slugged = slug(logical_name);
		if !is_safe_identifier(&slugged) {
			return_error!(unsafe_physical_name(&slugged));
		}

		let pattern = resolve_pattern(&self.namespace, logical_name);
		match self.store.resolve_physical_name(&pattern)? {
			Some(physical) => {
				debug!(table = %logical_name, physical = %physical, "dropping physical table");
				self.store.execute_ddl(&format!("DROP TABLE IF EXISTS {}", quote_ident(&physical)))
			}
			None => {
				debug!(table = %logical_name, "no physical table resolved; nothing to drop");
				Ok(())
			}
		}
	}

	fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
		self.locks.entry(name.to_string()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
	}

	/// Run `op`, retrying once after a short backoff if storage reported
	/// lock contention. Anything else propagates immediately.
	fn with_retry<T>(&self, op: impl Fn() -> Result<T>) -> Result<T> {
		match op() {
			Err(err) if err.is_lock_contention() => {
				warn!(code = err.code(), "storage contention during lifecycle operation, retrying once");
				thread::sleep(CONTENTION_BACKOFF);
				op()
			}
			other => other,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use serde_json::json;

	use dyntable_catalog::{CatalogStore, TableToCreate, validate_schema};

	use super::*;

	struct Fixture {
		store: SqliteStore,
		catalog: CatalogStore,
		lifecycle: TableLifecycle,
	}

	fn fixture() -> Fixture {
		let store = SqliteStore::in_memory().unwrap();
		let catalog = CatalogStore::new("dyntable");
		catalog.bootstrap(&store).unwrap();
		let cache = Arc::new(DefinitionCache::new(Duration::from_secs(60)));
		let compiler =
			EntityCompiler::new("dyntable", store.clone(), catalog.clone(), cache.clone());
		let lifecycle = TableLifecycle::new("dyntable", store.clone(), compiler, cache);
		Fixture {
			store,
			catalog,
			lifecycle,
		}
	}

	impl Fixture {
		fn create(&self, name: &str) -> TableDef {
			let def = self
				.catalog
				.create_table(
					&self.store,
					TableToCreate {
						name: name.to_string(),
						schema: validate_schema(
							&serde_json::from_value(json!({"name": {"type": "string"}})).unwrap(),
						)
						.unwrap(),
					},
				)
				.unwrap();
			self.lifecycle.post_create(&def).unwrap();
			def
		}

		fn resolve(&self, name: &str) -> Option<String> {
			self.store.resolve_physical_name(&resolve_pattern("dyntable", name)).unwrap()
		}
	}

	#[test]
	fn test_create_materializes_the_table() {
		let fx = fixture();
		let def = fx.create("users");
		let physical = fx.resolve("users").unwrap();
		assert!(physical.ends_with(&def.identifier));
	}

	#[test]
	fn test_update_rotates_and_rebuilds() {
		let fx = fixture();
		let def = fx.create("users");
		let old_physical = fx.resolve("users").unwrap();

		let updated = fx
			.catalog
			.update_table(&fx.store, def.id, Default::default())
			.unwrap();
		fx.lifecycle.post_update(&def, &updated).unwrap();

		let new_physical = fx.resolve("users").unwrap();
		assert_ne!(old_physical, new_physical);

		let reloaded = fx.catalog.get_table(&fx.store, def.id).unwrap();
		assert!(new_physical.ends_with(&reloaded.identifier));
	}

	#[test]
	fn test_rename_leaves_no_old_table_behind() {
		let fx = fixture();
		let def = fx.create("users");

		let updated = fx
			.catalog
			.update_table(
				&fx.store,
				def.id,
				dyntable_catalog::TableChange {
					name: Some("people".to_string()),
					schema: None,
				},
			)
			.unwrap();
		fx.lifecycle.post_update(&def, &updated).unwrap();

		assert!(fx.resolve("users").is_none());
		assert!(fx.resolve("people").is_some());
	}

	#[test]
	fn test_delete_drops_the_table() {
		let fx = fixture();
		let def = fx.create("users");
		fx.lifecycle.pre_delete(&def).unwrap();
		assert!(fx.resolve("users").is_none());
	}

	#[test]
	fn test_drop_of_never_materialized_table_is_a_noop() {
		let fx = fixture();
		fx.lifecycle.drop_table("ghost").unwrap();
	}

	#[test]
	fn test_drop_rejects_hostile_names() {
		let fx = fixture();
		let err = fx.lifecycle.drop_table("users; drop--").unwrap_err();
		assert_eq!(err.code(), "INTERNAL_002");
	}
}
