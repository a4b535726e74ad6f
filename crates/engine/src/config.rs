// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use dyntable_store::SqliteConfig;

/// Engine configuration.
///
/// The namespace prefixes every physical table name (and the definitions
/// table), so two engines with distinct namespaces can share one database
/// file without colliding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	pub storage: SqliteConfig,
	pub namespace: String,
	pub cache_ttl: Duration,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			storage: SqliteConfig::in_memory(),
			namespace: "dyntable".to_string(),
			cache_ttl: Duration::from_secs(60),
		}
	}
}

impl EngineConfig {
	pub fn in_memory() -> Self {
		Self::default()
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			storage: SqliteConfig::file(path),
			..Self::default()
		}
	}

	pub fn with_storage(mut self, storage: SqliteConfig) -> Self {
		self.storage = storage;
		self
	}

	pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = namespace.into();
		self
	}

	pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
		self.cache_ttl = ttl;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = EngineConfig::default();
		assert_eq!(config.namespace, "dyntable");
		assert_eq!(config.cache_ttl, Duration::from_secs(60));
	}

	#[test]
	fn test_builders() {
		let config = EngineConfig::file("/tmp/dyn.db")
			.with_namespace("tenant_a")
			.with_cache_ttl(Duration::from_secs(5));
		assert_eq!(config.namespace, "tenant_a");
		assert_eq!(config.cache_ttl, Duration::from_secs(5));
	}
}
