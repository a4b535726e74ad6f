// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Time-bounded cache of compiled tables, keyed by logical name.
//!
//! The cache is a rebuildable projection: dropping any entry (or the whole
//! cache) is always safe, a miss recompiles from the stored definition.

use std::{
	collections::HashMap,
	time::{Duration, Instant},
};

use parking_lot::RwLock;

use crate::compile::CompiledTable;

struct CacheEntry {
	compiled: CompiledTable,
	cached_at: Instant,
}

/// Compiled-table cache with a per-entry time-to-live.
///
/// Entries are stored under the logical table name. A write overwrites any
/// existing entry and restarts its clock; an expired entry is treated as
/// absent on read and lazily dropped.
pub struct DefinitionCache {
	entries: RwLock<HashMap<String, CacheEntry>>,
	ttl: Duration,
}

impl DefinitionCache {
	pub fn new(ttl: Duration) -> Self {
		Self {
			entries: RwLock::new(HashMap::new()),
			ttl,
		}
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Fetch the live entry for `name`, if any.
	pub fn get(&self, name: &str) -> Option<CompiledTable> {
		{
			let entries = self.entries.read();
			let entry = entries.get(name)?;
			if entry.cached_at.elapsed() < self.ttl {
				return Some(entry.compiled.clone());
			}
		}
		// Expired. Drop it so the map does not accumulate stale shapes.
		self.entries.write().remove(name);
		None
	}

	/// Store `compiled` under `name`, restarting the entry's clock.
	pub fn put(&self, name: &str, compiled: CompiledTable) {
		self.entries.write().insert(
			name.to_string(),
			CacheEntry {
				compiled,
				cached_at: Instant::now(),
			},
		);
	}

	pub fn remove(&self, name: &str) {
		self.entries.write().remove(name);
	}

	pub fn evict_expired(&self) {
		let ttl = self.ttl;
		self.entries.write().retain(|_, entry| entry.cached_at.elapsed() < ttl);
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;

	fn compiled(physical_name: &str) -> CompiledTable {
		CompiledTable {
			physical_name: physical_name.to_string(),
			columns: Vec::new(),
		}
	}

	#[test]
	fn test_hit_within_ttl() {
		let cache = DefinitionCache::new(Duration::from_secs(60));
		cache.put("orders", compiled("dyntable_orders_aa"));
		assert_eq!(cache.get("orders").unwrap().physical_name, "dyntable_orders_aa");
	}

	#[test]
	fn test_miss_for_unknown_name() {
		let cache = DefinitionCache::new(Duration::from_secs(60));
		assert!(cache.get("orders").is_none());
	}

	#[test]
	fn test_entry_expires_after_ttl() {
		let cache = DefinitionCache::new(Duration::from_millis(20));
		cache.put("orders", compiled("dyntable_orders_aa"));
		thread::sleep(Duration::from_millis(40));
		assert!(cache.get("orders").is_none());
		assert!(cache.is_empty());
	}

	#[test]
	fn test_put_restarts_the_clock() {
		let cache = DefinitionCache::new(Duration::from_millis(300));
		cache.put("orders", compiled("dyntable_orders_aa"));
		thread::sleep(Duration::from_millis(200));
		cache.put("orders", compiled("dyntable_orders_bb"));
		thread::sleep(Duration::from_millis(200));
		// 400ms after the first put, 200ms after the second: still live.
		assert_eq!(cache.get("orders").unwrap().physical_name, "dyntable_orders_bb");
	}

	#[test]
	fn test_remove_drops_the_entry() {
		let cache = DefinitionCache::new(Duration::from_secs(60));
		cache.put("orders", compiled("dyntable_orders_aa"));
		cache.remove("orders");
		assert!(cache.get("orders").is_none());
	}

	#[test]
	fn test_evict_expired_keeps_live_entries() {
		let cache = DefinitionCache::new(Duration::from_millis(50));
		cache.put("stale", compiled("dyntable_stale_aa"));
		thread::sleep(Duration::from_millis(70));
		cache.put("live", compiled("dyntable_live_aa"));
		cache.evict_expired();
		assert_eq!(cache.len(), 1);
		assert!(cache.get("live").is_some());
	}
}
