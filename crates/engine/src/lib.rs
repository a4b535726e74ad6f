// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The engine facade: runtime-declared tables over SQLite.
//!
//! Clients declare tabular schemas at runtime (field names, a fixed type
//! vocabulary and a small option whitelist) and perform CRUD on conforming
//! rows. Definitions are durable; each is backed by a physical table whose
//! name embeds a rotating identifier. Editing a definition is a
//! destructive rebuild: drop, rotate, recreate.
//!
//! ```no_run
//! use dyntable_engine::Engine;
//! use serde_json::json;
//!
//! # fn main() -> dyntable_engine::Result<()> {
//! let engine = Engine::in_memory()?;
//! let table = engine.create_table(
//! 	"orders",
//! 	serde_json::from_value(json!({
//! 		"name": {"type": "string", "options": {"max_length": 40}},
//! 		"total": {"type": "number", "options": {"null": true}},
//! 	}))
//! 	.unwrap(),
//! )?;
//!
//! let row = engine.insert_row(
//! 	table.id,
//! 	json!({"name": "bread", "total": 3.5}).as_object().unwrap(),
//! )?;
//! let fetched = engine.get_row(table.id, row.id)?;
//! assert_eq!(fetched, row);
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod rows;

pub use compiler::EntityCompiler;
pub use config::EngineConfig;
pub use engine::Engine;
pub use lifecycle::TableLifecycle;
pub use rows::{Row, RowId, RowPayload};

pub use dyntable_catalog::{RawSchema, TableDef, TableId};
pub use dyntable_store::{DbPath, JournalMode, SqliteConfig, SynchronousMode};
pub use dyntable_type::{Error, Result};
