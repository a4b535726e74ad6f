// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! SQLite-backed storage.
//!
//! A single connection behind a mutex serves both DDL and row statements;
//! the lifecycle manager's per-table locks already serialize schema changes,
//! and `busy_timeout` bounds any residual contention.

use std::{
	fs,
	sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, instrument};

use dyntable_type::{
	Error, Result,
	diagnostic::store::{connect_failed, ddl_failed, statement_failed, store_busy, table_vanished},
	error,
};

use crate::config::{DbPath, SqliteConfig};

/// Handle to one SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
	inner: Arc<SqliteStoreInner>,
}

struct SqliteStoreInner {
	conn: Mutex<Connection>,
	config: SqliteConfig,
}

impl SqliteStore {
	/// Open the database and apply the configured pragmas.
	#[instrument(name = "store::sqlite::open", level = "info", skip(config), fields(
		path = %config.path.display(),
		journal_mode = %config.journal_mode.as_str(),
	))]
	pub fn open(config: SqliteConfig) -> Result<Self> {
		let conn = match &config.path {
			DbPath::File(path) => {
				if let Some(parent) = path.parent() {
					fs::create_dir_all(parent).map_err(|err| {
						error!(connect_failed(config.path.display(), err.to_string()))
					})?;
				}
				Connection::open(path)
					.map_err(|err| error!(connect_failed(config.path.display(), err.to_string())))?
			}
			DbPath::Memory => Connection::open_in_memory()
				.map_err(|err| error!(connect_failed(config.path.display(), err.to_string())))?,
		};

		conn.busy_timeout(config.busy_timeout)
			.map_err(|err| error!(connect_failed(config.path.display(), err.to_string())))?;
		conn.pragma_update(None, "journal_mode", config.journal_mode.as_str())
			.map_err(|err| error!(connect_failed(config.path.display(), err.to_string())))?;
		conn.pragma_update(None, "synchronous", config.synchronous_mode.as_str())
			.map_err(|err| error!(connect_failed(config.path.display(), err.to_string())))?;

		Ok(Self {
			inner: Arc::new(SqliteStoreInner { conn: Mutex::new(conn), config }),
		})
	}

	/// In-memory store for tests and ephemeral engines.
	pub fn in_memory() -> Result<Self> {
		Self::open(SqliteConfig::in_memory())
	}

	pub fn config(&self) -> &SqliteConfig {
		&self.inner.config
	}

	/// Lock and return the underlying connection. Callers build their own
	/// statements and map failures through [`map_statement_err`].
	pub fn connection(&self) -> MutexGuard<'_, Connection> {
		self.inner.conn.lock().unwrap()
	}

	/// Execute a single DDL statement.
	pub fn execute_ddl(&self, sql: &str) -> Result<()> {
		debug!(statement = %sql, "executing ddl");
		let conn = self.connection();
		conn.execute(sql, []).map_err(|err| map_ddl_err(sql, err))?;
		Ok(())
	}

	/// Resolve a physical table name by prefix-wildcard pattern against the
	/// storage catalog (`sqlite_master`). The pattern uses `\` as its LIKE
	/// escape character. First match in name order wins.
	pub fn resolve_physical_name(&self, pattern: &str) -> Result<Option<String>> {
		const SQL: &str = "SELECT name FROM sqlite_master \
			WHERE type = 'table' AND name LIKE ?1 ESCAPE '\\' ORDER BY name LIMIT 1";
		let conn = self.connection();
		conn.query_row(SQL, params![pattern], |row| row.get::<_, String>(0))
			.optional()
			.map_err(|err| map_statement_err(SQL, err))
	}
}

fn is_busy(err: &rusqlite::Error) -> bool {
	matches!(err, rusqlite::Error::SqliteFailure(e, _)
		if matches!(e.code, rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked))
}

fn missing_table_detail(err: &rusqlite::Error) -> Option<&str> {
	match err {
		rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.starts_with("no such table") => {
			Some(msg.as_str())
		}
		_ => None,
	}
}

/// Map a rusqlite failure from a DDL statement. Contention stays retryable;
/// everything else is a fatal DDL failure.
pub fn map_ddl_err(statement: &str, err: rusqlite::Error) -> Error {
	if is_busy(&err) {
		return error!(store_busy(err.to_string()));
	}
	error!(ddl_failed(statement, err.to_string()))
}

/// Map a rusqlite failure from a row or catalog statement. Contention and a
/// vanished table are retryable; everything else surfaces as a statement
/// failure.
pub fn map_statement_err(statement: &str, err: rusqlite::Error) -> Error {
	if is_busy(&err) {
		return error!(store_busy(err.to_string()));
	}
	if let Some(detail) = missing_table_detail(&err) {
		return error!(table_vanished(detail));
	}
	error!(statement_failed(statement, err.to_string()))
}

/// Whether the failure is a UNIQUE constraint violation, used by the
/// definition store to arbitrate duplicate-name races.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
	matches!(err, rusqlite::Error::SqliteFailure(e, Some(msg))
		if e.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains("UNIQUE constraint failed"))
}
