// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Storage configuration.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbPath {
	File(PathBuf),
	Memory,
}

impl DbPath {
	pub fn display(&self) -> String {
		match self {
			DbPath::File(path) => path.display().to_string(),
			DbPath::Memory => ":memory:".to_string(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
	Wal,
	Memory,
	Delete,
}

impl JournalMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			JournalMode::Wal => "WAL",
			JournalMode::Memory => "MEMORY",
			JournalMode::Delete => "DELETE",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynchronousMode {
	Off,
	Normal,
	Full,
}

impl SynchronousMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			SynchronousMode::Off => "OFF",
			SynchronousMode::Normal => "NORMAL",
			SynchronousMode::Full => "FULL",
		}
	}
}

/// SQLite connection configuration.
///
/// `busy_timeout` bounds how long any statement waits on a lock before the
/// failure surfaces as retryable contention; nothing blocks indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
	pub path: DbPath,
	pub journal_mode: JournalMode,
	pub synchronous_mode: SynchronousMode,
	pub busy_timeout: Duration,
}

impl SqliteConfig {
	/// File-backed database with WAL journaling.
	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			path: DbPath::File(path.into()),
			journal_mode: JournalMode::Wal,
			synchronous_mode: SynchronousMode::Normal,
			busy_timeout: DEFAULT_BUSY_TIMEOUT,
		}
	}

	/// In-memory database, mainly for tests and ephemeral engines.
	pub fn in_memory() -> Self {
		Self {
			path: DbPath::Memory,
			journal_mode: JournalMode::Memory,
			synchronous_mode: SynchronousMode::Normal,
			busy_timeout: DEFAULT_BUSY_TIMEOUT,
		}
	}

	pub fn with_journal_mode(mut self, mode: JournalMode) -> Self {
		self.journal_mode = mode;
		self
	}

	pub fn with_synchronous_mode(mut self, mode: SynchronousMode) -> Self {
		self.synchronous_mode = mode;
		self
	}

	pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
		self.busy_timeout = timeout;
		self
	}
}

impl Default for SqliteConfig {
	fn default() -> Self {
		Self::in_memory()
	}
}
