// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! SQLite storage layer.
//!
//! [`SqliteStore`] owns the single connection everything in the engine runs
//! through: DDL execution for the lifecycle manager, catalog resolution for
//! drop/resolve, and raw statement access for the definition store and the
//! row layer. Failures are mapped onto the workspace diagnostic families.

mod config;
mod sqlite;

pub use config::*;
pub use sqlite::*;
