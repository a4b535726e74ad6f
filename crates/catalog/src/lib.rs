// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Catalog: the durable definition model and everything derived from it.
//!
//! A [`TableDef`] is the client-visible declaration of a logical table. The
//! schema validator turns raw declarations into typed schemas, the compiler
//! turns a definition into a [`CompiledTable`] (ordered columns plus the
//! derived physical name), the [`DefinitionCache`] keeps compiled
//! definitions around for a short TTL, and [`CatalogStore`] persists
//! definitions in the engine's system table.

pub mod cache;
pub mod column;
pub mod compile;
pub mod def;
pub mod naming;
pub mod schema;
pub mod store;

pub use cache::DefinitionCache;
pub use column::{BooleanConstraints, ColumnDef, ColumnType, NumberConstraints, StringConstraints};
pub use compile::{CompiledTable, compile_table};
pub use def::{FieldOptions, FieldSpec, TableDef, TableId, TableSchema, generate_identifier};
pub use schema::{RawFieldSpec, RawSchema, validate_schema};
pub use store::{CatalogStore, TableChange, TableToCreate};
