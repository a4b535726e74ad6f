// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Core vocabulary for the DynTable engine: the field-type enumeration clients
//! declare schemas with, the runtime value representation rows are coerced
//! into, and the diagnostic-based error model shared by every crate in the
//! workspace.

pub mod error;
pub mod field;
pub mod value;

pub use error::{Error, Result, diagnostic};
pub use field::FieldType;
pub use value::Value;
