// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Shared test utilities.

mod tempdir;

pub use tempdir::temp_dir;
