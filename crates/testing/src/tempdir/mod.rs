// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{
	env, fs,
	panic::{AssertUnwindSafe, catch_unwind, resume_unwind},
	path::Path,
};

use uuid::Uuid;

/// Run `f` inside a scratch directory that is removed afterwards, even when
/// an assertion inside the closure panics.
pub fn temp_dir<F>(f: F)
where
	F: FnOnce(&Path),
{
	let mut path = env::temp_dir();
	path.push(format!("dyntable-{}", Uuid::new_v4()));

	fs::create_dir_all(&path).expect("failed to create temp dir");
	let result = catch_unwind(AssertUnwindSafe(|| f(&path)));

	let _ = fs::remove_dir_all(&path);
	if let Err(panic) = result {
		resume_unwind(panic);
	}
}
