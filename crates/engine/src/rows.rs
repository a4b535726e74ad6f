// Copyright (c) dyntable.dev 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Row access: CRUD against the physical table behind a definition.
//!
//! Every operation resolves the definition by id, compiles it on the read
//! path (which refreshes the cache TTL) and validates payload values
//! through the compiled columns before any SQL runs. Payload keys that are
//! not schema fields are ignored.

use std::iter::once;

use indexmap::IndexMap;
use rusqlite::{OptionalExtension, params, params_from_iter, types::Value as SqlValue};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::instrument;

use dyntable_catalog::{ColumnType, CompiledTable, TableDef, TableId, naming::quote_ident};
use dyntable_store::map_statement_err;
use dyntable_type::{
	Result, Value,
	diagnostic::{catalog::row_not_found, constraint::required_field_missing},
	error, return_error,
};

use crate::engine::Engine;

/// Identity of a row within one logical table.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowId(pub i64);

impl std::fmt::Display for RowId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A stored row rendered for the client: `id` plus one key per schema
/// field, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
	pub id: RowId,
	#[serde(flatten)]
	pub fields: IndexMap<String, JsonValue>,
}

/// The JSON object shape row payloads arrive in.
pub type RowPayload = serde_json::Map<String, JsonValue>;

impl Engine {
	#[instrument(name = "engine::list_rows", level = "trace", skip(self), fields(table = %table))]
	pub fn list_rows(&self, table: TableId) -> Result<Vec<Row>> {
		let (_, compiled) = self.active(table)?;
		let conn = self.store.connection();
		let sql = format!("{} ORDER BY id", select_sql(&compiled));
		let mut stmt = conn.prepare(&sql).map_err(|err| map_statement_err(&sql, err))?;
		let rows = stmt
			.query_map([], |row| row_from_sql(&compiled, row))
			.map_err(|err| map_statement_err(&sql, err))?;
		rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|err| map_statement_err(&sql, err))
	}

	#[instrument(name = "engine::insert_row", level = "trace", skip(self, fields), fields(table = %table))]
	pub fn insert_row(&self, table: TableId, fields: &RowPayload) -> Result<Row> {
		let (def, compiled) = self.active(table)?;

		let mut names = Vec::with_capacity(compiled.columns.len());
		let mut values = Vec::with_capacity(compiled.columns.len());
		for column in &compiled.columns {
			let value = match fields.get(&column.name) {
				Some(raw) => column.coerce(raw)?,
				None => {
					if column.required() {
						return_error!(required_field_missing(&column.name));
					}
					column.coerce(&JsonValue::Null)?
				}
			};
			names.push(quote_ident(&column.name));
			values.push(value);
		}

		let row_id = {
			let conn = self.store.connection();
			let sql = if names.is_empty() {
				format!("INSERT INTO {} DEFAULT VALUES", quote_ident(&compiled.physical_name))
			} else {
				let placeholders =
					(1..=names.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
				format!(
					"INSERT INTO {} ({}) VALUES ({})",
					quote_ident(&compiled.physical_name),
					names.join(", "),
					placeholders
				)
			};
			conn.execute(&sql, params_from_iter(values.iter().map(sql_value)))
				.map_err(|err| map_statement_err(&sql, err))?;
			RowId(conn.last_insert_rowid())
		};

		self.fetch_row(&def, &compiled, row_id)
	}

	#[instrument(name = "engine::get_row", level = "trace", skip(self), fields(table = %table, row = %row))]
	pub fn get_row(&self, table: TableId, row: RowId) -> Result<Row> {
		let (def, compiled) = self.active(table)?;
		self.fetch_row(&def, &compiled, row)
	}

	/// Partial update: only payload keys that name schema fields are
	/// validated and written; everything else on the row stays as it was.
	#[instrument(name = "engine::update_row", level = "trace", skip(self, fields), fields(table = %table, row = %row))]
	pub fn update_row(&self, table: TableId, row: RowId, fields: &RowPayload) -> Result<Row> {
		let (def, compiled) = self.active(table)?;

		let mut assignments = Vec::new();
		let mut values = Vec::new();
		for column in &compiled.columns {
			let Some(raw) = fields.get(&column.name) else {
				continue;
			};
			values.push(column.coerce(raw)?);
			assignments.push(format!("{} = ?{}", quote_ident(&column.name), values.len()));
		}

		if assignments.is_empty() {
			// Nothing to write; behave like a read so the caller still gets
			// the row (or its absence).
			return self.fetch_row(&def, &compiled, row);
		}

		let affected = {
			let conn = self.store.connection();
			let sql = format!(
				"UPDATE {} SET {} WHERE id = ?{}",
				quote_ident(&compiled.physical_name),
				assignments.join(", "),
				values.len() + 1
			);
			let bound = params_from_iter(
				values.iter().map(sql_value).chain(once(SqlValue::Integer(row.0))),
			);
			conn.execute(&sql, bound).map_err(|err| map_statement_err(&sql, err))?
		};
		if affected == 0 {
			return_error!(row_not_found(&def.name, row.0));
		}

		self.fetch_row(&def, &compiled, row)
	}

	#[instrument(name = "engine::delete_row", level = "trace", skip(self), fields(table = %table, row = %row))]
	pub fn delete_row(&self, table: TableId, row: RowId) -> Result<()> {
		let (def, compiled) = self.active(table)?;
		let conn = self.store.connection();
		let sql = format!("DELETE FROM {} WHERE id = ?1", quote_ident(&compiled.physical_name));
		let affected =
			conn.execute(&sql, params![row.0]).map_err(|err| map_statement_err(&sql, err))?;
		if affected == 0 {
			return_error!(row_not_found(&def.name, row.0));
		}
		Ok(())
	}

	/// Resolve the definition and its active compiled shape (read path).
	fn active(&self, table: TableId) -> Result<(TableDef, CompiledTable)> {
		let def = self.catalog.get_table(&self.store, table)?;
		let compiled = self.compiler.compile(&def, false, false)?;
		Ok((def, compiled))
	}

	fn fetch_row(&self, def: &TableDef, compiled: &CompiledTable, row: RowId) -> Result<Row> {
		let conn = self.store.connection();
		let sql = format!("{} WHERE id = ?1", select_sql(compiled));
		conn.query_row(&sql, params![row.0], |sql_row| row_from_sql(compiled, sql_row))
			.optional()
			.map_err(|err| map_statement_err(&sql, err))?
			.ok_or_else(|| error!(row_not_found(&def.name, row.0)))
	}
}

fn select_sql(compiled: &CompiledTable) -> String {
	let mut sql = String::from("SELECT id");
	for column in &compiled.columns {
		sql.push_str(", ");
		sql.push_str(&quote_ident(&column.name));
	}
	sql.push_str(" FROM ");
	sql.push_str(&quote_ident(&compiled.physical_name));
	sql
}

fn sql_value(value: &Value) -> SqlValue {
	match value {
		Value::Undefined => SqlValue::Null,
		Value::Boolean(b) => SqlValue::Integer(i64::from(*b)),
		Value::Float(f) => SqlValue::Real(*f),
		Value::Utf8(s) => SqlValue::Text(s.clone()),
	}
}

fn row_from_sql(compiled: &CompiledTable, row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
	let id = RowId(row.get(0)?);
	let mut fields = IndexMap::with_capacity(compiled.columns.len());
	for (index, column) in compiled.columns.iter().enumerate() {
		let value = match &column.ty {
			ColumnType::String(_) => row
				.get::<_, Option<String>>(index + 1)?
				.map(JsonValue::String)
				.unwrap_or(JsonValue::Null),
			ColumnType::Number(_) => match row.get::<_, Option<f64>>(index + 1)? {
				Some(number) => serde_json::Number::from_f64(number)
					.map(JsonValue::Number)
					.unwrap_or(JsonValue::Null),
				None => JsonValue::Null,
			},
			ColumnType::Boolean(_) => row
				.get::<_, Option<i64>>(index + 1)?
				.map(|flag| JsonValue::Bool(flag != 0))
				.unwrap_or(JsonValue::Null),
		};
		fields.insert(column.name.clone(), value);
	}
	Ok(Row { id, fields })
}
