// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::Value;

/// Ordered column names of a result.
pub type Header = Vec<String>;

/// One tuple of a result, ordered like the [`Header`].
pub type Row = Vec<Value>;

/// Provenance of a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
	/// Source text of the query that produced the rows, if known
	pub query: Option<String>,
	/// Unix timestamp in milliseconds at which the query started, if known
	pub timestamp: Option<u64>,
	/// Absolute offset of the first row of this result within the full result
	pub chunk_start: usize,
}

impl Meta {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: Some(query.into()),
			..Default::default()
		}
	}

	pub fn with_timestamp(mut self, timestamp: u64) -> Self {
		self.timestamp = Some(timestamp);
		self
	}
}

/// A materialized result: header, metadata and a contiguous run of rows.
///
/// This is the unit handed to sinks. For a page or span `meta.chunk_start`
/// holds the absolute index of `rows[0]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
	pub header: Header,
	pub meta: Meta,
	pub rows: Vec<Row>,
}

impl QueryResult {
	pub fn new(header: Header, meta: Meta, rows: Vec<Row>) -> Self {
		Self {
			header,
			meta,
			rows,
		}
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn chunk_start(&self) -> usize {
		self.meta.chunk_start
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_serialize_page() {
		let result = QueryResult::new(
			vec!["id".to_string(), "name".to_string()],
			Meta {
				query: Some("SELECT id, name FROM users".to_string()),
				timestamp: None,
				chunk_start: 20,
			},
			vec![vec![Value::int8(20), Value::utf8("ada")]],
		);

		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["header"], serde_json::json!(["id", "name"]));
		assert_eq!(json["meta"]["chunk_start"], 20);
		assert_eq!(json["rows"][0][1], serde_json::json!({ "Utf8": "ada" }));
	}
}
