// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use streamcache_type::{Header, Meta, QueryResult, Row};

/// Append-only sequence of rows stored as immutable shared chunks.
///
/// Cloning copies chunk handles only, so the drain task can publish a fresh
/// snapshot every page without copying the rows received so far.
#[derive(Debug, Clone, Default)]
pub struct RowChunks {
	chunks: Vec<Arc<[Row]>>,
	len: usize,
}

impl RowChunks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Seal `rows` as a new chunk at the end of the sequence.
	pub fn push(&mut self, rows: Vec<Row>) {
		if rows.is_empty() {
			return;
		}
		self.len += rows.len();
		self.chunks.push(Arc::from(rows));
	}

	/// Rows in `[start, end)`, both bounds clamped to the current length.
	pub fn slice(&self, start: usize, end: usize) -> Vec<Row> {
		let end = end.min(self.len);
		if start >= end {
			return Vec::new();
		}

		let mut result = Vec::with_capacity(end - start);
		let mut offset = 0;
		for chunk in &self.chunks {
			let chunk_end = offset + chunk.len();
			if chunk_end <= start {
				offset = chunk_end;
				continue;
			}
			if offset >= end {
				break;
			}
			let lo = start.saturating_sub(offset);
			let hi = (end - offset).min(chunk.len());
			result.extend_from_slice(&chunk[lo..hi]);
			offset = chunk_end;
		}
		result
	}

	pub fn iter(&self) -> impl Iterator<Item = &Row> {
		self.chunks.iter().flat_map(|chunk| chunk.iter())
	}
}

/// Snapshot of one ingested result as published into the record store.
///
/// Once `drained` is true the rows are final for that identifier.
#[derive(Debug, Clone)]
pub struct CacheRecord {
	pub header: Header,
	pub meta: Meta,
	pub rows: RowChunks,
	pub drained: bool,
}

impl CacheRecord {
	pub fn new(header: Header, meta: Meta) -> Self {
		Self {
			header,
			meta,
			rows: RowChunks::new(),
			drained: false,
		}
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Materialize rows `[start, end)` with `chunk_start` set to `start`.
	pub fn materialize(&self, start: usize, end: usize) -> QueryResult {
		let mut meta = self.meta.clone();
		meta.chunk_start = start;
		QueryResult::new(self.header.clone(), meta, self.rows.slice(start, end))
	}
}

#[cfg(test)]
mod tests {
	use streamcache_type::Value;

	use super::*;

	fn rows(range: std::ops::Range<i64>) -> Vec<Row> {
		range.map(|i| vec![Value::int8(i)]).collect()
	}

	fn ids(rows: &[Row]) -> Vec<i64> {
		rows.iter()
			.map(|row| match row[0] {
				Value::Int8(i) => i,
				_ => unreachable!(),
			})
			.collect()
	}

	fn chunks() -> RowChunks {
		let mut chunks = RowChunks::new();
		chunks.push(rows(0..3));
		chunks.push(rows(3..6));
		chunks.push(rows(6..7));
		chunks
	}

	#[test]
	fn test_push_skips_empty_chunks() {
		let mut chunks = RowChunks::new();
		chunks.push(vec![]);
		assert!(chunks.is_empty());
		chunks.push(rows(0..2));
		assert_eq!(chunks.len(), 2);
	}

	#[test]
	fn test_slice_within_single_chunk() {
		assert_eq!(ids(&chunks().slice(3, 6)), vec![3, 4, 5]);
		assert_eq!(ids(&chunks().slice(4, 5)), vec![4]);
	}

	#[test]
	fn test_slice_across_chunks() {
		assert_eq!(ids(&chunks().slice(1, 7)), vec![1, 2, 3, 4, 5, 6]);
		assert_eq!(ids(&chunks().slice(2, 4)), vec![2, 3]);
	}

	#[test]
	fn test_slice_clamps_and_empty() {
		assert_eq!(ids(&chunks().slice(5, 100)), vec![5, 6]);
		assert!(chunks().slice(4, 4).is_empty());
		assert!(chunks().slice(6, 2).is_empty());
		assert!(chunks().slice(7, 9).is_empty());
	}

	#[test]
	fn test_clone_shares_chunks() {
		let original = chunks();
		let mut copy = original.clone();
		copy.push(rows(7..9));
		assert_eq!(original.len(), 7);
		assert_eq!(copy.len(), 9);
		assert_eq!(ids(&copy.iter().cloned().collect::<Vec<_>>()), (0..9).collect::<Vec<_>>());
	}

	#[test]
	fn test_materialize_sets_chunk_start() {
		let mut record = CacheRecord::new(vec!["id".to_string()], Meta::new("SELECT id FROM t"));
		record.rows = chunks();

		let page = record.materialize(3, 6);
		assert_eq!(page.meta.chunk_start, 3);
		assert_eq!(page.meta.query.as_deref(), Some("SELECT id FROM t"));
		assert_eq!(ids(&page.rows), vec![3, 4, 5]);
	}
}
