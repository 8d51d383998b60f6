// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use streamcache_type::{Header, Meta, Result, Row};

/// A lazily produced sequence of rows from a running query.
///
/// Implemented by the query executors. Ownership moves into the cache on
/// [`Cache::set`](crate::Cache::set); the cache pulls from it until
/// exhaustion, a pull error or cancellation.
#[async_trait]
pub trait RowIterator: Send {
	/// Column names of the result. An empty header is rejected by the cache.
	fn header(&self) -> Result<Header>;

	fn meta(&self) -> Result<Meta>;

	/// Pull the next row, `None` signals end of sequence.
	async fn next(&mut self) -> Result<Option<Row>>;

	/// Release the underlying resources (cursor, connection, ...).
	fn close(&mut self);
}

#[async_trait]
impl<I: RowIterator + ?Sized> RowIterator for Box<I> {
	fn header(&self) -> Result<Header> {
		(**self).header()
	}

	fn meta(&self) -> Result<Meta> {
		(**self).meta()
	}

	async fn next(&mut self) -> Result<Option<Row>> {
		(**self).next().await
	}

	fn close(&mut self) {
		(**self).close()
	}
}
