// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{mem, sync::Arc};

use streamcache_type::{Error, Header, Meta, RecordId, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument};

use super::{Cache, Inner};
use crate::{CacheRecord, RowIterator};

impl Cache {
	/// Ingest the rows of `iterator` as the new active record.
	///
	/// The first page is pulled before returning, so it can be paged right
	/// away. If the iterator has more rows, a background task keeps draining
	/// it and republishes the growing record every page.
	///
	/// The iterator is closed when reading the header, the metadata or the
	/// first page fails.
	///
	/// # Panics
	///
	/// Panics if called outside of a tokio runtime.
	pub async fn set<I>(&self, mut iterator: I) -> Result<RecordId>
	where
		I: RowIterator + 'static,
	{
		let (header, meta) = match read_header(&iterator) {
			Ok(header) => header,
			Err(err) => {
				iterator.close();
				return Err(err);
			}
		};

		let page_size = self.inner.config.page_size;
		let mut first_page = Vec::with_capacity(page_size);
		let mut drained = false;
		while first_page.len() < page_size {
			match iterator.next().await {
				Ok(Some(row)) => first_page.push(row),
				Ok(None) => {
					drained = true;
					debug!("successfully exhausted iterator");
					break;
				}
				Err(err) => {
					iterator.close();
					return Err(err);
				}
			}
		}

		let mut record = CacheRecord::new(header, meta);
		record.rows.push(first_page);
		record.drained = drained;

		let id = RecordId::generate();
		self.inner.store.store(id, record.clone());
		*self.inner.active.write() = Some(id);
		debug!(%id, rows = record.len(), drained, "stored first page");

		if !drained {
			let token = CancellationToken::new();
			self.inner.drains.insert(id, token.clone());
			tokio::spawn(drain(self.inner.clone(), id, record, iterator, token));
		}

		self.inner.evict(&id);
		Ok(id)
	}
}

fn read_header(iterator: &impl RowIterator) -> Result<(Header, Meta)> {
	let header = iterator.header()?;
	if header.is_empty() {
		return Err(Error::EmptyHeader);
	}
	let meta = iterator.meta()?;
	Ok((header, meta))
}

/// Pull the remaining rows of `iterator` into `record`, republishing it
/// under `id` every page and once more, marked drained, at the end.
///
/// A pull error ends the task and leaves the record undrained.
#[instrument(name = "drain", level = "debug", skip_all, fields(id = %id))]
async fn drain<I: RowIterator>(
	inner: Arc<Inner>,
	id: RecordId,
	mut record: CacheRecord,
	mut iterator: I,
	token: CancellationToken,
) {
	let page_size = inner.config.page_size;
	let mut pending = Vec::with_capacity(page_size);

	loop {
		let next = tokio::select! {
			biased;
			_ = token.cancelled() => None,
			next = iterator.next() => Some(next),
		};

		let Some(next) = next else {
			iterator.close();
			debug!(rows = record.len() + pending.len(), "drain cancelled");
			break;
		};

		match next {
			Ok(Some(row)) => {
				pending.push(row);
				if pending.len() < page_size {
					continue;
				}
				record.rows.push(mem::replace(&mut pending, Vec::with_capacity(page_size)));
				if !inner.store.update(id, record.clone()) {
					iterator.close();
					debug!(rows = record.len(), "record wiped while draining");
					break;
				}
			}
			Ok(None) => {
				record.rows.push(mem::take(&mut pending));
				record.drained = true;
				let rows = record.len();
				inner.store.update(id, record);
				debug!(rows, "successfully exhausted iterator");
				break;
			}
			Err(err) => {
				iterator.close();
				error!(error = %err, rows = record.len() + pending.len(), "failed to drain iterator");
				break;
			}
		}
	}

	inner.drains.remove(&id);
}
