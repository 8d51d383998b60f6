// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use streamcache_type::{Error, RecordId, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{CacheConfig, CacheRecord, RecordStore};

mod flush;
mod ingest;
mod page;
mod span;
mod wait;

/// Cache of the results produced by one connection.
///
/// Cloning is cheap and yields a handle to the same cache; drain and flush
/// tasks hold such handles to the shared state while they run.
#[derive(Clone)]
pub struct Cache {
	inner: Arc<Inner>,
}

pub(crate) struct Inner {
	pub(crate) config: CacheConfig,
	pub(crate) store: RecordStore,
	/// Most recently ingested (or re-activated) record
	pub(crate) active: RwLock<Option<RecordId>>,
	/// Cancellation tokens of the running drain tasks
	pub(crate) drains: DashMap<RecordId, CancellationToken>,
}

impl Cache {
	pub fn new(config: CacheConfig) -> Self {
		Self {
			inner: Arc::new(Inner {
				config,
				store: RecordStore::new(),
				active: RwLock::new(None),
				drains: DashMap::new(),
			}),
		}
	}

	pub fn config(&self) -> &CacheConfig {
		&self.inner.config
	}

	pub fn page_size(&self) -> usize {
		self.inner.config.page_size
	}

	pub fn store(&self) -> &RecordStore {
		&self.inner.store
	}

	/// Identifier of the active record, if any result was ingested.
	pub fn active(&self) -> Option<RecordId> {
		*self.inner.active.read()
	}

	/// Latest published snapshot of the record `id`.
	pub fn record(&self, id: &RecordId) -> Option<Arc<CacheRecord>> {
		self.inner.store.load(id)
	}

	/// Whether the record `id` is fully drained, `None` if it is unknown.
	pub fn is_drained(&self, id: &RecordId) -> Option<bool> {
		self.inner.store.load(id).map(|record| record.drained)
	}

	/// Identifiers of all stored records, oldest first.
	pub fn record_ids(&self) -> Vec<RecordId> {
		self.inner.store.ids()
	}

	/// Number of drain tasks still running.
	pub fn draining(&self) -> usize {
		self.inner.drains.len()
	}

	/// Make a previously ingested record the active one again.
	pub fn activate(&self, id: RecordId) -> Result<()> {
		if !self.inner.store.contains(&id) {
			return Err(Error::AlreadyFlushed(id));
		}
		*self.inner.active.write() = Some(id);
		debug!(%id, "activated record");
		Ok(())
	}

	/// Stop draining the record `id`. The iterator is closed and the record
	/// stays undrained with the rows received so far.
	///
	/// Returns false if no drain task is running for `id`.
	pub fn cancel(&self, id: &RecordId) -> bool {
		self.inner.cancel(id)
	}

	/// Cancel the drain of `id` and delete it from the store.
	///
	/// Returns false if the record was not stored.
	pub fn wipe(&self, id: &RecordId) -> bool {
		self.inner.wipe(id)
	}

	/// Cancel every running drain task. Stored records stay readable.
	pub fn close(&self) {
		self.inner.drains.retain(|id, token| {
			token.cancel();
			debug!(%id, "cancelled drain on close");
			false
		});
	}

	pub(crate) fn active_record(&self) -> Option<(RecordId, Arc<CacheRecord>)> {
		let id = self.active()?;
		self.inner.store.load(&id).map(|record| (id, record))
	}
}

impl Inner {
	pub(crate) fn cancel(&self, id: &RecordId) -> bool {
		match self.drains.remove(id) {
			Some((_, token)) => {
				token.cancel();
				true
			}
			None => false,
		}
	}

	pub(crate) fn wipe(&self, id: &RecordId) -> bool {
		self.cancel(id);
		let existed = self.store.delete(id);
		if existed {
			debug!(%id, "successfully wiped record from cache");
		}
		existed
	}

	/// Wipe the oldest records beyond the configured capacity, never `keep`.
	pub(crate) fn evict(&self, keep: &RecordId) {
		let Some(max_records) = self.config.max_records else {
			return;
		};
		for id in self.store.overflow(max_records, keep) {
			if self.wipe(&id) {
				debug!(%id, max_records, "evicted record");
			}
		}
	}
}
