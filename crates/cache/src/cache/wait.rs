// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use streamcache_type::{Error, RecordId, Result};
use tokio::time::{self, Instant};

use super::{Cache, Inner};
use crate::CacheRecord;

/// Condition a waiting reader needs the record to reach.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Readiness {
	/// The record is fully drained
	Drained,
	/// The record is drained or holds at least this many rows
	Rows(usize),
}

impl Readiness {
	fn is_satisfied(&self, record: &CacheRecord) -> bool {
		match self {
			Readiness::Drained => record.drained,
			Readiness::Rows(rows) => record.drained || *rows <= record.len(),
		}
	}
}

impl Inner {
	/// Wait until the record `id` reaches `readiness`.
	///
	/// Wakes on every republish of the record and at least once per poll
	/// interval. Fails with `AlreadyFlushed` once the record is gone and with
	/// `DrainTimeout` after the drain timeout.
	pub(crate) async fn wait(&self, id: RecordId, readiness: Readiness) -> Result<Arc<CacheRecord>> {
		let timeout = self.config.drain_timeout;
		let deadline = Instant::now() + timeout;

		loop {
			let signal = self.store.signal(&id).ok_or(Error::AlreadyFlushed(id))?;
			let notified = signal.notified();
			tokio::pin!(notified);
			// register before loading, so a republish in between is not missed
			notified.as_mut().enable();

			let record = self.store.load(&id).ok_or(Error::AlreadyFlushed(id))?;
			if readiness.is_satisfied(&record) {
				return Ok(record);
			}

			let now = Instant::now();
			if now >= deadline {
				return Err(Error::DrainTimeout {
					id,
					timeout,
				});
			}

			let wake = deadline.min(now + self.config.poll_interval);
			let _ = time::timeout_at(wake, notified).await;
		}
	}
}

impl Cache {
	/// Wait until the record `id` is fully drained and return its final
	/// snapshot.
	pub async fn wait_for_drain(&self, id: RecordId) -> Result<Arc<CacheRecord>> {
		self.inner.wait(id, Readiness::Drained).await
	}
}
