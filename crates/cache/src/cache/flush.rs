// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::{Cache, wait::Readiness};
use crate::Sink;

impl Cache {
	/// Write the whole active record to `sinks` once it is fully drained.
	///
	/// Returns immediately. Waiting, writing and the optional wipe happen in
	/// a detached task; failures are logged, not returned. A failing sink
	/// does not prevent the remaining sinks from being written. Dropping the
	/// returned handle does not cancel the flush.
	///
	/// # Panics
	///
	/// Panics if called outside of a tokio runtime.
	pub fn flush(&self, wipe: bool, sinks: Vec<Arc<dyn Sink>>) -> JoinHandle<()> {
		let inner = self.inner.clone();
		let active = self.active();

		tokio::spawn(async move {
			let Some(id) = active else {
				error!("no results to flush");
				return;
			};

			let record = match inner.wait(id, Readiness::Drained).await {
				Ok(record) => record,
				Err(err) => {
					error!(%id, error = %err, "failed to flush cache");
					return;
				}
			};

			let result = record.materialize(0, record.len());
			for sink in &sinks {
				if let Err(err) = sink.write(&result) {
					error!(%id, error = %err, "failed to write flushed result");
				}
			}

			if wipe {
				inner.wipe(&id);
			}
			debug!(%id, rows = result.len(), "successfully flushed cache");
		})
	}
}
