// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use streamcache_type::{Error, Result};
use tracing::debug;

use super::{Cache, wait::Readiness};
use crate::{Sink, sink::write_all};

impl Cache {
	/// Write rows `[from, to)` of the active record to `sinks`.
	///
	/// Indexes start at 0; negative values count from the end, where `-1`
	/// means one past the last row. `span(0, -1, ..)` selects every row.
	///
	/// Waits until the record is drained or, for a non-negative `to`, holds
	/// at least `to` rows. With `wipe` the record is deleted after it was
	/// written to every sink.
	pub async fn span(&self, from: isize, to: isize, wipe: bool, sinks: &[Arc<dyn Sink>]) -> Result<()> {
		validate_range(from, to)?;

		let id = self.active().ok_or(Error::NoResults)?;
		let readiness = if to >= 0 {
			Readiness::Rows(to as usize)
		} else {
			Readiness::Drained
		};
		let record = self.inner.wait(id, readiness).await?;

		let (start, end) = resolve_range(from, to, record.len());
		write_all(sinks, &record.materialize(start, end))?;

		if wipe {
			self.inner.wipe(&id);
		}

		debug!(%id, start, end, "successfully flushed cache");
		Ok(())
	}
}

fn validate_range(from: isize, to: isize) -> Result<()> {
	let same_sign = (from < 0) == (to < 0);
	if (same_sign && from > to) || (from < 0 && to >= 0) {
		return Err(Error::InvalidRange {
			from,
			to,
		});
	}
	Ok(())
}

/// Resolve slice-style bounds against `len` rows into `start <= end <= len`.
fn resolve_range(from: isize, to: isize, len: usize) -> (usize, usize) {
	let signed_len = len as isize;
	let from = if from < 0 { (from + signed_len).max(0) } else { from };
	let to = if to < 0 { (to + signed_len + 1).max(0) } else { to };

	let start = (from as usize).min(len);
	let end = (to as usize).min(len).max(start);
	(start, end)
}
