// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use streamcache_type::{Error, Result};

use super::Cache;
use crate::{Sink, sink::write_all};

impl Cache {
	/// Write page `index` (zero based) of the active record to `sinks`.
	///
	/// Never waits for more rows: a record that is still draining is paged
	/// over the rows published so far. Negative indexes select the first
	/// page, indexes past the end select the last page.
	///
	/// Returns the resolved page index and the index of the last page.
	pub fn page(&self, index: isize, sinks: &[Arc<dyn Sink>]) -> Result<(usize, usize)> {
		let (_, record) = self.active_record().ok_or(Error::NoResults)?;

		let page_size = self.inner.config.page_size;
		let index = index.max(0) as usize;
		let len = record.len();
		let last_page = last_page(len, page_size);

		let mut start = page_size.saturating_mul(index);
		let mut end = page_size.saturating_mul(index.saturating_add(1));
		if start >= len {
			start = last_page * page_size;
		}
		if end > len {
			end = len;
		}

		write_all(sinks, &record.materialize(start, end))?;

		Ok((start / page_size, last_page))
	}
}

/// Index of the last page of `len` rows. A full last page does not count as
/// an extra empty page.
fn last_page(len: usize, page_size: usize) -> usize {
	let last = len / page_size;
	if len % page_size == 0 && last != 0 { last - 1 } else { last }
}
