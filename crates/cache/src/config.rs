// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// How long `span` and `flush` wait for a record to become available.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Upper bound between two availability checks while waiting.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration of a [`Cache`](crate::Cache), fixed at construction.
#[derive(Debug, Clone)]
pub struct CacheConfig {
	/// Rows per page. Governs the synchronous first page, the republish
	/// cadence of the drain task and all pagination arithmetic.
	pub page_size: usize,
	/// Maximum time `span`/`flush` wait for rows to arrive
	pub drain_timeout: Duration,
	/// Maximum time between two availability checks while waiting
	pub poll_interval: Duration,
	/// Maximum number of records kept in the store (None = unbounded)
	pub max_records: Option<usize>,
}

impl CacheConfig {
	/// # Panics
	///
	/// Panics if `page_size` is zero.
	pub fn new(page_size: usize) -> Self {
		assert!(page_size > 0, "page size must be positive");
		Self {
			page_size,
			..Default::default()
		}
	}

	pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
		self.drain_timeout = drain_timeout;
		self
	}

	pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
		self.poll_interval = poll_interval;
		self
	}

	/// Bound the store to `max_records` records. The oldest non-active
	/// records are wiped whenever a new result is ingested.
	///
	/// # Panics
	///
	/// Panics if `max_records` is zero.
	pub fn with_max_records(mut self, max_records: usize) -> Self {
		assert!(max_records > 0, "max records must be positive");
		self.max_records = Some(max_records);
		self
	}
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			page_size: DEFAULT_PAGE_SIZE,
			drain_timeout: DEFAULT_DRAIN_TIMEOUT,
			poll_interval: DEFAULT_POLL_INTERVAL,
			max_records: None,
		}
	}
}
