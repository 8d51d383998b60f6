// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use streamcache_cache::Sink;
use streamcache_type::{Error, QueryResult, Result};

/// Sink remembering every result written to it.
#[derive(Default)]
pub struct CollectSink {
	results: Mutex<Vec<QueryResult>>,
}

impl CollectSink {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn sink(self: &Arc<Self>) -> Arc<dyn Sink> {
		self.clone()
	}

	pub fn results(&self) -> Vec<QueryResult> {
		self.results.lock().clone()
	}

	pub fn last(&self) -> Option<QueryResult> {
		self.results.lock().last().cloned()
	}

	pub fn len(&self) -> usize {
		self.results.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.results.lock().is_empty()
	}
}

impl Sink for CollectSink {
	fn write(&self, result: &QueryResult) -> Result<()> {
		self.results.lock().push(result.clone());
		Ok(())
	}
}

/// Sink rejecting every write.
pub struct FailingSink {
	message: String,
	attempts: AtomicUsize,
}

impl FailingSink {
	pub fn new(message: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			message: message.into(),
			attempts: AtomicUsize::new(0),
		})
	}

	pub fn sink(self: &Arc<Self>) -> Arc<dyn Sink> {
		self.clone()
	}

	pub fn attempts(&self) -> usize {
		self.attempts.load(Ordering::SeqCst)
	}
}

impl Sink for FailingSink {
	fn write(&self, _result: &QueryResult) -> Result<()> {
		self.attempts.fetch_add(1, Ordering::SeqCst);
		Err(Error::sink(self.message.clone()))
	}
}
