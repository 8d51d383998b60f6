// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Row iterators with scripted behaviour.

use std::{
	collections::VecDeque,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
	time::Duration,
};

use async_trait::async_trait;
use streamcache_cache::RowIterator;
use streamcache_type::{Error, Header, Meta, Result, Row, Value};
use tokio::{sync::Semaphore, time::sleep};

/// Rows `[id, "row-<id>"]` for ids `0..count`.
pub fn numbered_rows(count: usize) -> Vec<Row> {
	(0..count as i64).map(|i| vec![Value::int8(i), Value::utf8(format!("row-{}", i))]).collect()
}

/// The ids of rows produced by [`numbered_rows`].
pub fn row_ids(rows: &[Row]) -> Vec<i64> {
	rows.iter()
		.map(|row| match row.first() {
			Some(Value::Int8(id)) => *id,
			other => panic!("row without numeric id: {:?}", other),
		})
		.collect()
}

/// Holds back rows of a gated [`ScriptedIterator`] until opened.
#[derive(Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
	/// Let `rows` more rows through.
	pub fn open(&self, rows: usize) {
		self.0.add_permits(rows);
	}

	/// Let every remaining row through.
	pub fn open_all(&self) {
		self.0.add_permits(1 << 30);
	}
}

/// Observes an iterator after it was moved into a cache.
#[derive(Clone)]
pub struct Probe {
	closed: Arc<AtomicBool>,
	pulled: Arc<AtomicUsize>,
}

impl Probe {
	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	/// Number of rows handed out so far.
	pub fn pulled(&self) -> usize {
		self.pulled.load(Ordering::SeqCst)
	}
}

/// Iterator over a fixed list of rows.
///
/// Can be scripted to fail reading the header, to fail a specific pull, to
/// delay every pull, or to hold back rows behind a [`Gate`].
pub struct ScriptedIterator {
	header: Header,
	meta: Meta,
	rows: VecDeque<Row>,
	fail_header: bool,
	fail_at: Option<usize>,
	delay: Option<Duration>,
	gate: Option<(usize, Arc<Semaphore>)>,
	pulls: usize,
	probe: Probe,
}

impl ScriptedIterator {
	pub fn new(header: &[&str], rows: Vec<Row>) -> Self {
		Self {
			header: header.iter().map(|name| name.to_string()).collect(),
			meta: Meta::new("SELECT * FROM scripted"),
			rows: rows.into(),
			fail_header: false,
			fail_at: None,
			delay: None,
			gate: None,
			pulls: 0,
			probe: Probe {
				closed: Arc::new(AtomicBool::new(false)),
				pulled: Arc::new(AtomicUsize::new(0)),
			},
		}
	}

	/// `count` rows of [`numbered_rows`] under the header `id, name`.
	pub fn numbered(count: usize) -> Self {
		Self::new(&["id", "name"], numbered_rows(count))
	}

	/// Fail the pull of row `index` (zero based).
	pub fn failing_at(mut self, index: usize) -> Self {
		self.fail_at = Some(index);
		self
	}

	/// Fail reading the header.
	pub fn failing_header(mut self) -> Self {
		self.fail_header = true;
		self
	}

	/// Sleep before handing out each row.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Hand out the first `free` rows immediately; every further row waits
	/// for the returned gate. End of sequence is never held back.
	pub fn gated_after(mut self, free: usize) -> (Self, Gate) {
		let semaphore = Arc::new(Semaphore::new(0));
		self.gate = Some((free, semaphore.clone()));
		(self, Gate(semaphore))
	}

	pub fn probe(&self) -> Probe {
		self.probe.clone()
	}
}

#[async_trait]
impl RowIterator for ScriptedIterator {
	fn header(&self) -> Result<Header> {
		if self.fail_header {
			return Err(Error::header("scripted header failure"));
		}
		Ok(self.header.clone())
	}

	fn meta(&self) -> Result<Meta> {
		Ok(self.meta.clone())
	}

	async fn next(&mut self) -> Result<Option<Row>> {
		let index = self.pulls;
		let fails = self.fail_at == Some(index);
		if self.rows.is_empty() && !fails {
			return Ok(None);
		}

		if let Some((free, gate)) = &self.gate {
			if index >= *free {
				gate.acquire().await.map_err(Error::pull)?.forget();
			}
		}
		if let Some(delay) = self.delay {
			sleep(delay).await;
		}

		self.pulls += 1;
		if fails {
			return Err(Error::pull(format!("scripted failure at row {}", index)));
		}

		let row = self.rows.pop_front();
		self.probe.pulled.fetch_add(1, Ordering::SeqCst);
		Ok(row)
	}

	fn close(&mut self) {
		self.probe.closed.store(true, Ordering::SeqCst);
	}
}
