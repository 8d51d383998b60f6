// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Concurrent store of cache record snapshots.
//!
//! The store is the synchronization point between a drain task and readers.
//! Every write replaces a whole snapshot; the latest write wins. Each slot
//! also carries a completion signal that wakes everyone waiting on the
//! identifier whenever its snapshot is replaced or removed.

use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};

use dashmap::{DashMap, mapref::entry::Entry};
use streamcache_type::RecordId;
use tokio::sync::Notify;

use crate::CacheRecord;

struct Slot {
	record: Arc<CacheRecord>,
	signal: Arc<Notify>,
	/// Insertion order, used to find the oldest records
	sequence: u64,
}

pub struct RecordStore {
	slots: DashMap<RecordId, Slot>,
	sequence: AtomicU64,
}

impl RecordStore {
	pub fn new() -> Self {
		Self {
			slots: DashMap::new(),
			sequence: AtomicU64::new(0),
		}
	}

	/// Unconditionally replace the record stored under `id`.
	pub fn store(&self, id: RecordId, record: CacheRecord) {
		let record = Arc::new(record);
		let signal = match self.slots.entry(id) {
			Entry::Occupied(mut entry) => {
				let slot = entry.get_mut();
				slot.record = record;
				slot.signal.clone()
			}
			Entry::Vacant(entry) => {
				let signal = Arc::new(Notify::new());
				entry.insert(Slot {
					record,
					signal: signal.clone(),
					sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
				});
				signal
			}
		};
		signal.notify_waiters();
	}

	/// Replace the record under `id` only if it is still present.
	///
	/// Returns false if the record was deleted in the meantime.
	pub fn update(&self, id: RecordId, record: CacheRecord) -> bool {
		let signal = match self.slots.get_mut(&id) {
			Some(mut slot) => {
				slot.record = Arc::new(record);
				slot.signal.clone()
			}
			None => return false,
		};
		signal.notify_waiters();
		true
	}

	pub fn load(&self, id: &RecordId) -> Option<Arc<CacheRecord>> {
		self.slots.get(id).map(|slot| slot.record.clone())
	}

	/// Remove the record under `id`, waking its waiters.
	///
	/// Returns true if the record existed.
	pub fn delete(&self, id: &RecordId) -> bool {
		match self.slots.remove(id) {
			Some((_, slot)) => {
				slot.signal.notify_waiters();
				true
			}
			None => false,
		}
	}

	pub fn contains(&self, id: &RecordId) -> bool {
		self.slots.contains_key(id)
	}

	/// Completion signal of the record under `id`, notified on every
	/// replacement and on removal.
	pub fn signal(&self, id: &RecordId) -> Option<Arc<Notify>> {
		self.slots.get(id).map(|slot| slot.signal.clone())
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Identifiers in insertion order.
	pub fn ids(&self) -> Vec<RecordId> {
		let mut entries: Vec<_> = self.slots.iter().map(|slot| (slot.sequence, *slot.key())).collect();
		entries.sort_unstable_by_key(|(sequence, _)| *sequence);
		entries.into_iter().map(|(_, id)| id).collect()
	}

	/// The oldest records that exceed `capacity`, never including `keep`.
	pub fn overflow(&self, capacity: usize, keep: &RecordId) -> Vec<RecordId> {
		let len = self.slots.len();
		if len <= capacity {
			return Vec::new();
		}
		self.ids().into_iter().filter(|id| id != keep).take(len - capacity).collect()
	}
}

impl Default for RecordStore {
	fn default() -> Self {
		Self::new()
	}
}
