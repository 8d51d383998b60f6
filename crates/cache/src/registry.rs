// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Registry of the caches of all live connections.
//!
//! Each connection registered by the editor gets its own [`Cache`], keyed by
//! the connection name the caller chose. Replacing or removing a connection
//! closes its cache, which cancels the drain tasks still running for it.

use dashmap::DashMap;
use tracing::debug;

use crate::{Cache, CacheConfig};

pub struct CacheRegistry {
	caches: DashMap<String, Cache>,
}

impl CacheRegistry {
	pub fn new() -> Self {
		Self {
			caches: DashMap::new(),
		}
	}

	/// Create a cache for the connection `name`.
	///
	/// A cache previously registered under the same name is closed and
	/// replaced.
	pub fn register(&self, name: impl Into<String>, config: CacheConfig) -> Cache {
		let name = name.into();
		let cache = Cache::new(config);

		if let Some(previous) = self.caches.insert(name.clone(), cache.clone()) {
			previous.close();
			debug!(name = %name, "replaced cache of connection");
		} else {
			debug!(name = %name, "registered cache for connection");
		}

		cache
	}

	pub fn get(&self, name: &str) -> Option<Cache> {
		self.caches.get(name).map(|entry| entry.value().clone())
	}

	/// Close and remove the cache of the connection `name`.
	///
	/// Returns true if the connection was registered.
	pub fn remove(&self, name: &str) -> bool {
		match self.caches.remove(name) {
			Some((_, cache)) => {
				cache.close();
				debug!(name = %name, "removed cache of connection");
				true
			}
			None => false,
		}
	}

	/// Registered connection names, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<_> = self.caches.iter().map(|entry| entry.key().clone()).collect();
		names.sort();
		names
	}

	pub fn len(&self) -> usize {
		self.caches.len()
	}

	pub fn is_empty(&self) -> bool {
		self.caches.is_empty()
	}

	/// Close and remove every cache.
	pub fn close(&self) {
		let names = self.names();
		for name in names {
			self.remove(&name);
		}
	}
}

impl Default for CacheRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for CacheRegistry {
	fn drop(&mut self) {
		self.close();
	}
}
