// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Streaming result cache.
//!
//! A [`Cache`] ingests a lazily produced sequence of rows from a
//! [`RowIterator`], makes the first page available as soon as `set` returns
//! and keeps draining the rest in a background task. Readers page through, or
//! export arbitrary ranges of, the rows received so far while draining is
//! still in progress.
//!
//! # Architecture
//!
//! - [`RecordStore`] is the only shared mutable state. The drain task
//!   republishes whole [`CacheRecord`] snapshots into it every page; readers
//!   load snapshots and never block the writer.
//! - Exactly one record per cache is *active*: the most recently ingested one.
//! - `span` and `flush` wait for enough rows through a per-record completion
//!   signal, bounded by the configured drain timeout.
//! - [`CacheRegistry`] owns the caches of all live connections.
//!
//! # Usage
//!
//! ```ignore
//! let cache = Cache::new(CacheConfig::new(100));
//!
//! let id = cache.set(iterator).await?;
//! let (current, last) = cache.page(0, &[buffer.clone()])?;
//!
//! // export everything once it is available, then forget the record
//! cache.span(0, -1, true, &[file.clone()]).await?;
//! ```

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod cache;
mod config;
mod iterator;
mod record;
mod registry;
mod sink;
mod store;

pub use cache::Cache;
pub use config::{CacheConfig, DEFAULT_DRAIN_TIMEOUT, DEFAULT_PAGE_SIZE, DEFAULT_POLL_INTERVAL};
pub use iterator::RowIterator;
pub use record::{CacheRecord, RowChunks};
pub use registry::CacheRegistry;
pub use sink::Sink;
pub use store::RecordStore;
pub use streamcache_type::{Error, Header, Meta, QueryResult, RecordId, Result, Row, Value};
