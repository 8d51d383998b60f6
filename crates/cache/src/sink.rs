// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use streamcache_type::{QueryResult, Result};

/// Destination of a materialized page, responsible for rendering it.
///
/// Sinks are shared as `Arc<dyn Sink>` so a detached flush can keep them
/// alive after the call that scheduled it has returned.
pub trait Sink: Send + Sync {
	fn write(&self, result: &QueryResult) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
	fn write(&self, result: &QueryResult) -> Result<()> {
		(**self).write(result)
	}
}

/// Write `result` to every sink in order, stopping at the first failure.
pub(crate) fn write_all(sinks: &[Arc<dyn Sink>], result: &QueryResult) -> Result<()> {
	for sink in sinks {
		sink.write(result)?;
	}
	Ok(())
}
