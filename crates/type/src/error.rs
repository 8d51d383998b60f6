// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use crate::RecordId;

/// Boxed error raised by an external collaborator (row iterator or sink).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no headers provided")]
	EmptyHeader,

	#[error("failed to read result header: {0}")]
	Header(#[source] BoxError),

	#[error("failed to pull row: {0}")]
	Pull(#[source] BoxError),

	#[error("no results to page")]
	NoResults,

	#[error("invalid selection range: {from} ... {to}")]
	InvalidRange {
		from: isize,
		to: isize,
	},

	#[error("record {0} appears to be already flushed")]
	AlreadyFlushed(RecordId),

	#[error("cache flushing timeout exceeded: record {id} not ready after {timeout:?}")]
	DrainTimeout {
		id: RecordId,
		timeout: Duration,
	},

	#[error("failed to write result to sink: {0}")]
	Sink(#[source] BoxError),
}

impl Error {
	pub fn header(err: impl Into<BoxError>) -> Self {
		Error::Header(err.into())
	}

	pub fn pull(err: impl Into<BoxError>) -> Self {
		Error::Pull(err.into())
	}

	pub fn sink(err: impl Into<BoxError>) -> Self {
		Error::Sink(err.into())
	}
}
