// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared types for the streamcache result cache.
//!
//! - [`Value`] and [`Row`]: the cells and tuples produced by a query
//! - [`QueryResult`]: header, metadata and a slice of rows, the unit written to sinks
//! - [`RecordId`]: identifies one ingested result inside the record store
//! - [`Error`] and [`Result`]: the error taxonomy shared by every crate

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod error;
mod id;
mod result;
mod value;

pub use error::{BoxError, Error, Result};
pub use id::RecordId;
pub use result::{Header, Meta, QueryResult, Row};
pub use value::Value;
