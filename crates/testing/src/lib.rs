// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixtures shared by the streamcache test suites.

pub mod iterator;
pub mod logging;
pub mod sink;
pub mod util;

pub use iterator::{Gate, Probe, ScriptedIterator, numbered_rows, row_ids};
pub use logging::init_tracing;
pub use sink::{CollectSink, FailingSink};
