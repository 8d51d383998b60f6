// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Wait utilities for testing
//!
//! Wait on conditions driven by background drain and flush tasks without
//! fixed sleeps.

use std::time::{Duration, Instant};

use tokio::time::sleep;

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default poll interval (1 millisecond)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Wait for a condition to become true, polling at regular intervals
///
/// # Panics
/// Panics if the condition doesn't become true within the timeout period
pub async fn wait_for_condition<F>(condition: F, timeout: Duration, poll_interval: Duration, timeout_message: &str)
where
	F: Fn() -> bool,
{
	let start = Instant::now();
	let mut polls = 0u64;

	while !condition() {
		if start.elapsed() > timeout {
			panic!("Timeout after {:?} ({} polls): {}", timeout, polls, timeout_message);
		}
		polls += 1;
		sleep(poll_interval).await;
	}
	tracing::trace!(polls, elapsed = ?start.elapsed(), "condition met: {}", timeout_message);
}

/// Wait for a condition with default timeout and poll interval
pub async fn wait_for<F>(condition: F, message: &str)
where
	F: Fn() -> bool,
{
	wait_for_condition(condition, DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL, message).await;
}
