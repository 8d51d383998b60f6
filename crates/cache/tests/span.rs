// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use streamcache_cache::{Cache, CacheConfig, Error, Result};
use streamcache_testing::{CollectSink, FailingSink, ScriptedIterator, init_tracing, row_ids, util::wait_for};
use tokio::time::{sleep, timeout};

async fn drained_cache(rows: usize, page_size: usize) -> Result<Cache> {
	let cache = Cache::new(CacheConfig::new(page_size));
	let id = cache.set(ScriptedIterator::numbered(rows)).await?;
	cache.wait_for_drain(id).await?;
	Ok(cache)
}

#[tokio::test]
async fn test_span_all_rows() -> Result<()> {
	let cache = drained_cache(10, 3).await?;
	let sink = CollectSink::new();

	cache.span(0, -1, false, &[sink.sink()]).await?;

	let result = sink.last().unwrap();
	assert_eq!(row_ids(&result.rows), (0..10).collect::<Vec<_>>());
	assert_eq!(result.chunk_start(), 0);
	Ok(())
}

#[tokio::test]
async fn test_span_counts_negative_bounds_from_the_end() -> Result<()> {
	let cache = drained_cache(10, 3).await?;
	let sink = CollectSink::new();

	cache.span(-3, -1, false, &[sink.sink()]).await?;
	let result = sink.last().unwrap();
	assert_eq!(row_ids(&result.rows), vec![7, 8, 9]);
	assert_eq!(result.chunk_start(), 7);

	cache.span(3, -2, false, &[sink.sink()]).await?;
	assert_eq!(row_ids(&sink.last().unwrap().rows), vec![3, 4, 5, 6, 7, 8]);
	Ok(())
}

#[tokio::test]
async fn test_span_clamps_to_available_rows() -> Result<()> {
	let cache = drained_cache(5, 3).await?;
	let sink = CollectSink::new();

	cache.span(2, 50, false, &[sink.sink()]).await?;
	assert_eq!(row_ids(&sink.last().unwrap().rows), vec![2, 3, 4]);

	cache.span(-20, -1, false, &[sink.sink()]).await?;
	assert_eq!(row_ids(&sink.last().unwrap().rows), vec![0, 1, 2, 3, 4]);
	Ok(())
}

#[tokio::test]
async fn test_span_without_wipe_is_repeatable() -> Result<()> {
	let cache = drained_cache(10, 4).await?;
	let sink = CollectSink::new();

	cache.span(2, 6, false, &[sink.sink()]).await?;
	cache.span(2, 6, false, &[sink.sink()]).await?;

	let results = sink.results();
	assert_eq!(results.len(), 2);
	assert_eq!(results[0], results[1]);
	assert_eq!(row_ids(&results[0].rows), vec![2, 3, 4, 5]);
	assert!(cache.record(&cache.active().unwrap()).is_some());
	Ok(())
}

#[tokio::test]
async fn test_invalid_range_fails_without_waiting() -> Result<()> {
	let cache = Cache::new(CacheConfig::new(2));
	let (iterator, _gate) = ScriptedIterator::numbered(10).gated_after(2);
	cache.set(iterator).await?;
	let sink = CollectSink::new();

	for (from, to) in [(5, 2), (-1, 3), (-1, -3)] {
		let result = timeout(Duration::from_secs(1), cache.span(from, to, false, &[sink.sink()]))
			.await
			.expect("invalid range must not wait");
		assert!(
			matches!(result, Err(Error::InvalidRange { from: f, to: t }) if f == from && t == to),
			"({}, {})",
			from,
			to
		);
	}
	assert!(sink.is_empty());
	Ok(())
}

#[tokio::test]
async fn test_invalid_range_is_reported_before_missing_results() {
	let cache = Cache::new(CacheConfig::new(2));
	let result = cache.span(5, 2, false, &[]).await;
	assert!(matches!(result, Err(Error::InvalidRange { .. })));
}

#[tokio::test]
async fn test_span_without_results() {
	let cache = Cache::new(CacheConfig::new(2));
	let sink = CollectSink::new();

	let result = cache.span(0, -1, false, &[sink.sink()]).await;
	assert!(matches!(result, Err(Error::NoResults)));
	assert!(sink.is_empty());
}

#[tokio::test]
async fn test_span_with_wipe_removes_record() -> Result<()> {
	let cache = drained_cache(4, 2).await?;
	let id = cache.active().unwrap();
	let sink = CollectSink::new();

	cache.span(0, -1, true, &[sink.sink()]).await?;
	assert_eq!(row_ids(&sink.last().unwrap().rows), vec![0, 1, 2, 3]);
	assert!(cache.record(&id).is_none());

	let again = cache.span(0, -1, false, &[sink.sink()]).await;
	assert!(matches!(again, Err(Error::AlreadyFlushed(flushed)) if flushed == id));
	assert!(matches!(cache.page(0, &[sink.sink()]), Err(Error::NoResults)));
	assert!(matches!(cache.wait_for_drain(id).await, Err(Error::AlreadyFlushed(_))));
	assert_eq!(sink.len(), 1);
	Ok(())
}

#[tokio::test]
async fn test_span_waits_only_for_requested_rows() -> Result<()> {
	let config = CacheConfig::new(2).with_poll_interval(Duration::from_millis(50));
	let cache = Cache::new(config);
	let (iterator, gate) = ScriptedIterator::numbered(10).gated_after(2);
	let id = cache.set(iterator).await?;
	let sink = CollectSink::new();

	let reader = {
		let cache = cache.clone();
		let sinks = vec![sink.sink()];
		tokio::spawn(async move { cache.span(0, 5, false, &sinks).await })
	};

	sleep(Duration::from_millis(20)).await;
	assert!(sink.is_empty());

	// five rows pulled, four published
	gate.open(3);
	sleep(Duration::from_millis(20)).await;
	assert!(sink.is_empty());

	gate.open(1);
	reader.await.unwrap()?;

	assert_eq!(row_ids(&sink.last().unwrap().rows), vec![0, 1, 2, 3, 4]);
	assert_eq!(cache.is_drained(&id), Some(false));
	Ok(())
}

#[tokio::test]
async fn test_span_to_end_waits_for_drain() -> Result<()> {
	let cache = Cache::new(CacheConfig::new(2));
	let (iterator, gate) = ScriptedIterator::numbered(10).gated_after(2);
	cache.set(iterator).await?;
	let sink = CollectSink::new();

	let reader = {
		let cache = cache.clone();
		let sinks = vec![sink.sink()];
		tokio::spawn(async move { cache.span(-2, -1, false, &sinks).await })
	};

	gate.open(6);
	sleep(Duration::from_millis(20)).await;
	assert!(sink.is_empty());

	gate.open_all();
	reader.await.unwrap()?;
	assert_eq!(row_ids(&sink.last().unwrap().rows), vec![8, 9]);
	Ok(())
}

#[tokio::test]
async fn test_span_times_out() -> Result<()> {
	init_tracing();
	let config = CacheConfig::new(2)
		.with_drain_timeout(Duration::from_millis(50))
		.with_poll_interval(Duration::from_millis(10));
	let cache = Cache::new(config);
	let (iterator, _gate) = ScriptedIterator::numbered(10).gated_after(2);
	let id = cache.set(iterator).await?;
	let sink = CollectSink::new();

	let result = cache.span(0, -1, true, &[sink.sink()]).await;

	assert!(matches!(
		result,
		Err(Error::DrainTimeout { id: timed_out, timeout: waited }) if timed_out == id && waited == Duration::from_millis(50)
	));
	assert!(sink.is_empty());
	// a timed out span does not wipe
	assert!(cache.record(&id).is_some());
	Ok(())
}

#[tokio::test]
async fn test_span_fails_when_record_is_wiped_while_waiting() -> Result<()> {
	let cache = Cache::new(CacheConfig::new(2));
	let (iterator, _gate) = ScriptedIterator::numbered(10).gated_after(2);
	let probe = iterator.probe();
	let id = cache.set(iterator).await?;

	let reader = {
		let cache = cache.clone();
		tokio::spawn(async move { cache.span(0, -1, false, &[]).await })
	};
	sleep(Duration::from_millis(20)).await;

	assert!(cache.wipe(&id));

	let result = timeout(Duration::from_secs(1), reader).await.expect("waiter should be woken").unwrap();
	assert!(matches!(result, Err(Error::AlreadyFlushed(flushed)) if flushed == id));
	wait_for(|| probe.is_closed(), "drain should close the iterator").await;
	Ok(())
}

#[tokio::test]
async fn test_failing_sink_keeps_record_despite_wipe() -> Result<()> {
	let cache = drained_cache(4, 2).await?;
	let id = cache.active().unwrap();
	let failing = FailingSink::new("rejected");

	let result = cache.span(0, -1, true, &[failing.sink()]).await;

	assert!(matches!(result, Err(Error::Sink(_))));
	assert!(cache.record(&id).is_some());
	Ok(())
}
