// 有界ワーカープールの統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{reverse_delay, ClaimCounter, ConcurrencyGauge, UnitFailure};
use std::sync::Arc;
use std::time::Duration;
use work_orchestrator::{
    core::OrchestrationError,
    engine::{from_fn, lazy, run_bounded, run_bounded_void, try_from_fn},
};

#[tokio::test]
async fn test_inverse_delays_keep_input_order() {
    // 1..=10 を値に反比例する遅延で処理すると、完了順は逆でも結果は入力順
    let units = (1..=10u64).map(|value| async move {
        tokio::time::sleep(reverse_delay(value, 10, 5)).await;
        anyhow::Ok(value)
    });

    let results = run_bounded(lazy(units), 3).await.unwrap();

    assert_eq!(results, (1..=10u64).map(Some).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_concurrency_never_exceeds_worker_count() {
    for workers in [1usize, 2, 5] {
        let gauge = ConcurrencyGauge::new();
        let unit_gauge = Arc::clone(&gauge);
        let units = (0..100u64).map(move |value| {
            let gauge = Arc::clone(&unit_gauge);
            async move {
                let _active = gauge.enter();
                tokio::time::sleep(Duration::from_millis(value % 3)).await;
                anyhow::Ok(value)
            }
        });

        let results = run_bounded(lazy(units), workers).await.unwrap();

        assert_eq!(results.len(), 100);
        assert!(
            gauge.peak() <= workers,
            "peak {} exceeded {workers} workers",
            gauge.peak()
        );
        assert_eq!(gauge.active(), 0);
    }
}

#[tokio::test]
async fn test_single_failure_is_the_original_error() {
    let units = (1..=10u64).map(|value| async move {
        tokio::time::sleep(Duration::from_millis(2)).await;
        if value == 5 {
            return Err(anyhow::Error::new(UnitFailure { value }));
        }
        anyhow::Ok(value)
    });

    let error = run_bounded(lazy(units), 2).await.unwrap_err();

    assert!(!error.is_aggregate());
    assert_eq!(error.failure_count(), 1);
    let original = error.unit_error().unwrap();
    assert_eq!(
        original.downcast_ref::<UnitFailure>(),
        Some(&UnitFailure { value: 5 })
    );
    assert_eq!(error.to_string(), "unit 5 failed");
}

#[tokio::test]
async fn test_fail_fast_stops_new_claims() {
    let claims = ClaimCounter::new();
    let source_claims = Arc::clone(&claims);
    let mut next = 0u64;
    let source = from_fn(move || {
        if next >= 50 {
            return None;
        }
        source_claims.record();
        let value = next;
        next += 1;
        Some(async move {
            if value == 0 {
                anyhow::bail!("first unit failed");
            }
            Ok(())
        })
    });

    let error = run_bounded_void(source, 1).await.unwrap_err();

    assert_eq!(error.to_string(), "first unit failed");
    // ワーカー1つでは失敗の後に次のクレームは行われない
    assert_eq!(claims.count(), 1);
}

#[tokio::test]
async fn test_fail_fast_skips_later_items_with_several_workers() {
    let claims = ClaimCounter::new();
    let source_claims = Arc::clone(&claims);
    let units = (0..100u64).map(move |value| {
        source_claims.record();
        async move {
            if value == 3 {
                anyhow::bail!("unit {value} failed");
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(value)
        }
    });

    let result = run_bounded(lazy(units), 4).await;

    assert!(result.is_err());
    assert!(claims.count() <= 100);
    assert!(claims.count() < 100, "at least one later item is skipped");
}

#[tokio::test]
async fn test_concurrent_failures_are_aggregated_without_nesting() {
    let barrier = Arc::new(tokio::sync::Barrier::new(3));
    let unit_barrier = Arc::clone(&barrier);
    let units = (0..3u64).map(move |value| {
        let barrier = Arc::clone(&unit_barrier);
        async move {
            barrier.wait().await;
            Err::<u64, anyhow::Error>(anyhow::Error::new(UnitFailure { value }))
        }
    });

    let error = run_bounded(lazy(units), 3).await.unwrap_err();

    match error {
        OrchestrationError::Aggregate(aggregate) => {
            assert_eq!(aggregate.len(), 3);
            let mut values: Vec<u64> = aggregate
                .errors()
                .iter()
                .map(|error| error.downcast_ref::<UnitFailure>().unwrap().value)
                .collect();
            values.sort_unstable();
            assert_eq!(values, vec![0, 1, 2]);
        }
        other => panic!("expected aggregate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zero_workers_starts_nothing() {
    let started = ClaimCounter::new();
    let source_started = Arc::clone(&started);
    let source = from_fn(move || {
        source_started.record();
        Some(async { anyhow::Ok(1u64) })
    });

    let error = run_bounded(source, 0).await.unwrap_err();

    assert!(error.is_precondition());
    assert_eq!(started.count(), 0);
}

#[tokio::test]
async fn test_source_failure_counts_as_unit_failure() {
    let mut produced = 0u64;
    let source = try_from_fn(move || {
        produced += 1;
        if produced == 4 {
            anyhow::bail!("could not build unit {produced}");
        }
        Ok(Some(async move { anyhow::Ok(produced) }))
    });

    let error = run_bounded(source, 2).await.unwrap_err();

    assert!(matches!(error, OrchestrationError::UnitOfWork(_)));
    assert_eq!(error.to_string(), "could not build unit 4");
}

#[tokio::test]
async fn test_more_workers_than_items() {
    let units = (0..3u64).map(|value| async move { anyhow::Ok(value * 2) });

    let results = run_bounded(lazy(units), 16).await.unwrap();

    assert_eq!(results, vec![Some(0), Some(2), Some(4)]);
}

#[tokio::test]
async fn test_empty_source_yields_empty_results() {
    let units = std::iter::empty::<std::future::Ready<anyhow::Result<u64>>>();

    let results = run_bounded(lazy(units), 3).await.unwrap();

    assert!(results.is_empty());
}
