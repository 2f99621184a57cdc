// 無制限 / パーティション分割 for-each の統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{SeenItems, UnitFailure};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use work_orchestrator::{
    core::{OrchestrationError, PartitionStrategy},
    engine::{for_each_partitioned, for_each_unbounded, ForEachEngine},
    services::NoOpRunReporter,
};

#[tokio::test]
async fn test_unbounded_runs_every_item_even_after_failures() {
    let seen = SeenItems::new();
    let recorder = Arc::clone(&seen);

    let error = for_each_unbounded(0..50usize, move |item| {
        let recorder = Arc::clone(&recorder);
        async move {
            recorder.record(item);
            if item % 10 == 0 {
                anyhow::bail!("item {item} failed");
            }
            Ok(())
        }
    })
    .await
    .unwrap_err();

    assert_eq!(seen.snapshot().len(), 50);
    assert_eq!(error.failure_count(), 5);
}

#[tokio::test]
async fn test_unbounded_single_failure_preserves_identity() {
    let error = for_each_unbounded(1..=10u64, |value| async move {
        if value == 7 {
            return Err(anyhow::Error::new(UnitFailure { value }));
        }
        Ok(())
    })
    .await
    .unwrap_err();

    assert!(!error.is_aggregate());
    assert_eq!(
        error.unit_error().and_then(|e| e.downcast_ref::<UnitFailure>()),
        Some(&UnitFailure { value: 7 })
    );
}

#[tokio::test]
async fn test_unbounded_aggregate_contains_exactly_the_failures() {
    let error = for_each_unbounded(1..=10u64, |value| async move {
        if value % 4 == 0 {
            return Err(anyhow::Error::new(UnitFailure { value }));
        }
        Ok(())
    })
    .await
    .unwrap_err();

    let OrchestrationError::Aggregate(aggregate) = error else {
        panic!("expected aggregate");
    };
    let failed: HashSet<u64> = aggregate
        .errors()
        .iter()
        .map(|error| error.downcast_ref::<UnitFailure>().unwrap().value)
        .collect();
    assert_eq!(failed, HashSet::from([4, 8]));
}

#[tokio::test]
async fn test_partitioned_visits_every_item_once() {
    for strategy in [PartitionStrategy::Contiguous, PartitionStrategy::RoundRobin] {
        let seen = SeenItems::new();
        let recorder = Arc::clone(&seen);
        let engine = ForEachEngine::new(Arc::new(NoOpRunReporter::new()));

        engine
            .for_each_partitioned(0..100usize, 7, strategy, move |item| {
                let recorder = Arc::clone(&recorder);
                async move {
                    tokio::time::sleep(Duration::from_millis((item % 3) as u64)).await;
                    recorder.record(item);
                    Ok(())
                }
            })
            .await
            .unwrap();

        let seen = seen.snapshot();
        let unique: HashSet<usize> = seen.iter().copied().collect();
        assert_eq!(seen.len(), 100, "{strategy:?}");
        assert_eq!(unique.len(), 100, "{strategy:?}");
    }
}

#[tokio::test]
async fn test_partitioned_worker_continues_after_failure() {
    let seen = SeenItems::new();
    let recorder = Arc::clone(&seen);

    // 1パーティションなら全項目が同じワーカーで順に処理される
    let error = for_each_partitioned(0..6usize, 1, move |item| {
        let recorder = Arc::clone(&recorder);
        async move {
            recorder.record(item);
            if item == 1 {
                anyhow::bail!("item {item} failed");
            }
            Ok(())
        }
    })
    .await
    .unwrap_err();

    assert_eq!(seen.snapshot(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(error.to_string(), "item 1 failed");
}

#[tokio::test]
async fn test_partitioned_zero_partitions_is_precondition() {
    let seen = SeenItems::new();
    let recorder = Arc::clone(&seen);

    let error = for_each_partitioned(0..10usize, 0, move |item| {
        let recorder = Arc::clone(&recorder);
        async move {
            recorder.record(item);
            Ok(())
        }
    })
    .await
    .unwrap_err();

    assert!(error.is_precondition());
    assert!(seen.snapshot().is_empty());
}

#[tokio::test]
async fn test_panicking_unit_is_reported_as_task_failure() {
    let error = for_each_unbounded(0..3usize, |item| async move {
        if item == 2 {
            panic!("unit panicked");
        }
        Ok(())
    })
    .await
    .unwrap_err();

    assert!(matches!(error, OrchestrationError::Task { .. }));
    assert_eq!(error.failure_count(), 1);
}
