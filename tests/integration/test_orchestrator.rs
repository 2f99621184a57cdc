// 設定ファイルからオーケストレーターを組み立てる統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use anyhow::Result;
use fixtures::{reverse_delay, ConcurrencyGauge};
use std::sync::Arc;
use tempfile::TempDir;
use work_orchestrator::{
    core::{OrchestrationConfig, PartitionStrategy},
    engine::{lazy, Orchestrator},
    services::{DefaultOrchestrationConfig, NoOpRunReporter, TracingRunReporter},
};

#[tokio::test]
async fn test_orchestrator_from_json_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("orchestrator.json");
    std::fs::write(
        &path,
        r#"{ "workers": 2, "partitions": 3, "strategy": "round_robin", "enable_reporting": false }"#,
    )?;

    let config = DefaultOrchestrationConfig::from_json_file(&path)?;
    assert_eq!(config.partition_strategy(), PartitionStrategy::RoundRobin);

    let orchestrator = Orchestrator::new(config, NoOpRunReporter::new())?;
    let gauge = ConcurrencyGauge::new();
    let unit_gauge = Arc::clone(&gauge);
    let units = (1..=12u64).map(move |value| {
        let gauge = Arc::clone(&unit_gauge);
        async move {
            let _active = gauge.enter();
            tokio::time::sleep(reverse_delay(value, 12, 2)).await;
            anyhow::Ok(value * 10)
        }
    });

    let results = orchestrator.run_bounded(lazy(units)).await?;

    assert_eq!(
        results,
        (1..=12u64).map(|value| Some(value * 10)).collect::<Vec<_>>()
    );
    assert!(gauge.peak() <= 2);
    Ok(())
}

#[tokio::test]
async fn test_invalid_config_file_is_rejected_before_running() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("zero.json");
    std::fs::write(&path, r#"{ "partitions": 0 }"#)?;

    let error = DefaultOrchestrationConfig::from_json_file(&path).unwrap_err();
    assert!(error.is_precondition());
    Ok(())
}

#[tokio::test]
async fn test_saved_config_round_trips_into_orchestrator() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("saved.json");
    DefaultOrchestrationConfig::new(2)
        .with_workers(3)
        .with_partitions(4)
        .save_json_file(&path)?;

    let orchestrator = Orchestrator::new(
        DefaultOrchestrationConfig::from_json_file(&path)?,
        TracingRunReporter::new(),
    )?;

    assert_eq!(orchestrator.config().worker_count(), 3);
    assert_eq!(orchestrator.config().partition_count(), 4);

    orchestrator
        .for_each_partitioned(0..20usize, |_| async { Ok(()) })
        .await?;
    Ok(())
}
