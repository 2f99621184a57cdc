use super::{select_reporter, CommandReport};
use crate::cli::workload::SyntheticWorkload;
use crate::core::{OrchestrationConfig, PartitionStrategy, RunMode};
use crate::engine::Orchestrator;
use crate::services::{DefaultOrchestrationConfig, Stopwatch};
use anyhow::Result;

/// Execute the workload split into partitions
pub async fn execute_partitioned(
    config: DefaultOrchestrationConfig,
    workload: SyntheticWorkload,
    partitions: Option<usize>,
    strategy: Option<PartitionStrategy>,
    json: bool,
) -> Result<()> {
    let config = match partitions {
        Some(partitions) => config.with_partitions(partitions),
        None => config,
    };
    let config = match strategy {
        Some(strategy) => config.with_strategy(strategy),
        None => config,
    };
    let mode = RunMode::Partitioned {
        partitions: config.partition_count(),
    };

    if !json {
        println!("⚙️  設定:");
        println!("   - パーティション数: {}", config.partition_count());
        println!("   - 分割方式: {:?}", config.partition_strategy());
        println!("   - 項目数: {}", workload.items());
    }

    let stopwatch = Stopwatch::start();
    let orchestrator = match Orchestrator::new(config, select_reporter(json)) {
        Ok(orchestrator) => orchestrator,
        Err(error) => {
            return CommandReport::new(mode, workload.items(), &stopwatch)
                .with_error(&error)
                .emit(json)
        }
    };

    let unit_workload = workload.clone();
    let outcome = orchestrator
        .for_each_partitioned(workload.values(), move |value| {
            let workload = unit_workload.clone();
            async move { workload.run_unit(value).await.map(|_| ()) }
        })
        .await;

    let report = CommandReport::new(mode, workload.items(), &stopwatch);
    match outcome {
        Ok(()) => report.emit(json),
        Err(error) => report.with_error(&error).emit(json),
    }
}
