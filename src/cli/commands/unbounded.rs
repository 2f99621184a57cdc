use super::{select_reporter, CommandReport};
use crate::cli::workload::SyntheticWorkload;
use crate::core::RunMode;
use crate::engine::Orchestrator;
use crate::services::{DefaultOrchestrationConfig, Stopwatch};
use anyhow::Result;

/// Execute the workload with every item started at once
pub async fn execute_unbounded(
    config: DefaultOrchestrationConfig,
    workload: SyntheticWorkload,
    json: bool,
) -> Result<()> {
    if !json {
        println!("⚙️  設定:");
        println!("   - 同時実行数: 無制限");
        println!("   - 項目数: {}", workload.items());
    }

    let stopwatch = Stopwatch::start();
    let orchestrator = match Orchestrator::new(config, select_reporter(json)) {
        Ok(orchestrator) => orchestrator,
        Err(error) => {
            return CommandReport::new(RunMode::Unbounded, workload.items(), &stopwatch)
                .with_error(&error)
                .emit(json)
        }
    };

    let values: Vec<u64> = workload.values().collect();
    let unit_workload = workload.clone();
    let outcome = orchestrator
        .for_each_unbounded(values, move |value| {
            let workload = unit_workload.clone();
            async move { workload.run_unit(value).await.map(|_| ()) }
        })
        .await;

    let report = CommandReport::new(RunMode::Unbounded, workload.items(), &stopwatch);
    match outcome {
        Ok(()) => report.emit(json),
        Err(error) => report.with_error(&error).emit(json),
    }
}
