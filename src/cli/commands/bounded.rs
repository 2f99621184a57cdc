use super::{select_reporter, CommandReport};
use crate::cli::workload::SyntheticWorkload;
use crate::core::{OrchestrationConfig, RunMode};
use crate::engine::{lazy, Orchestrator};
use crate::services::{DefaultOrchestrationConfig, Stopwatch};
use anyhow::Result;

/// Execute the workload on a bounded worker pool
///
/// Results are printed in input order regardless of completion order.
pub async fn execute_bounded(
    config: DefaultOrchestrationConfig,
    workload: SyntheticWorkload,
    workers: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = match workers {
        Some(workers) => config.with_workers(workers),
        None => config,
    };
    let mode = RunMode::Bounded {
        workers: config.worker_count(),
    };

    if !json {
        println!("⚙️  設定:");
        println!("   - ワーカー数: {}", config.worker_count());
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

    let units = {
        let workload = workload.clone();
        workload
            .values()
            .map(move |value| workload.clone().run_unit(value))
    };
    let outcome = orchestrator.run_bounded(lazy(units)).await;

    let report = CommandReport::new(mode, workload.items(), &stopwatch);
    match outcome {
        Ok(results) => report
            .with_results(results.into_iter().flatten().collect())
            .emit(json),
        Err(error) => report.with_error(&error).emit(json),
    }
}
