// 並行タスク実行プリミティブ
// 無制限の並列 for-each、パーティション分割 for-each、順序を保つ有界ワーカープール

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{
    AggregateError, OrchestrationConfig, OrchestrationError, OrchestrationResult,
    PartitionStrategy, PreconditionViolation, RunMode, RunReporter, RunSummary, UnitSource,
};
pub use engine::{
    create_default_orchestrator, create_quiet_orchestrator, for_each_partitioned,
    for_each_unbounded, for_each_with, from_fn, lazy, run_bounded, run_bounded_void,
    try_from_fn, BoundedPool, ForEachEngine, Orchestrator,
};
pub use services::{
    ConsoleRunReporter, DefaultOrchestrationConfig, NoOpRunReporter, TracingRunReporter,
};
