// 実行監視の具象実装

use crate::core::{RunMode, RunReporter, RunState, RunSummary};
use async_trait::async_trait;

pub(crate) fn describe_mode(mode: RunMode) -> String {
    match mode {
        RunMode::Unbounded => "unbounded".to_string(),
        RunMode::Partitioned { partitions } => format!("partitioned ({partitions} partitions)"),
        RunMode::Bounded { workers } => format!("bounded ({workers} workers)"),
    }
}

/// コンソール出力による実行報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleRunReporter {
    quiet: bool,
}

impl ConsoleRunReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl RunReporter for ConsoleRunReporter {
    async fn report_started(&self, mode: RunMode) {
        if !self.quiet {
            println!("🚀 Starting {} run...", describe_mode(mode));
        }
    }

    async fn report_item_failed(&self, index: usize, error: &str) {
        if !self.quiet {
            eprintln!("❌ Unit #{index} failed: {error}");
        }
    }

    async fn report_worker_finished(&self, worker_id: usize, claimed: usize) {
        if !self.quiet {
            println!("   - worker {worker_id} finished after {claimed} units");
        }
    }

    async fn report_completed(&self, summary: &RunSummary) {
        if self.quiet {
            return;
        }
        if summary.had_failure || summary.failures > 0 {
            eprintln!(
                "⚠️  Completed with {} failure(s). Claimed: {}, {:.2} sec",
                summary.failures,
                summary.claimed,
                summary.elapsed_ms as f64 / 1000.0
            );
        } else {
            println!(
                "✅ Completed! Claimed: {}, {:.2} sec",
                summary.claimed,
                summary.elapsed_ms as f64 / 1000.0
            );
        }
    }
}

/// tracing イベントとして構造化ログを出す実装
#[derive(Debug, Default, Clone)]
pub struct TracingRunReporter;

impl TracingRunReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RunReporter for TracingRunReporter {
    async fn report_started(&self, mode: RunMode) {
        tracing::info!(mode = %describe_mode(mode), "run started");
    }

    async fn report_item_failed(&self, index: usize, error: &str) {
        tracing::warn!(index, error, "unit failed");
    }

    async fn report_worker_finished(&self, worker_id: usize, claimed: usize) {
        tracing::debug!(worker_id, claimed, "worker finished");
    }

    async fn report_completed(&self, summary: &RunSummary) {
        let state = match summary.state {
            RunState::Running => "running",
            RunState::Failed => "failed",
            RunState::Completed => "completed",
        };
        if summary.failures > 0 {
            tracing::warn!(
                mode = %describe_mode(summary.mode),
                state,
                claimed = summary.claimed,
                failures = summary.failures,
                elapsed_ms = summary.elapsed_ms,
                "run completed with failures"
            );
        } else {
            tracing::info!(
                mode = %describe_mode(summary.mode),
                state,
                claimed = summary.claimed,
                elapsed_ms = summary.elapsed_ms,
                "run completed"
            );
        }
    }
}

/// 何もしない実行報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpRunReporter;

impl NoOpRunReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RunReporter for NoOpRunReporter {
    async fn report_started(&self, _mode: RunMode) {
        // 何もしない
    }

    async fn report_item_failed(&self, _index: usize, _error: &str) {
        // 何もしない
    }

    async fn report_worker_finished(&self, _worker_id: usize, _claimed: usize) {
        // 何もしない
    }

    async fn report_completed(&self, _summary: &RunSummary) {
        // 何もしない
    }
}
