// ForEachEngine - 無制限並列 for-each とパーティション分割版
// 失敗はファネルに集め、全ユニット終了後に単一エラーか集約エラーとして返す

use super::{
    funnel::{surface, ErrorFunnel},
    partitioner::Partitioner,
};
use crate::core::{
    OrchestrationResult, PartitionStrategy, RunMode, RunReporter, RunState, RunSummary,
};
use crate::services::monitoring::Stopwatch;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// 無制限 / パーティション分割の並列 for-each エンジン
pub struct ForEachEngine<R> {
    reporter: Arc<R>,
}

impl<R> Clone for ForEachEngine<R> {
    fn clone(&self) -> Self {
        Self {
            reporter: Arc::clone(&self.reporter),
        }
    }
}

impl<R> ForEachEngine<R>
where
    R: RunReporter + 'static,
{
    pub fn new(reporter: Arc<R>) -> Self {
        Self { reporter }
    }

    /// 全項目に対して1つずつユニットを起動し、全ての終了を待つ
    ///
    /// 個々の結果に関わらず全項目が実行される。
    pub async fn for_each<I, T, F, Fut>(&self, items: I, action: F) -> OrchestrationResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let stopwatch = Stopwatch::start();
        self.reporter.report_started(RunMode::Unbounded).await;

        let action = Arc::new(action);
        let funnel = ErrorFunnel::new();

        let handles: Vec<JoinHandle<()>> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let action = Arc::clone(&action);
                let sink = funnel.sink();
                let reporter = Arc::clone(&self.reporter);
                tokio::spawn(async move {
                    if let Err(error) = action(item).await {
                        reporter.report_item_failed(index, &format!("{error:#}")).await;
                        sink.record(error);
                    }
                })
            })
            .collect();

        let claimed = handles.len();
        debug!(units = claimed, "無制限モードでユニットを起動しました");

        join_all(handles, &funnel).await;
        self.finish(RunMode::Unbounded, claimed, funnel, stopwatch).await
    }

    /// 共有引数を各呼び出しに渡す版
    pub async fn for_each_with<I, T, A, F, Fut>(
        &self,
        items: I,
        args: A,
        action: F,
    ) -> OrchestrationResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Send + 'static,
        A: Clone + Send + Sync + 'static,
        F: Fn(T, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.for_each(items, move |item| action(item, args.clone()))
            .await
    }

    /// 入力を P 個に分割し、P 個のワーカーがそれぞれのパーティションを順番に処理する
    ///
    /// 失敗した項目は記録され、ワーカーは自分のパーティションの次の項目へ進む。
    pub async fn for_each_partitioned<I, T, F, Fut>(
        &self,
        items: I,
        partitions: usize,
        strategy: PartitionStrategy,
        action: F,
    ) -> OrchestrationResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let partitioner = Partitioner::new(partitions, strategy)?;
        let stopwatch = Stopwatch::start();
        let mode = RunMode::Partitioned { partitions };
        self.reporter.report_started(mode).await;

        let parts = partitioner.split(items);
        let claimed = parts.iter().map(|part| part.len()).sum();

        let action = Arc::new(action);
        let funnel = ErrorFunnel::new();
        let handles: Vec<JoinHandle<()>> = parts
            .into_iter()
            .map(|part| {
                let worker_id = part.id();
                let action = Arc::clone(&action);
                let sink = funnel.sink();
                let reporter = Arc::clone(&self.reporter);
                tokio::spawn(async move {
                    let processed = part.len();
                    for work in part {
                        if let Err(error) = action(work.item).await {
                            reporter
                                .report_item_failed(work.index, &format!("{error:#}"))
                                .await;
                            sink.record(error);
                        }
                    }
                    reporter.report_worker_finished(worker_id, processed).await;
                })
            })
            .collect();

        join_all(handles, &funnel).await;
        self.finish(mode, claimed, funnel, stopwatch).await
    }

    async fn finish(
        &self,
        mode: RunMode,
        claimed: usize,
        funnel: ErrorFunnel,
        stopwatch: Stopwatch,
    ) -> OrchestrationResult<()> {
        let errors = funnel.drain();
        let summary = RunSummary {
            mode,
            state: RunState::Completed,
            had_failure: !errors.is_empty(),
            claimed,
            failures: errors.len(),
            started_at: stopwatch.started_at(),
            elapsed_ms: stopwatch.elapsed_ms(),
        };
        self.reporter.report_completed(&summary).await;
        surface(errors)
    }
}

// パニックしたユニットも失敗として記録する
async fn join_all(handles: Vec<JoinHandle<()>>, funnel: &ErrorFunnel) {
    for handle in handles {
        if let Err(join_error) = handle.await {
            funnel.record(anyhow::Error::new(join_error));
        }
    }
}
