// BoundedPool - 固定数ワーカーによる有界ワーカープール
// 共有カーソルからクレームしたユニットをロック外で実行し、入力順に結果を記録する

use super::{
    cursor::{Claim, ClaimCursor, FailFastGuard},
    funnel::{surface, ErrorFunnel},
};
use crate::core::{
    OrchestrationResult, PreconditionViolation, RunMode, RunReporter, RunSummary, UnitSource,
};
use crate::services::monitoring::Stopwatch;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// 同時実行数を W に制限するワーカープール
///
/// ワーカー数は構築時に検証されるため、不正な値では1つもユニットが起動しない。
pub struct BoundedPool<R> {
    workers: usize,
    reporter: Arc<R>,
}

impl<R> Clone for BoundedPool<R> {
    fn clone(&self) -> Self {
        Self {
            workers: self.workers,
            reporter: Arc::clone(&self.reporter),
        }
    }
}

impl<R> BoundedPool<R>
where
    R: RunReporter + 'static,
{
    pub fn new(workers: usize, reporter: Arc<R>) -> Result<Self, PreconditionViolation> {
        if workers == 0 {
            return Err(PreconditionViolation::InvalidWorkerCount { workers });
        }
        Ok(Self { workers, reporter })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// ユニットを実行し、ソースのイテレーション順に並んだ結果を返す
    ///
    /// 最初の失敗でフェイルファストフラグが立ち、新しいクレームは行われない。
    /// 実行中のユニットは中断されず、全ワーカーの終了後に失敗が返される。
    pub async fn run<S>(&self, source: S) -> OrchestrationResult<Vec<Option<S::Output>>>
    where
        S: UnitSource,
    {
        self.drive(source, true).await
    }

    /// 結果を保持しない版
    pub async fn run_void<S>(&self, source: S) -> OrchestrationResult<()>
    where
        S: UnitSource<Output = ()>,
    {
        self.drive(source, false).await.map(|_| ())
    }

    async fn drive<S>(
        &self,
        source: S,
        retain_results: bool,
    ) -> OrchestrationResult<Vec<Option<S::Output>>>
    where
        S: UnitSource,
    {
        let stopwatch = Stopwatch::start();
        let mode = RunMode::Bounded {
            workers: self.workers,
        };
        let cursor = Arc::new(ClaimCursor::new(source, retain_results));
        self.reporter.report_started(mode).await;

        let handles: Vec<JoinHandle<anyhow::Result<usize>>> = (0..self.workers)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&cursor),
                    Arc::clone(&self.reporter),
                ))
            })
            .collect();

        // 全ワーカーの終了を待ってから失敗を判定する
        let funnel = ErrorFunnel::new();
        for handle in handles {
            match handle.await {
                Ok(Ok(_)) => {}
                Ok(Err(error)) => funnel.record(error),
                Err(join_error) => {
                    cursor.fail();
                    funnel.record(anyhow::Error::new(join_error));
                }
            }
        }

        let had_failure = cursor.is_failed();
        let state = cursor.complete();
        let errors = funnel.drain();
        let summary = RunSummary {
            mode,
            state,
            had_failure,
            claimed: cursor.claimed(),
            failures: errors.len(),
            started_at: stopwatch.started_at(),
            elapsed_ms: stopwatch.elapsed_ms(),
        };
        self.reporter.report_completed(&summary).await;

        surface(errors)?;
        Ok(cursor.take_results())
    }
}

/// ワーカーループ: クレーム → ロック外で実行 → 結果を書き込む
async fn run_worker<S, R>(
    worker_id: usize,
    cursor: Arc<ClaimCursor<S>>,
    reporter: Arc<R>,
) -> anyhow::Result<usize>
where
    S: UnitSource,
    R: RunReporter + 'static,
{
    let _guard = FailFastGuard::new(Arc::clone(&cursor));
    let mut claimed = 0;

    loop {
        let work = match cursor.claim() {
            Claim::Item(work) => work,
            Claim::Exhausted => break,
            Claim::Halted => {
                debug!(worker_id, "フェイルファストによりクレームを停止しました");
                break;
            }
            Claim::Failed { index, error } => {
                debug!(worker_id, index, "ユニットの生成に失敗しました");
                reporter.report_item_failed(index, &format!("{error:#}")).await;
                return Err(error);
            }
        };
        claimed += 1;

        match work.item.await {
            Ok(value) => cursor.fill(work.index, value),
            Err(error) => {
                if cursor.fail() {
                    debug!(worker_id, index = work.index, "フェイルファストフラグを設定しました");
                }
                reporter
                    .report_item_failed(work.index, &format!("{error:#}"))
                    .await;
                return Err(error);
            }
        }
    }

    reporter.report_worker_finished(worker_id, claimed).await;
    Ok(claimed)
}
