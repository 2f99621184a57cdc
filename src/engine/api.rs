// 高レベル公開API
// エンジンを直接組み立てずに使えるようにするための便利な関数

use super::{bounded::BoundedPool, orchestrator::Orchestrator, unbounded::ForEachEngine};
use crate::core::{OrchestrationResult, PartitionStrategy, UnitSource};
use crate::services::{ConsoleRunReporter, DefaultOrchestrationConfig, NoOpRunReporter};
use std::future::Future;
use std::sync::Arc;

fn quiet_for_each_engine() -> ForEachEngine<NoOpRunReporter> {
    ForEachEngine::new(Arc::new(NoOpRunReporter::new()))
}

/// 全項目を無制限に並列実行する
///
/// 全ユニットの終了後、失敗が1件ならそのエラーを、2件以上なら集約エラーを返す。
pub async fn for_each_unbounded<I, T, F, Fut>(items: I, action: F) -> OrchestrationResult<()>
where
    I: IntoIterator<Item = T>,
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    quiet_for_each_engine().for_each(items, action).await
}

/// 共有引数を各呼び出しに渡す無制限並列実行
pub async fn for_each_with<I, T, A, F, Fut>(
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
    quiet_for_each_engine()
        .for_each_with(items, args, action)
        .await
}

/// 入力を連続区間に分割して並列実行する
pub async fn for_each_partitioned<I, T, F, Fut>(
    items: I,
    partitions: usize,
    action: F,
) -> OrchestrationResult<()>
where
    I: IntoIterator<Item = T>,
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    quiet_for_each_engine()
        .for_each_partitioned(items, partitions, PartitionStrategy::Contiguous, action)
        .await
}

/// 同時実行数を `workers` に制限して実行し、入力順の結果を返す
///
/// `workers == 0` の場合はユニットを1つも起動せずに事前条件エラーを返す。
pub async fn run_bounded<S>(source: S, workers: usize) -> OrchestrationResult<Vec<Option<S::Output>>>
where
    S: UnitSource,
{
    BoundedPool::new(workers, Arc::new(NoOpRunReporter::new()))?
        .run(source)
        .await
}

/// 結果を返さない有界実行
pub async fn run_bounded_void<S>(source: S, workers: usize) -> OrchestrationResult<()>
where
    S: UnitSource<Output = ()>,
{
    BoundedPool::new(workers, Arc::new(NoOpRunReporter::new()))?
        .run_void(source)
        .await
}

/// Orchestrator作成のヘルパー関数
///
/// デフォルト設定とコンソール出力でのオーケストレーター作成
pub fn create_default_orchestrator(
) -> OrchestrationResult<Orchestrator<DefaultOrchestrationConfig, ConsoleRunReporter>> {
    Orchestrator::new(
        DefaultOrchestrationConfig::default(),
        ConsoleRunReporter::new(),
    )
}

/// Orchestrator作成のヘルパー関数（静音版）
///
/// テストやバックグラウンド処理用
pub fn create_quiet_orchestrator(
) -> OrchestrationResult<Orchestrator<DefaultOrchestrationConfig, NoOpRunReporter>> {
    Orchestrator::new(
        DefaultOrchestrationConfig::default().with_reporting(false),
        NoOpRunReporter::new(),
    )
}
