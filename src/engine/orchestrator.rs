// Orchestrator - 設定と報告を注入した並行実行エンジンのファサード
// 全ての依存関係がコンストラクタで注入される

use super::{bounded::BoundedPool, unbounded::ForEachEngine};
use crate::core::{
    OrchestrationConfig, OrchestrationResult, RunMode, RunReporter, RunSummary, UnitSource,
};
use crate::services::config::implementations::validate_counts;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// 設定の `enable_reporting()` に従って報告を転送するレポーター
pub struct GatedReporter<R> {
    inner: Arc<R>,
    enabled: bool,
}

#[async_trait]
impl<R: RunReporter> RunReporter for GatedReporter<R> {
    async fn report_started(&self, mode: RunMode) {
        if self.enabled {
            self.inner.report_started(mode).await;
        }
    }

    async fn report_item_failed(&self, index: usize, error: &str) {
        if self.enabled {
            self.inner.report_item_failed(index, error).await;
        }
    }

    async fn report_worker_finished(&self, worker_id: usize, claimed: usize) {
        if self.enabled {
            self.inner.report_worker_finished(worker_id, claimed).await;
        }
    }

    async fn report_completed(&self, summary: &RunSummary) {
        if self.enabled {
            self.inner.report_completed(summary).await;
        }
    }
}

/// 依存性注入による並行実行オーケストレーター
///
/// 1回の呼び出しごとにカーソル・フラグ・結果スロットを新しく作るため、
/// 同じオーケストレーターから並行に呼び出しても状態は共有されない。
pub struct Orchestrator<C, R> {
    config: Arc<C>,
    reporter: Arc<GatedReporter<R>>,
}

impl<C, R> Orchestrator<C, R>
where
    C: OrchestrationConfig,
    R: RunReporter + 'static,
{
    /// 新しいオーケストレーターを作成（設定はここで検証される）
    pub fn new(config: C, reporter: R) -> OrchestrationResult<Self> {
        validate_counts(&config)?;
        let enabled = config.enable_reporting();
        Ok(Self {
            config: Arc::new(config),
            reporter: Arc::new(GatedReporter {
                inner: Arc::new(reporter),
                enabled,
            }),
        })
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter.inner
    }

    fn for_each_engine(&self) -> ForEachEngine<GatedReporter<R>> {
        ForEachEngine::new(Arc::clone(&self.reporter))
    }

    fn bounded_pool(&self, workers: usize) -> OrchestrationResult<BoundedPool<GatedReporter<R>>> {
        Ok(BoundedPool::new(workers, Arc::clone(&self.reporter))?)
    }

    /// 全項目を無制限に並列実行
    pub async fn for_each_unbounded<I, T, F, Fut>(
        &self,
        items: I,
        action: F,
    ) -> OrchestrationResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.for_each_engine().for_each(items, action).await
    }

    /// 設定のパーティション数と方式で分割実行
    pub async fn for_each_partitioned<I, T, F, Fut>(
        &self,
        items: I,
        action: F,
    ) -> OrchestrationResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.for_each_partitioned_with(items, self.config.partition_count(), action)
            .await
    }

    /// パーティション数を指定して分割実行
    pub async fn for_each_partitioned_with<I, T, F, Fut>(
        &self,
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
        self.for_each_engine()
            .for_each_partitioned(items, partitions, self.config.partition_strategy(), action)
            .await
    }

    /// 設定のワーカー数で有界実行し、入力順の結果を返す
    pub async fn run_bounded<S>(&self, source: S) -> OrchestrationResult<Vec<Option<S::Output>>>
    where
        S: UnitSource,
    {
        self.run_bounded_with(source, self.config.worker_count())
            .await
    }

    /// ワーカー数を指定して有界実行
    pub async fn run_bounded_with<S>(
        &self,
        source: S,
        workers: usize,
    ) -> OrchestrationResult<Vec<Option<S::Output>>>
    where
        S: UnitSource,
    {
        self.bounded_pool(workers)?.run(source).await
    }

    /// 設定のワーカー数で有界実行（結果なし）
    pub async fn run_bounded_void<S>(&self, source: S) -> OrchestrationResult<()>
    where
        S: UnitSource<Output = ()>,
    {
        self.bounded_pool(self.config.worker_count())?
            .run_void(source)
            .await
    }
}
