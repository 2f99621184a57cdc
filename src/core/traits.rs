// オーケストレーションのトレイト定義
// エンジンが外部から受け取る抽象化インターフェース

use super::types::{PartitionStrategy, RunMode, RunSummary};
use async_trait::async_trait;
use mockall::automock;
use std::future::Future;

/// 次の作業ユニットを生成する契約
///
/// 有界ワーカープールはこのトレイトを実装した値しか受け取らない。
/// `Vec` や配列などの実体化済みコレクションには実装が存在しないため、
/// 作業をまとめて先に構築してしまう呼び出しはコンパイル時に拒否される。
///
/// ```compile_fail
/// use work_orchestrator::engine::api::run_bounded;
///
/// # async fn demo() {
/// let units: Vec<_> = (1..=2).map(|value| async move { anyhow::Ok(value) }).collect();
/// let _ = run_bounded(units, 2).await;
/// # }
/// ```
pub trait UnitSource: Send + 'static {
    /// ユニットが成功時に返す値
    type Output: Send + 'static;

    /// 作業ユニット本体
    type Unit: Future<Output = anyhow::Result<Self::Output>> + Send + 'static;

    /// 次のユニットを生成する
    ///
    /// `Ok(None)` は枯渇、`Err` は生成そのものの失敗（ユニット失敗と同様に扱われる）。
    fn next_unit(&mut self) -> anyhow::Result<Option<Self::Unit>>;
}

/// オーケストレーション設定を抽象化するトレイト
#[automock]
pub trait OrchestrationConfig: Send + Sync {
    /// 有界ワーカープールのワーカー数
    fn worker_count(&self) -> usize;

    /// パーティション分割時のパーティション数
    fn partition_count(&self) -> usize;

    /// パーティション分割の方式
    fn partition_strategy(&self) -> PartitionStrategy;

    /// 実行ログの報告を有効にするかどうか
    fn enable_reporting(&self) -> bool;
}

// OrchestrationConfig for Box<dyn OrchestrationConfig>
impl OrchestrationConfig for Box<dyn OrchestrationConfig> {
    fn worker_count(&self) -> usize {
        self.as_ref().worker_count()
    }

    fn partition_count(&self) -> usize {
        self.as_ref().partition_count()
    }

    fn partition_strategy(&self) -> PartitionStrategy {
        self.as_ref().partition_strategy()
    }

    fn enable_reporting(&self) -> bool {
        self.as_ref().enable_reporting()
    }
}

/// 実行ライフサイクルの報告トレイト
#[automock]
#[async_trait]
pub trait RunReporter: Send + Sync {
    /// 実行開始時の報告
    async fn report_started(&self, mode: RunMode);

    /// ユニット失敗時の報告
    async fn report_item_failed(&self, index: usize, error: &str);

    /// ワーカー終了時の報告
    async fn report_worker_finished(&self, worker_id: usize, claimed: usize);

    /// 実行完了時の報告
    async fn report_completed(&self, summary: &RunSummary);
}

// RunReporter for Box<dyn RunReporter>
#[async_trait]
impl RunReporter for Box<dyn RunReporter> {
    async fn report_started(&self, mode: RunMode) {
        self.as_ref().report_started(mode).await
    }

    async fn report_item_failed(&self, index: usize, error: &str) {
        self.as_ref().report_item_failed(index, error).await
    }

    async fn report_worker_finished(&self, worker_id: usize, claimed: usize) {
        self.as_ref().report_worker_finished(worker_id, claimed).await
    }

    async fn report_completed(&self, summary: &RunSummary) {
        self.as_ref().report_completed(summary).await
    }
}
