// ErrorFunnel - ユニット失敗の収集
// 各ユニットは失敗をチャンネルに書き込み、合流側が全ワーカー終了後にまとめて判定する

use crate::core::{AggregateError, OrchestrationError, OrchestrationResult};
use tokio::sync::mpsc;

/// 失敗を書き込む側のハンドル（ユニットごとにクローンして渡す）
#[derive(Debug, Clone)]
pub(crate) struct FailureSink {
    tx: mpsc::UnboundedSender<anyhow::Error>,
}

impl FailureSink {
    pub(crate) fn record(&self, error: anyhow::Error) {
        // 受信側はファネル自身が保持しているので送信は失敗しない
        let _ = self.tx.send(error);
    }
}

/// 1回の実行で発生した全ての失敗を集めるファネル
#[derive(Debug)]
pub(crate) struct ErrorFunnel {
    sink: FailureSink,
    rx: mpsc::UnboundedReceiver<anyhow::Error>,
}

impl ErrorFunnel {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            sink: FailureSink { tx },
            rx,
        }
    }

    pub(crate) fn sink(&self) -> FailureSink {
        self.sink.clone()
    }

    /// 合流側で直接記録する（JoinError など）
    pub(crate) fn record(&self, error: anyhow::Error) {
        self.sink.record(error);
    }

    /// 溜まった失敗を全て取り出す
    pub(crate) fn drain(mut self) -> Vec<anyhow::Error> {
        let mut errors = Vec::new();
        while let Ok(error) = self.rx.try_recv() {
            errors.push(error);
        }
        errors
    }
}

/// 失敗の一覧から呼び出し側に返す結果を決める
///
/// 0件は成功、1件はそのエラーを変更せずに、2件以上は平坦化した集約エラーとして返す。
pub(crate) fn surface(mut errors: Vec<anyhow::Error>) -> OrchestrationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(OrchestrationError::from_failure(errors.remove(0))),
        _ => Err(OrchestrationError::Aggregate(AggregateError::new(errors))),
    }
}
