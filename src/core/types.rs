// オーケストレーションのデータ型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// カーソルから取得された作業項目
///
/// `index` はイテレーション順での位置（クレーム順）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem<T> {
    pub index: usize,
    pub item: T,
}

impl<T> WorkItem<T> {
    pub fn new(index: usize, item: T) -> Self {
        Self { index, item }
    }
}

/// 実行モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunMode {
    Unbounded,
    Partitioned { partitions: usize },
    Bounded { workers: usize },
}

impl RunMode {
    /// 同時に動くワーカー数（無制限モードでは None）
    pub fn concurrency_limit(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Partitioned { partitions } => Some(*partitions),
            Self::Bounded { workers } => Some(*workers),
        }
    }
}

/// パーティション分割の方式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// 連続した区間に分割（サイズの差は高々1）
    #[default]
    Contiguous,
    /// i 番目の項目を i mod P 番目のパーティションへ
    RoundRobin,
}

/// 1回の実行の状態
///
/// Running → Failed は最初の失敗で一度だけ遷移する。
/// Running|Failed → Completed は全ワーカーの終了時。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Running,
    Failed,
    Completed,
}

/// 状態遷移を管理する
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStateMachine {
    state: RunState,
    had_failure: bool,
}

impl RunStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// 失敗を記録する。この呼び出しで遷移した場合のみ true
    pub fn fail(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.state = RunState::Failed;
        self.had_failure = true;
        true
    }

    /// 新しいクレームを止めるべきか
    pub fn is_failed(&self) -> bool {
        self.had_failure
    }

    pub fn complete(&mut self) {
        self.state = RunState::Completed;
    }
}

/// 1回の実行のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub mode: RunMode,
    pub state: RunState,
    pub had_failure: bool,
    pub claimed: usize,
    pub failures: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}
