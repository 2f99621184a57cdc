// オーケストレーション専用のエラー型定義
// ユニット処理の失敗は anyhow::Error で受け取り、エンジン側の分類はここで行う

use thiserror::Error;

/// 前提条件違反
///
/// 並行処理を開始する前に同期的に検出される。再試行の対象にはならない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionViolation {
    #[error("ワーカー数は1以上である必要があります (指定値: {workers})")]
    InvalidWorkerCount { workers: usize },

    #[error("パーティション数は1以上である必要があります (指定値: {partitions})")]
    InvalidPartitionCount { partitions: usize },
}

/// 複数のユニット処理失敗をまとめた集約エラー
///
/// 構築時に平坦化されるため、メンバーに集約エラーが直接含まれることはない。
#[derive(Error, Debug)]
#[error("{} 件のユニット処理が失敗しました", .errors.len())]
pub struct AggregateError {
    errors: Vec<anyhow::Error>,
}

impl AggregateError {
    /// 失敗の一覧から集約エラーを作成（入れ子の集約は展開する）
    pub fn new(errors: impl IntoIterator<Item = anyhow::Error>) -> Self {
        let mut flattened = Vec::new();
        for error in errors {
            push_flattened(&mut flattened, error);
        }
        Self { errors: flattened }
    }

    /// 含まれる失敗への参照
    pub fn errors(&self) -> &[anyhow::Error] {
        &self.errors
    }

    /// 含まれる失敗を取り出す
    pub fn into_errors(self) -> Vec<anyhow::Error> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn push_flattened(target: &mut Vec<anyhow::Error>, error: anyhow::Error) {
    let error = match error.downcast::<AggregateError>() {
        Ok(aggregate) => {
            target.extend(aggregate.errors);
            return;
        }
        Err(error) => error,
    };

    match error.downcast::<OrchestrationError>() {
        Ok(OrchestrationError::Aggregate(aggregate)) => target.extend(aggregate.errors),
        Ok(other) => target.push(anyhow::Error::new(other)),
        Err(error) => target.push(error),
    }
}

/// オーケストレーションエンジンのエラー型
#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("前提条件違反: {0}")]
    Precondition(#[from] PreconditionViolation),

    /// 単一のユニット処理失敗（元のエラーをそのまま保持）
    #[error(transparent)]
    UnitOfWork(anyhow::Error),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("タスクエラー: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("設定エラー: {message}")]
    Configuration { message: String },
}

impl OrchestrationError {
    /// 捕捉した単一の失敗をエンジンのエラーに変換
    ///
    /// タスクのパニック（JoinError）は `Task` に、それ以外は `UnitOfWork` に分類する。
    pub fn from_failure(error: anyhow::Error) -> Self {
        match error.downcast::<tokio::task::JoinError>() {
            Ok(source) => Self::Task { source },
            Err(error) => Self::UnitOfWork(error),
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }

    /// 単一失敗の場合、ユニットが返した元のエラー
    pub fn unit_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::UnitOfWork(error) => Some(error),
            _ => None,
        }
    }

    /// このエラーが表すユニット処理失敗の件数
    pub fn failure_count(&self) -> usize {
        match self {
            Self::UnitOfWork(_) | Self::Task { .. } => 1,
            Self::Aggregate(aggregate) => aggregate.len(),
            Self::Precondition(_) | Self::Configuration { .. } => 0,
        }
    }
}

/// オーケストレーション結果型
pub type OrchestrationResult<T> = std::result::Result<T, OrchestrationError>;
