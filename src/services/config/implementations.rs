// 設定管理の具象実装

use crate::core::{
    OrchestrationConfig, OrchestrationError, OrchestrationResult, PartitionStrategy,
    PreconditionViolation,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_workers() -> usize {
    num_cpus::get().max(1) * 2
}

fn default_partitions() -> usize {
    num_cpus::get().max(1)
}

fn default_reporting() -> bool {
    true
}

/// デフォルト設定実装
///
/// JSON ファイルで省略された項目は既定値になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultOrchestrationConfig {
    #[serde(default = "default_workers")]
    workers: usize,
    #[serde(default = "default_partitions")]
    partitions: usize,
    #[serde(default)]
    strategy: PartitionStrategy,
    #[serde(default = "default_reporting")]
    enable_reporting: bool,
}

impl DefaultOrchestrationConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            workers: cpu_count.max(1) * 2,
            partitions: cpu_count.max(1),
            strategy: PartitionStrategy::default(),
            enable_reporting: true,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn with_strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_reporting(mut self, enable: bool) -> Self {
        self.enable_reporting = enable;
        self
    }

    /// ワーカー数・パーティション数が1以上であることを確認
    pub fn validate(&self) -> Result<(), PreconditionViolation> {
        validate_counts(self)
    }

    /// JSON ファイルから設定を読み込む
    pub fn from_json_file(path: impl AsRef<Path>) -> OrchestrationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OrchestrationError::configuration(format!(
                "設定ファイルを読み込めません: {} - {e}",
                path.display()
            ))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            OrchestrationError::configuration(format!(
                "設定ファイルの形式が不正です: {} - {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// JSON ファイルに設定を書き出す
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> OrchestrationResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| OrchestrationError::configuration(format!("設定のシリアライズに失敗しました: {e}")))?;
        std::fs::write(path, content).map_err(|e| {
            OrchestrationError::configuration(format!(
                "設定ファイルを書き込めません: {} - {e}",
                path.display()
            ))
        })
    }
}

impl Default for DefaultOrchestrationConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            partitions: default_partitions(),
            strategy: PartitionStrategy::default(),
            enable_reporting: default_reporting(),
        }
    }
}

impl OrchestrationConfig for DefaultOrchestrationConfig {
    fn worker_count(&self) -> usize {
        self.workers
    }

    fn partition_count(&self) -> usize {
        self.partitions
    }

    fn partition_strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    fn enable_reporting(&self) -> bool {
        self.enable_reporting
    }
}

/// 任意の設定実装に対する件数の検証
pub(crate) fn validate_counts<C>(config: &C) -> Result<(), PreconditionViolation>
where
    C: OrchestrationConfig + ?Sized,
{
    if config.worker_count() == 0 {
        return Err(PreconditionViolation::InvalidWorkerCount {
            workers: config.worker_count(),
        });
    }
    if config.partition_count() == 0 {
        return Err(PreconditionViolation::InvalidPartitionCount {
            partitions: config.partition_count(),
        });
    }
    Ok(())
}
