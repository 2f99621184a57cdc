// サービス層 - 機能別の具象実装
// 設定と実行監視をエンジンから切り離して提供する

pub mod config;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultOrchestrationConfig;
pub use monitoring::{
    init_logging, ConsoleRunReporter, NoOpRunReporter, ScopedTimer, Stopwatch, TracingRunReporter,
};
