// 実行監視機能
// 実行ライフサイクルのログ出力、経過時間の計測、ロガーの初期化

pub mod implementations;
pub mod logging;
pub mod timer;

// 公開API
pub use implementations::{ConsoleRunReporter, NoOpRunReporter, TracingRunReporter};
pub use logging::init_logging;
pub use timer::{ScopedTimer, Stopwatch};
