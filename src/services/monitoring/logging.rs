// tracing-subscriber によるロガー初期化

use crate::core::{OrchestrationError, OrchestrationResult};
use tracing_subscriber::EnvFilter;

/// fmt レイヤーのロガーを初期化する
///
/// `RUST_LOG` が設定されていればそれに従い、なければ `info`（verbose 時は `debug`）。
/// 標準出力は結果の表示に使うため、ログは標準エラーへ出す。
pub fn init_logging(verbose: bool) -> OrchestrationResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| OrchestrationError::configuration(format!("ロガーの初期化に失敗しました: {e}")))
}
