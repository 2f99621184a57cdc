// CLI層 - コマンドライン引数の定義と処理
// 合成ワークロードを各エンジンで実行するデモ用インターフェース

pub mod args;
pub mod commands;
pub mod workload;

// 公開API
pub use args::*;
pub use commands::*;
pub use workload::SyntheticWorkload;
