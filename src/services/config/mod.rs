// 設定管理機能
// ワーカー数・パーティション数の既定値と JSON ファイルからの読み込み

pub mod implementations;

// 公開API
pub use implementations::DefaultOrchestrationConfig;
