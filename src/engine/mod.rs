// エンジン層 - 並行実行とオーケストレーション
// 無制限 for-each、パーティション分割、有界ワーカープールを提供

pub mod api;
pub mod bounded;
mod cursor; // BoundedPool内部でのみ使用
mod funnel;
pub mod orchestrator;
pub mod partitioner;
pub mod source;
pub mod unbounded;

// 公開API - 主要エンジンクラス
pub use api::{
    create_default_orchestrator, create_quiet_orchestrator, for_each_partitioned,
    for_each_unbounded, for_each_with, run_bounded, run_bounded_void,
};
pub use bounded::BoundedPool;
pub use orchestrator::{GatedReporter, Orchestrator};
pub use partitioner::{Partition, Partitioner};
pub use source::{from_fn, lazy, try_from_fn, FromFn, Lazy, TryFromFn};
pub use unbounded::ForEachEngine;
