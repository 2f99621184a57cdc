#![allow(dead_code)]

// テストユーティリティ
// 同時実行数の計測、起動回数の計測、遅延付きユニットのヘルパー

pub mod instrumented;

// 公開API
pub use instrumented::*;
