// 経過時間の計測

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// 開始時刻と経過時間を保持するストップウォッチ
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started_at: DateTime<Utc>,
    instant: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            instant: Instant::now(),
        }
    }

    /// 計測開始時の壁時計時刻
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// "Elapsed: 1.23 sec" 形式の文字列
    pub fn format_elapsed(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("Elapsed: {:.2} sec", elapsed.as_secs_f64())
}

/// スコープを抜けるときに経過時間をログ出力するタイマー
///
/// ```
/// use work_orchestrator::services::monitoring::ScopedTimer;
///
/// {
///     let _timer = ScopedTimer::new("bounded run");
///     // 計測対象の処理
/// } // ここで "Elapsed: X.XX sec" が debug レベルで出力される
/// ```
#[derive(Debug)]
pub struct ScopedTimer {
    label: String,
    stopwatch: Stopwatch,
}

impl ScopedTimer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            stopwatch: Stopwatch::start(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        tracing::debug!(
            label = %self.label,
            elapsed_ms = self.stopwatch.elapsed_ms(),
            "{}",
            self.stopwatch.format_elapsed()
        );
    }
}
