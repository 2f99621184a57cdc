use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 同時に実行中のユニット数とその最大値を記録する
#[derive(Debug, Default)]
pub struct ConcurrencyGauge {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 実行開始を記録し、ガードが破棄されるまで実行中として数える
    pub fn enter(self: &Arc<Self>) -> GaugeGuard {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        GaugeGuard {
            gauge: Arc::clone(self),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

pub struct GaugeGuard {
    gauge: Arc<ConcurrencyGauge>,
}

impl Drop for GaugeGuard {
    fn drop(&mut self) {
        self.gauge.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// ユニットが生成・開始された回数
#[derive(Debug, Default)]
pub struct ClaimCounter {
    count: AtomicUsize,
}

impl ClaimCounter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// 処理された項目を記録する
#[derive(Debug, Default)]
pub struct SeenItems {
    items: Mutex<Vec<usize>>,
}

impl SeenItems {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, item: usize) {
        self.items.lock().unwrap().push(item);
    }

    pub fn snapshot(&self) -> Vec<usize> {
        self.items.lock().unwrap().clone()
    }
}

/// 値に反比例する遅延（小さい値ほど遅く終わる）
pub fn reverse_delay(value: u64, max: u64, step_ms: u64) -> Duration {
    Duration::from_millis((max + 1 - value.min(max)) * step_ms)
}

/// 同一性の確認に使うエラー型
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unit {value} failed")]
pub struct UnitFailure {
    pub value: u64,
}
