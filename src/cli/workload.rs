// CLI 用の合成ワークロード
// 値ごとに遅延してから値をそのまま返す。指定された値では失敗する。

use super::args::WorkloadArgs;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SyntheticWorkload {
    items: u64,
    max_delay_ms: u64,
    fail_at: Arc<HashSet<u64>>,
    reverse_delays: bool,
}

impl SyntheticWorkload {
    pub fn new(items: u64, max_delay_ms: u64) -> Self {
        Self {
            items,
            max_delay_ms,
            fail_at: Arc::new(HashSet::new()),
            reverse_delays: false,
        }
    }

    pub fn with_failures(mut self, fail_at: impl IntoIterator<Item = u64>) -> Self {
        self.fail_at = Arc::new(fail_at.into_iter().collect());
        self
    }

    pub fn with_reverse_delays(mut self, reverse: bool) -> Self {
        self.reverse_delays = reverse;
        self
    }

    pub fn items(&self) -> u64 {
        self.items
    }

    /// 入力値 1..=items
    pub fn values(&self) -> impl Iterator<Item = u64> {
        1..=self.items
    }

    /// 値ごとの遅延
    ///
    /// reverse 指定時は値に反比例し、小さい値ほど遅く終わる。
    pub fn delay_for(&self, value: u64) -> Duration {
        if self.max_delay_ms == 0 || self.items == 0 {
            return Duration::ZERO;
        }
        let millis = if self.reverse_delays {
            self.max_delay_ms * (self.items + 1 - value.min(self.items)) / self.items
        } else {
            value.wrapping_mul(37) % (self.max_delay_ms + 1)
        };
        Duration::from_millis(millis)
    }

    pub fn should_fail(&self, value: u64) -> bool {
        self.fail_at.contains(&value)
    }

    /// 1件分のユニット
    pub async fn run_unit(self, value: u64) -> anyhow::Result<u64> {
        tokio::time::sleep(self.delay_for(value)).await;
        if self.should_fail(value) {
            anyhow::bail!("unit {value} failed");
        }
        Ok(value)
    }
}

impl From<&WorkloadArgs> for SyntheticWorkload {
    fn from(args: &WorkloadArgs) -> Self {
        SyntheticWorkload::new(args.items, args.max_delay_ms)
            .with_failures(args.fail_at.iter().copied())
            .with_reverse_delays(args.reverse_delays)
    }
}
