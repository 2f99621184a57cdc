// ClaimCursor - 共有カーソル、結果スロット配列、フェイルファストフラグ
// 1つのミューテックスでクレームとインデックス予約と結果書き込みを保護する

use crate::core::{RunState, RunStateMachine, UnitSource, WorkItem};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// カーソルからのクレーム結果
pub(crate) enum Claim<U> {
    /// ユニットを取得した（インデックスは予約済み）
    Item(WorkItem<U>),
    /// ソースが枯渇した
    Exhausted,
    /// フェイルファストフラグが立っている
    Halted,
    /// ソースがユニットの生成に失敗した（フラグは設定済み）
    Failed { index: usize, error: anyhow::Error },
}

struct ClaimState<S: UnitSource> {
    source: S,
    next_index: usize,
    exhausted: bool,
    run: RunStateMachine,
    // None の場合は結果を保持しない（void 版）
    slots: Option<Vec<Option<S::Output>>>,
}

/// 1回の実行に専有される共有カーソル
pub(crate) struct ClaimCursor<S: UnitSource> {
    inner: Mutex<ClaimState<S>>,
}

impl<S: UnitSource> ClaimCursor<S> {
    pub(crate) fn new(source: S, retain_results: bool) -> Self {
        Self {
            inner: Mutex::new(ClaimState {
                source,
                next_index: 0,
                exhausted: false,
                run: RunStateMachine::new(),
                slots: retain_results.then(Vec::new),
            }),
        }
    }

    // ソース内でのパニックで毒化しても状態自体は一貫している
    fn lock(&self) -> MutexGuard<'_, ClaimState<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 次のユニットをクレームし、結果スロットを予約する
    pub(crate) fn claim(&self) -> Claim<S::Unit> {
        let mut state = self.lock();
        if state.run.is_failed() {
            return Claim::Halted;
        }
        if state.exhausted {
            return Claim::Exhausted;
        }

        match state.source.next_unit() {
            Ok(Some(unit)) => {
                let index = state.next_index;
                state.next_index += 1;
                if let Some(slots) = state.slots.as_mut() {
                    slots.push(None);
                }
                Claim::Item(WorkItem::new(index, unit))
            }
            Ok(None) => {
                state.exhausted = true;
                Claim::Exhausted
            }
            Err(error) => {
                state.run.fail();
                Claim::Failed {
                    index: state.next_index,
                    error,
                }
            }
        }
    }

    /// 予約済みスロットに結果を書き込む
    pub(crate) fn fill(&self, index: usize, value: S::Output) {
        let mut state = self.lock();
        if let Some(slot) = state.slots.as_mut().and_then(|slots| slots.get_mut(index)) {
            *slot = Some(value);
        }
    }

    /// フェイルファストフラグを立てる。この呼び出しで遷移した場合 true
    pub(crate) fn fail(&self) -> bool {
        self.lock().run.fail()
    }

    pub(crate) fn is_failed(&self) -> bool {
        self.lock().run.is_failed()
    }

    pub(crate) fn complete(&self) -> RunState {
        let mut state = self.lock();
        state.run.complete();
        state.run.state()
    }

    /// これまでにクレームされた件数
    pub(crate) fn claimed(&self) -> usize {
        self.lock().next_index
    }

    /// クレーム順に並んだ結果を取り出す
    pub(crate) fn take_results(&self) -> Vec<Option<S::Output>> {
        self.lock().slots.take().unwrap_or_default()
    }
}

/// ワーカーがパニックした場合にフェイルファストフラグを立てるガード
pub(crate) struct FailFastGuard<S: UnitSource> {
    cursor: Arc<ClaimCursor<S>>,
}

impl<S: UnitSource> FailFastGuard<S> {
    pub(crate) fn new(cursor: Arc<ClaimCursor<S>>) -> Self {
        Self { cursor }
    }
}

impl<S: UnitSource> Drop for FailFastGuard<S> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.cursor.fail();
        }
    }
}
