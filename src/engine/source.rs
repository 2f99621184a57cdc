// UnitSource - 遅延生成される作業ユニットのアダプター
// イテレーターやクロージャーを有界ワーカープールの入力に変換する

use crate::core::UnitSource;
use std::future::Future;

/// イテレーターから遅延的にユニットを取り出すソース
///
/// `IntoIterator` ではなく `Iterator` だけを受け取る。
/// `next()` が呼ばれるまでユニットは構築されない。
#[derive(Debug, Clone)]
pub struct Lazy<I> {
    units: I,
}

/// イテレーターを遅延ソースとしてラップ
pub fn lazy<I>(units: I) -> Lazy<I>
where
    I: Iterator,
{
    Lazy { units }
}

impl<I, F, T> UnitSource for Lazy<I>
where
    I: Iterator<Item = F> + Send + 'static,
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;
    type Unit = F;

    fn next_unit(&mut self) -> anyhow::Result<Option<F>> {
        Ok(self.units.next())
    }
}

/// 呼び出すたびに次のユニットを返すクロージャーのソース
#[derive(Debug, Clone)]
pub struct FromFn<G> {
    generate: G,
}

/// `None` を返すまで呼び出されるジェネレーター
pub fn from_fn<G, F>(generate: G) -> FromFn<G>
where
    G: FnMut() -> Option<F>,
{
    FromFn { generate }
}

impl<G, F, T> UnitSource for FromFn<G>
where
    G: FnMut() -> Option<F> + Send + 'static,
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;
    type Unit = F;

    fn next_unit(&mut self) -> anyhow::Result<Option<F>> {
        Ok((self.generate)())
    }
}

/// ユニットの生成自体が失敗しうるジェネレーターのソース
#[derive(Debug, Clone)]
pub struct TryFromFn<G> {
    generate: G,
}

/// `Ok(None)` で枯渇、`Err` で生成失敗を表すジェネレーター
pub fn try_from_fn<G, F>(generate: G) -> TryFromFn<G>
where
    G: FnMut() -> anyhow::Result<Option<F>>,
{
    TryFromFn { generate }
}

impl<G, F, T> UnitSource for TryFromFn<G>
where
    G: FnMut() -> anyhow::Result<Option<F>> + Send + 'static,
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;
    type Unit = F;

    fn next_unit(&mut self) -> anyhow::Result<Option<F>> {
        (self.generate)()
    }
}
