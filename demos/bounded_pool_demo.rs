use std::time::Duration;
use work_orchestrator::{
    engine::{create_default_orchestrator, lazy, run_bounded},
    services::{init_logging, Stopwatch},
    OrchestrationError,
};

// 値が小さいほど長く待つユニット
async fn slow_square(value: u64) -> anyhow::Result<u64> {
    tokio::time::sleep(Duration::from_millis((11 - value) * 20)).await;
    Ok(value * value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(false)?;

    println!("=== 有界ワーカープールのデモ ===\n");

    // 1. 完了順に関係なく入力順で結果が返る
    let stopwatch = Stopwatch::start();
    let results = run_bounded(lazy((1..=10).map(slow_square)), 3).await?;
    println!("📊 結果: {results:?}");
    println!("⏱️  {}\n", stopwatch.format_elapsed());

    // 2. 1件だけ失敗した場合は元のエラーがそのまま返る
    let units = (1..=10u64).map(|value| async move {
        if value == 5 {
            anyhow::bail!("value {value} rejected");
        }
        Ok(value)
    });
    match run_bounded(lazy(units), 2).await {
        Ok(_) => println!("✅ 予期せず成功しました"),
        Err(error) => println!("❌ 単一エラー: {error}"),
    }

    // 3. ワーカー数 0 は何も起動せずに拒否される
    if let Err(error @ OrchestrationError::Precondition(_)) =
        run_bounded(lazy((1..=3).map(slow_square)), 0).await
    {
        println!("⚠️  事前条件エラー: {error}");
    }

    // 4. 設定とコンソール報告付きのオーケストレーター
    println!();
    let orchestrator = create_default_orchestrator()?;
    orchestrator
        .for_each_partitioned(1..=20u64, |value| async move {
            slow_square(value % 10 + 1).await.map(|_| ())
        })
        .await?;

    Ok(())
}
