use anyhow::Result;
use clap::Parser;
use work_orchestrator::cli::{
    execute_bounded, execute_partitioned, execute_unbounded, load_config, Cli, Commands,
    SyntheticWorkload,
};
use work_orchestrator::services::{init_logging, ScopedTimer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;
    let _timer = ScopedTimer::new("work_orchestrator");

    let result = match cli.command {
        Commands::Bounded { workload, workers } => {
            execute_bounded(config, SyntheticWorkload::from(&workload), workers, cli.json).await
        }
        Commands::Unbounded { workload } => {
            execute_unbounded(config, SyntheticWorkload::from(&workload), cli.json).await
        }
        Commands::Partitioned {
            workload,
            partitions,
            strategy,
        } => {
            execute_partitioned(
                config,
                SyntheticWorkload::from(&workload),
                partitions,
                strategy,
                cli.json,
            )
            .await
        }
    };

    if let Err(error) = result {
        eprintln!("❌ エラー: {error:#}");
        std::process::exit(1);
    }

    Ok(())
}
