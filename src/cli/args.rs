use crate::core::PartitionStrategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "work_orchestrator")]
#[command(about = "Run synthetic workloads through the concurrent orchestration engines")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (workers, partitions, strategy, enable_reporting)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the run report as JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every workload subcommand
#[derive(Args, Clone, Debug)]
pub struct WorkloadArgs {
    /// Number of work items (values 1..=items)
    #[arg(short = 'n', long, default_value = "10")]
    pub items: u64,

    /// Upper bound of the artificial per-item delay in milliseconds
    #[arg(long, default_value = "50")]
    pub max_delay_ms: u64,

    /// Item values that fail (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub fail_at: Vec<u64>,

    /// Make smaller values wait longer so completion order is reversed
    #[arg(long)]
    pub reverse_delays: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the workload on a bounded worker pool and print ordered results
    Bounded {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Number of workers (overrides the configuration file)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Start every item at once
    Unbounded {
        #[command(flatten)]
        workload: WorkloadArgs,
    },

    /// Split the workload into partitions, one sequential worker per partition
    Partitioned {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Number of partitions (overrides the configuration file)
        #[arg(short, long)]
        partitions: Option<usize>,

        /// Partitioning strategy
        #[arg(short, long, value_enum)]
        strategy: Option<PartitionStrategy>,
    },
}
