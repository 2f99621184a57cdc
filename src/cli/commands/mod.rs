pub mod bounded;
pub mod partitioned;
pub mod unbounded;

pub use bounded::*;
pub use partitioned::*;
pub use unbounded::*;

use crate::core::{OrchestrationError, OrchestrationResult, RunMode, RunReporter};
use crate::services::monitoring::{implementations::describe_mode, timer::format_elapsed};
use crate::services::{ConsoleRunReporter, DefaultOrchestrationConfig, Stopwatch, TracingRunReporter};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Load the configuration file, or fall back to defaults
pub fn load_config(path: Option<&Path>) -> OrchestrationResult<DefaultOrchestrationConfig> {
    match path {
        Some(path) => DefaultOrchestrationConfig::from_json_file(path),
        None => Ok(DefaultOrchestrationConfig::default()),
    }
}

/// JSON output keeps stdout for the report, so lifecycle events go to the tracing log
pub(crate) fn select_reporter(json: bool) -> Box<dyn RunReporter> {
    if json {
        Box::new(TracingRunReporter::new())
    } else {
        Box::new(ConsoleRunReporter::new())
    }
}

/// Outcome of one CLI run
#[derive(Debug, Serialize)]
pub struct CommandReport {
    pub mode: RunMode,
    pub items: u64,
    pub succeeded: bool,
    pub failures: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub elapsed_ms: u64,
}

impl CommandReport {
    pub fn new(mode: RunMode, items: u64, stopwatch: &Stopwatch) -> Self {
        Self {
            mode,
            items,
            succeeded: true,
            failures: 0,
            results: None,
            errors: Vec::new(),
            elapsed_ms: stopwatch.elapsed_ms(),
        }
    }

    pub fn with_results(mut self, results: Vec<u64>) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_error(mut self, error: &OrchestrationError) -> Self {
        self.succeeded = false;
        self.failures = error.failure_count();
        self.errors = match error {
            OrchestrationError::Aggregate(aggregate) => aggregate
                .errors()
                .iter()
                .map(|error| format!("{error:#}"))
                .collect(),
            other => vec![other.to_string()],
        };
        self
    }

    /// Print the report and turn a failed run into an error (exit code 1)
    pub fn emit(self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&self)?);
        } else {
            self.print_human();
        }

        if !self.succeeded {
            anyhow::bail!(
                "{} run failed with {} failure(s)",
                describe_mode(self.mode),
                self.failures
            );
        }
        Ok(())
    }

    fn print_human(&self) {
        println!("\n📊 処理結果:");
        println!("   - モード: {}", describe_mode(self.mode));
        println!("   - 項目数: {}", self.items);
        if let Some(results) = &self.results {
            println!("   - 結果: {results:?}");
        }
        if !self.succeeded {
            println!("   - 失敗数: {}", self.failures);
            for error in &self.errors {
                println!("     ❌ {error}");
            }
        }
        println!("⏱️  {}", format_elapsed(Duration::from_millis(self.elapsed_ms)));
    }
}
