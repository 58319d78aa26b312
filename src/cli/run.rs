//! Run command implementation

use super::SourceArgs;
use crate::config::Config;
use crate::report::{render, OutputFormat};
use crate::scanner::{CycleReport, Scheduler};
use clap::Args;
use std::future::Future;
use tokio::sync::mpsc;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Stop after this many cycles
    #[arg(long)]
    pub max_cycles: Option<u64>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let config = self.source.apply(config);
        let settings = config.scanner.settings();
        let scanner = self.source.build_scanner(&config)?;

        let mut scheduler = Scheduler::new(settings.refresh_interval);
        let mut reports = scheduler.start(scanner)?;

        let printed = self
            .print_reports(&mut reports, tokio::signal::ctrl_c())
            .await;

        scheduler.stop().await;
        printed.map(|_| ())
    }

    /// Print reports until the cycle limit, the loop ending, or `interrupt`
    ///
    /// `interrupt` is polled across the whole loop, so a signal arriving
    /// between reports is not lost. Returns the number of reports printed.
    async fn print_reports<F>(
        &self,
        reports: &mut mpsc::Receiver<CycleReport>,
        interrupt: F,
    ) -> anyhow::Result<u64>
    where
        F: Future,
    {
        tokio::pin!(interrupt);
        let mut printed = 0;

        loop {
            tokio::select! {
                biased;
                _ = &mut interrupt => {
                    tracing::info!("Interrupt received, stopping after current cycle");
                    break;
                }
                report = reports.recv() => {
                    let Some(report) = report else {
                        tracing::warn!("Polling loop ended unexpectedly");
                        break;
                    };
                    println!("{}", render(&report, self.format)?);
                    printed += 1;

                    if self.max_cycles.is_some_and(|max| report.status.cycles >= max) {
                        tracing::info!(cycles = report.status.cycles, "Cycle limit reached");
                        break;
                    }
                }
            }
        }

        Ok(printed)
    }
}
