//! Scan command implementation

use super::SourceArgs;
use crate::config::Config;
use crate::report::{render, OutputFormat};
use clap::Args;

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let config = self.source.apply(config);
        let mut scanner = self.source.build_scanner(&config)?;

        let report = scanner.run_cycle().await;
        println!("{}", render(&report, self.format)?);
        Ok(())
    }
}
