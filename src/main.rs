use arb_streamer::cli::{Cli, Commands};
use arb_streamer::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = arb_streamer::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting polling loop");
            args.execute(&config).await?;
        }
        Commands::Scan(args) => {
            tracing::info!("Running single scan");
            args.execute(&config).await?;
        }
        Commands::Config => {
            let settings = config.scanner.settings();
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
            println!();
            println!("Effective scanner settings:");
            println!("  Refresh: {}s", settings.refresh_interval.as_secs_f64());
            println!(
                "  Min similarity: {}",
                settings.thresholds.min_similarity
            );
            println!("  Min edge: {} bps", settings.thresholds.min_edge_bps);
            println!("  Warning log size: {}", settings.max_warnings);
        }
    }

    Ok(())
}
