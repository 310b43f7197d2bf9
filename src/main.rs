use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use nodewatch::application::config::AppConfig;
use nodewatch::application::runner::MonitoringRunner;

#[derive(Parser)]
#[command(name = "nodewatch", version, about = "Node rating monitoring daemon")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config/config.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_banner() {
    println!("{}", "━".repeat(44).cyan());
    println!("{}", "  nodewatch — node rating monitor".bold().cyan());
    println!("{}", "━".repeat(44).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);
    print_banner();

    let config = AppConfig::load_from(&cli.config)?;
    let runner = MonitoringRunner::new(config);
    let scheduler = runner.start()?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("interrupt received, shutting down");
    scheduler.close();

    Ok(())
}
