use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tickerbot::adapter::inbound::cli::command::{CheckCommand, Cli, Commands, RunArgs};
use tickerbot::adapter::inbound::cli::{check, output};
use tickerbot::error::Result;
use tickerbot::infrastructure::bootstrap;
use tickerbot::infrastructure::config::settings::Config;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    let result = match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::Check(CheckCommand::Config(args)) => check_config(&args.config),
        Commands::Check(CheckCommand::Exchange(args)) => check_exchange(&args.config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.init_logging();

    if let Err(e) = bootstrap::run(args.mode, config).await {
        error!(error = %e, "Fatal error");
        return Err(e);
    }
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    output::header(env!("CARGO_PKG_VERSION"));
    check::print_config(
        path,
        &config.summary(),
        config.telegram.token().is_ok(),
    );
    Ok(())
}

async fn check_exchange(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let pairs = bootstrap::check_exchange(&config).await?;
    output::header(env!("CARGO_PKG_VERSION"));
    check::print_exchange(
        "binance",
        &config.exchange.api_url,
        config.exchange.quote_asset.as_str(),
        pairs,
    );
    Ok(())
}
