//! Command-line interface definitions.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Telegram crypto price bot and Binance scrapper service
#[derive(Parser, Debug)]
#[command(name = "tickerbot")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a service in the foreground until interrupted
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Which process to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// REST API over Binance with watchlist storage
    Scrapper,
    /// Telegram bot talking to a remote scrapper
    Bot,
    /// Scrapper and bot in one process
    #[default]
    Standalone,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scrapper => "scrapper",
            Self::Bot => "bot",
            Self::Standalone => "standalone",
        })
    }
}

/// Arguments for `tickerbot run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Service to run.
    #[arg(value_enum, default_value_t = RunMode::Standalone)]
    pub mode: RunMode,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Subcommands for `tickerbot check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate a configuration file and print the effective settings.
    Config(ConfigPathArg),
    /// Load the trading pairs from Binance.
    Exchange(ConfigPathArg),
}

/// Shared argument for commands that only need a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}
