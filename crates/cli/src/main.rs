//! LivestockHub CLI - lhub command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod util;

/// LivestockHub - storefront behaviours from the terminal
#[derive(Parser)]
#[command(name = "lhub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: $LHUB_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a keystroke script (stdin) through the debounced search box
    Search {
        /// Override the quiet period in milliseconds
        #[arg(long)]
        debounce_ms: Option<i64>,
        /// Override the minimum query length
        #[arg(long)]
        min_chars: Option<usize>,
        /// Print emitted queries as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Clamp a quantity to the orderable range
    Clamp {
        /// Raw quantity as typed
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Smallest orderable quantity
        #[arg(long, default_value = "1")]
        min: u32,
        /// Largest orderable quantity (usually the stock left)
        #[arg(long)]
        max: u32,
    },
    /// Show the label for a price filter
    PriceRange {
        /// Lower bound
        #[arg(long)]
        min: Option<String>,
        /// Upper bound
        #[arg(long)]
        max: Option<String>,
    },
    /// Check and confirm an order status change
    Status {
        /// Order number
        order: String,
        /// Current status
        from: String,
        /// Requested status
        to: String,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// View and edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Print a single value
    Get {
        /// Dotted key, e.g. search.debounce_ms
        key: String,
    },
    /// Change a single value
    Set {
        /// Dotted key, e.g. search.debounce_ms
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Show the config file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example configuration
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    util::init_tracing(cli.verbose);

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Search { debounce_ms, min_chars, json } => {
            cmd::search::run(config, debounce_ms, min_chars, json).await
        }
        Commands::Clamp { value, min, max } => cmd::clamp::run(&value, min, max),
        Commands::PriceRange { min, max } => {
            cmd::price::run(config, min.as_deref(), max.as_deref())
        }
        Commands::Status { order, from, to, yes } => {
            cmd::status::run(&order, &from, &to, yes).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list(config),
            ConfigCommands::Get { key } => cmd::config::run_get(config, &key),
            ConfigCommands::Set { key, value } => cmd::config::run_set(config, &key, &value),
            ConfigCommands::Path { create } => cmd::config::run_path(config, create),
            ConfigCommands::Example => cmd::config::run_example(),
        },
    }
}
