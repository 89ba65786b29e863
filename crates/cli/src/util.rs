//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise warnings only, or debug with `-v`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read all of stdin
pub async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read stdin")?;
    Ok(input)
}

/// Ask a yes/no question on the terminal; anything but y/yes is a no
pub async fn prompt_yes_no(question: &str) -> Result<bool> {
    let question = question.to_string();
    tokio::task::spawn_blocking(move || -> Result<bool> {
        use std::io::Write;

        print!("{} [y/N] ", question);
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;

        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    })
    .await
    .context("Confirmation prompt task failed")?
}
