//! Replay a keystroke script through the debounced search box

use crate::util;
use anyhow::{Context, Result};
use cli_lib::keystrokes::{self, EmittedQuery};
use cli_lib::system_config;
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(
    flag: Option<&Path>,
    debounce_ms: Option<i64>,
    min_chars: Option<usize>,
    json: bool,
) -> Result<()> {
    let config_path = system_config::config_file_path(flag)?;
    let mut config = system_config::load(&config_path)?;

    if let Some(ms) = debounce_ms {
        config.search.debounce_ms = ms;
    }
    if let Some(n) = min_chars {
        config.search.min_chars = n;
    }
    config.validate().context("Invalid search settings")?;

    let input = util::read_stdin().await?;
    let script = keystrokes::parse_script(&input).context("Invalid keystroke script")?;
    tracing::info!(keystrokes = script.len(), "Replaying keystroke script");

    let emitted = keystrokes::run_search(&script, &config.search).await?;

    if json {
        for query in &emitted {
            println!("{}", serde_json::to_string(query)?);
        }
    } else {
        print_human(&emitted, script.len());
    }

    Ok(())
}

fn print_human(emitted: &[EmittedQuery], keystrokes: usize) {
    for query in emitted {
        let shown = if query.query.is_empty() {
            "(cleared)".dimmed().to_string()
        } else {
            query.query.clone()
        };
        println!("{} {}", format!("[{:>6}ms]", query.at_ms).dimmed(), shown);
    }

    println!(
        "{}",
        format!("{} keystrokes → {} queries", keystrokes, emitted.len()).dimmed()
    );
}
