//! Keystroke scripts for exercising the debounced search box
//!
//! A script is one keystroke per line: `<offset-ms> <field contents>`,
//! where the offset is measured from the start of the replay. Blank lines
//! and lines starting with `#` are skipped. A line with only an offset
//! means the field was cleared.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::time::Duration;
use storefront::config::SearchConfig;
use storefront::SearchBox;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Slack after the last quiet period before the replay stops waiting
const SETTLE: Duration = Duration::from_millis(25);

/// One change to the search field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    pub at: Duration,
    pub text: String,
}

/// A query the search box emitted during replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedQuery {
    pub at_ms: u64,
    pub query: String,
}

/// Parse a keystroke script
pub fn parse_script(input: &str) -> Result<Vec<Keystroke>> {
    let mut keystrokes = Vec::new();
    let mut last = Duration::ZERO;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (offset, text) = match trimmed.split_once(' ') {
            Some((offset, text)) => (offset, text),
            None => (trimmed.trim_end(), ""),
        };

        let offset_ms: u64 = offset
            .parse()
            .with_context(|| format!("line {}: invalid offset '{}'", line_no, offset))?;
        let at = Duration::from_millis(offset_ms);
        if at < last {
            bail!(
                "line {}: offset {}ms goes back in time (previous was {}ms)",
                line_no,
                offset_ms,
                last.as_millis()
            );
        }
        last = at;

        keystrokes.push(Keystroke {
            at,
            text: text.to_string(),
        });
    }

    Ok(keystrokes)
}

/// Replay `script` against a fresh search box and collect what it emits
///
/// Waits for the final quiet period to elapse before returning.
pub async fn run_search(script: &[Keystroke], config: &SearchConfig) -> Result<Vec<EmittedQuery>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let start = Instant::now();

    let search = SearchBox::new(config, move |query| {
        let _ = tx.send(EmittedQuery {
            at_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            query,
        });
    })?;

    for keystroke in script {
        sleep_until(start + keystroke.at).await;
        tracing::debug!(at = ?keystroke.at, text = %keystroke.text, "Replaying keystroke");
        search.input(&keystroke.text);
    }

    let quiet_period = config.debounce().quiet_period()?;
    let last = script.last().map_or(Duration::ZERO, |k| k.at);
    sleep_until(start + last + quiet_period + SETTLE).await;

    // A timer still pending here is running late; deliver its query anyway
    if search.submit() {
        tracing::debug!("Quiet period overran, flushed the pending query");
    }

    // Dropping the search box drops the sender, closing the channel
    drop(search);

    let mut emitted = Vec::new();
    while let Some(query) = rx.recv().await {
        emitted.push(query);
    }
    Ok(emitted)
}
