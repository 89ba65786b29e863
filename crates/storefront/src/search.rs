//! Debounced search input
//!
//! Keystrokes are fed to a [`Debouncer`]; when typing pauses for the quiet
//! period, the latest input is normalized and emitted. Queries shorter than
//! `min_chars` are held back (except the empty query, which clears the
//! search) and a query identical to the previous one is not re-sent.

use crate::config::SearchConfig;
use crate::Result;
use debounce::Debouncer;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

pub struct SearchBox {
    debouncer: Debouncer<String>,
}

impl SearchBox {
    /// Create a search box that hands each emitted query to `on_query`
    ///
    /// Must be called from inside a tokio runtime.
    pub fn new<F>(config: &SearchConfig, on_query: F) -> Result<Self>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let min_chars = config.min_chars;
        // The page starts out showing the unfiltered listing
        let last_emitted = Arc::new(Mutex::new(String::new()));

        let debouncer = Debouncer::from_config(
            move |raw: String| {
                let Some(query) = normalize(&raw, min_chars) else {
                    debug!(len = raw.trim().chars().count(), "Search query below minimum length");
                    return;
                };

                {
                    let mut last = last_emitted.lock();
                    if *last == query {
                        debug!("Search query unchanged, not re-sending");
                        return;
                    }
                    last.clone_from(&query);
                }

                debug!(query = %query, "Emitting search query");
                on_query(query);
            },
            &config.debounce(),
        )?;

        Ok(Self { debouncer })
    }

    /// Create a search box emitting into a channel
    pub fn channel(config: &SearchConfig) -> Result<(Self, mpsc::UnboundedReceiver<String>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let search = Self::new(config, move |query| {
            let _ = tx.send(query);
        })?;
        Ok((search, rx))
    }

    /// Feed the current contents of the input
    pub fn input(&self, value: &str) {
        self.debouncer.trigger(value.to_string());
    }

    /// Submit immediately (e.g. Enter pressed) instead of waiting
    pub fn submit(&self) -> bool {
        self.debouncer.flush()
    }

    /// Drop any query still waiting for the quiet period
    pub fn cancel(&self) -> bool {
        self.debouncer.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

/// Trimmed query, or `None` when it is too short to be worth sending
fn normalize(raw: &str, min_chars: usize) -> Option<String> {
    let query = raw.trim();
    if !query.is_empty() && query.chars().count() < min_chars {
        return None;
    }
    Some(query.to_string())
}
