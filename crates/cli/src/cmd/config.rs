//! Configuration management command
//!
//! Provides CLI interface to view and edit storefront configuration.

use anyhow::{Context, Result};
use cli_lib::system_config;
use owo_colors::OwoColorize;
use std::path::Path;
use storefront::config::{
    example_config, AUTO_DISMISS_MS_RANGE, DEBOUNCE_MS_RANGE, MAX_CURRENCY_LEN, MAX_VISIBLE_RANGE,
    MIN_CHARS_RANGE,
};

/// List all configuration values
pub fn run_list(flag: Option<&Path>) -> Result<()> {
    let config_path = system_config::config_file_path(flag)?;
    let config = system_config::load(&config_path)?;

    println!("{}", "Storefront Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[search]".yellow());
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.search.debounce_ms,
        format!("({}ms quiet period)", config.search.debounce_ms).dimmed()
    );
    println!("  {} = {}", "min_chars".cyan(), config.search.min_chars);

    println!("\n{}", "[notifications]".yellow());
    println!(
        "  {} = {} {}",
        "auto_dismiss_ms".cyan(),
        config.notifications.auto_dismiss_ms,
        format!("({:.1}s)", config.notifications.auto_dismiss_ms as f64 / 1000.0).dimmed()
    );
    println!("  {} = {}", "max_visible".cyan(), config.notifications.max_visible);

    println!("\n{}", "[price]".yellow());
    println!("  {} = {:?}", "currency".cyan(), config.price.currency);

    println!("\n{}", "Valid Ranges:".bold());
    println!(
        "  search.debounce_ms: {}-{}",
        DEBOUNCE_MS_RANGE.start(),
        DEBOUNCE_MS_RANGE.end()
    );
    println!(
        "  search.min_chars: {}-{}",
        MIN_CHARS_RANGE.start(),
        MIN_CHARS_RANGE.end()
    );
    println!(
        "  notifications.auto_dismiss_ms: {}-{}",
        AUTO_DISMISS_MS_RANGE.start(),
        AUTO_DISMISS_MS_RANGE.end()
    );
    println!(
        "  notifications.max_visible: {}-{}",
        MAX_VISIBLE_RANGE.start(),
        MAX_VISIBLE_RANGE.end()
    );
    println!("  price.currency: 1-{} characters", MAX_CURRENCY_LEN);

    Ok(())
}

/// Get a single configuration value
pub fn run_get(flag: Option<&Path>, key: &str) -> Result<()> {
    let config_path = system_config::config_file_path(flag)?;
    let config = system_config::load(&config_path)?;

    match system_config::get_value(&config, key)? {
        toml::Value::String(s) => println!("{}", s),
        other => println!("{}", other),
    }
    Ok(())
}

/// Set a configuration value
pub fn run_set(flag: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let config_path = system_config::config_file_path(flag)?;
    let config = system_config::load(&config_path)?;

    let updated = system_config::set_value(&config, key, value)?;
    system_config::save(&config_path, &updated)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub fn run_path(flag: Option<&Path>, create: bool) -> Result<()> {
    let config_path = system_config::config_file_path(flag)
        .context("Could not determine config file path")?;

    if create && system_config::init_if_missing(&config_path)? {
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else {
        println!("{}", config_path.display());
        if !config_path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".yellow());
        }
    }

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    print!("{}", example_config());
    Ok(())
}
