//! Clamp a quantity to the orderable range

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use storefront::QuantityBounds;

pub fn run(value: &str, min: u32, max: u32) -> Result<()> {
    let bounds = QuantityBounds::new(min, max).context("Invalid quantity bounds")?;

    match bounds.clamp_input(value) {
        Some(clamped) => {
            if bounds.correction(value).is_some() {
                println!(
                    "{} {}",
                    clamped,
                    format!("(adjusted from {:?} to fit {}-{})", value, min, max).yellow()
                );
            } else {
                println!("{}", clamped);
            }
        }
        None => {
            println!("{}", format!("Ignored: {:?} is not a whole number", value).dimmed());
        }
    }

    Ok(())
}
