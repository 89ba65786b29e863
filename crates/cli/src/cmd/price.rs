//! Show the label for a price filter

use anyhow::Result;
use cli_lib::system_config;
use std::path::Path;
use storefront::{PlainFormatter, PriceRange};

pub fn run(flag: Option<&Path>, min: Option<&str>, max: Option<&str>) -> Result<()> {
    let config_path = system_config::config_file_path(flag)?;
    let config = system_config::load(&config_path)?;

    let range = PriceRange::from_inputs(min, max);
    let formatter = PlainFormatter::new(config.price.currency);
    println!("{}", range.label(&formatter));

    Ok(())
}
