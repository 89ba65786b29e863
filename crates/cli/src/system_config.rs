//! Config file location and persistence
//!
//! The config file is looked up in order:
//! 1. `--config <path>` flag
//! 2. `$LHUB_CONFIG`
//! 3. `<config dir>/livestockhub/config.toml`
//!
//! A missing file means "all defaults".

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use storefront::config::example_config;
use storefront::StorefrontConfig;

pub const CONFIG_ENV: &str = "LHUB_CONFIG";

/// Resolve the config file path
pub fn config_file_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let dir = dirs::config_dir().context("Could not determine user config directory")?;
    Ok(dir.join("livestockhub").join("config.toml"))
}

/// Load configuration, falling back to defaults when the file is absent
pub fn load(path: &Path) -> Result<StorefrontConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(StorefrontConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    StorefrontConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Validate and write configuration
pub fn save(path: &Path, config: &StorefrontConfig) -> Result<()> {
    config.validate().context("Refusing to save invalid configuration")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let text = config.to_toml_string()?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))
}

/// Write the annotated example config if no file exists yet
///
/// Returns true if a file was created.
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(path, example_config())
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(true)
}

/// Look up a dotted key such as `search.debounce_ms`
pub fn get_value(config: &StorefrontConfig, key: &str) -> Result<toml::Value> {
    let root = toml::Value::try_from(config).context("Failed to serialize configuration")?;
    let (section, field) = split_key(key)?;

    root.get(section)
        .and_then(|s| s.get(field))
        .cloned()
        .with_context(|| format!("Unknown config key: {}. Use 'lhub config list' to see available keys.", key))
}

/// Set a dotted key from its string form, keeping the field's type
pub fn set_value(config: &StorefrontConfig, key: &str, raw: &str) -> Result<StorefrontConfig> {
    let current = get_value(config, key)?;
    let value = match current {
        toml::Value::Integer(_) => toml::Value::Integer(
            raw.trim()
                .parse()
                .context("Invalid value: must be an integer")?,
        ),
        toml::Value::Boolean(_) => toml::Value::Boolean(
            raw.trim()
                .parse()
                .context("Invalid value: must be 'true' or 'false'")?,
        ),
        _ => toml::Value::String(raw.to_string()),
    };

    let mut root = toml::Value::try_from(config).context("Failed to serialize configuration")?;
    let (section, field) = split_key(key)?;
    if let Some(table) = root.get_mut(section).and_then(|s| s.as_table_mut()) {
        table.insert(field.to_string(), value);
    }

    let updated: StorefrontConfig = root.try_into().context("Invalid configuration value")?;
    updated.validate().context("Invalid configuration value")?;
    Ok(updated)
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    key.split_once('.')
        .with_context(|| format!("Config keys look like 'section.field', got '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested/dir/config.toml");

        let mut config = StorefrontConfig::default();
        config.search.min_chars = 4;
        save(&path, &config)?;

        assert_eq!(load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_init_if_missing_only_once() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");

        assert!(init_if_missing(&path)?);
        assert!(!init_if_missing(&path)?);
        assert_eq!(load(&path)?, StorefrontConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_file_reports_path() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[notifications]\nmax_visible = 0\n")?;

        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
        Ok(())
    }

    #[test]
    fn test_flag_wins() {
        let path = config_file_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_get_and_set_values() -> Result<()> {
        let config = StorefrontConfig::default();
        assert_eq!(get_value(&config, "search.debounce_ms")?, toml::Value::Integer(300));
        assert_eq!(
            get_value(&config, "price.currency")?,
            toml::Value::String("RWF".to_string())
        );

        let updated = set_value(&config, "search.debounce_ms", "150")?;
        assert_eq!(updated.search.debounce_ms, 150);

        let updated = set_value(&updated, "price.currency", "KES")?;
        assert_eq!(updated.price.currency, "KES");
        assert_eq!(updated.search.debounce_ms, 150);
        Ok(())
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let config = StorefrontConfig::default();
        assert!(set_value(&config, "search.debounce_ms", "soon").is_err());
        assert!(set_value(&config, "search.debounce_ms", "-5").is_err());
        assert!(set_value(&config, "search.nope", "1").is_err());
        assert!(set_value(&config, "debounce_ms", "1").is_err());
    }
}
