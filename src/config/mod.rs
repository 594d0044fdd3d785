mod types;

pub use types::*;

use anyhow::{Context, Result};
use coursereel_catalog::CsvSource;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./coursereel.toml",
        "~/.config/coursereel/config.toml",
        "/etc/coursereel/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.catalog.storage_base_url.trim().is_empty() {
        anyhow::bail!("Catalog storage_base_url cannot be empty");
    }

    if !(1..=99).contains(&config.catalog.module_count) {
        anyhow::bail!(
            "Catalog module_count must be between 1 and 99, got {}",
            config.catalog.module_count
        );
    }

    // A missing data file only degrades to an empty catalog at runtime
    if !config.catalog.data_file.exists() {
        tracing::warn!(
            "Catalog data file does not exist: {:?}",
            config.catalog.data_file
        );
    }

    Ok(())
}

impl CatalogConfig {
    /// Build the dataset source described by this config.
    pub fn source(&self) -> CsvSource {
        if self.cache {
            CsvSource::cached(&self.data_file)
        } else {
            CsvSource::new(&self.data_file)
        }
    }
}
