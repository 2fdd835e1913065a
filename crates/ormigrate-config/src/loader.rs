use std::path::Path;

use ormigrate_common::{Error, Result};
use tracing::info;

use crate::model::MigrationsConfig;

/// On-disk config formats, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yml" | "yaml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(Error::Config(format!(
                "unsupported config extension: {other}"
            ))),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a `MigrationsConfig` from a TOML or YAML file.
    pub fn from_file(path: &Path) -> Result<MigrationsConfig> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read error for {}: {e}", path.display())))?;

        let config = Self::parse(&contents, format)?;
        info!("loaded migrations config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str, format: ConfigFormat) -> Result<MigrationsConfig> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)
                .map_err(|e| Error::Config(format!("YAML parse error: {e}"))),
            ConfigFormat::Toml => toml::from_str(contents)
                .map_err(|e| Error::Config(format!("TOML parse error: {e}"))),
        }
    }
}
