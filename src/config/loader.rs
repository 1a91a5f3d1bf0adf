use super::{user_config_path, ConfigFile, ConfigOverrides, TallyConfig};
use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs;

/// Builds a [`TallyConfig`] one layer at a time
pub struct ConfigLoader {
    config: TallyConfig,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config: TallyConfig::default(),
        }
    }

    /// Apply the per-user config file if one exists
    pub async fn load_user(&mut self) -> Result<()> {
        if let Some(path) = user_config_path() {
            if path.exists() {
                self.load_file(&path).await?;
            }
        }
        Ok(())
    }

    /// Apply a config file that must exist
    pub async fn load_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file: ConfigFile = toml::from_str(&content)?;
        self.config.apply_file(file);
        Ok(())
    }

    pub fn merge_env_vars(&mut self) {
        self.config.merge_env_vars();
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        self.config.apply_overrides(overrides);
    }

    /// Validate and hand out the resolved configuration
    pub fn finish(self) -> Result<TallyConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Resolve configuration from every layer
pub async fn load_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<TallyConfig> {
    let mut loader = ConfigLoader::new();
    loader.load_user().await?;
    if let Some(path) = config_path {
        loader.load_file(path).await?;
    }
    loader.merge_env_vars();
    loader.apply_overrides(overrides);
    loader.finish()
}
