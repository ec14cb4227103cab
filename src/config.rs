use crate::error::AosError;
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_FILE: &str = "aos.toml";
pub const DEFAULT_DATASET_PATH: &str = "public/data/dataset.json";
pub const DEFAULT_CURATED_PATH: &str = "src/content/curated.ts";
pub const DATASET_ENV: &str = "AOS_DATASET";
pub const CURATED_ENV: &str = "AOS_CURATED";

/// Where the dataset document and the curated homepage source live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AosConfig {
    pub dataset_path: PathBuf,
    pub curated_path: PathBuf,
}

impl Default for AosConfig {
    fn default() -> Self {
        AosConfig {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            curated_path: PathBuf::from(DEFAULT_CURATED_PATH),
        }
    }
}

impl AosConfig {
    /// Apply `AOS_DATASET` / `AOS_CURATED` on top of the file values.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Self {
        if let Some(path) = lookup(DATASET_ENV).filter(|p| !p.trim().is_empty()) {
            tracing::debug!("{DATASET_ENV} overrides dataset path with {path:?}");
            self.dataset_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(CURATED_ENV).filter(|p| !p.trim().is_empty()) {
            tracing::debug!("{CURATED_ENV} overrides curated path with {path:?}");
            self.curated_path = PathBuf::from(path);
        }
        self
    }
}

pub trait ConfigProvider {
    fn get_config(&self) -> Result<AosConfig, AosError>;
    fn set_config(&self, config: &AosConfig) -> Result<(), AosError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl Default for TomlConfigProvider {
    fn default() -> Self {
        TomlConfigProvider::new(PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn get_config(&self) -> Result<AosConfig, AosError> {
        tracing::debug!("Attempting to read config from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, using defaults.");
            return Ok(AosConfig::default());
        }
        let content = read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn set_config(&self, config: &AosConfig) -> Result<(), AosError> {
        tracing::debug!("Attempting to write config to: {:?}", &self.path);
        let toml_string = toml::to_string(config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}

/// Read the config at `path` (or `aos.toml`) and apply environment overrides.
pub fn load_config(path: Option<PathBuf>) -> Result<AosConfig, AosError> {
    let provider = path.map(TomlConfigProvider::new).unwrap_or_default();
    Ok(provider.get_config()?.with_env())
}
