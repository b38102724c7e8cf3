use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Region key -> gzip GeoJSON boundary files
    #[serde(default)]
    pub geojsons: BTreeMap<String, Vec<PathBuf>>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// `(key, files)` pairs in key order
    pub fn provider_entries(&self) -> impl Iterator<Item = (String, Vec<PathBuf>)> + '_ {
        self.geojsons
            .iter()
            .map(|(key, files)| (key.clone(), files.clone()))
    }
}
