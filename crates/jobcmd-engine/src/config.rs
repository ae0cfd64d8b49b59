use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jobcmd_core::DeployMode;
use serde::{Deserialize, Serialize};

use crate::spark::{SPARK1_COMMAND, SPARK2_COMMAND};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spark: SparkConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    pub spark1_command: String,
    pub spark2_command: String,
    pub master: String,
    pub default_deploy_mode: DeployMode,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            spark1_command: SPARK1_COMMAND.to_string(),
            spark2_command: SPARK2_COMMAND.to_string(),
            master: "yarn".to_string(),
            default_deploy_mode: DeployMode::Cluster,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub db_path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: "~/.jobcmd/catalog.db".to_string(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse jobcmd.toml")?;
        Ok(cfg)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".jobcmd").join("jobcmd.toml")
    }

    pub fn catalog_db_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.catalog.db_path).to_string())
    }
}
