use crate::error::{ReportError, Result};
use cableway_common::export::assembler::DEFAULT_TITLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const OUTPUT_DIR_ENV: &str = "CABLEWAY_OUTPUT_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
    pub document_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            document_title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReportError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("cableway-report").join("config.json"))
    }

    /// Output directory: explicit flag, then environment, then config, then `.`
    pub fn resolve_output_dir(&self, flag: Option<&Path>) -> PathBuf {
        let env = std::env::var(OUTPUT_DIR_ENV).ok();
        self.resolve_output_dir_with(flag, env.as_deref())
    }

    fn resolve_output_dir_with(&self, flag: Option<&Path>, env: Option<&str>) -> PathBuf {
        if let Some(dir) = flag {
            return dir.to_path_buf();
        }
        if let Some(dir) = env.filter(|dir| !dir.trim().is_empty()) {
            return PathBuf::from(dir);
        }
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.output_dir = Some(dir);
        self.save()
    }
}
