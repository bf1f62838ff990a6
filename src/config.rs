use crate::model::Confidence;
use crate::scanner::{BlockUsage, DiskUsage, DuCommand, ResidualLocation};
use crate::utils::expand_home;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const APP_DIR: &str = "leftovers";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub clean: CleanConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBackend {
    #[default]
    Native,
    Du,
}

impl SizeBackend {
    pub fn provider(&self) -> Box<dyn DiskUsage> {
        match self {
            SizeBackend::Native => Box::new(BlockUsage),
            SizeBackend::Du => Box::new(DuCommand),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraLocation {
    pub path: String,
    pub category: String,
    #[serde(default = "default_confidence")]
    pub confidence: Confidence,
}

fn default_confidence() -> Confidence {
    Confidence::Medium
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub size_backend: SizeBackend,
    #[serde(default)]
    pub extra_locations: Vec<ExtraLocation>,
}

impl ScanConfig {
    /// Invalid patterns are skipped with a warning.
    pub fn excluded_patterns(&self, home: &Path) -> Vec<glob::Pattern> {
        self.excluded_paths
            .iter()
            .filter_map(|raw| {
                let expanded = expand_home(raw, home);
                match glob::Pattern::new(&expanded.to_string_lossy()) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        warn!(pattern = %raw, error = %e, "ignoring invalid exclusion");
                        None
                    }
                }
            })
            .collect()
    }

    pub fn extra_residual_locations(&self, home: &Path) -> Vec<ResidualLocation> {
        self.extra_locations
            .iter()
            .map(|extra| {
                ResidualLocation::new(
                    expand_home(&extra.path, home),
                    extra.category.clone(),
                    extra.confidence,
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    #[serde(default)]
    pub dry_run_by_default: bool,
    #[serde(default = "default_true")]
    pub log_history: bool,
    #[serde(default = "default_true")]
    pub use_elevation: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            dry_run_by_default: false,
            log_history: true,
            use_elevation: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    pub fn add_excluded_path(&mut self, path: String) -> bool {
        if self.scan.excluded_paths.contains(&path) {
            return false;
        }
        self.scan.excluded_paths.push(path);
        true
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}
