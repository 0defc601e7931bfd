//! Dashboard configuration loading and types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::Screen;

/// Dashboard configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Crop reference table.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Background images.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Page copy.
    #[serde(default)]
    pub text: TextConfig,

    /// Upload and session limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            assets: AssetsConfig::default(),
            text: TextConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults. Environment overrides
    /// (`CROP_DATASET_PATH`, `CROP_ASSET_DIR`) are applied afterwards.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read: {:?}", path))?;
            let config: DashboardConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse dashboard config: {:?}", path))?;
            tracing::info!("Loaded dashboard config from {:?}", path);
            config
        } else {
            tracing::warn!(
                "Dashboard config {:?} does not exist, using defaults",
                path
            );
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dataset) = std::env::var("CROP_DATASET_PATH") {
            self.dataset_path = PathBuf::from(dataset);
        }
        if let Ok(dir) = std::env::var("CROP_ASSET_DIR") {
            self.assets.dir = PathBuf::from(dir);
        }
    }
}

/// Background image file names, resolved against `dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_asset_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_home_page")]
    pub home_page: String,

    #[serde(default = "default_home_sidebar")]
    pub home_sidebar: String,

    #[serde(default = "default_results_page")]
    pub results_page: String,

    #[serde(default = "default_results_sidebar")]
    pub results_sidebar: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_asset_dir(),
            home_page: default_home_page(),
            home_sidebar: default_home_sidebar(),
            results_page: default_results_page(),
            results_sidebar: default_results_sidebar(),
        }
    }
}

impl AssetsConfig {
    /// (page, sidebar) background paths for a screen.
    pub fn backgrounds(&self, screen: Screen) -> (PathBuf, PathBuf) {
        match screen {
            Screen::Home => (
                self.dir.join(&self.home_page),
                self.dir.join(&self.home_sidebar),
            ),
            Screen::Results => (
                self.dir.join(&self.results_page),
                self.dir.join(&self.results_sidebar),
            ),
        }
    }

    /// Every configured asset path.
    pub fn all(&self) -> Vec<PathBuf> {
        let (home_page, home_sidebar) = self.backgrounds(Screen::Home);
        let (results_page, results_sidebar) = self.backgrounds(Screen::Results);
        vec![home_page, home_sidebar, results_page, results_sidebar]
    }
}

/// Page titles and copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_home_title")]
    pub home_title: String,

    #[serde(default = "default_results_title")]
    pub results_title: String,

    #[serde(default = "default_about")]
    pub about: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            home_title: default_home_title(),
            results_title: default_results_title(),
            about: default_about(),
        }
    }
}

/// Upload and session limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Sessions idle for longer than this are dropped.
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            session_ttl_minutes: default_session_ttl_minutes(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/Crop_Details_all.csv")
}
fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets")
}
fn default_home_page() -> String {
    "fields.png".to_string()
}
fn default_home_sidebar() -> String {
    "dark.png".to_string()
}
fn default_results_page() -> String {
    "dark.png".to_string()
}
fn default_results_sidebar() -> String {
    "leaves.png".to_string()
}
fn default_home_title() -> String {
    "AI-powered Smart Agricultural Monitoring System".to_string()
}
fn default_results_title() -> String {
    "Comprehensive Crop Recommendation System".to_string()
}
fn default_about() -> String {
    "This comprehensive crop recommendation system uses both investment and soil type \
     as well as nutrient, temperature, and pH criteria to offer the best crop suggestions \
     for maximizing profitability in farming."
        .to_string()
}
fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}
fn default_session_ttl_minutes() -> i64 {
    60
}
