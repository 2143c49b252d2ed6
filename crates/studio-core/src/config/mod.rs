//! Studio configuration file (`studio.yaml`)

use crate::profile::StudioProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_site_name() -> String {
    "site".to_string()
}

/// Site-wide settings shared by preview, export and the composer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Used for the archive name and page titles
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Export destination
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Context tag for documents that do not declare a page type
    #[serde(default)]
    pub default_page_type: Option<String>,

    /// Also bundle the export into a zip archive
    #[serde(default)]
    pub archive: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            output_dir: default_output_dir(),
            default_page_type: None,
            archive: false,
        }
    }
}

impl StudioConfig {
    /// Config path for a profile: the env override if set, else the default file name
    pub fn path_for<P: StudioProfile>(profile: &P) -> PathBuf {
        std::env::var_os(profile.config_env())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(profile.default_config_file()))
    }

    /// Load the profile's config file. A missing file yields the defaults.
    pub fn load<P: StudioProfile>(profile: &P) -> Result<Self> {
        let path = Self::path_for(profile);
        let explicit = std::env::var_os(profile.config_env()).is_some();
        if !path.exists() {
            if explicit {
                anyhow::bail!(
                    "Config file {} (from {}) not found",
                    path.display(),
                    profile.config_env()
                );
            }
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
