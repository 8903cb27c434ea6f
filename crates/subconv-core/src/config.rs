use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::compose::{Composer, DEFAULT_BASE_URL};
use crate::template::TemplateId;

/// Global configuration loaded from `~/.config/subconv/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubconvConfig {
    /// Conversion service prefix; the encoded subscription URL is appended to it.
    pub conversion_base_url: String,
    /// Pause between batch items, in milliseconds.
    pub batch_delay_ms: u64,
    /// Template used when neither the command line nor the saved selection names one.
    #[serde(default)]
    pub default_template: Option<TemplateId>,
    /// Override for the history/settings store directory (default `~/.local/share/subconv`).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for SubconvConfig {
    fn default() -> Self {
        Self {
            conversion_base_url: DEFAULT_BASE_URL.to_string(),
            batch_delay_ms: 100,
            default_template: None,
            data_dir: None,
        }
    }
}

impl SubconvConfig {
    pub fn composer(&self) -> Composer {
        Composer::new(self.conversion_base_url.clone())
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("subconv")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SubconvConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SubconvConfig> {
    if !path.exists() {
        let default_cfg = SubconvConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: SubconvConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
