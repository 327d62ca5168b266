use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::url_model::{HeaderParsing, MAX_NAME_LEN};

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_max_name_len() -> usize {
    MAX_NAME_LEN
}

/// Global configuration loaded from `~/.config/rfn/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfnConfig {
    /// Connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None = no limit).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Follow HTTP redirects and use the final response's headers.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    /// Redirect hop limit when `follow_redirects` is set.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Optional User-Agent header.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Content-Disposition parsing: "legacy" (default) or "rfc6266".
    #[serde(default)]
    pub header_parsing: HeaderParsing,
    /// Maximum filename length in characters; clamped to 1..=255.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

impl Default for RfnConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            timeout_secs: None,
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            user_agent: None,
            header_parsing: HeaderParsing::default(),
            max_name_len: default_max_name_len(),
        }
    }
}

impl RfnConfig {
    /// `max_name_len` clamped into the range the resolver can honour.
    pub fn effective_max_name_len(&self) -> usize {
        self.max_name_len.clamp(1, MAX_NAME_LEN)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rfn")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RfnConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RfnConfig::default();
        write_default(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<RfnConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: RfnConfig = toml::from_str(&data)
        .with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &RfnConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
    Ok(())
}
