//! `rfn config` – show where the config lives and what is in effect.

use anyhow::Result;
use rfn_core::config::{self, RfnConfig};

pub fn run_config(cfg: &RfnConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
