//! `rfn resolve <url>` – print the file name for a remote resource.

use anyhow::Result;
use rfn_core::config::RfnConfig;
use rfn_core::url_model::HeaderParsing;
use rfn_core::{CookieJar, FilenameResolver};

/// Command-line overrides for one resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs {
    pub url: String,
    pub cookies: Vec<(String, String)>,
    pub timeout: Option<u64>,
    pub connect_timeout: Option<u64>,
    pub rfc6266: bool,
}

impl ResolveArgs {
    /// Config with command-line overrides applied.
    pub(crate) fn apply(&self, cfg: &RfnConfig) -> RfnConfig {
        let mut cfg = cfg.clone();
        if self.timeout.is_some() {
            cfg.timeout_secs = self.timeout;
        }
        if self.connect_timeout.is_some() {
            cfg.connect_timeout_secs = self.connect_timeout;
        }
        if self.rfc6266 {
            cfg.header_parsing = HeaderParsing::Rfc6266;
        }
        cfg
    }

    /// Later `--cookie` flags override earlier ones with the same name.
    pub(crate) fn jar(&self) -> Option<CookieJar> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(self.cookies.iter().cloned().collect())
    }
}

pub fn run_resolve(cfg: &RfnConfig, args: ResolveArgs) -> Result<()> {
    let effective = args.apply(cfg);
    let resolver = FilenameResolver::from_config(&effective);
    let name = resolver.resolve(&args.url, args.jar().as_ref())?;
    println!("{name}");
    Ok(())
}
