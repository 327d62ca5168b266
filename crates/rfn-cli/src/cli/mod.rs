//! CLI for RFN, the remote file name resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rfn_core::config;

use commands::{run_config, run_resolve, ResolveArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rfn")]
#[command(about = "RFN: pick a local file name for a remote HTTP(S) resource", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URL's headers and print the file name to save it under.
    Resolve {
        /// HTTP/HTTPS URL to inspect.
        url: String,

        /// Cookie to send with the request; repeatable.
        #[arg(long = "cookie", value_name = "NAME=VALUE", value_parser = parse_cookie)]
        cookies: Vec<(String, String)>,

        /// Whole-request timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Connect timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        connect_timeout: Option<u64>,

        /// Parse Content-Disposition per RFC 6266 (filename*, quoting) and fall back
        /// to the URL when it names no file.
        #[arg(long)]
        rfc6266: bool,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

/// Parses `NAME=VALUE`; the value may be empty and may itself contain `=`.
fn parse_cookie(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("cookie name must not be empty".to_string());
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                url,
                cookies,
                timeout,
                connect_timeout,
                rfc6266,
            } => {
                let args = ResolveArgs {
                    url,
                    cookies,
                    timeout,
                    connect_timeout,
                    rfc6266,
                };
                run_resolve(&cfg, args)?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
