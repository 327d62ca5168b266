//! CLI command handlers, one per file.

mod config;
mod resolve;

pub use config::run_config;
pub use resolve::{run_resolve, ResolveArgs};
