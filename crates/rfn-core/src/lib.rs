pub mod config;
pub mod logging;

pub mod error;
pub mod fetch_head;
pub mod resolver;
pub mod url_model;

pub use error::ResolveError;
pub use resolver::{resolve_filename, CookieJar, FilenameResolver};
