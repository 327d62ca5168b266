//! Filename resolution for remote resources.
//!
//! [`FilenameResolver`] fetches a URL's response headers and picks a local file
//! name: the Content-Disposition filename, else the URL path's last segment, else
//! a random identifier. The HTTP client, the log sink and the identifier source
//! are injected so the resolver itself has no global dependencies.

use std::collections::BTreeMap;

use crate::config::RfnConfig;
use crate::error::ResolveError;
use crate::fetch_head::{CurlFetcher, FetchOptions, HeaderFetcher};
use crate::url_model::{basename_from_url, finalize_candidate, HeaderParsing, MAX_NAME_LEN};

/// Cookie name → value pairs sent with the request.
pub type CookieJar = BTreeMap<String, String>;

/// What to fetch: the URL and the cookies to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: String,
    pub cookies: CookieJar,
}

impl RequestSpec {
    pub fn new(url: &str, cookies: Option<&CookieJar>) -> Self {
        Self {
            url: url.to_string(),
            cookies: cookies.cloned().unwrap_or_default(),
        }
    }

    /// `Cookie` header value (`a=1; b=2`), or `None` when the jar is empty.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k.trim(), v.trim()))
            .collect();
        Some(pairs.join("; "))
    }
}

/// Receives the resolver's informational messages.
pub trait LogSink {
    fn record(&self, message: &str);
}

/// Forwards messages to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Supplies unique names for the last-resort fallback.
pub trait IdSource {
    fn generate(&self) -> String;
}

/// Random (version 4) UUIDs, hyphenated.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4;

impl IdSource for UuidV4 {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Resolves local file names for URLs.
#[derive(Debug, Clone)]
pub struct FilenameResolver<F, L = TracingSink, I = UuidV4> {
    fetcher: F,
    log: L,
    ids: I,
    header_parsing: HeaderParsing,
    max_name_len: usize,
}

impl FilenameResolver<CurlFetcher> {
    /// libcurl fetcher, tracing sink and UUID fallback, configured from `cfg`.
    pub fn from_config(cfg: &RfnConfig) -> Self {
        FilenameResolver::new(CurlFetcher::new(FetchOptions::from(cfg)), TracingSink, UuidV4)
            .with_header_parsing(cfg.header_parsing)
            .with_max_name_len(cfg.effective_max_name_len())
    }
}

impl<F, L, I> FilenameResolver<F, L, I>
where
    F: HeaderFetcher,
    L: LogSink,
    I: IdSource,
{
    pub fn new(fetcher: F, log: L, ids: I) -> Self {
        Self {
            fetcher,
            log,
            ids,
            header_parsing: HeaderParsing::default(),
            max_name_len: MAX_NAME_LEN,
        }
    }

    pub fn with_header_parsing(mut self, header_parsing: HeaderParsing) -> Self {
        self.header_parsing = header_parsing;
        self
    }

    /// Values outside 1..=255 are clamped.
    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len.clamp(1, MAX_NAME_LEN);
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolves the file name for `url`, sending `cookies` with the request.
    ///
    /// The result is never empty and never longer than the configured limit. Only
    /// the network call can fail.
    pub fn resolve(&self, url: &str, cookies: Option<&CookieJar>) -> Result<String, ResolveError> {
        let request = RequestSpec::new(url, cookies);
        let headers = self.fetcher.fetch_headers(&request)?;

        let from_header = headers
            .content_disposition()
            .and_then(|cd| self.header_parsing.filename_from_header(cd));
        let candidate = match from_header {
            Some(name) => name,
            None => {
                self.log.record("Parsing file name directly from URL");
                basename_from_url(url)
            }
        };

        let file_name = finalize_candidate(&candidate, self.max_name_len)
            .unwrap_or_else(|| self.ids.generate());

        self.log.record(&format!("Retrieved file name: {}", file_name));
        Ok(file_name)
    }
}

/// Resolves with the default libcurl fetcher and settings.
pub fn resolve_filename(url: &str, cookies: Option<&CookieJar>) -> Result<String, ResolveError> {
    FilenameResolver::from_config(&RfnConfig::default()).resolve(url, cookies)
}
