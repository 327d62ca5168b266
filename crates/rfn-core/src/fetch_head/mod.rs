//! HTTP header fetching.
//!
//! Uses the curl crate (libcurl) to issue a GET and keep only the response
//! headers: the transfer is stopped as soon as the first body bytes arrive,
//! so large downloads are never pulled just to learn their name.

mod parse;

use std::time::Duration;

use crate::config::RfnConfig;
use crate::error::ResolveError;
use crate::resolver::RequestSpec;

pub(crate) use parse::{decode_header_line, parse_headers};

/// Response headers of the final (post-redirect) response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// HTTP status code, if the server sent a status line.
    pub status: Option<u32>,
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new(status: Option<u32>) -> Self {
        Self {
            status,
            entries: Vec::new(),
        }
    }

    /// Builder-style insert, mostly for tests and custom fetchers.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// Case-insensitive lookup; the first header with `name` wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `Content-Disposition` value if present (filename hint).
    pub fn content_disposition(&self) -> Option<&str> {
        self.get("content-disposition")
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of response headers for a request.
pub trait HeaderFetcher {
    fn fetch_headers(&self, request: &RequestSpec) -> Result<ResponseHeaders, ResolveError>;
}

/// Transfer options for [`CurlFetcher`]. `None` timeouts leave libcurl's defaults in place.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub follow_redirects: bool,
    pub max_redirects: u32,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            timeout: None,
            follow_redirects: true,
            max_redirects: 10,
            user_agent: None,
        }
    }
}

impl From<&RfnConfig> for FetchOptions {
    fn from(cfg: &RfnConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            follow_redirects: cfg.follow_redirects,
            max_redirects: cfg.max_redirects,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// libcurl-backed [`HeaderFetcher`].
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }
}

impl HeaderFetcher for CurlFetcher {
    /// Performs a GET and returns the headers of the final response.
    ///
    /// Non-2xx statuses are returned like any other response. The easy handle is
    /// owned by this call, so the connection is released on every return path.
    /// Runs in the current thread; call from `spawn_blocking` if used from async code.
    fn fetch_headers(&self, request: &RequestSpec) -> Result<ResponseHeaders, ResolveError> {
        let url = request.url.as_str();
        let curl_err = |e: curl::Error| ResolveError::from_curl(url, e);

        let mut lines: Vec<String> = Vec::new();
        let mut body_reached = false;

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.follow_location(self.options.follow_redirects)
            .map_err(curl_err)?;
        easy.max_redirections(self.options.max_redirects)
            .map_err(curl_err)?;
        if let Some(d) = self.options.connect_timeout {
            easy.connect_timeout(d).map_err(curl_err)?;
        }
        if let Some(d) = self.options.timeout {
            easy.timeout(d).map_err(curl_err)?;
        }
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua).map_err(curl_err)?;
        }
        if let Some(cookie) = request.cookie_header() {
            easy.cookie(&cookie).map_err(curl_err)?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    let decoded = decode_header_line(data);
                    let line = decoded.trim_end();
                    // Each redirect hop starts a new header block.
                    if line.starts_with("HTTP/") {
                        lines.clear();
                    }
                    lines.push(line.to_string());
                    true
                })
                .map_err(curl_err)?;
            transfer
                .write_function(|_| {
                    body_reached = true;
                    Ok(0) // headers are complete; abort before reading the body
                })
                .map_err(curl_err)?;
            transfer.perform()
        };

        match performed {
            Ok(()) => {}
            Err(e) if e.is_write_error() && body_reached => {}
            Err(e) => return Err(curl_err(e)),
        }

        let code = easy.response_code().map_err(curl_err)?;
        let status = (code != 0).then_some(code);
        let headers = parse_headers(&lines, status);
        tracing::debug!(url, ?status, headers = headers.len(), "fetched response headers");

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_options_from_config() {
        let cfg = RfnConfig {
            connect_timeout_secs: Some(3),
            timeout_secs: Some(1),
            follow_redirects: false,
            max_redirects: 2,
            user_agent: Some("rfn-test".to_string()),
            ..RfnConfig::default()
        };
        let opts = FetchOptions::from(&cfg);
        assert_eq!(opts.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(opts.timeout, Some(Duration::from_secs(1)));
        assert!(!opts.follow_redirects);
        assert_eq!(opts.max_redirects, 2);
        assert_eq!(opts.user_agent.as_deref(), Some("rfn-test"));
    }

    #[test]
    fn default_config_sets_no_timeouts() {
        let opts = FetchOptions::from(&RfnConfig::default());
        assert!(opts.connect_timeout.is_none());
        assert!(opts.timeout.is_none());
        assert!(opts.follow_redirects);
    }
}
