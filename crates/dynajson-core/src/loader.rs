//! Fetching raw document bytes from a URL or the filesystem.
//!
//! Locators starting with `http://` or `https://` are fetched with a blocking
//! GET (requires the default `http` feature); everything else is read as a
//! filesystem path. There are no retries. The HTTP response is owned by the
//! fetch call and released before it returns, on success and failure alike.

use crate::element::Element;
use crate::error::{DynaError, Result};
use std::time::Duration;

/// Load options.
///
/// ```no_run
/// use std::time::Duration;
/// use dynajson_core::Loader;
///
/// let root = Loader::new()
///     .timeout(Duration::from_secs(5))
///     .load("https://petstore.swagger.io/v2/swagger.json")?;
/// assert_eq!(root.select(["swagger"]).as_str(), "2.0");
/// # Ok::<(), dynajson_core::DynaError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Loader {
    timeout: Option<Duration>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time allowed for an HTTP request. Without it the HTTP client's
    /// own default applies. Filesystem reads are unaffected.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fetch the locator and parse it into a root element.
    ///
    /// # Errors
    ///
    /// I/O failures as in [`Loader::load_bytes`], then [`DynaError::Parse`]
    /// for malformed JSON.
    pub fn load(&self, locator: &str) -> Result<Element> {
        let bytes = self.load_bytes(locator)?;
        Element::parse(&bytes)
    }

    /// Fetch the raw bytes behind a locator.
    ///
    /// # Errors
    ///
    /// - [`DynaError::Io`] if a filesystem path cannot be read
    /// - [`DynaError::Http`] if a URL answers with a non-2xx status
    /// - [`DynaError::Transport`] if the request or body read fails
    pub fn load_bytes(&self, locator: &str) -> Result<Vec<u8>> {
        if is_url(locator) {
            tracing::debug!(url = locator, "fetching document");
            self.fetch(locator)
        } else {
            tracing::debug!(path = locator, "reading document");
            std::fs::read(locator).map_err(|e| DynaError::io(locator, e))
        }
    }

    #[cfg(feature = "http")]
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let transport = |e: reqwest::Error| DynaError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport)?;
        let response = client.get(url).send().map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "non-success status");
            return Err(DynaError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().map_err(transport)?;
        Ok(body.to_vec())
    }

    #[cfg(not(feature = "http"))]
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Err(DynaError::Transport {
            url: url.to_string(),
            message: "built without the `http` feature".to_string(),
        })
    }
}

fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}
