// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP document source adapter.
//!
//! This module provides an adapter that retrieves documents with HTTP `GET` requests
//! relative to a base URL, the way the browser build fetches them next to the page.

use crate::domain::{ConfigError, Result};
use crate::ports::{DocumentSource, SourceResponse};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Document source that fetches documents over HTTP.
///
/// Source names are joined onto the base URL, so `visuals.json` against
/// `https://example.com/config/` is fetched from `https://example.com/config/visuals.json`.
/// Whatever status the server answers with is passed through; only connection and
/// protocol failures become errors.
///
/// # Examples
///
/// ```rust,no_run
/// use vib34d_config::adapters::HttpSource;
///
/// let source = HttpSource::new("https://example.com/config/").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    /// Creates a source rooted at `base_url` with a 30 second request timeout.
    ///
    /// A trailing slash is added to the base URL if missing so that relative names
    /// resolve inside it rather than replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Self::transport_error("Failed to build HTTP client", e))?;
        Self::with_client(client, base_url)
    }

    /// Creates a source using an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid base URL {}: {}", base_url, e),
            ))
        })?;
        Ok(Self { client, base_url })
    }

    /// Returns the base URL names are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a source name against the base URL.
    pub fn url_for(&self, name: &str) -> Result<Url> {
        self.base_url.join(name).map_err(|e| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid source name {}: {}", name, e),
            ))
        })
    }

    fn transport_error(context: &str, err: reqwest::Error) -> ConfigError {
        ConfigError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("{}: {}", context, err),
        ))
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, name: &str) -> Result<SourceResponse> {
        let url = self.url_for(name)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::transport_error("Request failed", e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error("Failed to read response body", e))?;

        Ok(SourceResponse {
            status,
            body: body.to_vec(),
        })
    }
}
