//! HTTP capability used for manifest and tarball fetches
//!
//! Resolution and archiving only ever need "GET this URL and give me the
//! body", so that is all this trait exposes. Tests swap in an in-memory
//! implementation.

use async_trait::async_trait;

use crate::core::config::NetworkConfig;
use crate::core::{BundleError, BundleResult};

/// Performs HTTP GET requests
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Fetch `url` and return the response body. Non-2xx statuses are errors.
    async fn get(&self, url: &str) -> BundleResult<Vec<u8>>;
}

/// reqwest-backed fetcher
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a new fetcher. No request deadline is set unless one is configured.
    pub fn new(network: &NetworkConfig) -> BundleResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json, application/octet-stream;q=0.9, */*;q=0.8"),
        );
        let user_agent = format!("depbundle/{}", env!("CARGO_PKG_VERSION"));
        headers.insert(
            reqwest::header::USER_AGENT,
            user_agent
                .parse()
                .map_err(|_| BundleError::config("invalid user agent"))?,
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .brotli(true);

        if let Some(timeout) = network.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| BundleError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> BundleResult<Vec<u8>> {
        tracing::debug!("GET {}", url);

        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| BundleError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BundleError::network(format!("HTTP {} from {}", response.status(), url)));
        }

        let bytes = response.bytes().await
            .map_err(|e| BundleError::network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
