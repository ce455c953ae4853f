//! Registry HTTP client

use std::sync::Arc;

use crate::core::BundleResult;
use crate::registry::http::HttpFetch;
use crate::registry::types::VersionManifest;

/// npm registry client
pub struct RegistryClient {
    /// HTTP capability
    http: Arc<dyn HttpFetch>,
    /// Registry base URL, no trailing slash
    base_url: String,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new(http: Arc<dyn HttpFetch>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the manifest of one exact version (or dist-tag)
    pub async fn get_version_manifest(&self, name: &str, version: &str) -> BundleResult<VersionManifest> {
        let url = self.manifest_url(name, version);
        let body = self.http.get(&url).await?;
        let manifest: VersionManifest = serde_json::from_slice(&body)?;

        if let Some(ref message) = manifest.deprecated {
            tracing::warn!("{}@{} is deprecated: {}", name, manifest.version, message);
        }

        Ok(manifest)
    }

    /// URL of a version manifest
    pub fn manifest_url(&self, name: &str, version: &str) -> String {
        format!("{}/{}/{}", self.base_url, name, version)
    }
}
