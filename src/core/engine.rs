//! Core engine wiring configuration to the resolver and archiver

use std::sync::Arc;

use crate::archiver::Archiver;
use crate::core::{Config, BundleResult};
use crate::registry::{HttpFetch, RegistryClient, ReqwestFetcher};
use crate::resolver::Resolver;

/// Main engine for depbundle operations
pub struct Engine {
    /// Configuration
    pub config: Config,

    /// HTTP capability shared by registry and archiver
    pub http: Arc<dyn HttpFetch>,

    /// Registry client
    pub registry: Arc<RegistryClient>,
}

impl Engine {
    /// Create an engine from an explicit configuration
    pub fn from_config(config: Config) -> BundleResult<Self> {
        config.validate()?;
        let http: Arc<dyn HttpFetch> = Arc::new(ReqwestFetcher::new(&config.network)?);
        Ok(Self::with_http(config, http))
    }

    /// Create an engine on top of a caller-supplied HTTP capability
    pub fn with_http(config: Config, http: Arc<dyn HttpFetch>) -> Self {
        let registry = Arc::new(RegistryClient::new(http.clone(), config.registry_url()));
        Self {
            config,
            http,
            registry,
        }
    }

    /// Create a dependency resolver
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.registry.clone(), self.config.network.clone())
    }

    /// Create an archiver
    pub fn archiver(&self) -> Archiver {
        Archiver::new(self.http.clone(), self.config.network.clone())
    }
}
