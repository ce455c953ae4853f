//! Direct-dependency resolver
//!
//! Fetches the requested package's manifest, seeds the main entry, then
//! resolves each declared runtime dependency independently. A dependency
//! whose manifest cannot be fetched is logged and left out; only a failure
//! on the main package fails the resolution.

pub mod version;

use std::sync::Arc;
use futures::stream::{self, StreamExt};

use crate::core::config::NetworkConfig;
use crate::core::session::{ResolvedPackage, Session, LATEST_TAG};
use crate::core::{BundleError, BundleResult};
use crate::registry::RegistryClient;

pub use version::strip_range_qualifiers;

/// Dependency resolver
pub struct Resolver {
    registry: Arc<RegistryClient>,
    network: NetworkConfig,
}

impl Resolver {
    /// Create a new resolver
    pub fn new(registry: Arc<RegistryClient>, network: NetworkConfig) -> Self {
        Self { registry, network }
    }

    /// Resolve `name@version` and its direct runtime dependencies into `session`
    pub async fn resolve(&self, session: &Session, name: &str, version: Option<&str>) -> BundleResult<()> {
        let version = version.filter(|v| !v.is_empty()).unwrap_or(LATEST_TAG);
        let _loading = session.begin_resolution(name, version);

        tracing::info!("Resolving {}@{}", name, version);

        let manifest = match self.registry.get_version_manifest(name, version).await {
            Ok(manifest) => manifest,
            Err(e) => {
                let err = BundleError::RegistryFetchFailed {
                    package: name.to_string(),
                    version: version.to_string(),
                    reason: e.to_string(),
                };
                tracing::error!("{}", err);
                session.set_error(err.to_string());
                return Err(err);
            }
        };

        if !manifest.dev_dependencies.is_empty() {
            tracing::debug!(
                "Skipping {} dev dependencies of {}",
                manifest.dev_dependencies.len(),
                name
            );
        }

        session.push_package(ResolvedPackage {
            name: name.to_string(),
            version: manifest.version.clone(),
            tarball_url: manifest.dist.tarball.clone(),
            is_main_package: true,
        });

        let total = manifest.dependencies.len();
        let limit = self.network.fan_out_limit(total);

        let resolved: usize = stream::iter(manifest.dependencies.iter())
            .map(|(dep_name, range)| self.resolve_dependency(session, dep_name, range))
            .buffer_unordered(limit)
            .filter(|ok| futures::future::ready(*ok))
            .count()
            .await;

        tracing::info!(
            "Resolved {}@{} with {}/{} dependencies",
            name,
            manifest.version,
            resolved,
            total
        );

        Ok(())
    }

    /// Resolve one dependency; failures are logged and reported as `false`
    async fn resolve_dependency(&self, session: &Session, name: &str, range: &str) -> bool {
        let literal = strip_range_qualifiers(range);
        if !version::is_exact_version(&literal) {
            tracing::debug!("{}: '{}' is not an exact version, fetching as-is", name, literal);
        }

        match self.registry.get_version_manifest(name, &literal).await {
            Ok(manifest) => {
                session.push_package(ResolvedPackage {
                    name: name.to_string(),
                    version: manifest.version,
                    tarball_url: manifest.dist.tarball,
                    is_main_package: false,
                });
                true
            }
            Err(e) => {
                let err = BundleError::DependencyFetchFailed {
                    package: name.to_string(),
                    version: literal,
                    reason: e.to_string(),
                };
                tracing::warn!("{}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::http::testing::MockFetcher;

    const REGISTRY: &str = "https://registry.npmjs.org";

    fn manifest(name: &str, version: &str, deps: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "version": version,
            "dist": { "tarball": format!("{0}/{1}/-/{1}-{2}.tgz", REGISTRY, name, version) },
            "dependencies": deps,
            "devDependencies": { "mocha": "^10.0.0" }
        })
    }

    fn resolver(mock: MockFetcher) -> (Resolver, Arc<MockFetcher>) {
        let mock = Arc::new(mock);
        let registry = Arc::new(RegistryClient::new(mock.clone(), REGISTRY));
        (Resolver::new(registry, NetworkConfig::default()), mock)
    }

    #[tokio::test]
    async fn test_resolve_without_dependencies() {
        let (resolver, _) = resolver(MockFetcher::new().with_json(
            "https://registry.npmjs.org/left-pad/1.3.0",
            manifest("left-pad", "1.3.0", serde_json::json!({})),
        ));
        let session = Session::new();

        resolver.resolve(&session, "left-pad", Some("1.3.0")).await.unwrap();

        let state = session.snapshot();
        assert_eq!(
            state.dependencies,
            vec![ResolvedPackage {
                name: "left-pad".to_string(),
                version: "1.3.0".to_string(),
                tarball_url: "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz".to_string(),
                is_main_package: true,
            }]
        );
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_resolve_latest_strips_caret() {
        let (resolver, _) = resolver(
            MockFetcher::new()
                .with_json(
                    "https://registry.npmjs.org/foo/latest",
                    manifest("foo", "3.0.0", serde_json::json!({ "bar": "^2.1.0" })),
                )
                .with_json(
                    "https://registry.npmjs.org/bar/2.1.0",
                    manifest("bar", "2.1.0", serde_json::json!({})),
                ),
        );
        let session = Session::new();

        resolver.resolve(&session, "foo", None).await.unwrap();

        let state = session.snapshot();
        assert_eq!(state.package_version, "latest");
        assert_eq!(state.dependencies.len(), 2);
        let bar = state.dependencies.iter().find(|p| p.name == "bar").unwrap();
        assert_eq!(bar.version, "2.1.0");
        assert!(!bar.is_main_package);
    }

    #[tokio::test]
    async fn test_missing_dependency_is_dropped() {
        let (resolver, _) = resolver(MockFetcher::new().with_json(
            "https://registry.npmjs.org/foo/latest",
            manifest("foo", "3.0.0", serde_json::json!({ "bar": "^2.1.0" })),
        ));
        let session = Session::new();

        resolver.resolve(&session, "foo", None).await.unwrap();

        let state = session.snapshot();
        assert_eq!(state.dependencies.len(), 1);
        assert!(state.dependencies[0].is_main_package);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_partial_dependency_failures() {
        let mut mock = MockFetcher::new().with_json(
            "https://registry.npmjs.org/app/1.0.0",
            manifest(
                "app",
                "1.0.0",
                serde_json::json!({ "a": "1.0.0", "b": "~1.0.0", "c": "^1.0.0", "d": "1.0.0", "e": "1.0.0" }),
            ),
        );
        for ok in ["a", "c", "e"] {
            mock = mock.with_json(
                &format!("https://registry.npmjs.org/{}/1.0.0", ok),
                manifest(ok, "1.0.0", serde_json::json!({})),
            );
        }
        mock = mock.with_failure("https://registry.npmjs.org/b/1.0.0", "connection reset");
        let (resolver, mock) = resolver(mock);
        let session = Session::new();

        resolver.resolve(&session, "app", Some("1.0.0")).await.unwrap();

        let state = session.snapshot();
        assert_eq!(state.dependencies.len(), 4);
        assert_eq!(state.dependencies.iter().filter(|p| p.is_main_package).count(), 1);
        assert_eq!(state.main_package().unwrap().name, "app");
        assert_eq!(state.error, None);
        assert_eq!(mock.calls(), 6);
    }

    #[tokio::test]
    async fn test_dev_dependencies_excluded() {
        let (resolver, mock) = resolver(MockFetcher::new().with_json(
            "https://registry.npmjs.org/lib/latest",
            manifest("lib", "0.1.0", serde_json::json!({})),
        ));
        let session = Session::new();

        resolver.resolve(&session, "lib", None).await.unwrap();

        assert_eq!(session.packages().len(), 1);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_main_fetch_failure_sets_error() {
        let (resolver, _) = resolver(MockFetcher::new());
        let session = Session::new();

        let err = resolver.resolve(&session, "missing", Some("1.0.0")).await.unwrap_err();

        assert!(matches!(err, BundleError::RegistryFetchFailed { .. }));
        let state = session.snapshot();
        assert!(state.dependencies.is_empty());
        assert!(!state.loading);
        assert!(state.error.unwrap().contains("missing@1.0.0"));
    }

    #[tokio::test]
    async fn test_bounded_concurrency_same_result() {
        let mock = Arc::new(
            MockFetcher::new()
                .with_json(
                    "https://registry.npmjs.org/foo/latest",
                    manifest("foo", "3.0.0", serde_json::json!({ "bar": "^2.1.0", "baz": "1.0.0" })),
                )
                .with_json(
                    "https://registry.npmjs.org/bar/2.1.0",
                    manifest("bar", "2.1.0", serde_json::json!({})),
                )
                .with_json(
                    "https://registry.npmjs.org/baz/1.0.0",
                    manifest("baz", "1.0.0", serde_json::json!({})),
                ),
        );
        let registry = Arc::new(RegistryClient::new(mock, REGISTRY));
        let resolver = Resolver::new(registry, NetworkConfig { timeout: 0, concurrency: 1 });
        let session = Session::new();

        resolver.resolve(&session, "foo", None).await.unwrap();
        assert_eq!(session.packages().len(), 3);
    }

    async fn wait_for_calls(mock: &MockFetcher, n: usize) {
        while mock.calls() < n {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_loading_while_requests_in_flight() {
        let (mock, gate) = MockFetcher::new()
            .with_json(
                "https://registry.npmjs.org/foo/latest",
                manifest("foo", "3.0.0", serde_json::json!({ "bar": "~2.1.0" })),
            )
            .with_json(
                "https://registry.npmjs.org/bar/2.1.0",
                manifest("bar", "2.1.0", serde_json::json!({})),
            )
            .gated();
        let (resolver, mock) = resolver(mock);
        let session = Session::new();
        assert!(!session.is_loading());

        let watch = async {
            wait_for_calls(&mock, 1).await;
            let state = session.snapshot();
            assert!(state.loading);
            assert_eq!(state.package_name, "foo");
            assert_eq!(state.package_version, "latest");
            assert!(state.dependencies.is_empty());
            gate.add_permits(1);

            wait_for_calls(&mock, 2).await;
            assert!(session.is_loading());
            assert_eq!(session.packages().len(), 1);
            gate.add_permits(1);
        };

        let (result, ()) = tokio::join!(resolver.resolve(&session, "foo", None), watch);

        result.unwrap();
        assert!(!session.is_loading());
        assert_eq!(session.packages().len(), 2);
        assert_eq!(session.error(), None);
    }
}
