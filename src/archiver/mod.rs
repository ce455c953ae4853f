//! Tarball downloader and bundle writer
//!
//! Downloads every resolved package's tarball, packs the successful ones
//! into a single zip and hands it to an [`ArchiveSink`].

pub mod bundle;
pub mod sink;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use serde::Serialize;

use crate::core::config::NetworkConfig;
use crate::core::session::{ResolvedPackage, Session, SessionState};
use crate::core::{BundleError, BundleResult};
use crate::registry::HttpFetch;

pub use bundle::BundleArchive;
pub use sink::{ArchiveSink, DirectorySink};

/// Outcome of an archive run
#[derive(Debug, Clone, Serialize)]
pub struct BundleReport {
    /// Logical archive name
    pub file_name: String,
    /// Where the sink stored it
    pub saved_to: PathBuf,
    /// Number of tarballs in the archive
    pub entries: usize,
    /// Packages whose tarball could not be downloaded
    pub failed: Vec<String>,
}

/// Tarball archiver
///
/// Progress is published through [`Session::download_progress`] as each
/// download settles.
pub struct Archiver {
    http: Arc<dyn HttpFetch>,
    network: NetworkConfig,
}

impl Archiver {
    /// Create a new archiver
    pub fn new(http: Arc<dyn HttpFetch>, network: NetworkConfig) -> Self {
        Self { http, network }
    }

    /// Download every package in `session` and save them as one bundle
    pub async fn archive_and_download(
        &self,
        session: &Session,
        sink: &dyn ArchiveSink,
    ) -> BundleResult<BundleReport> {
        let state = session.snapshot();
        if state.dependencies.is_empty() {
            let err = BundleError::EmptyPackageList;
            tracing::error!("{}", err);
            session.set_error(err.to_string());
            return Err(err);
        }

        let _loading = session.begin_archive();
        let result = self.build_and_save(session, sink, &state).await;

        if let Err(ref e) = result {
            tracing::error!("{}", e);
            session.set_error(e.to_string());
        }

        result
    }

    async fn build_and_save(
        &self,
        session: &Session,
        sink: &dyn ArchiveSink,
        state: &SessionState,
    ) -> BundleResult<BundleReport> {
        let packages = &state.dependencies;
        let total = packages.len();
        let settled = AtomicUsize::new(0);
        let archive = Mutex::new(BundleArchive::new());

        tracing::info!("Downloading {} tarballs", total);

        let failed: Vec<String> = stream::iter(packages.iter())
            .map(|pkg| {
                let archive = &archive;
                let settled = &settled;
                async move {
                    let outcome = self.http.get(&pkg.tarball_url).await;
                    // Entry insert and count bump happen under one lock
                    let mut archive = archive.lock();
                    let failed = match outcome {
                        Ok(bytes) => {
                            tracing::debug!("Downloaded {}@{} ({} bytes)", pkg.name, pkg.version, bytes.len());
                            archive.add(pkg.archive_entry_name(), bytes);
                            None
                        }
                        Err(e) => {
                            let err = BundleError::TarballFetchFailed {
                                package: pkg.name.clone(),
                                version: pkg.version.clone(),
                                reason: e.to_string(),
                            };
                            tracing::warn!("{}", err);
                            Some(pkg.name.clone())
                        }
                    };
                    let done = settled.fetch_add(1, Ordering::SeqCst) + 1;
                    session.set_progress(progress_percent(done, total));
                    failed
                }
            })
            .buffer_unordered(self.network.fan_out_limit(total))
            .filter_map(futures::future::ready)
            .collect()
            .await;

        let archive = archive.into_inner();
        let entries = archive.entry_count();
        let payload = archive
            .finish()
            .map_err(|e| BundleError::ArchiveFinalizationFailed(e.to_string()))?;

        let main = state
            .main_package()
            .ok_or_else(|| BundleError::ArchiveFinalizationFailed("no main package in list".to_string()))?;
        let file_name = bundle_file_name(main);

        let saved_to = sink
            .save(&file_name, &payload)
            .map_err(|e| BundleError::ArchiveFinalizationFailed(e.to_string()))?;

        tracing::info!("Bundled {}/{} packages into {}", entries, total, file_name);

        Ok(BundleReport {
            file_name,
            saved_to,
            entries,
            failed,
        })
    }
}

/// `<name>-<version>-with-dependencies.zip` for the main package
pub fn bundle_file_name(main: &ResolvedPackage) -> String {
    format!("{}-{}-with-dependencies.zip", main.name, main.version)
}

fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (done * 100 / total).min(100) as u8
}
