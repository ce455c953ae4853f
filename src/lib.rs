//! depbundle - Bundle an npm package with its direct dependencies
//!
//! Resolves a package against the npm registry, resolves each of its direct
//! runtime dependencies to an exact version, downloads every tarball and
//! saves them together as `<name>-<version>-with-dependencies.zip`.
//!
//! The pipeline is driven through a [`Session`]: [`Resolver::resolve`] fills
//! it, [`Archiver::archive_and_download`] consumes it, and callers observe
//! `loading`, `error` and `download_progress` on it while either runs.

pub mod archiver;
pub mod cli;
pub mod core;
pub mod registry;
pub mod resolver;
pub mod utils;

pub use archiver::{Archiver, ArchiveSink, BundleReport, DirectorySink};
pub use crate::core::{BundleError, BundleResult, Config, Engine, ResolvedPackage, Session, SessionState};
pub use registry::{HttpFetch, RegistryClient, ReqwestFetcher};
pub use resolver::Resolver;
