//! Per-task session state shared by the resolver and the archiver
//!
//! A `Session` is created empty, filled by a resolution, consumed by an
//! archive run and wiped by `reset`. All mutation goes through a single
//! lock so that list appends and progress updates stay linearizable even
//! when fan-out branches complete on different worker threads.

use parking_lot::Mutex;
use serde::Serialize;

/// Version tag used when no version is requested
pub const LATEST_TAG: &str = "latest";

/// A package selected for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPackage {
    pub name: String,
    pub version: String,
    pub tarball_url: String,
    pub is_main_package: bool,
}

impl ResolvedPackage {
    /// Archive entry name for this package
    pub fn archive_entry_name(&self) -> String {
        format!("{}-{}.tgz", self.name, self.version)
    }
}

/// Observable session fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub package_name: String,
    pub package_version: String,
    pub dependencies: Vec<ResolvedPackage>,
    pub loading: bool,
    pub error: Option<String>,
    pub download_progress: u8,
}

impl SessionState {
    /// The originally requested package, once resolved
    pub fn main_package(&self) -> Option<&ResolvedPackage> {
        self.dependencies.iter().find(|p| p.is_main_package)
    }
}

/// Shared, lock-protected session
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    /// Current package list
    pub fn packages(&self) -> Vec<ResolvedPackage> {
        self.state.lock().dependencies.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn download_progress(&self) -> u8 {
        self.state.lock().download_progress
    }

    /// Start a resolution: clear error and list, record the requested identity
    pub(crate) fn begin_resolution(&self, name: &str, version: &str) -> LoadingGuard<'_> {
        let mut state = self.state.lock();
        state.loading = true;
        state.error = None;
        state.dependencies.clear();
        state.package_name = name.to_string();
        state.package_version = version.to_string();
        LoadingGuard {
            session: self,
            reset_progress: false,
        }
    }

    /// Start an archive run
    pub(crate) fn begin_archive(&self) -> LoadingGuard<'_> {
        let mut state = self.state.lock();
        state.loading = true;
        state.error = None;
        state.download_progress = 0;
        LoadingGuard {
            session: self,
            reset_progress: true,
        }
    }

    pub(crate) fn push_package(&self, package: ResolvedPackage) {
        self.state.lock().dependencies.push(package);
    }

    pub(crate) fn set_progress(&self, percent: u8) {
        self.state.lock().download_progress = percent.min(100);
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.state.lock().error = Some(message.into());
    }

    /// Return to the empty state; `loading` is left untouched
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.package_name.clear();
        state.package_version.clear();
        state.dependencies.clear();
        state.error = None;
        state.download_progress = 0;
    }
}

/// Clears `loading` (and optionally progress) when an operation exits
pub(crate) struct LoadingGuard<'a> {
    session: &'a Session,
    reset_progress: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.session.state.lock();
        state.loading = false;
        if self.reset_progress {
            state.download_progress = 0;
        }
    }
}
