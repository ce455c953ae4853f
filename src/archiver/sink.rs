//! Where finished bundles are saved

use std::path::{Path, PathBuf};

use crate::core::BundleResult;
use crate::utils::sanitize_file_name;

/// Receives a finished archive
pub trait ArchiveSink: Send + Sync {
    /// Persist `payload` as `file_name`, returning where it ended up
    fn save(&self, file_name: &str, payload: &[u8]) -> BundleResult<PathBuf>;
}

/// Writes bundles into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }
}

impl ArchiveSink for DirectorySink {
    fn save(&self, file_name: &str, payload: &[u8]) -> BundleResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(sanitize_file_name(file_name));
        std::fs::write(&path, payload)?;
        tracing::info!("Saved {} ({} bytes)", path.display(), payload.len());
        Ok(path)
    }
}
