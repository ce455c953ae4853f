//! Error types for depbundle

use thiserror::Error;

/// Result type alias for depbundle operations
pub type BundleResult<T> = Result<T, BundleError>;

/// Main error type for depbundle
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to fetch package info for {package}@{version}: {reason}")]
    RegistryFetchFailed {
        package: String,
        version: String,
        reason: String,
    },

    #[error("Failed to fetch dependency info for {package}@{version}: {reason}")]
    DependencyFetchFailed {
        package: String,
        version: String,
        reason: String,
    },

    #[error("No packages to download")]
    EmptyPackageList,

    #[error("Failed to download {package}@{version}: {reason}")]
    TarballFetchFailed {
        package: String,
        version: String,
        reason: String,
    },

    #[error("Failed to download packages: {0}")]
    ArchiveFinalizationFailed(String),

    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl BundleError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BundleError::Config(msg.into())
    }

    /// Create a network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        BundleError::Network(msg.into())
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BundleError::RegistryFetchFailed { .. } => 2,
            BundleError::InvalidPackageName(_) => 2,
            BundleError::EmptyPackageList => 3,
            BundleError::ArchiveFinalizationFailed(_) => 3,
            BundleError::Zip(_) => 3,
            _ => 1,
        }
    }
}
