//! Registry response types

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Version manifest returned by `GET /{name}/{version}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionManifest {
    /// Exact version string
    pub version: String,

    /// Distribution info
    pub dist: DistInfo,

    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    /// Dev dependencies (parsed, never bundled)
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,

    /// Deprecated message
    #[serde(default)]
    pub deprecated: Option<String>,
}

/// Distribution information
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DistInfo {
    /// Tarball URL
    pub tarball: String,
}
