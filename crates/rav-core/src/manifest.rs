//! Release metadata manifest: the JSON file enumerating expected artifacts.
//!
//! Produced by the release-packaging step; read-only here. Entry order is
//! preserved because the verification report follows it.

use serde::Deserialize;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root release metadata document.
#[derive(Debug, Deserialize)]
pub struct ReleaseManifest {
    pub artifacts: Vec<ArtifactEntry>,
}

/// One expected release file, relative to the artifact directory.
#[derive(Debug, Deserialize)]
pub struct ArtifactEntry {
    pub path: String,
    /// Expected SHA-512 as hex. Absent when the packaging step recorded no
    /// digest for this file.
    #[serde(default)]
    pub sha512: Option<String>,
}

/// Failure to load a manifest. `NotFound` is distinct so callers can treat
/// an absent metadata file as "nothing to verify" rather than a failure.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no release metadata found at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read metadata {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to read metadata {}: {}", .path.display(), .reason)]
    Parse { path: PathBuf, reason: String },
}

/// Load and validate a release manifest.
///
/// Structural problems (not JSON, missing `artifacts`/`path` fields, empty
/// or duplicate paths) are all reported as [`ManifestError::Parse`]; nothing
/// is verified against disk here.
pub fn load(path: &Path) -> Result<ReleaseManifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: ReleaseManifest =
        serde_json::from_slice(&bytes).map_err(|e| parse_error(path, e.to_string()))?;

    let mut seen = HashSet::new();
    for entry in &manifest.artifacts {
        if entry.path.is_empty() {
            return Err(parse_error(path, "artifact with empty path".to_string()));
        }
        if !seen.insert(entry.path.as_str()) {
            return Err(parse_error(
                path,
                format!("duplicate artifact path: {}", entry.path),
            ));
        }
    }

    Ok(manifest)
}

fn parse_error(path: &Path, reason: String) -> ManifestError {
    ManifestError::Parse {
        path: path.to_path_buf(),
        reason,
    }
}
