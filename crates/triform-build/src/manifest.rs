//! Host package manifest lookup.
//!
//! Only the `type` field of `package.json` matters here: it decides how a
//! runtime interprets plain `.js` files, which in turn decides whether emitted
//! extensions need rewriting.

use serde::Deserialize;
use std::path::Path;

use crate::{Error, Result};

/// Maximum allowed size for package.json files (10MB)
const MAX_PACKAGE_JSON_SIZE: u64 = 10 * 1024 * 1024;

/// Default module interpretation of the host package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageType {
    /// `.js` files are CommonJS (no `type` field, or `"type": "commonjs"`).
    #[default]
    CommonJs,
    /// `.js` files are ES modules (any other `type` value).
    Module,
}

#[derive(Debug, Deserialize)]
struct ManifestType {
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl PackageType {
    /// Interpret the raw `type` field value.
    pub fn from_type_field(value: Option<&str>) -> Self {
        match value {
            None | Some("commonjs") => Self::CommonJs,
            Some(_) => Self::Module,
        }
    }

    /// Read the package type from a specific `package.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is too large, or is not
    /// valid JSON.
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let metadata = std::fs::metadata(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.len() > MAX_PACKAGE_JSON_SIZE {
            return Err(Error::Manifest {
                path: path.to_path_buf(),
                message: format!(
                    "exceeds maximum size of {}MB",
                    MAX_PACKAGE_JSON_SIZE / 1024 / 1024
                ),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest: ManifestType =
            serde_json::from_str(&content).map_err(|e| Error::Manifest {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self::from_type_field(manifest.kind.as_deref()))
    }

    /// Read the package type from `<dir>/package.json`.
    ///
    /// A directory without a manifest is treated as CommonJS, which is what
    /// Node.js assumes in that case.
    pub fn detect(dir: impl AsRef<Path>) -> Result<Self> {
        let manifest = dir.as_ref().join("package.json");
        if !manifest.is_file() {
            tracing::debug!(
                "No package.json in {}, assuming commonjs",
                dir.as_ref().display()
            );
            return Ok(Self::CommonJs);
        }

        let package_type = Self::from_manifest(&manifest)?;
        tracing::debug!("Package type from {}: {}", manifest.display(), package_type);
        Ok(package_type)
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommonJs => write!(f, "commonjs"),
            Self::Module => write!(f, "module"),
        }
    }
}
