//! Project descriptor lookup
//!
//! The current version comes from the project's own metadata file:
//! `package.json` (`version`) or `Cargo.toml` (`package.version`, then
//! `workspace.package.version`). When nothing usable is found the version is
//! `1.0.0`; that default is policy, not an error.

use crate::config::ChangesetConfig;
use crate::errors::{io_error, serialization_error, Result};
use changeset_core::model::Version;
use changeset_core::ExError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const PACKAGE_JSON: &str = "package.json";
pub const CARGO_TOML: &str = "Cargo.toml";

/// Read-only source of the project's current version
pub trait ProjectDescriptor {
    /// `Ok(None)` when the descriptor is absent or has no version field
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor exists but cannot be read or parsed.
    fn current_version(&self) -> Result<Option<Version>>;
}

impl<T: ProjectDescriptor> ProjectDescriptor for Option<T> {
    fn current_version(&self) -> Result<Option<Version>> {
        match self {
            Some(descriptor) => descriptor.current_version(),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    PackageJson,
    CargoToml,
}

/// A `package.json` or `Cargo.toml` on disk
#[derive(Debug, Clone)]
pub struct ManifestDescriptor {
    path: PathBuf,
    kind: ManifestKind,
}

impl ManifestDescriptor {
    /// Kind is chosen by extension: `.toml` is a Cargo manifest, anything
    /// else is read as `package.json`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => ManifestKind::CargoToml,
            _ => ManifestKind::PackageJson,
        };
        Self { path, kind }
    }

    /// The configured descriptor, or the first of `package.json` /
    /// `Cargo.toml` that exists under the project root
    pub fn discover(config: &ChangesetConfig) -> Option<Self> {
        if let Some(path) = &config.descriptor_path {
            return Some(Self::new(path));
        }

        [PACKAGE_JSON, CARGO_TOML]
            .iter()
            .map(|name| config.root.join(name))
            .find(|path| path.is_file())
            .map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ManifestKind {
        self.kind
    }

    fn version_text(&self, content: &str) -> Result<Option<String>> {
        match self.kind {
            ManifestKind::PackageJson => {
                let value: serde_json::Value = serde_json::from_str(content)
                    .map_err(|e| serialization_error("read_package_json", e.to_string()))?;
                Ok(value
                    .get("version")
                    .and_then(|v| v.as_str())
                    .map(str::to_string))
            }
            ManifestKind::CargoToml => {
                let value: toml::Value = toml::from_str(content)
                    .map_err(|e| serialization_error("read_cargo_toml", e.to_string()))?;
                let package = value
                    .get("package")
                    .and_then(|p| p.get("version"))
                    .and_then(|v| v.as_str());
                let workspace = value
                    .get("workspace")
                    .and_then(|w| w.get("package"))
                    .and_then(|p| p.get("version"))
                    .and_then(|v| v.as_str());
                Ok(package.or(workspace).map(str::to_string))
            }
        }
    }
}

impl ProjectDescriptor for ManifestDescriptor {
    fn current_version(&self) -> Result<Option<Version>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_descriptor", &self.path, e)),
        };

        match self.version_text(&content)? {
            Some(text) => text
                .trim()
                .parse::<Version>()
                .map(Some)
                .map_err(|e| ExError::from(e).with_path(&self.path)),
            None => Ok(None),
        }
    }
}

/// Current version with the `1.0.0` fallback applied
///
/// Never fails: read or parse problems are logged and replaced by the default.
pub fn resolve_current_version(descriptor: &dyn ProjectDescriptor) -> Version {
    match descriptor.current_version() {
        Ok(Some(version)) => version,
        Ok(None) => {
            tracing::debug!(
                default = %Version::DEFAULT,
                "No project version found, using default"
            );
            Version::DEFAULT
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                default = %Version::DEFAULT,
                "Could not read project version, using default"
            );
            Version::DEFAULT
        }
    }
}
