//! Invocation-wide configuration
//!
//! Resolved once at startup and passed explicitly to the store and the
//! pipeline. Defaults can be overridden by an optional
//! `<root>/.changeset/config.toml`:
//!
//! ```toml
//! changelog = "docs/CHANGELOG.md"
//! descriptor = "Cargo.toml"
//! title = "Release Notes"
//! description = "All notable changes to this project."
//! ```

use crate::errors::{invalid_config, io_error, Result};
use changeset_core::render::Preamble;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";
pub const DEFAULT_RECORD_EXTENSION: &str = "md";
pub const DEFAULT_MARKER_FILE: &str = "save.json";
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const CONFIG_FILE: &str = "config.toml";

/// Resolved configuration; all paths are joined onto `root`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetConfig {
    /// Project root every relative path resolves against
    pub root: PathBuf,
    /// Directory holding one file per pending changeset
    pub changeset_dir: PathBuf,
    /// Extension (without dot) recognized as a changeset record
    pub record_extension: String,
    /// File name of the processed-marker list inside `changeset_dir`
    pub marker_file: String,
    /// Changelog document rewritten on commit
    pub changelog_path: PathBuf,
    /// Project descriptor to read the current version from; probed when `None`
    pub descriptor_path: Option<PathBuf>,
    /// Title block for a newly created changelog
    pub preamble: Preamble,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    changelog: Option<PathBuf>,
    descriptor: Option<PathBuf>,
    title: Option<String>,
    description: Option<String>,
}

impl ChangesetConfig {
    /// Defaults rooted at `root`, without reading any config file
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            changeset_dir: root.join(DEFAULT_CHANGESET_DIR),
            record_extension: DEFAULT_RECORD_EXTENSION.to_string(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            changelog_path: root.join(DEFAULT_CHANGELOG_FILE),
            descriptor_path: None,
            preamble: Preamble::default(),
            root,
        }
    }

    /// Defaults overlaid with `<root>/.changeset/config.toml` when present
    ///
    /// # Errors
    /// * `IoFailure` - The config file exists but cannot be read
    /// * `InvalidInput` - The config file is not valid TOML for the schema
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(root);
        let path = config.config_file_path();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(config),
            Err(e) => return Err(io_error("load_config", &path, e)),
        };

        let file: ConfigFile =
            toml::from_str(&content).map_err(|e| invalid_config(&path, e.to_string()))?;

        if let Some(changelog) = file.changelog {
            config.changelog_path = config.resolve(&changelog);
        }
        if let Some(descriptor) = file.descriptor {
            config.descriptor_path = Some(config.resolve(&descriptor));
        }
        if let Some(title) = file.title {
            config.preamble.title = title;
        }
        config.preamble.description = file.description;

        tracing::debug!(path = %path.display(), "Loaded changeset config");

        Ok(config)
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.changeset_dir.join(CONFIG_FILE)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.changeset_dir.join(&self.marker_file)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use changeset_core::errors::ExErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ChangesetConfig::new("/project");

        assert_eq!(config.changeset_dir, PathBuf::from("/project/.changeset"));
        assert_eq!(config.changelog_path, PathBuf::from("/project/CHANGELOG.md"));
        assert_eq!(config.marker_path(), PathBuf::from("/project/.changeset/save.json"));
        assert_eq!(config.record_extension, "md");
        assert_eq!(config.descriptor_path, None);
        assert_eq!(config.preamble.title, "Changelog");
    }

    #[test]
    fn test_load_without_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = ChangesetConfig::load(dir.path()).unwrap();

        assert_eq!(config, ChangesetConfig::new(dir.path()));
    }

    #[test]
    fn test_load_overlays_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".changeset")).unwrap();
        fs::write(
            dir.path().join(".changeset/config.toml"),
            "changelog = \"docs/CHANGES.md\"\ndescriptor = \"Cargo.toml\"\ntitle = \"Release Notes\"\ndescription = \"Everything that shipped.\"\n",
        )
        .unwrap();

        let config = ChangesetConfig::load(dir.path()).unwrap();

        assert_eq!(config.changelog_path, dir.path().join("docs/CHANGES.md"));
        assert_eq!(config.descriptor_path, Some(dir.path().join("Cargo.toml")));
        assert_eq!(config.preamble.title, "Release Notes");
        assert_eq!(
            config.preamble.description.as_deref(),
            Some("Everything that shipped.")
        );
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".changeset")).unwrap();
        fs::write(dir.path().join(".changeset/config.toml"), "format = \"json\"\n").unwrap();

        let err = ChangesetConfig::load(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }
}
