//! Addon extension manifest parsing
//!
//! The addon source tree carries a `blender_manifest.toml` describing the
//! extension. The version recorded there names staged releases and is
//! written into the deploy state.

use camino::Utf8Path;
use serde::Deserialize;

use crate::{Error, Result};

/// Manifest file name inside the addon source tree
pub const MANIFEST_FILE: &str = "blender_manifest.toml";

/// Parsed extension manifest
#[derive(Debug, Clone, Deserialize)]
pub struct AddonManifest {
    /// Extension identifier
    pub id: String,

    /// Human-readable extension name
    pub name: String,

    /// Extension version, e.g. "4.0.4"
    pub version: String,

    /// Manifest schema version
    #[serde(default)]
    pub schema_version: Option<String>,

    /// Minimum supported Blender version
    #[serde(default)]
    pub blender_version_min: Option<String>,

    /// Maintainer contact
    #[serde(default)]
    pub maintainer: Option<String>,

    /// SPDX license expressions
    #[serde(default)]
    pub license: Option<Vec<String>>,
}

impl AddonManifest {
    /// Load the manifest from an addon source tree
    pub fn load(source_dir: &Utf8Path) -> Result<Self> {
        let path = source_dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(Error::manifest(
                format!("No {} found in '{}'", MANIFEST_FILE, source_dir),
                "The addon tree needs an extension manifest with id, name and version",
            ));
        }

        let content = std::fs::read_to_string(&path)?;
        let manifest: Self = toml::from_str(&content)?;
        Ok(manifest)
    }

    /// Directory name used for staged releases, e.g. "blendigo-4.0.4"
    pub fn release_stem(&self) -> String {
        format!("blendigo-{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let source = Utf8Path::from_path(temp_dir.path()).unwrap();

        let content = r#"
schema_version = "1.0.0"
id = "indigo_exporter"
name = "Blendigo"
version = "4.0.4"
blender_version_min = "4.2.0"
license = ["SPDX:GPL-3.0-or-later"]
"#;
        std::fs::write(source.join(MANIFEST_FILE), content).unwrap();

        let manifest = AddonManifest::load(source).unwrap();

        assert_eq!(manifest.id, "indigo_exporter");
        assert_eq!(manifest.name, "Blendigo");
        assert_eq!(manifest.version, "4.0.4");
        assert_eq!(manifest.blender_version_min.as_deref(), Some("4.2.0"));
        assert_eq!(manifest.release_stem(), "blendigo-4.0.4");
    }

    #[test]
    fn test_load_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let source = Utf8Path::from_path(temp_dir.path()).unwrap();

        let result = AddonManifest::load(source);
        assert!(matches!(result, Err(Error::Manifest { .. })));
    }

    #[test]
    fn test_load_invalid_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let source = Utf8Path::from_path(temp_dir.path()).unwrap();

        // Missing the required version field
        let content = r#"
id = "indigo_exporter"
name = "Blendigo"
"#;
        std::fs::write(source.join(MANIFEST_FILE), content).unwrap();

        let result = AddonManifest::load(source);
        assert!(matches!(result, Err(Error::TomlParse(_))));
    }
}
