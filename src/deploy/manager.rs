//! Deployment manager
//!
//! Validates the target Blender installation and copies the addon source
//! tree into its addons directory. The scripts directory must already
//! exist; it belongs to the Blender installation and is never created
//! here. The copy itself is unconditional: every file is copied and
//! existing files are overwritten.

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::manifest::AddonManifest;
use crate::{Error, Result};

use super::copier::{self, CopyStats};
use super::progress::CopyProgress;
use super::state::DeployState;

/// Manager for deploy operations
pub struct DeployManager<'a> {
    config: &'a Config,
    project_root: &'a Utf8Path,
}

impl<'a> DeployManager<'a> {
    /// Create a new deploy manager
    pub fn new(config: &'a Config, project_root: &'a Utf8Path) -> Self {
        Self {
            config,
            project_root,
        }
    }

    /// Addon source tree
    pub fn source_dir(&self) -> Utf8PathBuf {
        self.config.source_dir(self.project_root)
    }

    /// Scripts directory of the target Blender installation
    pub fn scripts_dir(&self) -> Utf8PathBuf {
        self.config.scripts_dir(self.project_root)
    }

    /// Directory that receives the addon tree
    pub fn target_dir(&self) -> Utf8PathBuf {
        self.scripts_dir().join(&self.config.blender.addons_subdir)
    }

    /// Deploy state file path
    pub fn state_path(&self) -> Utf8PathBuf {
        self.config
            .state_dir(self.project_root)
            .join("last_deploy.json")
    }

    /// Copy the addon into the Blender installation.
    ///
    /// Fails before touching the filesystem if the scripts directory does
    /// not exist, and fatally on any I/O error during the copy (a partial
    /// tree may remain; there is no rollback).
    pub fn deploy(&self) -> Result<CopyStats> {
        let scripts_dir = self.scripts_dir();
        if !scripts_dir.is_dir() {
            return Err(Error::deploy(
                format!("Blender scripts directory not found at '{}'", scripts_dir),
                "Install Blender or set blender.scripts_dir in blendigo.toml",
            ));
        }

        let source = self.source_dir();
        if !source.is_dir() {
            return Err(Error::deploy(
                format!("Addon source directory not found at '{}'", source),
                "Set addon.source_dir in blendigo.toml",
            ));
        }

        let target = self.target_dir();
        tracing::info!("Deploying {} -> {}", source, target);

        let progress = CopyProgress::new(count_files(&source));
        let stats = copier::copy_tree_filtered(&source, &target, |_| true, Some(&progress))?;
        progress.finish();

        // Version is best-effort; a tree without a manifest still deploys
        let version = match AddonManifest::load(&source) {
            Ok(manifest) => Some(manifest.version),
            Err(e) => {
                tracing::debug!("No addon manifest for deploy state: {}", e);
                None
            }
        };
        DeployState::new(version, stats.files).save(&self.state_path())?;

        tracing::info!(
            "Deployed {} files ({} bytes) to {}",
            stats.files,
            stats.bytes,
            target
        );

        Ok(stats)
    }
}

/// Count the files under a directory tree
fn count_files(path: &Utf8Path) -> usize {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}
