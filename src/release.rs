//! Release staging and publishing
//!
//! Staging produces a clean, versioned copy of the addon tree under the
//! dist directory, with development junk stripped. Publishing uploads a
//! staged tree to the distribution host with `scp`.

use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::DirEntry;

use crate::config::Config;
use crate::deploy::copy_tree_filtered;
use crate::manifest::AddonManifest;
use crate::{Error, Result};

/// Manager for release operations
pub struct Releaser<'a> {
    config: &'a Config,
    project_root: &'a Utf8Path,
}

impl<'a> Releaser<'a> {
    /// Create a new releaser
    pub fn new(config: &'a Config, project_root: &'a Utf8Path) -> Self {
        Self {
            config,
            project_root,
        }
    }

    /// Staged release directory for the given manifest
    pub fn staged_dir(&self, manifest: &AddonManifest) -> Utf8PathBuf {
        self.config
            .dist_dir(self.project_root)
            .join(manifest.release_stem())
    }

    /// Stage a clean copy of the addon tree under the dist directory.
    ///
    /// A previously staged tree for the same version is removed first, so
    /// the result never carries leftovers from older stages.
    pub fn stage(&self) -> Result<Utf8PathBuf> {
        let source = self.config.source_dir(self.project_root);
        let manifest = AddonManifest::load(&source)?;
        let staged = self.staged_dir(&manifest);

        if staged.exists() {
            tracing::debug!("Removing stale staging at {}", staged);
            std::fs::remove_dir_all(&staged)?;
        }

        tracing::info!("Staging {} {} -> {}", manifest.name, manifest.version, staged);

        let stats = copy_tree_filtered(&source, &staged, is_release_entry, None)?;

        tracing::info!("Staged {} files ({} bytes)", stats.files, stats.bytes);
        Ok(staged)
    }

    /// Upload the staged release to the distribution host.
    ///
    /// The staged tree must already exist; publishing never stages.
    pub fn publish(&self, user: Option<&str>, dry_run: bool) -> Result<()> {
        let source = self.config.source_dir(self.project_root);
        let manifest = AddonManifest::load(&source)?;
        let staged = self.staged_dir(&manifest);

        if !staged.is_dir() {
            return Err(Error::publish(
                format!("No staged release at '{}'", staged),
                "Run `blendigo-deploy release` before publishing",
            ));
        }

        // Handle optional port in the format "host:port"
        let (host, port) = parse_upload_host(&self.config.publish.host);
        let target = match user.or(self.config.publish.user.as_deref()) {
            Some(user) => format!("{}@{}", user, host),
            None => host.to_string(),
        };

        let mut cmd = Command::new("scp");
        cmd.arg("-r");
        if let Some(port) = port {
            cmd.args(["-P", &port.to_string()]);
        }
        cmd.arg(staged.as_str());
        cmd.arg(format!("{}:{}/", target, self.config.publish.remote_dir));

        if dry_run {
            println!("Would run: {:?}", cmd);
            return Ok(());
        }

        tracing::info!(
            "Uploading {} to {}:{}",
            staged,
            target,
            self.config.publish.remote_dir
        );
        tracing::debug!("Running: {:?}", cmd);

        let status = cmd.status()?;

        if !status.success() {
            return Err(Error::publish(
                format!("scp failed with exit code: {:?}", status.code()),
                "Check SSH connectivity and permissions on the distribution host",
            ));
        }

        tracing::info!("Upload complete");
        Ok(())
    }
}

/// Keep filter for release staging: drops VCS directories and Python
/// build junk that must never ship in a release
fn is_release_entry(entry: &DirEntry) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };

    if entry.file_type().is_dir() {
        name != "__pycache__" && !is_hidden(name)
    } else {
        !is_hidden(name) && !name.ends_with(".pyc") && !name.ends_with(".orig")
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Parse an upload host string to extract host and optional port
///
/// Supports formats:
/// - "host" -> ("host", None)
/// - "host:port" -> ("host", Some(port))
fn parse_upload_host(host: &str) -> (&str, Option<u16>) {
    // Only treat the suffix as a port if it parses as a valid u16
    if let Some((host_part, port_str)) = host.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host_part, Some(port));
        }
    }
    (host, None)
}
