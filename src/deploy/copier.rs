//! Recursive tree copy
//!
//! Used by both deployment and release staging. The copy mirrors the source
//! tree exactly, creating intermediate directories and overwriting files
//! already present at the destination. Every copied entry is logged.

use camino::Utf8Path;
use walkdir::{DirEntry, WalkDir};

use crate::{Error, Result};

use super::progress::CopyProgress;

/// Totals for a completed copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files copied
    pub files: usize,
    /// Directories created
    pub dirs: usize,
    /// File bytes written
    pub bytes: u64,
}

/// Recursively copy `src` into `dst`, mirroring the tree exactly
pub fn copy_tree(src: &Utf8Path, dst: &Utf8Path) -> Result<CopyStats> {
    copy_tree_filtered(src, dst, |_| true, None)
}

/// Recursively copy `src` into `dst`, visiting only entries for which
/// `keep` returns true. Pruned directories are not descended into.
pub fn copy_tree_filtered<F>(
    src: &Utf8Path,
    dst: &Utf8Path,
    keep: F,
    progress: Option<&CopyProgress>,
) -> Result<CopyStats>
where
    F: FnMut(&DirEntry) -> bool,
{
    if !src.is_dir() {
        return Err(Error::deploy(
            format!("Source directory not found at '{}'", src),
            "Check addon.source_dir in blendigo.toml",
        ));
    }

    std::fs::create_dir_all(dst)?;

    let mut stats = CopyStats::default();
    let mut keep = keep;

    // The filter never applies to the source root itself
    for entry in WalkDir::new(src)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |e| e.depth() == 0 || keep(e))
    {
        let entry = entry.map_err(|e| {
            Error::deploy(
                format!("Failed to read directory entry: {}", e),
                "Check directory permissions",
            )
        })?;

        let src_path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
            Error::deploy(
                format!("Path is not valid UTF-8: {:?}", entry.path()),
                "Ensure all file paths contain only valid UTF-8 characters",
            )
        })?;

        let rel_path = src_path.strip_prefix(src).map_err(|_| {
            Error::deploy(
                format!("Failed to strip source prefix from {}", src_path),
                "This is an unexpected internal error",
            )
        })?;

        // The walk yields the source root itself first; dst already exists
        if rel_path.as_str().is_empty() {
            continue;
        }

        let dst_path = dst.join(rel_path);

        if entry.file_type().is_dir() {
            tracing::info!("Copying {}/ -> {}", rel_path, dst_path);
            std::fs::create_dir_all(&dst_path)?;
            stats.dirs += 1;
        } else if entry.file_type().is_symlink() {
            tracing::info!("Copying {} -> {}", rel_path, dst_path);
            copy_symlink(entry.path(), &dst_path)?;
            stats.files += 1;
        } else {
            if let Some(parent) = dst_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            tracing::info!("Copying {} -> {}", rel_path, dst_path);
            stats.bytes += std::fs::copy(src_path, &dst_path)?;
            stats.files += 1;

            if let Some(progress) = progress {
                progress.copied(rel_path);
            }
        }
    }

    Ok(stats)
}

/// Preserve symlinks as symlinks
#[cfg(unix)]
fn copy_symlink(src: &std::path::Path, dst: &Utf8Path) -> Result<()> {
    let target = std::fs::read_link(src)?;
    if dst.exists() || dst.is_symlink() {
        std::fs::remove_file(dst)?;
    }
    std::os::unix::fs::symlink(target, dst)?;
    Ok(())
}

/// Windows has no portable symlink story; copy the link target's contents
#[cfg(not(unix))]
fn copy_symlink(src: &std::path::Path, dst: &Utf8Path) -> Result<()> {
    std::fs::copy(src, dst)?;
    Ok(())
}
