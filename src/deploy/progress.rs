//! Progress display for tree copies
//!
//! A single progress bar driven by the copier, integrated with tracing
//! for clean log output.

use camino::Utf8Path;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar over the files of one copy operation
pub struct CopyProgress {
    bar: ProgressBar,
}

impl CopyProgress {
    /// Create a progress bar for a copy of `total_files` files
    pub fn new(total_files: usize) -> Self {
        let bar = ProgressBar::new(total_files as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
                )
                .expect("Invalid progress template")
                .progress_chars("#>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Record one copied file
    pub fn copied(&self, rel_path: &Utf8Path) {
        self.bar.set_message(rel_path.to_string());
        self.bar.inc(1);
    }

    /// Clear the bar once the copy is done
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for CopyProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
