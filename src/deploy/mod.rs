//! Deployment into a local Blender installation
//!
//! This module provides:
//! - Recursive tree copy with per-entry logging
//! - The deploy manager that validates the target and runs the copy
//! - Deploy state recording

mod copier;
mod manager;
mod progress;
mod state;

pub use copier::{CopyStats, copy_tree, copy_tree_filtered};
pub use manager::DeployManager;
pub use progress::CopyProgress;
pub use state::DeployState;
