//! blendigo-deploy - Blendigo addon workflow tool
//!
//! This crate provides both a library and CLI for the Blendigo release
//! workflow, including:
//! - Configuration file parsing and merging
//! - Addon manifest parsing (`blender_manifest.toml`)
//! - Deployment into a local Blender installation
//! - Release staging and upload to the distribution host

pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod manifest;
pub mod release;

pub use error::{Error, Result};
