//! Error types for blendigo-deploy

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for blendigo-deploy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for blendigo-deploy
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String, help: String },

    /// Addon manifest error
    #[error("Manifest error: {message}")]
    Manifest { message: String, help: String },

    /// Deploy error
    #[error("Deploy error: {message}")]
    Deploy { message: String, help: String },

    /// Release staging error
    #[error("Release error: {message}")]
    Release { message: String, help: String },

    /// Publish error
    #[error("Publish error: {message}")]
    Publish { message: String, help: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a manifest error
    pub fn manifest(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a deploy error
    pub fn deploy(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Deploy {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a release staging error
    pub fn release(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Release {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a publish error
    pub fn publish(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Publish {
            message: message.into(),
            help: help.into(),
        }
    }
}
