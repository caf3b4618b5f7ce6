//! Deploy state recording
//!
//! After a successful deploy, a small JSON record of what was copied is
//! written to the state directory. It is informational only and never
//! gates a copy.

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Record of the last completed deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployState {
    /// Timestamp of the last deployment
    pub timestamp: DateTime<Utc>,
    /// Addon version at deploy time, when the manifest was readable
    pub version: Option<String>,
    /// Number of files copied
    pub files: usize,
}

impl DeployState {
    /// Create a new deploy state
    pub fn new(version: Option<String>, files: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            version,
            files,
        }
    }

    /// Load deploy state from a file
    pub fn load(path: &Utf8Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content).map_err(|e| {
            Error::deploy(
                format!("Failed to parse deploy state: {}", e),
                "The deploy state file may be corrupted. Try deleting it.",
            )
        })?;

        Ok(Some(state))
    }

    /// Save deploy state to a file
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            Error::deploy(
                format!("Failed to serialize deploy state: {}", e),
                "This is likely a bug in blendigo-deploy",
            )
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_deploy_state_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = Utf8Path::from_path(temp_dir.path())
            .unwrap()
            .join("last_deploy.json");

        let state = DeployState::new(Some("4.0.4".to_string()), 42);
        state.save(&state_path).unwrap();

        let loaded = DeployState::load(&state_path).unwrap().unwrap();

        assert_eq!(loaded.version.as_deref(), Some("4.0.4"));
        assert_eq!(loaded.files, 42);
    }

    #[test]
    fn test_deploy_state_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = Utf8Path::from_path(temp_dir.path())
            .unwrap()
            .join("nonexistent.json");

        let result = DeployState::load(&state_path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_deploy_state_without_version() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = Utf8Path::from_path(temp_dir.path())
            .unwrap()
            .join("last_deploy.json");

        let state = DeployState::new(None, 3);
        state.save(&state_path).unwrap();

        let loaded = DeployState::load(&state_path).unwrap().unwrap();
        assert!(loaded.version.is_none());
        assert_eq!(loaded.files, 3);
    }
}
