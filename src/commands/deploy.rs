//! Deploy command implementation

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use miette::{IntoDiagnostic, Result};
use walkdir::WalkDir;

use crate::config::Config;
use crate::deploy::DeployManager;

/// Arguments for the deploy command
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Blender scripts directory (overrides blendigo.toml)
    #[arg(long)]
    pub scripts_dir: Option<String>,

    /// Dry run - show what would be copied
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the deploy command
pub fn run(project_root: &Utf8Path, args: DeployArgs) -> Result<()> {
    let mut config = Config::load(project_root).into_diagnostic()?;

    if let Some(dir) = args.scripts_dir {
        config.blender.scripts_dir = Utf8PathBuf::from(dir);
    }

    let manager = DeployManager::new(&config, project_root);

    if args.dry_run {
        let source = manager.source_dir();
        println!("Would copy from {} into {}:", source, manager.target_dir());

        for entry in WalkDir::new(&source).follow_links(false) {
            let entry = entry.into_diagnostic()?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(path) = Utf8Path::from_path(entry.path()) {
                if let Ok(rel) = path.strip_prefix(&source) {
                    println!("  - {}", rel);
                }
            }
        }

        return Ok(());
    }

    manager.deploy().into_diagnostic()?;

    tracing::info!("Deployment complete!");
    Ok(())
}
