//! Release command implementation

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::config::Config;
use crate::release::Releaser;

/// Arguments for the release command
#[derive(Debug, Args)]
pub struct ReleaseArgs {
    /// Dist directory (overrides blendigo.toml)
    #[arg(long)]
    pub dist_dir: Option<String>,
}

/// Run the release command
pub fn run(project_root: &Utf8Path, args: ReleaseArgs) -> Result<()> {
    let mut config = Config::load(project_root).into_diagnostic()?;

    if let Some(dir) = args.dist_dir {
        config.release.dist_dir = Utf8PathBuf::from(dir);
    }

    let releaser = Releaser::new(&config, project_root);
    let staged = releaser.stage().into_diagnostic()?;

    tracing::info!("Release staged at {}", staged);
    Ok(())
}
