//! Publish command implementation

use camino::Utf8Path;
use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::config::Config;
use crate::release::Releaser;

/// Arguments for the publish command
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Upload username (overrides publish.user in blendigo.toml)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Dry run - show the upload command without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the publish command
pub fn run(project_root: &Utf8Path, args: PublishArgs) -> Result<()> {
    let config = Config::load(project_root).into_diagnostic()?;

    let releaser = Releaser::new(&config, project_root);
    releaser
        .publish(args.user.as_deref(), args.dry_run)
        .into_diagnostic()?;

    Ok(())
}
