//! blendigo-deploy CLI - Blendigo addon workflow tool

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use blendigo_deploy::commands;

/// blendigo-deploy - Blendigo addon workflow tool
#[derive(Debug, Parser)]
#[command(name = "blendigo-deploy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory
    #[arg(short = 'p', long, global = true)]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Copy the addon into a local Blender installation
    Deploy(commands::deploy::DeployArgs),

    /// Stage a versioned release of the addon
    Release(commands::release::ReleaseArgs),

    /// Upload a staged release to the distribution host
    Publish(commands::publish::PublishArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with indicatif layer for progress bar support
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Create indicatif layer so progress bars and log lines interleave cleanly
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .with(filter)
        .init();

    // Determine project root
    let project_root = if let Some(ref path) = cli.project {
        camino::Utf8PathBuf::from(path)
    } else {
        std::env::current_dir()
            .ok()
            .and_then(|p| camino::Utf8PathBuf::try_from(p).ok())
            .unwrap_or_else(|| camino::Utf8PathBuf::from("."))
    };

    match cli.command {
        Commands::Deploy(args) => commands::deploy::run(&project_root, args),
        Commands::Release(args) => commands::release::run(&project_root, args),
        Commands::Publish(args) => commands::publish::run(&project_root, args),
    }
}
