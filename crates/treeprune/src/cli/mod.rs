pub mod check;
pub mod prune;
pub mod restore;
pub mod shape;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use treeprune_lib::{Platform, PruneError, Result};

#[derive(Parser)]
#[command(name = "treeprune")]
#[command(about = "Prune a built application tree down to what ships", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, short = 'v', global = true, help = "Log every kept and pruned file")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Prune a directory tree in place")]
    Prune {
        #[arg(help = "Root of the built application tree")]
        root: PathBuf,

        #[arg(long, short = 'c', help = "Path to the config file (TOML or JSON)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Directory that receives pruned files")]
        trash: Option<PathBuf>,

        #[arg(long, help = "Classify and log without moving anything")]
        dry_run: bool,

        #[arg(long, help = "Write the kept/pruned audit log to this file")]
        log: Option<PathBuf>,

        #[arg(long, help = "Write a JSON report to this file")]
        report: Option<PathBuf>,
    },

    #[command(about = "Validate the prune configuration without touching any files")]
    Check {
        #[arg(long, short = 'c', help = "Path to the config file (TOML or JSON)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Platform to check for (defaults to the host)")]
        platform: Option<Platform>,
    },

    #[command(about = "Move pruned files back from a trash directory")]
    Restore {
        #[arg(help = "Root of the pruned application tree")]
        root: PathBuf,

        #[arg(long, help = "Trash directory written by a previous prune")]
        trash: PathBuf,
    },

    #[command(about = "Show the built-in runtime shape for a platform")]
    Shape {
        #[arg(long, help = "Platform to show (defaults to the host)")]
        platform: Option<Platform>,
    },
}

pub fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

pub fn host_platform() -> Result<Platform> {
    Platform::host().ok_or_else(|| {
        PruneError::Config("The host operating system is not a supported packaging target".to_string())
    })
}
