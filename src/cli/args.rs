//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ideprobe - Check IntelliJ IDEA installs for the Flutter and Dart plugins.
#[derive(Debug, Parser)]
#[command(name = "ideprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (layered over ~/.ideprobe/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Home directory to search (overrides IDEPROBE_HOME and the config file)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Only show one line per installation
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate every IntelliJ install (default if no command specified)
    Doctor(DoctorArgs),
}

/// Arguments for the `doctor` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DoctorArgs {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}
