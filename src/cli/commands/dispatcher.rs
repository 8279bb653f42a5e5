//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, DoctorArgs};
use crate::config;
use crate::discovery::ProbeContext;
use crate::error::Result;
use crate::ui::UserInterface;

use super::doctor::DoctorCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Build the probe context for this run.
///
/// Starts from the detected machine, then layers the config files, the
/// `IDEPROBE_HOME` environment variable and the `--home` flag.
pub fn build_context(cli: &Cli) -> Result<ProbeContext> {
    let probe_config = config::load_config(cli.config.as_deref())?;
    Ok(config::build_context(
        ProbeContext::detect(),
        &probe_config,
        cli.home.clone(),
        |key| std::env::var(key),
    ))
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    ctx: ProbeContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher probing `ctx`.
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let args = match &cli.command {
            Some(Commands::Doctor(args)) => args.clone(),
            // Default to doctor with default args
            None => DoctorArgs::default(),
        };
        DoctorCommand::new(self.ctx.clone(), args).execute(ui)
    }
}
