//! Command-line interface for ideprobe.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DoctorArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
