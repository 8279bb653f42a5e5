//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod dispatcher;
pub mod doctor;

pub use dispatcher::{build_context, Command, CommandDispatcher, CommandResult};
pub use doctor::{run_validators, DoctorCommand, DoctorEntry};
