//! ideprobe - Find IntelliJ IDEA installs and check their Flutter and Dart
//! plugins.
//!
//! Discovery walks the per-platform layouts IntelliJ uses to record where
//! it is installed, and validation checks each install's plugins directory
//! for the plugins Flutter development needs.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and the `doctor` command
//! - [`config`] - Optional YAML configuration
//! - [`discovery`] - Locating installations on Linux, Windows and macOS
//! - [`error`] - Error types and result aliases
//! - [`messages`] - User-facing validation text
//! - [`platform`] - Host platform detection
//! - [`plugins`] - Required plugin descriptors and plugin checks
//! - [`sys`] - Filesystem access and property-list reading
//! - [`ui`] - Terminal output
//! - [`validation`] - Validation result types
//! - [`validator`] - Per-installation validators
//! - [`version`] - Version parsing and comparison
//!
//! # Example
//!
//! ```
//! use ideprobe::discovery::ProbeContext;
//! use ideprobe::platform::Platform;
//! use ideprobe::sys::MemoryFs;
//! use ideprobe::validator::{installed_validators, Validator};
//! use std::sync::Arc;
//!
//! let fs = MemoryFs::new()
//!     .with_file("/home/dev/.IdeaIC2019.3/system/.home", "/opt/idea")
//!     .with_dir("/opt/idea")
//!     .with_dir("/home/dev/.IdeaIC2019.3/config/plugins/flutter-intellij")
//!     .with_dir("/home/dev/.IdeaIC2019.3/config/plugins/Dart");
//! let ctx = ProbeContext::new(Platform::Linux, Arc::new(fs)).with_home("/home/dev");
//!
//! for validator in installed_validators(&ctx) {
//!     let result = validator.validate();
//!     assert!(!result.status.is_problem());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod messages;
pub mod platform;
pub mod plugins;
pub mod sys;
pub mod ui;
pub mod validation;
pub mod validator;
pub mod version;

pub use error::{ProbeError, Result};
