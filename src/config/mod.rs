//! Configuration loading for ideprobe.
//!
//! Configuration is optional. Without any file the probe uses the real
//! home directory and the default macOS application directories.
//!
//! # Example
//!
//! ```
//! use ideprobe::config::parse_config;
//! use std::path::{Path, PathBuf};
//!
//! let config = parse_config("home: /srv/dev\n", Path::new("config.yml")).unwrap();
//! assert_eq!(config.home, Some(PathBuf::from("/srv/dev")));
//! ```
//!
//! # Configuration Sources
//!
//! Later sources override earlier ones:
//! 1. User global config (`~/.ideprobe/config.yml`)
//! 2. Config passed with `--config`
//! 3. `IDEPROBE_HOME` environment variable (home only)
//! 4. `--home` flag

pub mod loader;
pub mod schema;

pub use loader::{
    build_context, load_config, load_config_file, parse_config, user_config_path, HOME_ENV,
};
pub use schema::ProbeConfig;
