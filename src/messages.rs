//! User-facing text for validation results.
//!
//! Discovery and validation only supply the parameters; the wording lives
//! here so it can be changed (or localized) in one place.

use std::path::Path;

use crate::version::Version;

/// Where plugin installation is documented.
pub const PLUGIN_SETUP_URL: &str = "https://flutter.dev/to/intellij-setup";

/// Location of a validated install.
pub fn install_location(install_path: &Path) -> String {
    format!("IntelliJ at {}", install_path.display())
}

/// The IDE itself is older than supported.
pub fn minimum_version(minimum: &Version) -> String {
    format!(
        "This install is older than the minimum recommended version of {}.",
        minimum
    )
}

/// Hint appended after any failed check.
pub fn plugin_info() -> String {
    format!(
        "For information about installing plugins, see\n{}",
        PLUGIN_SETUP_URL
    )
}

/// A required plugin is missing.
pub fn plugin_missing(title: &str, url: &str) -> String {
    format!(
        "{title} plugin not installed; this adds {title} specific functionality.\n\
         {title} plugin can be installed from:\n{url}"
    )
}

/// A required plugin is older than supported.
pub fn plugin_outdated(title: &str, installed: &str, minimum: &Version) -> String {
    format!(
        "{} plugin version {} - the recommended minimum version is {}",
        title, installed, minimum
    )
}

/// The plugins directory could not be derived from the IDE version.
pub fn invalid_version() -> &'static str {
    "Invalid IntelliJ version number."
}

/// Status line shown next to the validator title.
pub fn status_info(version: &str) -> String {
    format!("version {}", version)
}

/// Title of the validator reported when the application scan fails.
pub fn unknown_result_title() -> &'static str {
    "Cannot determine if IntelliJ is installed"
}
