//! Configuration schema.

use serde::Deserialize;
use std::path::PathBuf;

/// Contents of an ideprobe config file.
///
/// ```yaml
/// home: /custom/home
/// application_dirs:
///   - /Applications
///   - /Volumes/Work/Applications
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Home directory to scan instead of the detected one.
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// macOS directories scanned for application bundles. Replaces
    /// `/Applications` and `~/Applications` when set.
    #[serde(default)]
    pub application_dirs: Option<Vec<PathBuf>>,
}

impl ProbeConfig {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: ProbeConfig) -> ProbeConfig {
        ProbeConfig {
            home: other.home.or(self.home),
            application_dirs: other.application_dirs.or(self.application_dirs),
        }
    }
}
