//! Required IDE plugins and their validation.
//!
//! A plugin counts as installed when any of its candidate paths exists
//! under the IDE's plugins directory. For plugins with a minimum version,
//! the version is read from `META-INF/plugin.xml` inside the plugin jar.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::messages;
use crate::sys::FileSystem;
use crate::validation::ValidationMessage;
use crate::version::{below_minimum, Version};

/// A plugin the IDE must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Paths relative to the plugins directory, checked in order.
    pub paths: &'static [&'static str],
    /// Display name, e.g. "Flutter".
    pub title: &'static str,
    /// Marketplace page.
    pub url: &'static str,
    /// Minimum supported plugin version, if any.
    pub min_version: Option<Version>,
}

/// The Flutter plugin (directory install, or a bare jar in older IDEs).
pub const FLUTTER_PLUGIN: PluginDescriptor = PluginDescriptor {
    paths: &["flutter-intellij", "flutter-intellij.jar"],
    title: "Flutter",
    url: "https://plugins.jetbrains.com/plugin/9212-flutter",
    min_version: Some(Version::new(16, 0, 0)),
};

/// The Dart plugin.
pub const DART_PLUGIN: PluginDescriptor = PluginDescriptor {
    paths: &["Dart"],
    title: "Dart",
    url: "https://plugins.jetbrains.com/plugin/6351-dart",
    min_version: None,
};

/// Plugins every installation is checked for, in report order.
pub const REQUIRED_PLUGINS: &[PluginDescriptor] = &[FLUTTER_PLUGIN, DART_PLUGIN];

/// Plugin checks against one plugins directory.
pub struct IdePlugins<'a> {
    fs: &'a dyn FileSystem,
    plugins_path: &'a Path,
}

impl<'a> IdePlugins<'a> {
    /// Create a checker for the given plugins directory.
    pub fn new(fs: &'a dyn FileSystem, plugins_path: &'a Path) -> Self {
        Self { fs, plugins_path }
    }

    /// Validate one plugin, appending an error to `messages` if it is
    /// missing or too old. A passing plugin adds nothing.
    pub fn validate(&self, plugin: &PluginDescriptor, messages: &mut Vec<ValidationMessage>) {
        let Some(found) = plugin.paths.iter().find(|name| self.has_package(name)) else {
            messages.push(ValidationMessage::error(messages::plugin_missing(
                plugin.title,
                plugin.url,
            )));
            return;
        };

        let Some(minimum) = plugin.min_version else {
            return;
        };
        let Some(installed) = self.read_package_version(found) else {
            tracing::debug!("No readable version for {} plugin", plugin.title);
            return;
        };
        if below_minimum(&installed, Some(minimum)) {
            messages.push(ValidationMessage::error(messages::plugin_outdated(
                plugin.title,
                &installed,
                &minimum,
            )));
        }
    }

    /// Whether `package` exists under the plugins directory.
    pub fn has_package(&self, package: &str) -> bool {
        self.fs.exists(&self.plugins_path.join(package))
    }

    /// Read the version declared in a plugin's jar.
    ///
    /// `package` is either a jar directly under the plugins directory or a
    /// plugin directory whose `lib/` holds the jars. In the latter case
    /// `lib/<package>.jar` is tried first, then every other `.jar` or
    /// `.zip` in `lib/`; the first archive with a `META-INF/plugin.xml`
    /// wins.
    pub fn read_package_version(&self, package: &str) -> Option<String> {
        for jar in self.candidate_jars(package) {
            let bytes = match self.fs.read(&jar) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!("Cannot read plugin jar {}: {}", jar.display(), e);
                    continue;
                }
            };
            match plugin_xml(&bytes) {
                Ok(xml) => return version_from_plugin_xml(&xml),
                Err(e) => tracing::debug!("No plugin.xml in {}: {}", jar.display(), e),
            }
        }
        None
    }

    fn candidate_jars(&self, package: &str) -> Vec<PathBuf> {
        if package.ends_with(".jar") {
            return vec![self.plugins_path.join(package)];
        }

        let lib = self.plugins_path.join(package).join("lib");
        let preferred = lib.join(format!("{}.jar", package));
        let mut jars = Vec::new();
        if self.fs.is_file(&preferred) {
            jars.push(preferred.clone());
        }
        match self.fs.read_dir(&lib) {
            Ok(entries) => jars.extend(
                entries
                    .into_iter()
                    .filter(|e| !e.is_dir && e.path != preferred && is_archive(&e.file_name()))
                    .map(|e| e.path),
            ),
            Err(e) => tracing::debug!("Cannot list {}: {}", lib.display(), e),
        }
        jars
    }
}

fn is_archive(name: &str) -> bool {
    name.ends_with(".jar") || name.ends_with(".zip")
}

fn plugin_xml(jar: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(jar))?;
    let mut entry = archive.by_name("META-INF/plugin.xml")?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Text of the first `<version>` element.
pub fn version_from_plugin_xml(xml: &str) -> Option<String> {
    const START: &str = "<version>";
    let start = xml.find(START)? + START.len();
    let end = start + xml[start..].find("</version>")?;
    Some(xml[start..end].trim().to_string())
}
