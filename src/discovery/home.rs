//! Linux and Windows discovery.
//!
//! IntelliJ keeps one settings directory per product version and writes
//! the install location into a `.home` marker inside it. Three layouts
//! exist:
//!
//! | Layout              | Settings directory                      | Marker          | Plugins                                   |
//! |---------------------|-----------------------------------------|-----------------|-------------------------------------------|
//! | Linux 2020.1+       | `~/.cache/JetBrains/<id><ver>`          | `.home`         | `~/.local/share/JetBrains/<id><ver>`      |
//! | Windows 2020.1+     | `%LOCALAPPDATA%\JetBrains\<id><ver>`    | `.home`         | `%APPDATA%\JetBrains\<id><ver>\plugins`   |
//! | Before 2020.1       | `~/.<id><ver>`                          | `system/.home`  | `~/.<id><ver>/config/plugins`             |
//!
//! Settings directories of uninstalled versions linger, so a missing or
//! unreadable marker, or a marker pointing at a directory that no longer
//! exists, is skipped without a message.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::{ProbeContext, ProductId, PRODUCTS};
use crate::platform::Platform;
use crate::sys::FileSystem;
use crate::version::compare_raw;

/// An installation found through its settings directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeInstallation {
    pub product: ProductId,
    /// Install location read from the `.home` marker.
    pub install_path: PathBuf,
    /// Raw version suffix of the settings directory name.
    pub version: String,
    pub plugins_path: PathBuf,
}

/// Where to look for settings directories and how to read them.
struct Layout {
    /// Directory whose children are settings directories.
    root: PathBuf,
    /// Text before the product id in a settings directory name.
    prefix: &'static str,
    /// Marker file, relative to the settings directory.
    marker: &'static [&'static str],
    /// Plugins directory for a settings directory and its name.
    plugins: Box<dyn Fn(&Path, &str) -> PathBuf>,
}

fn layouts(ctx: &ProbeContext) -> Vec<Layout> {
    let mut layouts = Vec::new();
    let Some(home) = ctx.home.clone() else {
        return layouts;
    };

    match ctx.platform {
        Platform::Linux => {
            let data = home.join(".local").join("share").join("JetBrains");
            layouts.push(Layout {
                root: home.join(".cache").join("JetBrains"),
                prefix: "",
                marker: &[".home"],
                plugins: Box::new(move |_: &Path, name: &str| data.join(name)),
            });
        }
        Platform::Windows => {
            if let (Some(local), Some(roaming)) = (&ctx.local_app_data, &ctx.app_data) {
                let roaming = roaming.join("JetBrains");
                layouts.push(Layout {
                    root: local.join("JetBrains"),
                    prefix: "",
                    marker: &[".home"],
                    plugins: Box::new(move |_: &Path, name: &str| {
                        roaming.join(name).join("plugins")
                    }),
                });
            }
        }
        Platform::MacOS | Platform::Other => {}
    }

    layouts.push(Layout {
        root: home,
        prefix: ".",
        marker: &["system", ".home"],
        plugins: Box::new(|dir: &Path, _: &str| dir.join("config").join("plugins")),
    });
    layouts
}

/// Discover installations under the context's home (and app data)
/// directories.
///
/// Returns an empty list when the home directory is unknown. When two
/// settings directories point at the same install path, only the one with
/// the greater version survives.
pub fn discover(ctx: &ProbeContext) -> Vec<HomeInstallation> {
    let mut found = Vec::new();
    if ctx.home.is_none() {
        tracing::debug!("Home directory unknown; skipping IntelliJ discovery");
        return found;
    }

    for layout in layouts(ctx) {
        scan_layout(ctx.fs.as_ref(), &layout, &mut found);
    }
    found
}

fn scan_layout(fs: &dyn FileSystem, layout: &Layout, found: &mut Vec<HomeInstallation>) {
    let entries = match fs.read_dir(&layout.root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping {}: {}", layout.root.display(), e);
            return;
        }
    };

    for entry in entries.iter().filter(|e| e.is_dir) {
        let name = entry.file_name();
        let Some((product, version)) = match_settings_dir(&name, layout.prefix) else {
            continue;
        };

        let marker = layout
            .marker
            .iter()
            .fold(entry.path.clone(), |path, part| path.join(part));
        let install_path = match fs.read_to_string(&marker) {
            Ok(content) => PathBuf::from(content.trim()),
            Err(e) => {
                tracing::debug!("No install marker at {}: {}", marker.display(), e);
                continue;
            }
        };
        if !fs.is_dir(&install_path) {
            tracing::debug!(
                "{} points at missing install {}",
                marker.display(),
                install_path.display()
            );
            continue;
        }

        let name_without_prefix = &name[layout.prefix.len()..];
        let install = HomeInstallation {
            product,
            install_path,
            version: version.to_string(),
            plugins_path: (layout.plugins)(&entry.path, name_without_prefix),
        };
        tracing::debug!(
            "Found {} {} at {}",
            product.title(),
            install.version,
            install.install_path.display()
        );
        add_deduplicated(found, install);
    }
}

/// Split a settings directory name into product and version suffix.
///
/// `prefix` is `"."` for the pre-2020 home layout and empty otherwise.
pub fn match_settings_dir<'a>(name: &'a str, prefix: &str) -> Option<(ProductId, &'a str)> {
    let rest = name.strip_prefix(prefix)?;
    PRODUCTS.iter().find_map(|product| {
        let version = rest.strip_prefix(product.id())?;
        (!version.is_empty()).then_some((*product, version))
    })
}

/// Add `install`, or replace an existing entry with the same install path
/// if `install` has the greater version.
pub fn add_deduplicated(found: &mut Vec<HomeInstallation>, install: HomeInstallation) {
    match found
        .iter_mut()
        .find(|other| other.install_path == install.install_path)
    {
        Some(other) => {
            if compare_raw(&install.version, &other.version) == Ordering::Greater {
                *other = install;
            }
        }
        None => found.push(install),
    }
}
