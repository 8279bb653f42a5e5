//! macOS discovery.
//!
//! IntelliJ installs as an application bundle (`IntelliJ IDEA CE.app`,
//! `IntelliJ IDEA.app`, ...) either directly in an applications directory
//! or one level down when managed by JetBrains Toolbox
//! (`~/Applications/JetBrains Toolbox/IntelliJ IDEA CE.app`).
//!
//! A scan is all-or-nothing: any I/O error while listing the scan roots
//! fails the whole scan, and the caller reports that single failure
//! instead of a partial list of bundles.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::{ProbeContext, ProductId};
use crate::sys::plist::{self, SHORT_VERSION_KEY, TOOLBOX_APP_KEY};
use crate::sys::{DirEntry, FileSystem};

/// Version reported when `Info.plist` has none.
pub const UNKNOWN_VERSION: &str = "unknown";

/// An IntelliJ application bundle.
///
/// Version and plugins directory are resolved on first use and cached;
/// the plugins directory depends on the version, so the version is always
/// resolved first.
#[derive(Debug)]
pub struct BundleInstallation {
    pub product: ProductId,
    /// Path of the `.app` bundle.
    pub bundle_path: PathBuf,
    home: Option<PathBuf>,
    version: OnceLock<String>,
    plugins_path: OnceLock<Option<PathBuf>>,
}

impl BundleInstallation {
    /// A bundle whose version and plugins path are not resolved yet.
    ///
    /// Without a home directory only the Toolbox override can locate the
    /// plugins directory.
    pub fn new(product: ProductId, bundle_path: PathBuf, home: Option<PathBuf>) -> Self {
        Self {
            product,
            bundle_path,
            home,
            version: OnceLock::new(),
            plugins_path: OnceLock::new(),
        }
    }

    fn info_plist(&self) -> PathBuf {
        self.bundle_path.join("Contents").join("Info.plist")
    }

    /// `CFBundleShortVersionString` from the bundle, or `"unknown"`.
    pub fn version(&self, fs: &dyn FileSystem) -> &str {
        self.version.get_or_init(|| {
            plist::string_value(fs, &self.info_plist(), SHORT_VERSION_KEY)
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
        })
    }

    /// The plugins directory, or `None` if the version is not at least
    /// `major.minor` or the home directory is unknown.
    ///
    /// Resolution order:
    /// 1. `JetBrainsToolboxApp` in `Info.plist`, with `.plugins` appended
    /// 2. `~/Library/Application Support/JetBrains/<id><major>.<minor>/plugins`
    /// 3. `~/Library/Application Support/<id><major>.<minor>` when (2) does
    ///    not exist (layout before 2020.1)
    pub fn plugins_path(&self, fs: &dyn FileSystem) -> Option<&Path> {
        self.plugins_path
            .get_or_init(|| self.resolve_plugins_path(fs))
            .as_deref()
    }

    fn resolve_plugins_path(&self, fs: &dyn FileSystem) -> Option<PathBuf> {
        let version = self.version(fs);
        if let Some(toolbox) = plist::string_value(fs, &self.info_plist(), TOOLBOX_APP_KEY) {
            return Some(PathBuf::from(format!("{}.plugins", toolbox)));
        }

        let mut parts = version.split('.');
        let (Some(major), Some(minor)) = (parts.next(), parts.next()) else {
            tracing::debug!(
                "Cannot derive plugins path from version '{}' of {}",
                version,
                self.bundle_path.display()
            );
            return None;
        };
        let settings_name = format!("{}{}.{}", self.product.id(), major, minor);

        let Some(home) = &self.home else {
            tracing::debug!(
                "Home directory unknown; no plugins path for {}",
                self.bundle_path.display()
            );
            return None;
        };
        let support = home.join("Library").join("Application Support");
        let plugins = support
            .join("JetBrains")
            .join(&settings_name)
            .join("plugins");
        if fs.is_dir(&plugins) {
            Some(plugins)
        } else {
            Some(support.join(settings_name))
        }
    }
}

/// Scan the context's application directories for IntelliJ bundles.
///
/// Scan roots that do not exist are skipped. Any error listing an
/// existing directory aborts the scan.
pub fn discover(ctx: &ProbeContext) -> io::Result<Vec<BundleInstallation>> {
    let fs = ctx.fs.as_ref();
    let home = ctx.home.as_deref();
    let mut found = Vec::new();

    for root in ctx.application_dirs() {
        if !fs.is_dir(&root) {
            tracing::debug!("Skipping missing application dir {}", root.display());
            continue;
        }
        for entry in fs.read_dir(&root)?.iter().filter(|e| e.is_dir) {
            check_for_bundle(entry, home, &mut found);
            if !entry.file_name().ends_with(".app") {
                for nested in fs.read_dir(&entry.path)?.iter().filter(|e| e.is_dir) {
                    check_for_bundle(nested, home, &mut found);
                }
            }
        }
    }
    Ok(found)
}

fn check_for_bundle(
    entry: &DirEntry,
    home: Option<&Path>,
    found: &mut Vec<BundleInstallation>,
) {
    if let Some(product) = ProductId::from_bundle_name(&entry.file_name()) {
        tracing::debug!("Found {} at {}", product.title(), entry.path.display());
        found.push(BundleInstallation::new(
            product,
            entry.path.clone(),
            home.map(Path::to_path_buf),
        ));
    }
}
