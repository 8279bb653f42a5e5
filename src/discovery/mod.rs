//! Discovery of installed IntelliJ IDEA editions.
//!
//! Each platform stores installations differently, so discovery is split
//! per layout:
//!
//! - [`home`] - Linux and Windows, via per-version settings directories
//!   that hold a `.home` marker naming the install location
//! - [`macos`] - application bundles under `/Applications` and
//!   `~/Applications`
//!
//! Both produce an [`Installation`]. Linux and Windows installations know
//! their version and plugins directory up front; macOS bundles resolve
//! them lazily from `Info.plist` and cache the answer.
//!
//! # Example
//!
//! ```
//! use ideprobe::discovery::{home, ProbeContext};
//! use ideprobe::platform::Platform;
//! use ideprobe::sys::MemoryFs;
//! use std::sync::Arc;
//!
//! let fs = MemoryFs::new()
//!     .with_file("/home/dev/.IdeaIC2019.3/system/.home", "/opt/idea-ic")
//!     .with_dir("/opt/idea-ic");
//! let ctx = ProbeContext::new(Platform::Linux, Arc::new(fs)).with_home("/home/dev");
//!
//! let found = home::discover(&ctx);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].version, "2019.3");
//! ```

pub mod home;
pub mod macos;

pub use home::HomeInstallation;
pub use macos::BundleInstallation;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::platform::Platform;
use crate::sys::{FileSystem, LocalFs};

/// An IntelliJ IDEA edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductId {
    /// Community Edition.
    IdeaIC,
    /// Ultimate Edition.
    IntelliJIdea,
}

/// Product ids in the order directories are matched against them.
pub const PRODUCTS: &[ProductId] = &[ProductId::IntelliJIdea, ProductId::IdeaIC];

/// macOS bundle names and the product each one installs.
const BUNDLE_NAMES: &[(&str, ProductId)] = &[
    ("IntelliJ IDEA.app", ProductId::IntelliJIdea),
    ("IntelliJ IDEA Ultimate.app", ProductId::IntelliJIdea),
    ("IntelliJ IDEA CE.app", ProductId::IdeaIC),
];

impl ProductId {
    /// Identifier used in settings directory names, e.g. `IdeaIC2019.3`.
    pub fn id(&self) -> &'static str {
        match self {
            ProductId::IdeaIC => "IdeaIC",
            ProductId::IntelliJIdea => "IntelliJIdea",
        }
    }

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            ProductId::IdeaIC => "IntelliJ IDEA Community Edition",
            ProductId::IntelliJIdea => "IntelliJ IDEA Ultimate Edition",
        }
    }

    /// Look up the product for a macOS bundle directory name.
    pub fn from_bundle_name(name: &str) -> Option<Self> {
        BUNDLE_NAMES
            .iter()
            .find(|(bundle, _)| *bundle == name)
            .map(|(_, product)| *product)
    }
}

/// Where and how to look for installations.
///
/// Built once per run from the real environment ([`ProbeContext::detect`])
/// or assembled by hand in tests.
#[derive(Clone)]
pub struct ProbeContext {
    /// Platform whose layout rules apply.
    pub platform: Platform,
    /// The user's home directory.
    pub home: Option<PathBuf>,
    /// `%LOCALAPPDATA%` (Windows only).
    pub local_app_data: Option<PathBuf>,
    /// `%APPDATA%` (Windows only).
    pub app_data: Option<PathBuf>,
    /// macOS scan roots; `None` means `/Applications` and `~/Applications`.
    pub application_dirs: Option<Vec<PathBuf>>,
    /// Filesystem all reads go through.
    pub fs: Arc<dyn FileSystem>,
}

impl std::fmt::Debug for ProbeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeContext")
            .field("platform", &self.platform)
            .field("home", &self.home)
            .field("local_app_data", &self.local_app_data)
            .field("app_data", &self.app_data)
            .field("application_dirs", &self.application_dirs)
            .finish_non_exhaustive()
    }
}

impl ProbeContext {
    /// An empty context: no known directories.
    pub fn new(platform: Platform, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            platform,
            home: None,
            local_app_data: None,
            app_data: None,
            application_dirs: None,
            fs,
        }
    }

    /// Context for the machine we are running on.
    pub fn detect() -> Self {
        let platform = Platform::current();
        let mut ctx = Self::new(platform, Arc::new(LocalFs::new()));
        ctx.home = dirs::home_dir();
        if platform == Platform::Windows {
            ctx.local_app_data = dirs::data_local_dir();
            ctx.app_data = dirs::config_dir();
        }
        ctx
    }

    /// Set the home directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Set `%LOCALAPPDATA%` and `%APPDATA%`.
    pub fn with_app_data(
        mut self,
        local_app_data: impl Into<PathBuf>,
        app_data: impl Into<PathBuf>,
    ) -> Self {
        self.local_app_data = Some(local_app_data.into());
        self.app_data = Some(app_data.into());
        self
    }

    /// Replace the macOS scan roots.
    pub fn with_application_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.application_dirs = Some(dirs);
        self
    }

    /// macOS directories scanned for application bundles.
    pub fn application_dirs(&self) -> Vec<PathBuf> {
        if let Some(dirs) = &self.application_dirs {
            return dirs.clone();
        }
        let mut dirs = vec![PathBuf::from("/Applications")];
        if let Some(home) = &self.home {
            dirs.push(home.join("Applications"));
        }
        dirs
    }
}

/// One discovered installation.
#[derive(Debug)]
pub enum Installation {
    /// Linux or Windows install found through a settings directory.
    Home(HomeInstallation),
    /// macOS application bundle.
    Bundle(BundleInstallation),
}

impl Installation {
    /// Which edition this is.
    pub fn product(&self) -> ProductId {
        match self {
            Installation::Home(install) => install.product,
            Installation::Bundle(install) => install.product,
        }
    }

    /// Display title of the edition.
    pub fn title(&self) -> &'static str {
        self.product().title()
    }

    /// Where the IDE is installed.
    pub fn install_path(&self) -> &Path {
        match self {
            Installation::Home(install) => &install.install_path,
            Installation::Bundle(install) => &install.bundle_path,
        }
    }

    /// The IDE version string, `"unknown"` if it could not be read.
    pub fn version(&self, fs: &dyn FileSystem) -> &str {
        match self {
            Installation::Home(install) => &install.version,
            Installation::Bundle(install) => install.version(fs),
        }
    }

    /// The plugins directory, `None` if it could not be determined.
    pub fn plugins_path(&self, fs: &dyn FileSystem) -> Option<&Path> {
        match self {
            Installation::Home(install) => Some(&install.plugins_path),
            Installation::Bundle(install) => install.plugins_path(fs),
        }
    }
}
