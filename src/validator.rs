//! Per-installation validators and the factory that creates them.
//!
//! [`installed_validators`] runs discovery for the current platform and
//! returns one [`Validator`] per installation. Discovery failures never
//! escape as errors: on macOS an unreadable applications directory turns
//! into a single [`ScanFailureValidator`].
//!
//! # Example
//!
//! ```
//! use ideprobe::discovery::ProbeContext;
//! use ideprobe::platform::Platform;
//! use ideprobe::sys::MemoryFs;
//! use ideprobe::validation::ValidationType;
//! use ideprobe::validator::{installed_validators, Validator};
//! use std::sync::Arc;
//!
//! let fs = MemoryFs::new()
//!     .with_file("/home/dev/.IdeaIC2021.1/system/.home", "/opt/idea")
//!     .with_dir("/opt/idea");
//! let ctx = ProbeContext::new(Platform::Linux, Arc::new(fs)).with_home("/home/dev");
//!
//! let validators = installed_validators(&ctx);
//! assert_eq!(validators.len(), 1);
//! assert_eq!(validators[0].validate().status, ValidationType::Partial);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::discovery::{home, macos, Installation, ProbeContext};
use crate::messages;
use crate::platform::Platform;
use crate::plugins::{IdePlugins, REQUIRED_PLUGINS};
use crate::sys::FileSystem;
use crate::validation::{has_errors, ValidationMessage, ValidationResult};
use crate::version::{below_minimum, Version};

/// Oldest IntelliJ release the plugins support.
pub const MIN_IDEA_VERSION: Version = Version::new(2017, 1, 0);

/// A single doctor check.
///
/// Validators are independent of each other and may be run concurrently.
pub trait Validator: Send + Sync {
    /// Title shown above the result.
    fn title(&self) -> &str;

    /// Run the check.
    fn validate(&self) -> ValidationResult;
}

/// Validates one discovered IntelliJ installation.
pub struct InstallationValidator {
    installation: Installation,
    fs: Arc<dyn FileSystem>,
}

impl InstallationValidator {
    /// Create a validator reading through `fs`.
    pub fn new(installation: Installation, fs: Arc<dyn FileSystem>) -> Self {
        Self { installation, fs }
    }

    /// The IDE version, `"unknown"` if unreadable.
    pub fn version(&self) -> &str {
        self.installation.version(self.fs.as_ref())
    }

    /// The plugins directory, if it could be determined.
    pub fn plugins_path(&self) -> Option<&Path> {
        self.installation.plugins_path(self.fs.as_ref())
    }
}

impl Validator for InstallationValidator {
    fn title(&self) -> &str {
        self.installation.title()
    }

    fn validate(&self) -> ValidationResult {
        let version = self.version();
        let mut messages = Vec::new();

        let Some(plugins_path) = self.plugins_path() else {
            messages.push(ValidationMessage::error(messages::invalid_version()));
            return ValidationResult::from_messages(messages, messages::status_info(version));
        };

        messages.push(ValidationMessage::info(messages::install_location(
            self.installation.install_path(),
        )));

        let plugins = IdePlugins::new(self.fs.as_ref(), plugins_path);
        for plugin in REQUIRED_PLUGINS {
            plugins.validate(plugin, &mut messages);
        }

        if below_minimum(version, Some(MIN_IDEA_VERSION)) {
            messages.push(ValidationMessage::error(messages::minimum_version(
                &MIN_IDEA_VERSION,
            )));
        }

        if has_errors(&messages) {
            messages.push(ValidationMessage::hint(messages::plugin_info()));
        }

        ValidationResult::from_messages(messages, messages::status_info(version))
    }
}

/// Stands in for all installations when they could not be enumerated.
#[derive(Debug, Clone)]
pub struct ScanFailureValidator {
    failure: String,
}

impl ScanFailureValidator {
    /// Create a validator reporting `failure`.
    pub fn new(failure: impl Into<String>) -> Self {
        Self {
            failure: failure.into(),
        }
    }
}

impl Validator for ScanFailureValidator {
    fn title(&self) -> &str {
        messages::unknown_result_title()
    }

    fn validate(&self) -> ValidationResult {
        ValidationResult::missing(vec![ValidationMessage::error(self.failure.clone())])
    }
}

/// Discover installations for the context's platform and return one
/// validator per installation.
///
/// Unsupported platforms yield no validators.
pub fn installed_validators(ctx: &ProbeContext) -> Vec<Box<dyn Validator>> {
    let installations: Vec<Installation> = match ctx.platform {
        Platform::Linux | Platform::Windows => home::discover(ctx)
            .into_iter()
            .map(Installation::Home)
            .collect(),
        Platform::MacOS => match macos::discover(ctx) {
            Ok(bundles) => bundles.into_iter().map(Installation::Bundle).collect(),
            Err(e) => {
                tracing::warn!("Scanning for IntelliJ bundles failed: {}", e);
                return vec![Box::new(ScanFailureValidator::new(e.to_string()))];
            }
        },
        Platform::Other => {
            tracing::debug!("No IntelliJ layout known for {}", ctx.platform.name());
            Vec::new()
        }
    };

    installations
        .into_iter()
        .map(|installation| {
            Box::new(InstallationValidator::new(installation, Arc::clone(&ctx.fs)))
                as Box<dyn Validator>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{BundleInstallation, HomeInstallation, ProductId};
    use crate::sys::MemoryFs;
    use crate::validation::{Severity, ValidationType};
    use std::path::PathBuf;

    fn home_validator(version: &str, fs: MemoryFs) -> InstallationValidator {
        let installation = Installation::Home(HomeInstallation {
            product: ProductId::IdeaIC,
            install_path: PathBuf::from("/opt/idea"),
            version: version.to_string(),
            plugins_path: PathBuf::from("/plugins"),
        });
        InstallationValidator::new(installation, Arc::new(fs))
    }

    fn all_plugins() -> MemoryFs {
        MemoryFs::new()
            .with_dir("/plugins/flutter-intellij")
            .with_dir("/plugins/Dart")
    }

    #[test]
    fn all_plugins_present_is_installed() {
        let result = home_validator("2021.1", all_plugins()).validate();
        assert_eq!(result.status, ValidationType::Installed);
        assert_eq!(
            result.messages,
            vec![ValidationMessage::info("IntelliJ at /opt/idea")]
        );
        assert_eq!(result.status_info.as_deref(), Some("version 2021.1"));
    }

    #[test]
    fn missing_plugins_are_errors_with_hint() {
        let result = home_validator("2021.1", MemoryFs::new().with_dir("/plugins")).validate();
        assert_eq!(result.status, ValidationType::Partial);

        let severities: Vec<Severity> = result.messages.iter().map(|m| m.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Info,
                Severity::Error,
                Severity::Error,
                Severity::Hint
            ]
        );
        assert!(result.messages[1].text.starts_with("Flutter"));
        assert!(result.messages[2].text.starts_with("Dart"));
    }

    #[test]
    fn old_ide_is_flagged() {
        let result = home_validator("2016.3", all_plugins()).validate();
        assert_eq!(result.status, ValidationType::Partial);
        assert!(result
            .errors()
            .any(|m| m.text.contains(&MIN_IDEA_VERSION.to_string())));
        assert_eq!(result.messages.last().unwrap().severity, Severity::Hint);
    }

    #[test]
    fn unparseable_ide_version_skips_gate() {
        let result = home_validator("unknown", all_plugins()).validate();
        assert_eq!(result.status, ValidationType::Installed);
    }

    #[test]
    fn unresolved_plugins_path_reports_single_error() {
        let fs = MemoryFs::new().with_file(
            "/Applications/IntelliJ IDEA.app/Contents/Info.plist",
            "<dict><key>CFBundleShortVersionString</key><string>2020</string></dict>",
        );
        let installation = Installation::Bundle(BundleInstallation::new(
            ProductId::IntelliJIdea,
            PathBuf::from("/Applications/IntelliJ IDEA.app"),
            Some(PathBuf::from("/Users/dev")),
        ));
        let result = InstallationValidator::new(installation, Arc::new(fs)).validate();

        assert_eq!(result.status, ValidationType::Partial);
        assert_eq!(
            result.messages,
            vec![ValidationMessage::error("Invalid IntelliJ version number.")]
        );
        assert_eq!(result.status_info.as_deref(), Some("version 2020"));
    }

    #[test]
    fn scan_failure_is_missing() {
        let validator = ScanFailureValidator::new("Permission denied: /Applications");
        let result = validator.validate();
        assert_eq!(result.status, ValidationType::Missing);
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].text.contains("Permission denied"));
        assert_eq!(validator.title(), "Cannot determine if IntelliJ is installed");
    }

    #[test]
    fn factory_on_unsupported_platform_is_empty() {
        let fs = MemoryFs::new()
            .with_file("/home/dev/.IdeaIC2021.1/system/.home", "/opt/idea")
            .with_dir("/opt/idea");
        let ctx = ProbeContext::new(Platform::Other, Arc::new(fs)).with_home("/home/dev");
        assert!(installed_validators(&ctx).is_empty());
    }

    #[test]
    fn factory_on_macos_reports_scan_failure_only() {
        let fs = MemoryFs::new()
            .with_dir("/Applications/IntelliJ IDEA.app")
            .with_dir("/Users/dev/Applications")
            .with_denied("/Users/dev/Applications");
        let ctx = ProbeContext::new(Platform::MacOS, Arc::new(fs)).with_home("/Users/dev");

        let validators = installed_validators(&ctx);
        assert_eq!(validators.len(), 1);
        let result = validators[0].validate();
        assert_eq!(result.status, ValidationType::Missing);
        assert!(result.messages[0].text.contains("Permission denied"));
    }

    #[test]
    fn validators_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InstallationValidator>();
        assert_send_sync::<ScanFailureValidator>();
    }
}
