//! End-to-end discovery and validation against real directory trees.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use ideprobe::discovery::ProbeContext;
use ideprobe::platform::Platform;
use ideprobe::sys::{LocalFs, MemoryFs};
use ideprobe::validation::{Severity, ValidationType};
use ideprobe::validator::{installed_validators, Validator};
use tempfile::TempDir;

fn ctx(platform: Platform, home: &Path) -> ProbeContext {
    ProbeContext::new(platform, Arc::new(LocalFs::new())).with_home(home)
}

fn write_marker(settings_dir: &Path, marker: &[&str], install: &Path) {
    let path = marker
        .iter()
        .fold(settings_dir.to_path_buf(), |path, part| path.join(part));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::create_dir_all(install).unwrap();
    fs::write(path, format!("{}\n", install.display())).unwrap();
}

fn flutter_jar(version: &str) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file("META-INF/plugin.xml", options).unwrap();
        write!(writer, "<idea-plugin><version>{}</version></idea-plugin>", version).unwrap();
        writer.finish().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn legacy_install_without_plugins_is_partial() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let install = home.join("opt").join("idea-IC-211");
    write_marker(&home.join(".IdeaIC2021.1"), &["system", ".home"], &install);

    let validators = installed_validators(&ctx(Platform::Linux, home));
    assert_eq!(validators.len(), 1);
    assert_eq!(validators[0].title(), "IntelliJ IDEA Community Edition");

    let result = validators[0].validate();
    assert_eq!(result.status, ValidationType::Partial);
    assert_eq!(result.status_info.as_deref(), Some("version 2021.1"));

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
    assert!(result.messages[0].text.contains(&install.display().to_string()));
}

#[test]
fn complete_xdg_install_is_installed() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let install = home.join("opt").join("idea-IU-223");
    write_marker(
        &home.join(".cache").join("JetBrains").join("IntelliJIdea2022.3"),
        &[".home"],
        &install,
    );
    let plugins = home
        .join(".local")
        .join("share")
        .join("JetBrains")
        .join("IntelliJIdea2022.3");
    let flutter_lib = plugins.join("flutter-intellij").join("lib");
    fs::create_dir_all(&flutter_lib).unwrap();
    fs::write(flutter_lib.join("flutter-intellij.jar"), flutter_jar("72.1.4")).unwrap();
    fs::create_dir_all(plugins.join("Dart")).unwrap();

    let validators = installed_validators(&ctx(Platform::Linux, home));
    assert_eq!(validators.len(), 1);
    assert_eq!(validators[0].title(), "IntelliJ IDEA Ultimate Edition");

    let result = validators[0].validate();
    assert_eq!(result.status, ValidationType::Installed);
    assert_eq!(result.messages.len(), 1);
}

#[test]
fn outdated_flutter_plugin_is_reported() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let settings = home.join(".IdeaIC2019.3");
    write_marker(&settings, &["system", ".home"], &home.join("idea"));
    let plugins = settings.join("config").join("plugins");
    fs::create_dir_all(plugins.join("Dart")).unwrap();
    fs::write(plugins.join("flutter-intellij.jar"), flutter_jar("15.2.1")).unwrap();

    let result = installed_validators(&ctx(Platform::Linux, home))[0].validate();
    assert_eq!(result.status, ValidationType::Partial);
    let errors: Vec<&str> = result.errors().map(|m| m.text.as_str()).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("15.2.1"));
    assert!(errors[0].contains("16.0.0"));
}

#[test]
fn stale_settings_directories_are_skipped() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    // Marker pointing at a removed install.
    let stale = home.join(".IdeaIC2018.1").join("system");
    fs::create_dir_all(&stale).unwrap();
    fs::write(stale.join(".home"), home.join("gone").display().to_string()).unwrap();
    // Settings directory without a marker.
    fs::create_dir_all(home.join(".IntelliJIdea2019.2")).unwrap();
    // Unrelated dotfile.
    fs::create_dir_all(home.join(".AndroidStudio4.1")).unwrap();

    assert!(installed_validators(&ctx(Platform::Linux, home)).is_empty());
}

#[test]
fn duplicate_install_keeps_newest_settings() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let install = home.join("idea");
    write_marker(&home.join(".IdeaIC2019.2"), &["system", ".home"], &install);
    write_marker(&home.join(".IdeaIC2019.10"), &["system", ".home"], &install);

    let validators = installed_validators(&ctx(Platform::Linux, home));
    assert_eq!(validators.len(), 1);
    assert_eq!(
        validators[0].validate().status_info.as_deref(),
        Some("version 2019.10")
    );
}

#[test]
fn windows_app_data_layout() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("Users").join("dev");
    let local = temp.path().join("Local");
    let roaming = temp.path().join("Roaming");
    fs::create_dir_all(&home).unwrap();
    write_marker(
        &local.join("JetBrains").join("IdeaIC2021.2"),
        &[".home"],
        &temp.path().join("Program Files").join("IDEA"),
    );
    let plugins = roaming.join("JetBrains").join("IdeaIC2021.2").join("plugins");
    fs::create_dir_all(plugins.join("flutter-intellij")).unwrap();
    fs::create_dir_all(plugins.join("Dart")).unwrap();

    let ctx = ctx(Platform::Windows, &home).with_app_data(&local, &roaming);
    let validators = installed_validators(&ctx);
    assert_eq!(validators.len(), 1);
    assert_eq!(validators[0].validate().status, ValidationType::Installed);
}

#[test]
fn macos_bundles_in_application_dirs() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let apps = temp.path().join("Applications");
    let bundle = apps.join("IntelliJ IDEA CE.app").join("Contents");
    fs::create_dir_all(&bundle).unwrap();
    fs::write(
        bundle.join("Info.plist"),
        "<?xml version=\"1.0\"?>\n<plist version=\"1.0\">\n<dict>\n\
         \t<key>CFBundleShortVersionString</key>\n\t<string>2021.1.3</string>\n\
         </dict>\n</plist>\n",
    )
    .unwrap();
    let plugins = home
        .join("Library")
        .join("Application Support")
        .join("JetBrains")
        .join("IdeaIC2021.1")
        .join("plugins");
    fs::create_dir_all(plugins.join("flutter-intellij")).unwrap();
    fs::create_dir_all(plugins.join("Dart")).unwrap();

    let ctx = ctx(Platform::MacOS, &home).with_application_dirs(vec![apps]);
    let validators = installed_validators(&ctx);
    assert_eq!(validators.len(), 1);

    let result = validators[0].validate();
    assert_eq!(result.status, ValidationType::Installed);
    assert_eq!(result.status_info.as_deref(), Some("version 2021.1.3"));
}

#[test]
fn macos_unreadable_application_dir_is_single_missing_result() {
    let fs = MemoryFs::new()
        .with_dir("/Applications/IntelliJ IDEA.app/Contents")
        .with_dir("/Users/dev/Applications")
        .with_denied("/Users/dev/Applications");
    let ctx = ProbeContext::new(Platform::MacOS, Arc::new(fs)).with_home("/Users/dev");

    let validators = installed_validators(&ctx);
    assert_eq!(validators.len(), 1);
    assert_eq!(
        validators[0].title(),
        "Cannot determine if IntelliJ is installed"
    );
    let result = validators[0].validate();
    assert_eq!(result.status, ValidationType::Missing);
    assert_eq!(result.messages.len(), 1);
    assert_eq!(result.messages[0].severity, Severity::Error);
}
