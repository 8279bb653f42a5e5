//! Property-list value extraction.
//!
//! Only XML property lists are understood, and only top-level
//! `<key>…</key><string>…</string>` pairs. That covers the `Info.plist`
//! keys the probe reads (`CFBundleShortVersionString`,
//! `JetBrainsToolboxApp`). Binary plists yield `None`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::FileSystem;

/// Bundle version key in `Info.plist`.
pub const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";

/// Key set by JetBrains Toolbox pointing at the managing app location.
pub const TOOLBOX_APP_KEY: &str = "JetBrainsToolboxApp";

static STRING_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<key>\s*([^<]*?)\s*</key>\s*<string>([^<]*)</string>")
        .expect("STRING_ENTRY must compile")
});

/// Read the string value for `key` from the plist at `path`.
///
/// Returns `None` when the file is missing, unreadable, binary, or has no
/// string value for the key.
pub fn string_value(fs: &dyn FileSystem, path: &Path, key: &str) -> Option<String> {
    let content = match fs.read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Cannot read plist {}: {}", path.display(), e);
            return None;
        }
    };
    parse_string_value(&content, key)
}

/// Find the string value for `key` in XML plist text.
pub fn parse_string_value(content: &str, key: &str) -> Option<String> {
    if content.starts_with("bplist") {
        tracing::debug!("Binary plist is not supported");
        return None;
    }
    STRING_ENTRY
        .captures_iter(content)
        .find(|caps| &caps[1] == key)
        .map(|caps| unescape(caps[2].trim()))
}

fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::MemoryFs;

    const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleName</key>
    <string>IntelliJ IDEA</string>
    <key>CFBundleShortVersionString</key>
    <string>2021.1.3</string>
    <key>JetBrainsToolboxApp</key>
    <string>/Users/dev/Library/Application Support/JetBrains/Toolbox/apps/IDEA-U/ch-0/211.7628.21</string>
    <key>LSMinimumSystemVersion</key>
    <string>10.13</string>
</dict>
</plist>
"#;

    #[test]
    fn finds_short_version() {
        assert_eq!(
            parse_string_value(INFO_PLIST, SHORT_VERSION_KEY),
            Some("2021.1.3".to_string())
        );
    }

    #[test]
    fn finds_toolbox_key() {
        let value = parse_string_value(INFO_PLIST, TOOLBOX_APP_KEY).unwrap();
        assert!(value.ends_with("211.7628.21"));
    }

    #[test]
    fn missing_key_is_none() {
        assert_eq!(parse_string_value(INFO_PLIST, "CFBundleVersion"), None);
    }

    #[test]
    fn non_string_value_is_skipped() {
        let content = "<dict><key>CFBundleShortVersionString</key><true/></dict>";
        assert_eq!(parse_string_value(content, SHORT_VERSION_KEY), None);
    }

    #[test]
    fn entities_are_decoded() {
        let content = "<key>Name</key><string>A &amp; B</string>";
        assert_eq!(parse_string_value(content, "Name"), Some("A & B".to_string()));
    }

    #[test]
    fn binary_plist_is_none() {
        assert_eq!(parse_string_value("bplist00\u{1}", SHORT_VERSION_KEY), None);
    }

    #[test]
    fn string_value_reads_through_filesystem() {
        let fs = MemoryFs::new().with_file("/App.app/Contents/Info.plist", INFO_PLIST);
        assert_eq!(
            string_value(
                &fs,
                Path::new("/App.app/Contents/Info.plist"),
                SHORT_VERSION_KEY
            ),
            Some("2021.1.3".to_string())
        );
        assert_eq!(
            string_value(&fs, Path::new("/Other.app/Contents/Info.plist"), SHORT_VERSION_KEY),
            None
        );
    }
}
